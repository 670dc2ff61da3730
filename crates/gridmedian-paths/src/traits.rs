use gridmedian_core::{Coord, Grid};

/// Minimal search interface: provides neighbor enumeration.
pub trait Pather<const N: usize> {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Coord<N>, buf: &mut Vec<Coord<N>>);
}

/// Chebyshev adjacency restricted to in-bounds, non-wall cells. Targets and
/// marks are traversable.
impl<const N: usize> Pather<N> for Grid<N> {
    fn neighbors(&self, p: Coord<N>, buf: &mut Vec<Coord<N>>) {
        buf.extend(p.neighbors().filter(|&n| self.is_passable(n)));
    }
}
