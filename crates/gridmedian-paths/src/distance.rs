use gridmedian_core::Coord;

/// Chebyshev (L∞) distance between two coordinates.
///
/// On a grid without walls this equals the breadth-first hop count.
#[inline]
pub fn chebyshev<const N: usize>(a: Coord<N>, b: Coord<N>) -> i32 {
    a.0.iter()
        .zip(b.0)
        .map(|(&x, y)| (x - y).abs())
        .max()
        .unwrap_or(0)
}

/// Whether `a` and `b` are distinct Chebyshev neighbours.
#[inline]
pub fn is_adjacent<const N: usize>(a: Coord<N>, b: Coord<N>) -> bool {
    chebyshev(a, b) == 1
}
