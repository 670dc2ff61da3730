//! Dense per-cell search results.
//!
//! Both maps are flat arrays indexed by the row-major position of a cell,
//! so memory grows with the grid volume rather than with the number of
//! reached cells.

use gridmedian_core::{Coord, Extents};

use crate::path::reconstruct;

/// Sentinel value meaning "unreachable" in distance maps.
pub const UNREACHABLE: u32 = u32::MAX;

/// Parent link of the search root.
pub(crate) const ROOT: usize = usize::MAX;
/// Parent link of a cell the search never reached.
pub(crate) const UNVISITED: usize = usize::MAX - 1;

/// A position with an associated hop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode<const N: usize> {
    pub pos: Coord<N>,
    pub cost: u32,
}

// ---------------------------------------------------------------------------
// DistanceMap
// ---------------------------------------------------------------------------

/// Hop counts from a single source. Cells the search did not reach hold
/// [`UNREACHABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap<const N: usize> {
    pub(crate) extents: Extents<N>,
    pub(crate) source: Coord<N>,
    pub(crate) dist: Vec<u32>,
}

impl<const N: usize> DistanceMap<N> {
    pub(crate) fn unreached(extents: Extents<N>, source: Coord<N>) -> Self {
        Self {
            extents,
            source,
            dist: vec![UNREACHABLE; extents.len()],
        }
    }

    /// The cell the search started from.
    pub fn source(&self) -> Coord<N> {
        self.source
    }

    pub fn extents(&self) -> Extents<N> {
        self.extents
    }

    /// Distance to `c`, or `None` if `c` was not reached or is out of range.
    pub fn get(&self, c: Coord<N>) -> Option<u32> {
        match self.at(c) {
            UNREACHABLE => None,
            d => Some(d),
        }
    }

    /// Distance to `c`, or [`UNREACHABLE`].
    pub fn at(&self, c: Coord<N>) -> u32 {
        match self.extents.index(c) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }

    pub fn is_reached(&self, c: Coord<N>) -> bool {
        self.at(c) != UNREACHABLE
    }

    /// Number of reached cells, the source included.
    pub fn reached_count(&self) -> usize {
        self.dist.iter().filter(|&&d| d != UNREACHABLE).count()
    }

    /// Reached cells with their distances, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = PathNode<N>> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d != UNREACHABLE)
            .map(|(i, &d)| PathNode {
                pos: self.extents.coord(i),
                cost: d,
            })
    }

    /// The raw row-major distance array.
    pub fn as_slice(&self) -> &[u32] {
        &self.dist
    }
}

// ---------------------------------------------------------------------------
// ParentMap
// ---------------------------------------------------------------------------

/// Predecessor of a reached cell in the search tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent<const N: usize> {
    /// The cell is the search source and has no predecessor.
    Root,
    /// The cell was first reached from this neighbour.
    Via(Coord<N>),
}

/// Breadth-first search tree: one predecessor per reached cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentMap<const N: usize> {
    pub(crate) extents: Extents<N>,
    pub(crate) source: Coord<N>,
    pub(crate) links: Vec<usize>,
}

impl<const N: usize> ParentMap<N> {
    pub(crate) fn unreached(extents: Extents<N>, source: Coord<N>) -> Self {
        Self {
            extents,
            source,
            links: vec![UNVISITED; extents.len()],
        }
    }

    /// The root of the search tree.
    pub fn source(&self) -> Coord<N> {
        self.source
    }

    pub fn extents(&self) -> Extents<N> {
        self.extents
    }

    /// Parent of `c`; `None` if `c` was not reached.
    pub fn get(&self, c: Coord<N>) -> Option<Parent<N>> {
        let i = self.extents.index(c)?;
        match self.links[i] {
            UNVISITED => None,
            ROOT => Some(Parent::Root),
            p => Some(Parent::Via(self.extents.coord(p))),
        }
    }

    /// Whether `c` has an entry (was reached).
    pub fn contains(&self, c: Coord<N>) -> bool {
        self.get(c).is_some()
    }

    /// Shortest path from the source to `goal`, both included. Empty when
    /// `goal` was not reached.
    pub fn path_to(&self, goal: Coord<N>) -> Vec<Coord<N>> {
        reconstruct(self, self.source, goal)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use gridmedian_core::Point;

    #[test]
    fn pathnode_round_trip() {
        let node = PathNode {
            pos: Point::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode<2> = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
