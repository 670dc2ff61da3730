//! Shortest-path reconstruction from a breadth-first search tree.

use gridmedian_core::Coord;

use crate::maps::{Parent, ParentMap};

/// Rebuild the path from `start` to `goal` by walking parent links back
/// from `goal` to the search root.
///
/// Returns the cells from `start` to `goal`, both included. An empty path
/// means "unreachable": either `goal` was not reached, or the tree was
/// rooted somewhere other than `start`.
pub fn reconstruct<const N: usize>(
    parents: &ParentMap<N>,
    start: Coord<N>,
    goal: Coord<N>,
) -> Vec<Coord<N>> {
    let Some(mut link) = parents.get(goal) else {
        return Vec::new();
    };

    let mut path = vec![goal];
    while let Parent::Via(prev) = link {
        path.push(prev);
        match parents.get(prev) {
            Some(next) => link = next,
            None => return Vec::new(),
        }
    }
    path.reverse();

    if path[0] == start { path } else { Vec::new() }
}
