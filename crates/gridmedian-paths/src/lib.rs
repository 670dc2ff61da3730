//! Breadth-first distance maps and shortest-path reconstruction on
//! N-dimensional maze grids.
//!
//! - **BFS** single-source distance and parent maps
//!   ([`DistanceEngine::shortest_distances`], [`shortest_distances`])
//! - **Path reconstruction** from a parent map ([`reconstruct`],
//!   [`ParentMap::path_to`])
//!
//! Movement uses Chebyshev adjacency: every cell whose coordinates each
//! differ by at most one, so 8 neighbours in 2-D and 26 in 3-D. Searches
//! go through the [`Pather`] trait; [`Grid`](gridmedian_core::Grid)
//! implements it with walls as the only obstacles.

mod bfs;
mod distance;
mod engine;
mod maps;
mod path;
mod traits;

pub use bfs::shortest_distances;
pub use distance::{chebyshev, is_adjacent};
pub use engine::DistanceEngine;
pub use maps::{DistanceMap, Parent, ParentMap, PathNode, UNREACHABLE};
pub use path::reconstruct;
pub use traits::Pather;
