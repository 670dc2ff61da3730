//! Random maze generation and total-distance minimisation.
//!
//! - [`MazeConfig`] / [`generate`]: seeded wall fill and target placement
//! - [`MazeSolver`]: the empty cell with the smallest summed distance to
//!   all targets, plus the shortest paths from it
//!
//! Enable the `parallel` feature to run the per-target searches on a rayon
//! thread pool; results are identical to the sequential solve.

pub mod config;
pub mod mapgen;
pub mod solver;

pub use config::MazeConfig;
pub use mapgen::{GenerateError, MapGen, generate};
pub use solver::{INFINITE_TOTAL, MazeSolver, Optimum};
