//! **gridmedian-core** — core types for N-dimensional maze grids.
//!
//! This crate provides the foundational types used across the *gridmedian*
//! workspace: N-dimensional coordinates and extents, cell tags, and a dense
//! row-major grid with a plain-text rendering.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::CellTag;
pub use geom::{Coord, Extents, ExtentsIter, NeighborIter, Point, Voxel};
pub use grid::{Grid, ParseGridError};
