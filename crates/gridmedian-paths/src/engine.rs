use std::collections::VecDeque;

use gridmedian_core::{Coord, Extents};

/// Reusable breadth-first search state for one grid shape.
///
/// `DistanceEngine` owns the FIFO queue and the neighbour scratch buffer so
/// that repeated searches over the same extents (one per target during a
/// solve) do not reallocate them. Result maps are created fresh for every
/// search and handed to the caller.
#[derive(Debug, Clone)]
pub struct DistanceEngine<const N: usize> {
    pub(crate) extents: Extents<N>,
    pub(crate) queue: VecDeque<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Coord<N>>,
}

impl<const N: usize> DistanceEngine<N> {
    /// Create an engine for grids of the given extents.
    pub fn new(extents: Extents<N>) -> Self {
        Self {
            extents,
            queue: VecDeque::with_capacity(extents.len()),
            nbuf: Vec::with_capacity(3usize.pow(N as u32) - 1),
        }
    }

    /// The extents searches run over.
    #[inline]
    pub fn extents(&self) -> Extents<N> {
        self.extents
    }

    /// Switch to a different grid shape, keeping the scratch allocations.
    pub fn set_extents(&mut self, extents: Extents<N>) {
        self.extents = extents;
        self.queue.clear();
    }
}
