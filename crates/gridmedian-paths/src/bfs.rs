use gridmedian_core::{Coord, Grid};
use log::trace;

use crate::DistanceEngine;
use crate::maps::{DistanceMap, ParentMap, ROOT, UNREACHABLE};
use crate::traits::Pather;

impl<const N: usize> DistanceEngine<N> {
    /// Compute a single-source breadth-first distance map and search tree.
    ///
    /// Each step has cost 1. Neighbours are expanded in the order `pather`
    /// yields them and the queue is FIFO, so the recorded parent of each
    /// cell is deterministic. The source is reached at distance 0 with
    /// parent [`Parent::Root`](crate::Parent::Root) whatever its own tag.
    ///
    /// # Panics
    ///
    /// Panics if `source` lies outside the engine's extents.
    pub fn shortest_distances<P: Pather<N>>(
        &mut self,
        pather: &P,
        source: Coord<N>,
    ) -> (DistanceMap<N>, ParentMap<N>) {
        let Some(si) = self.extents.index(source) else {
            panic!("search source {source} outside extents {}", self.extents);
        };

        let mut dist = DistanceMap::unreached(self.extents, source);
        let mut parents = ParentMap::unreached(self.extents, source);

        self.queue.clear();
        dist.dist[si] = 0;
        parents.links[si] = ROOT;
        self.queue.push_back(si);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached = 1usize;

        while let Some(ci) = self.queue.pop_front() {
            let current_dist = dist.dist[ci];
            let cp = self.extents.coord(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.extents.index(np) else {
                    continue;
                };
                if dist.dist[ni] != UNREACHABLE {
                    continue;
                }
                dist.dist[ni] = current_dist + 1;
                parents.links[ni] = ci;
                self.queue.push_back(ni);
                reached += 1;
            }
        }

        self.nbuf = nbuf;
        trace!("bfs from {source}: reached {reached} of {} cells", self.extents.len());
        (dist, parents)
    }
}

/// One-shot breadth-first search over `grid` from `source`, treating walls
/// as obstacles.
pub fn shortest_distances<const N: usize>(
    grid: &Grid<N>,
    source: Coord<N>,
) -> (DistanceMap<N>, ParentMap<N>) {
    DistanceEngine::new(grid.extents()).shortest_distances(grid, source)
}
