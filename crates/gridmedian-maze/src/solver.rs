//! Total-distance minimisation over a maze.
//!
//! The solver looks for the empty cell whose summed breadth-first distance
//! to every target is smallest (a discrete 1-median). Adjacency is
//! symmetric, so one search rooted at each target gives every candidate's
//! distance to that target: the whole solve costs one BFS per target.

use std::collections::BTreeSet;

use gridmedian_core::{CellTag, Coord, Grid};
use gridmedian_paths::{DistanceEngine, UNREACHABLE, reconstruct};
use log::{debug, warn};

/// Total distance of a cell that some target cannot reach.
pub const INFINITE_TOTAL: u64 = u64::MAX;

/// Result of [`MazeSolver::find_optimal_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Optimum<const N: usize> {
    /// The winning cell, `None` when no empty cell reaches every target.
    pub cell: Option<Coord<N>>,
    /// Summed distance to all targets, [`INFINITE_TOTAL`] when unsolvable.
    pub total: u64,
}

impl<const N: usize> Optimum<N> {
    /// The "no valid cell" result.
    pub const UNSOLVABLE: Self = Self {
        cell: None,
        total: INFINITE_TOTAL,
    };

    pub fn is_solvable(&self) -> bool {
        self.cell.is_some()
    }
}

/// Finds the cell closest in total to all targets of a maze.
///
/// The solver owns the grid for the duration of a solve. Targets and
/// candidate cells are captured in row-major order when the solver is
/// created; later annotations do not change them.
pub struct MazeSolver<const N: usize> {
    grid: Grid<N>,
    engine: DistanceEngine<N>,
    targets: Vec<Coord<N>>,
    candidates: Vec<Coord<N>>,
}

impl<const N: usize> MazeSolver<N> {
    pub fn new(grid: Grid<N>) -> Self {
        let engine = DistanceEngine::new(grid.extents());
        let targets = grid.target_cells();
        let candidates = grid.empty_cells();
        Self {
            grid,
            engine,
            targets,
            candidates,
        }
    }

    pub fn grid(&self) -> &Grid<N> {
        &self.grid
    }

    /// Give the (possibly annotated) grid back.
    pub fn into_grid(self) -> Grid<N> {
        self.grid
    }

    pub fn targets(&self) -> &[Coord<N>] {
        &self.targets
    }

    pub fn candidates(&self) -> &[Coord<N>] {
        &self.candidates
    }

    /// Summed distance from every cell to all targets, as a row-major array
    /// over the whole grid. Cells missed by any target's search hold
    /// [`INFINITE_TOTAL`].
    pub fn total_distances(&mut self) -> Vec<u64> {
        let mut sums = vec![0u64; self.grid.len()];

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let grid = &self.grid;
            let maps: Vec<_> = self
                .targets
                .par_iter()
                .map_init(
                    || DistanceEngine::new(grid.extents()),
                    |engine, &t| engine.shortest_distances(grid, t).0,
                )
                .collect();
            for dist in &maps {
                accumulate(&mut sums, dist.as_slice());
            }
        }

        #[cfg(not(feature = "parallel"))]
        for &t in &self.targets {
            let (dist, _) = self.engine.shortest_distances(&self.grid, t);
            accumulate(&mut sums, dist.as_slice());
        }

        sums
    }

    /// The empty cell minimising the summed distance to all targets.
    ///
    /// Ties go to the first candidate in row-major order. When no empty
    /// cell is reachable from every target the result is
    /// [`Optimum::UNSOLVABLE`].
    pub fn find_optimal_point(&mut self) -> Optimum<N> {
        let sums = self.total_distances();
        let extents = self.grid.extents();

        let mut best = Optimum::UNSOLVABLE;
        for &c in &self.candidates {
            let Some(i) = extents.index(c) else {
                continue;
            };
            if sums[i] < best.total {
                best = Optimum {
                    cell: Some(c),
                    total: sums[i],
                };
            }
        }

        match best.cell {
            Some(cell) => debug!(
                "optimum {cell} with total distance {} over {} targets",
                best.total,
                self.targets.len()
            ),
            None => warn!(
                "no empty cell reaches all {} targets",
                self.targets.len()
            ),
        }
        best
    }

    /// Shortest path from `point` to each target, in target order. Both
    /// endpoints are included; unreachable targets give empty paths.
    ///
    /// # Panics
    ///
    /// Panics if `point` is outside the grid.
    pub fn routes_from(&mut self, point: Coord<N>) -> Vec<Vec<Coord<N>>> {
        let (_, parents) = self.engine.shortest_distances(&self.grid, point);
        self.targets
            .iter()
            .map(|&t| reconstruct(&parents, point, t))
            .collect()
    }

    /// Empty cells lying on the shortest paths from `point` to the targets,
    /// `point` itself excluded. Cells shared by several paths appear once.
    pub fn paths_from(&mut self, point: Coord<N>) -> BTreeSet<Coord<N>> {
        let routes = self.routes_from(point);
        routes
            .into_iter()
            .flatten()
            .filter(|&c| c != point && self.grid.cell_at(c) == CellTag::Empty)
            .collect()
    }

    /// Annotate `point` with `ch`. Marks are never walls, so later searches
    /// still pass through the cell.
    pub fn mark(&mut self, point: Coord<N>, ch: char) {
        self.grid.set_cell(point, CellTag::Mark(ch));
    }

    /// Annotate every cell of [`paths_from`](Self::paths_from) with `ch`.
    pub fn mark_paths(&mut self, point: Coord<N>, ch: char) {
        for c in self.paths_from(point) {
            self.mark(c, ch);
        }
    }
}

/// Add one target's distances into the running sums. An unreached cell
/// makes its sum infinite for good.
fn accumulate(sums: &mut [u64], dist: &[u32]) {
    for (s, &d) in sums.iter_mut().zip(dist) {
        *s = if d == UNREACHABLE || *s == INFINITE_TOTAL {
            INFINITE_TOTAL
        } else {
            *s + u64::from(d)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MazeConfig;
    use gridmedian_core::{Extents, Point, Voxel};
    use gridmedian_paths::shortest_distances;

    /// Recompute every candidate's total by searching from the candidate
    /// itself, and return the first minimum in row-major order.
    fn brute_force<const N: usize>(grid: &Grid<N>) -> Optimum<N> {
        let targets = grid.target_cells();
        let mut best = Optimum::UNSOLVABLE;
        for c in grid.empty_cells() {
            let (dist, _) = shortest_distances(grid, c);
            let total = targets
                .iter()
                .map(|&t| dist.get(t).map(u64::from))
                .sum::<Option<u64>>();
            if let Some(total) = total {
                if total < best.total {
                    best = Optimum {
                        cell: Some(c),
                        total,
                    };
                }
            }
        }
        best
    }

    fn open_3x3() -> Grid<2> {
        let mut grid = Grid::filled(Extents::new([3, 3]), CellTag::Empty);
        grid.set_cell(Point::new(0, 0), CellTag::Target);
        grid.set_cell(Point::new(2, 2), CellTag::Target);
        grid
    }

    #[test]
    fn three_by_three_center() {
        let mut solver = MazeSolver::new(open_3x3());
        let best = solver.find_optimal_point();
        assert_eq!(best.cell, Some(Point::new(1, 1)));
        assert_eq!(best.total, 2);
        assert!(best.is_solvable());
    }

    #[test]
    fn three_by_three_routes() {
        let mut solver = MazeSolver::new(open_3x3());
        let center = Point::new(1, 1);
        let routes = solver.routes_from(center);
        assert_eq!(
            routes,
            vec![
                vec![center, Point::new(0, 0)],
                vec![center, Point::new(2, 2)],
            ]
        );
        let ends: BTreeSet<_> = routes.iter().filter_map(|r| r.last().copied()).collect();
        assert_eq!(ends, BTreeSet::from([Point::new(0, 0), Point::new(2, 2)]));
        // Both targets are one hop away: no empty cell lies in between.
        assert!(solver.paths_from(center).is_empty());
    }

    #[test]
    fn ties_go_to_first_in_row_major_order() {
        let grid: Grid<2> = "#########\n#*     *#\n#########".parse().unwrap();
        let mut solver = MazeSolver::new(grid);
        let best = solver.find_optimal_point();
        assert_eq!(best.cell, Some(Point::new(1, 2)));
        assert_eq!(best.total, 6);
    }

    #[test]
    fn corridor_paths_and_marks() {
        let grid: Grid<2> = "#########\n#*     *#\n#########".parse().unwrap();
        let mut solver = MazeSolver::new(grid);
        let mid = Point::new(1, 4);
        let cells: Vec<_> = solver.paths_from(mid).into_iter().collect();
        assert_eq!(
            cells,
            vec![
                Point::new(1, 2),
                Point::new(1, 3),
                Point::new(1, 5),
                Point::new(1, 6),
            ]
        );
        solver.mark(mid, 'X');
        solver.mark_paths(mid, '.');
        assert_eq!(
            solver.grid().to_string(),
            "#########\n#*..X..*#\n#########"
        );
    }

    #[test]
    fn shared_path_cells_appear_once() {
        // Both targets are reached through the same doorway at (2,3).
        let grid: Grid<2> = "\
#######
#     #
### ###
#     #
#*   *#
#######"
            .parse()
            .unwrap();
        let mut solver = MazeSolver::new(grid);
        let top = Point::new(1, 1);
        let routes = solver.routes_from(top);
        assert!(routes.iter().all(|r| r.contains(&Point::new(2, 3))));
        let cells = solver.paths_from(top);
        let interior: usize = routes.iter().map(|r| r.len() - 2).sum();
        assert!(cells.len() < interior);
        assert!(cells.contains(&Point::new(2, 3)));
        assert!(!cells.contains(&top));
        assert!(cells.iter().all(|&c| solver.grid().cell_at(c) == CellTag::Empty));
    }

    #[test]
    fn marks_do_not_change_the_optimum() {
        let mut checked = 0;
        for seed in 0..10 {
            let cfg = MazeConfig::new(Extents::new([15, 25]), 0.25, 5).with_seed(seed);
            let mut solver = MazeSolver::new(cfg.generate().unwrap());
            let before = solver.find_optimal_point();
            let Some(cell) = before.cell else {
                continue;
            };
            solver.mark(cell, 'X');
            solver.mark_paths(cell, '.');
            assert_eq!(solver.find_optimal_point(), before, "seed {seed}");
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn split_maze_is_unsolvable() {
        let grid: Grid<2> = "\
#########
#*  #  *#
#   #   #
#########"
            .parse()
            .unwrap();
        let mut solver = MazeSolver::new(grid);
        let best = solver.find_optimal_point();
        assert_eq!(best, Optimum::UNSOLVABLE);
        assert!(!best.is_solvable());
        assert!(
            solver
                .total_distances()
                .iter()
                .all(|&s| s == INFINITE_TOTAL)
        );
    }

    #[test]
    fn unreachable_candidates_are_disqualified() {
        // Both targets sit left of the wall; the right room is cut off.
        let grid: Grid<2> = "\
#########
#*  #   #
#  *#   #
#########"
            .parse()
            .unwrap();
        let mut solver = MazeSolver::new(grid);
        let sums = solver.total_distances();
        let extents = solver.grid().extents();
        for r in 1..3 {
            for c in 5..8 {
                let i = extents.index(Point::new(r, c)).unwrap();
                assert_eq!(sums[i], INFINITE_TOTAL);
            }
        }
        let best = solver.find_optimal_point();
        assert!(best.cell.unwrap().col() < 4);
        assert_eq!(best.total, 2);
    }

    #[test]
    fn optimal_matches_brute_force_5x5() {
        let mut checked = 0;
        for seed in 0..40 {
            let cfg = MazeConfig::new(Extents::new([5, 5]), 0.2, 2).with_seed(seed);
            let Ok(grid) = cfg.generate() else {
                continue;
            };
            let expected = brute_force(&grid);
            let mut solver = MazeSolver::new(grid);
            assert_eq!(solver.find_optimal_point(), expected, "seed {seed}");
            checked += 1;
        }
        assert!(checked > 20);
    }

    #[test]
    fn optimal_matches_brute_force_larger() {
        for seed in 0..5 {
            let cfg = MazeConfig::new(Extents::new([12, 20]), 0.35, 4).with_seed(seed);
            let grid = cfg.generate().unwrap();
            let expected = brute_force(&grid);
            let mut solver = MazeSolver::new(grid);
            let best = solver.find_optimal_point();
            assert_eq!(best, expected, "seed {seed}");
            if let Some(cell) = best.cell {
                for route in solver.routes_from(cell) {
                    assert!(!route.is_empty());
                    assert_eq!(route[0], cell);
                }
            }
        }
    }

    #[test]
    fn three_dimensional_solve() {
        let cfg = MazeConfig::new(Extents::new([5, 6, 7]), 0.3, 4)
            .with_seed(9)
            .with_open_boundary(true);
        let grid = cfg.generate().unwrap();
        let expected = brute_force(&grid);
        let mut solver = MazeSolver::new(grid);
        let best = solver.find_optimal_point();
        assert_eq!(best, expected);
        assert_eq!(solver.targets().len(), 4);
    }

    #[test]
    fn three_dimensional_open_cube() {
        let mut grid = Grid::filled(Extents::new([3, 3, 3]), CellTag::Empty);
        grid.set_cell(Voxel::new(0, 0, 0), CellTag::Target);
        grid.set_cell(Voxel::new(2, 2, 2), CellTag::Target);
        let mut solver = MazeSolver::new(grid);
        let best = solver.find_optimal_point();
        assert_eq!(best.cell, Some(Voxel::new(1, 1, 1)));
        assert_eq!(best.total, 2);
    }

    #[test]
    fn candidates_are_row_major_empty_cells() {
        let solver = MazeSolver::new(open_3x3());
        assert_eq!(solver.candidates().len(), 7);
        assert_eq!(solver.candidates()[0], Point::new(0, 1));
        assert_eq!(solver.targets(), &[Point::new(0, 0), Point::new(2, 2)]);
        assert_eq!(solver.into_grid(), open_3x3());
    }

    #[test]
    fn accumulate_saturates_to_infinity() {
        let mut sums = vec![0, 3, INFINITE_TOTAL];
        accumulate(&mut sums, &[2, UNREACHABLE, 1]);
        assert_eq!(sums, vec![2, INFINITE_TOTAL, INFINITE_TOTAL]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use gridmedian_core::Point;

    #[test]
    fn optimum_round_trip() {
        let best = Optimum {
            cell: Some(Point::new(4, 9)),
            total: 31,
        };
        let json = serde_json::to_string(&best).unwrap();
        let back: Optimum<2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, best);
    }
}
