//! Random maze generation.
//!
//! Generation runs in two independent random phases over one RNG:
//! 1. **Fill**: every fillable cell, in row-major order, draws a uniform
//!    value in `[0, 1)` and becomes empty if the value exceeds the fill
//!    fraction, wall otherwise.
//! 2. **Target placement**: targets are sampled without replacement from
//!    the row-major list of empty cells left by the fill.
//!
//! Given the same RNG state the result is always the same grid.

use std::fmt;

use gridmedian_core::{CellTag, Coord, Grid};
use log::debug;
use rand::Rng;

use crate::config::MazeConfig;

/// Errors that can occur when generating a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The fill left fewer empty cells than targets requested.
    InsufficientCapacity { requested: usize, available: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InsufficientCapacity {
                requested,
                available,
            } => write!(
                f,
                "cannot place {requested} targets: only {available} empty cells available"
            ),
        }
    }
}

impl std::error::Error for GenerateError {}

/// Map generator operating on a [`Grid`].
pub struct MapGen<R: Rng, const N: usize> {
    pub rng: R,
    pub grid: Grid<N>,
}

impl<R: Rng, const N: usize> MapGen<R, N> {
    /// Create a new MapGen with the given grid.
    pub fn with_grid(grid: Grid<N>, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Randomly assign walls and empty cells.
    ///
    /// Boundary cells are left untouched unless `open_boundary` is set.
    /// Returns the number of empty cells produced.
    ///
    /// # Panics
    ///
    /// Panics if `fill_fraction` is outside `[0, 1]`.
    pub fn random_fill(&mut self, fill_fraction: f64, open_boundary: bool) -> usize {
        assert!(
            (0.0..=1.0).contains(&fill_fraction),
            "fill fraction must be within [0, 1], got {fill_fraction}"
        );
        let extents = self.grid.extents();
        let rng = &mut self.rng;
        let mut empty = 0;
        self.grid.fill_fn(|c, tag| {
            if !open_boundary && extents.is_boundary(c) {
                return tag;
            }
            let r: f64 = rng.random();
            if r > fill_fraction {
                empty += 1;
                CellTag::Empty
            } else {
                CellTag::Wall
            }
        });
        empty
    }

    /// Turn `count` distinct empty cells, chosen uniformly, into targets.
    ///
    /// Returns the chosen cells in draw order. Leaves the grid unchanged on
    /// error.
    pub fn place_targets(&mut self, count: usize) -> Result<Vec<Coord<N>>, GenerateError> {
        let mut pool = self.grid.empty_cells();
        if count > pool.len() {
            return Err(GenerateError::InsufficientCapacity {
                requested: count,
                available: pool.len(),
            });
        }

        // Partial Fisher-Yates: the first `count` slots end up a uniform
        // sample without replacement.
        for i in 0..count {
            let j = self.rng.random_range(i..pool.len());
            pool.swap(i, j);
        }
        pool.truncate(count);

        for &c in &pool {
            self.grid.set_cell(c, CellTag::Target);
        }
        Ok(pool)
    }
}

/// Generate a maze from `config`, drawing all randomness from `rng`.
///
/// Starts from an all-wall grid, fills it (see
/// [`MapGen::random_fill`]), then places the targets. Fails with
/// [`GenerateError::InsufficientCapacity`] when the fill leaves too few
/// empty cells; the caller decides whether to retry with another seed.
pub fn generate<const N: usize>(
    config: &MazeConfig<N>,
    rng: &mut impl Rng,
) -> Result<Grid<N>, GenerateError> {
    let mut mg = MapGen::with_grid(Grid::new(config.extents), rng);
    let empty = mg.random_fill(config.fill_fraction, config.open_boundary);
    mg.place_targets(config.target_count)?;
    debug!(
        "generated {} maze: {} open cells, {} targets",
        config.extents, empty, config.target_count
    );
    Ok(mg.grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmedian_core::{Extents, Point, Voxel};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn same_seed_same_grid() {
        let cfg = MazeConfig::new(Extents::new([25, 60]), 0.25, 16).with_seed(1234);
        let a = cfg.generate().unwrap();
        let b = cfg.generate().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn explicit_rng_matches_config_seed() {
        let cfg = MazeConfig::new(Extents::new([9, 11]), 0.3, 3).with_seed(5);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(generate(&cfg, &mut rng).unwrap(), cfg.generate().unwrap());
    }

    #[test]
    fn different_seeds_differ() {
        let base = MazeConfig::new(Extents::new([25, 60]), 0.25, 16);
        let a = base.clone().with_seed(1).generate().unwrap();
        let b = base.with_seed(2).generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn boundary_stays_wall() {
        let cfg = MazeConfig::new(Extents::new([12, 17]), 0.0, 4).with_seed(3);
        let g = cfg.generate().unwrap();
        for (c, tag) in g.iter() {
            if g.is_boundary(c) {
                assert_eq!(tag, CellTag::Wall, "at {c}");
            }
        }
        assert_eq!(g.boundary_wall_cells().len(), 12 * 17 - 10 * 15);
    }

    #[test]
    fn exact_target_count() {
        let cfg = MazeConfig::new(Extents::new([15, 30]), 0.3, 10).with_seed(11);
        let g = cfg.generate().unwrap();
        assert_eq!(g.count(CellTag::Target), 10);
        assert!(g.target_cells().iter().all(|&c| !g.is_boundary(c)));
    }

    #[test]
    fn wall_fraction_tracks_fill() {
        let cfg = MazeConfig::new(Extents::new([102, 102]), 0.3, 1).with_seed(21);
        let g = cfg.generate().unwrap();
        let interior = 100 * 100;
        let walls = g.count(CellTag::Wall) - g.boundary_wall_cells().len();
        let frac = walls as f64 / interior as f64;
        assert!((0.25..0.35).contains(&frac), "wall fraction {frac}");
    }

    #[test]
    fn insufficient_capacity() {
        let cfg = MazeConfig::new(Extents::new([3, 3]), 1.0, 1).with_seed(0);
        assert_eq!(
            cfg.generate(),
            Err(GenerateError::InsufficientCapacity {
                requested: 1,
                available: 0
            })
        );
    }

    #[test]
    fn insufficient_capacity_message() {
        let err = GenerateError::InsufficientCapacity {
            requested: 5,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "cannot place 5 targets: only 2 empty cells available"
        );
    }

    #[test]
    fn place_targets_leaves_grid_on_error() {
        let g: Grid<2> = "#####\n#   #\n#####".parse().unwrap();
        let mut mg = MapGen::with_grid(g.clone(), StdRng::seed_from_u64(0));
        assert!(mg.place_targets(4).is_err());
        assert_eq!(mg.grid, g);
        let placed = mg.place_targets(3).unwrap();
        assert_eq!(placed.len(), 3);
        assert_eq!(
            mg.grid.target_cells(),
            vec![Point::new(1, 1), Point::new(1, 2), Point::new(1, 3)]
        );
    }

    #[test]
    fn open_boundary_fills_shell() {
        let cfg = MazeConfig::new(Extents::new([4, 5, 6]), 0.0, 2)
            .with_seed(8)
            .with_open_boundary(true);
        let g = cfg.generate().unwrap();
        assert_eq!(g.count(CellTag::Wall), 0);
        assert!(g.is_passable(Voxel::new(0, 0, 0)));
    }

    #[test]
    fn three_dimensional_determinism() {
        let cfg = MazeConfig::<3>::default().with_seed(42);
        let a = cfg.generate().unwrap();
        let b = cfg.generate().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.count(CellTag::Target), 16);
        assert!(a.to_string().starts_with("Layer 0:\n"));
    }

    #[test]
    #[should_panic(expected = "fill fraction")]
    fn fill_fraction_out_of_range_panics() {
        let cfg = MazeConfig::new(Extents::new([5, 5]), 1.5, 1).with_seed(0);
        let _ = cfg.generate();
    }
}
