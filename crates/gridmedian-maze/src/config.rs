use gridmedian_core::{Extents, Grid};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::mapgen::{GenerateError, generate};

/// Parameters for random maze generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig<const N: usize> {
    /// Grid size, boundary included.
    pub extents: Extents<N>,
    /// Probability in `[0, 1]` that a filled cell becomes a wall.
    pub fill_fraction: f64,
    /// How many empty cells to turn into targets.
    pub target_count: usize,
    /// Seed for reproducible generation; `None` draws from the OS.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    /// When `true` the outer shell takes part in the fill instead of
    /// staying wall.
    #[cfg_attr(feature = "serde", serde(default))]
    pub open_boundary: bool,
}

impl<const N: usize> MazeConfig<N> {
    /// Create an unseeded configuration with a walled boundary.
    pub fn new(extents: Extents<N>, fill_fraction: f64, target_count: usize) -> Self {
        Self {
            extents,
            fill_fraction,
            target_count,
            seed: None,
            open_boundary: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_open_boundary(mut self, open: bool) -> Self {
        self.open_boundary = open;
        self
    }

    /// The random source this configuration generates from.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Generate a maze using [`rng`](Self::rng).
    pub fn generate(&self) -> Result<Grid<N>, GenerateError> {
        generate(self, &mut self.rng())
    }
}

impl Default for MazeConfig<2> {
    fn default() -> Self {
        Self::new(Extents::new([25, 60]), 0.25, 16)
    }
}

impl Default for MazeConfig<3> {
    fn default() -> Self {
        Self::new(Extents::new([20, 20, 40]), 0.3, 16).with_open_boundary(true)
    }
}
