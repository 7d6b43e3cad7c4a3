//! Seeded synthetic point sets for benchmarking.

use std::fmt;

use dendra_core::Point;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic point generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested point count does not fit the coordinate range.
    #[error("point count {requested} exceeds the supported maximum")]
    TooManyPoints {
        /// Number of points requested.
        requested: usize,
    },
}

/// Arrangement of generated points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointLayout {
    /// Integer coordinates drawn uniformly from `[1, 359]`.
    Uniform,
    /// A square unit lattice filled row by row, where every merge ties.
    Lattice,
}

impl fmt::Display for PointLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uniform => "uniform",
            Self::Lattice => "lattice",
        })
    }
}

/// Configuration for synthetic point generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Arrangement of the points.
    pub layout: PointLayout,
    /// RNG seed for reproducibility; ignored by [`PointLayout::Lattice`].
    pub seed: u64,
}

/// Generates points for `config`.
///
/// # Errors
///
/// Returns [`SyntheticError::ZeroPoints`] if `point_count` is zero and
/// [`SyntheticError::TooManyPoints`] if it does not fit in a `u32`.
///
/// # Examples
///
/// ```
/// use dendra_benches::source::{PointLayout, SyntheticConfig, generate};
///
/// let config = SyntheticConfig { point_count: 5, layout: PointLayout::Lattice, seed: 0 };
/// let points = generate(&config).expect("valid config");
/// assert_eq!(points.len(), 5);
/// assert_eq!((points[4].x, points[4].y), (1.0, 1.0));
/// ```
pub fn generate(config: &SyntheticConfig) -> Result<Vec<Point>, SyntheticError> {
    if config.point_count == 0 {
        return Err(SyntheticError::ZeroPoints);
    }
    let count = u32::try_from(config.point_count).map_err(|_| SyntheticError::TooManyPoints {
        requested: config.point_count,
    })?;

    Ok(match config.layout {
        PointLayout::Uniform => {
            let mut rng = SmallRng::seed_from_u64(config.seed);
            (0..count)
                .map(|_| {
                    Point::new(
                        f64::from(rng.gen_range(1_u32..=359)),
                        f64::from(rng.gen_range(1_u32..=359)),
                    )
                })
                .collect()
        }
        PointLayout::Lattice => {
            let side = lattice_side(count);
            (0..side)
                .flat_map(|y| (0..side).map(move |x| Point::new(f64::from(x), f64::from(y))))
                .take(config.point_count)
                .collect()
        }
    })
}

/// Smallest `side` with `side * side >= count`.
fn lattice_side(count: u32) -> u32 {
    let mut side = 1_u32;
    while u64::from(side) * u64::from(side) < u64::from(count) {
        side += 1;
    }
    side
}
