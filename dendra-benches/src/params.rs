//! Benchmark parameter types.

use std::fmt;

use crate::source::PointLayout;

/// Parameters for a linkage benchmark run.
#[derive(Clone, Debug)]
pub struct LinkageBenchParams {
    /// Number of points clustered.
    pub point_count: usize,
    /// Arrangement of the points.
    pub layout: PointLayout,
}

impl fmt::Display for LinkageBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},layout={}", self.point_count, self.layout)
    }
}
