//! Shared test utilities for `dendra-core`.

use dendra_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::point::Point;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `DENDRA_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Generates `count` points on a small integer grid so that ties and
/// coincident points occur often.
pub(crate) fn grid_points(seed: u64, count: usize, extent: i32) -> Vec<Point> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point::new(
                f64::from(rng.gen_range(0..=extent)),
                f64::from(rng.gen_range(0..=extent)),
            )
        })
        .collect()
}
