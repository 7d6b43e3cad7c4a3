//! Property-based checks for linkage-table construction.
//!
//! Points are drawn from a small integer grid so that equidistant pairs and
//! coincident points are common, alongside a wider continuous range.

use proptest::prelude::*;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use rstest::rstest;

use crate::test_utils::{grid_points, suite_proptest_config};
use crate::{ClusterBuilder, LinkageTable, Point, merge_segments};

fn grid_strategy() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0_i8..=12, 0_i8..=12), 0..18).prop_map(|raw| {
        raw.into_iter()
            .map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
            .collect()
    })
}

fn continuous_strategy() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-1.0e3_f64..1.0e3, -1.0e3_f64..1.0e3), 0..18)
        .prop_map(|raw| raw.into_iter().map(Point::from).collect())
}

fn build(points: &[Point]) -> Result<LinkageTable, TestCaseError> {
    let leaves = points.len();
    ClusterBuilder::new()
        .build(points)
        .map_err(|err| TestCaseError::fail(format!("build failed for {leaves} points: {err}")))
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-12 * expected.abs().max(1.0)
}

/// Checks the structural invariants every built table must satisfy.
fn run_structure_property(points: &[Point]) -> TestCaseResult {
    let table = build(points)?;
    let leaf_count = points.len();
    prop_assert_eq!(table.leaf_count(), leaf_count);
    prop_assert_eq!(table.len(), leaf_count.saturating_sub(1));

    for (index, row) in table.rows().iter().enumerate() {
        prop_assert!(row.left < row.right, "row {index} is unordered");
        prop_assert!(
            row.right < leaf_count + index,
            "row {index} refers forward to {}",
            row.right
        );
        prop_assert!(
            row.distance.is_finite() && row.distance >= 0.0,
            "row {index} has distance {}",
            row.distance
        );
        let leaves = table
            .leaves_under(index)
            .map_err(|err| TestCaseError::fail(format!("row {index} did not resolve: {err}")))?;
        prop_assert_eq!(row.size, leaves.len(), "row {} size disagrees with its leaves", index);
    }

    if let Some(last) = table.len().checked_sub(1) {
        let root = table
            .leaves_under(last)
            .map_err(|err| TestCaseError::fail(format!("root did not resolve: {err}")))?;
        prop_assert_eq!(root.len(), leaf_count);
    }

    LinkageTable::from_rows(leaf_count, table.rows().to_vec())
        .map_err(|err| TestCaseError::fail(format!("built table failed validation: {err}")))?;
    Ok(())
}

/// Checks that each merge distance is the closest approach between the
/// two clusters it joins, and that the first merge is the global minimum.
fn run_single_linkage_property(points: &[Point]) -> TestCaseResult {
    let table = build(points)?;
    let leaf_count = table.leaf_count();

    for (index, row) in table.rows().iter().enumerate() {
        let left = side(&table, row.left)?;
        let right = side(&table, row.right)?;
        let closest = left
            .iter()
            .flat_map(|&a| right.iter().map(move |&b| (a, b)))
            .map(|(a, b)| points[a].distance(&points[b]))
            .fold(f64::INFINITY, f64::min);
        prop_assert!(
            close(row.distance, closest),
            "row {index} distance {} differs from closest approach {closest}",
            row.distance
        );
    }

    if let Some(first) = table.rows().first() {
        let global = (0..leaf_count)
            .flat_map(|a| (a + 1..leaf_count).map(move |b| (a, b)))
            .map(|(a, b)| points[a].distance(&points[b]))
            .fold(f64::INFINITY, f64::min);
        prop_assert!(close(first.distance, global));
    }

    let mut previous = 0.0_f64;
    for row in table.rows() {
        prop_assert!(row.distance >= previous, "merge distances must not decrease");
        previous = row.distance;
    }
    Ok(())
}

fn side(table: &LinkageTable, reference: usize) -> Result<Vec<usize>, TestCaseError> {
    let leaf_count = table.leaf_count();
    if reference < leaf_count {
        return Ok(vec![reference]);
    }
    table
        .leaves_under(reference - leaf_count)
        .map(|leaves| leaves.into_iter().collect())
        .map_err(|err| TestCaseError::fail(format!("reference {reference} did not resolve: {err}")))
}

/// Checks that the build is a pure function of its input and that every
/// row yields a drawable segment.
fn run_determinism_property(points: &[Point]) -> TestCaseResult {
    let first = build(points)?;
    let second = build(points)?;
    prop_assert_eq!(&first, &second);

    let segments = merge_segments(points, &first)
        .map_err(|err| TestCaseError::fail(format!("segments failed: {err}")))?;
    prop_assert_eq!(segments.len(), first.len());
    for (index, segment) in segments.iter().enumerate() {
        prop_assert_eq!(segment.row, index);
        prop_assert!(close(segment.distance, first.rows()[index].distance));
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn grid_tables_are_well_formed(points in grid_strategy()) {
        run_structure_property(&points)?;
    }

    #[test]
    fn continuous_tables_are_well_formed(points in continuous_strategy()) {
        run_structure_property(&points)?;
    }

    #[test]
    fn grid_merges_follow_single_linkage(points in grid_strategy()) {
        run_single_linkage_property(&points)?;
    }

    #[test]
    fn continuous_merges_follow_single_linkage(points in continuous_strategy()) {
        run_single_linkage_property(&points)?;
    }

    #[test]
    fn builds_are_deterministic(points in grid_strategy()) {
        run_determinism_property(&points)?;
    }
}

#[rstest]
#[case::sparse_42(42, 24, 100)]
#[case::sparse_999(999, 24, 100)]
#[case::crowded_42(42, 30, 4)]
#[case::crowded_7777(7777, 30, 4)]
#[case::stacked(5, 12, 0)]
fn seeded_grids_satisfy_all_properties(
    #[case] seed: u64,
    #[case] count: usize,
    #[case] extent: i32,
) {
    let points = grid_points(seed, count, extent);
    run_structure_property(&points).expect("structure must hold");
    run_single_linkage_property(&points).expect("single linkage must hold");
    run_determinism_property(&points).expect("builds must be deterministic");
}
