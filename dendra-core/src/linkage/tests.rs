//! Unit tests for linkage-table construction and validation.

use rstest::rstest;

use crate::{
    ClusterBuilder, ClusterRef, LinkageError, LinkageErrorCode, LinkageRow, LinkageTable,
    NonFinitePolicy, Point,
};

fn points(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

fn row(left: usize, right: usize, distance: f64, size: usize) -> LinkageRow {
    LinkageRow {
        left,
        right,
        distance,
        size,
    }
}

fn assert_rows_close(actual: &[LinkageRow], expected: &[LinkageRow]) {
    assert_eq!(actual.len(), expected.len(), "row count differs");
    for (index, (got, want)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            (got.left, got.right, got.size),
            (want.left, want.right, want.size),
            "row {index} differs"
        );
        assert!(
            (got.distance - want.distance).abs() < 1e-9,
            "row {index} distance {} differs from {}",
            got.distance,
            want.distance
        );
    }
}

#[test]
fn three_point_scenario_merges_pair_then_outlier() {
    let input = points(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");

    assert_rows_close(
        table.rows(),
        &[row(0, 1, 1.0, 2), row(2, 3, 181.0_f64.sqrt(), 3)],
    );
    let leaves = table.leaves_under(1).expect("row 1 must resolve");
    assert_eq!(leaves.into_iter().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn equidistant_pairs_prefer_lower_partner() {
    let input = points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (5.0, 5.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");

    assert_rows_close(
        table.rows(),
        &[
            row(0, 1, 1.0, 2),
            row(2, 4, 1.0, 3),
            row(3, 5, 41.0_f64.sqrt(), 4),
        ],
    );
}

#[test]
fn collinear_chain_grows_one_cluster() {
    let input = points(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0), (6.0, 0.0), (10.0, 0.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");

    assert_rows_close(
        table.rows(),
        &[
            row(0, 1, 1.0, 2),
            row(2, 5, 2.0, 3),
            row(3, 6, 3.0, 4),
            row(4, 7, 4.0, 5),
        ],
    );
}

#[test]
fn separate_pairs_merge_before_joining() {
    let input = points(&[(0.0, 0.0), (10.0, 0.0), (0.0, 1.0), (10.0, 2.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");

    assert_rows_close(
        table.rows(),
        &[row(0, 2, 1.0, 2), row(1, 3, 2.0, 2), row(4, 5, 10.0, 4)],
    );
}

#[test]
fn coincident_points_merge_at_zero_distance() {
    let input = points(&[(1.0, 1.0), (1.0, 1.0), (4.0, 5.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");

    assert_rows_close(table.rows(), &[row(0, 1, 0.0, 2), row(2, 3, 5.0, 3)]);
}

#[rstest]
#[case::empty(&[])]
#[case::single(&[(4.0, 2.0)])]
fn fewer_than_two_points_yield_no_rows(#[case] raw: &[(f64, f64)]) {
    let table = ClusterBuilder::new()
        .build(&points(raw))
        .expect("degenerate input is not an error");
    assert!(table.is_empty());
    assert_eq!(table.leaf_count(), raw.len());
}

#[test]
fn dropped_points_renumber_leaves() {
    let input = points(&[
        (0.0, 0.0),
        (f64::NAN, 0.0),
        (0.0, 1.0),
        (f64::INFINITY, 3.0),
        (10.0, 10.0),
    ]);
    let dendrogram = ClusterBuilder::new()
        .cluster(&input)
        .expect("non-finite points are dropped");

    assert_eq!(
        dendrogram.points(),
        points(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0)]).as_slice()
    );
    assert_eq!(dendrogram.table().leaf_count(), 3);
    assert_rows_close(
        dendrogram.table().rows(),
        &[row(0, 1, 1.0, 2), row(2, 3, 181.0_f64.sqrt(), 3)],
    );
}

#[test]
fn dropping_all_but_one_point_yields_no_rows() {
    let input = points(&[(f64::NAN, 0.0), (1.0, 1.0), (0.0, f64::NEG_INFINITY)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("filtering must succeed");
    assert!(table.is_empty());
    assert_eq!(table.leaf_count(), 1);
}

#[test]
fn reject_policy_names_first_non_finite_point() {
    let input = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, f64::INFINITY), (f64::NAN, 0.0)]);
    let err = ClusterBuilder::new()
        .with_non_finite_policy(NonFinitePolicy::Reject)
        .build(&input)
        .expect_err("non-finite input must be rejected");
    assert!(matches!(
        err,
        LinkageError::NonFinitePoint { index: 2, x, y } if x == 2.0 && y.is_infinite()
    ));
}

#[test]
fn reject_policy_accepts_finite_points() {
    let input = points(&[(0.0, 0.0), (3.0, 4.0)]);
    let table = ClusterBuilder::new()
        .with_non_finite_policy(NonFinitePolicy::Reject)
        .build(&input)
        .expect("finite input must build");
    assert_rows_close(table.rows(), &[row(0, 1, 5.0, 2)]);
}

#[rstest]
#[case::drop(NonFinitePolicy::Drop)]
#[case::reject(NonFinitePolicy::Reject)]
fn overflowing_distances_are_rejected(#[case] policy: NonFinitePolicy) {
    let input = points(&[(1e308, 0.0), (-1e308, 0.0)]);
    let err = ClusterBuilder::new()
        .with_non_finite_policy(policy)
        .build(&input)
        .expect_err("an unrepresentable distance must fail");
    assert_eq!(
        err,
        LinkageError::InvalidDistance {
            row: 0,
            distance: f64::INFINITY,
        }
    );
}

#[test]
fn distant_points_still_build_when_a_finite_link_exists() {
    let input = points(&[(0.0, 0.0), (1.0, 0.0), (1e308, 0.0), (-1e308, 0.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("single linkage never needs the overflowing pair");
    let distances: Vec<f64> = table.rows().iter().map(|merged| merged.distance).collect();
    assert_eq!(distances, vec![1.0, 1e308, 1e308]);
}

#[test]
fn to_matrix_uses_conventional_layout() {
    let input = points(&[(0.0, 0.0), (0.0, 1.0), (0.0, 3.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");
    assert_eq!(
        table.to_matrix(),
        vec![[0.0, 1.0, 1.0, 2.0], [2.0, 3.0, 2.0, 3.0]]
    );
}

#[rstest]
#[case(0, 4, ClusterRef::Leaf(0))]
#[case(3, 4, ClusterRef::Leaf(3))]
#[case(4, 4, ClusterRef::Node(0))]
#[case(9, 4, ClusterRef::Node(5))]
fn cluster_refs_follow_offset_convention(
    #[case] raw: usize,
    #[case] leaf_count: usize,
    #[case] expected: ClusterRef,
) {
    let decoded = ClusterRef::decode(raw, leaf_count);
    assert_eq!(decoded, expected);
    assert_eq!(decoded.encode(leaf_count), raw);
}

#[test]
fn row_lookup_reports_out_of_range() {
    let table = LinkageTable::from_rows(2, vec![row(0, 1, 1.0, 2)]).expect("valid table");
    assert!(table.row(0).is_ok());
    assert_eq!(
        table.row(1),
        Err(LinkageError::RowOutOfRange {
            row: 1,
            rows: 1,
        })
    );
}

#[test]
fn from_rows_accepts_built_tables() {
    let input = points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (5.0, 5.0)]);
    let built = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");
    let rebuilt = LinkageTable::from_rows(built.leaf_count(), built.rows().to_vec())
        .expect("built tables must validate");
    assert_eq!(rebuilt, built);
}

#[rstest]
#[case::missing_row(3, vec![row(0, 1, 1.0, 2)])]
#[case::extra_row(2, vec![row(0, 1, 1.0, 2), row(0, 2, 1.0, 3)])]
#[case::rows_without_leaves(0, vec![row(0, 1, 1.0, 2)])]
fn from_rows_rejects_incomplete_tables(#[case] leaf_count: usize, #[case] rows: Vec<LinkageRow>) {
    let err = LinkageTable::from_rows(leaf_count, rows).expect_err("row count must be checked");
    assert!(matches!(err, LinkageError::RowCountMismatch { .. }));
}

#[rstest]
#[case::unordered(
    vec![row(1, 0, 1.0, 2), row(2, 3, 1.0, 3)],
    LinkageError::UnorderedRow { row: 0, left: 1, right: 0 },
)]
#[case::self_merge(
    vec![row(0, 1, 1.0, 2), row(3, 3, 1.0, 3)],
    LinkageError::UnorderedRow { row: 1, left: 3, right: 3 },
)]
#[case::forward(
    vec![row(0, 4, 1.0, 2), row(1, 2, 1.0, 2)],
    LinkageError::ForwardReference { row: 0, reference: 4, limit: 3 },
)]
#[case::negative_distance(
    vec![row(0, 1, -1.0, 2), row(2, 3, 1.0, 3)],
    LinkageError::InvalidDistance { row: 0, distance: -1.0 },
)]
#[case::wrong_size(
    vec![row(0, 1, 1.0, 2), row(2, 3, 1.0, 4)],
    LinkageError::SizeMismatch { row: 1, expected: 3, actual: 4 },
)]
#[case::reused_leaf(
    vec![row(0, 1, 1.0, 2), row(0, 3, 1.0, 3)],
    LinkageError::ReusedReference { row: 1, reference: 0 },
)]
fn from_rows_rejects_malformed_rows(#[case] rows: Vec<LinkageRow>, #[case] expected: LinkageError) {
    let err = LinkageTable::from_rows(3, rows).expect_err("malformed rows must fail");
    assert_eq!(err, expected);
}

#[test]
fn from_rows_rejects_clusters_merged_twice() {
    let rows = vec![
        row(0, 1, 1.0, 2),
        row(2, 4, 1.0, 3),
        row(3, 4, 2.0, 4),
    ];
    let err = LinkageTable::from_rows(4, rows).expect_err("a cluster has one parent");
    assert_eq!(
        err,
        LinkageError::ReusedReference {
            row: 2,
            reference: 4,
        }
    );
    assert_eq!(err.code(), LinkageErrorCode::ReusedReference);
}

#[test]
fn validated_sizes_match_resolved_leaves() {
    let rows = vec![
        row(0, 2, 1.0, 2),
        row(1, 3, 2.0, 2),
        row(4, 5, 10.0, 4),
    ];
    let table = LinkageTable::from_rows(4, rows).expect("valid table");
    for (index, merged) in table.rows().iter().enumerate() {
        let leaves = table.leaves_under(index).expect("row must resolve");
        assert_eq!(leaves.len(), merged.size, "row {index}");
    }
}

#[test]
fn from_rows_rejects_nan_distance() {
    let err = LinkageTable::from_rows(2, vec![row(0, 1, f64::NAN, 2)])
        .expect_err("NaN distances must fail");
    assert!(matches!(err, LinkageError::InvalidDistance { row: 0, .. }));
}

#[cfg(feature = "serde")]
#[test]
fn tables_survive_a_json_round_trip() {
    let input = points(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0)]);
    let table = ClusterBuilder::new()
        .build(&input)
        .expect("build must succeed");
    let encoded = serde_json::to_string(&table).expect("table must serialize");
    let decoded: LinkageTable = serde_json::from_str(&encoded).expect("table must deserialize");
    assert_eq!(decoded, table);
}
