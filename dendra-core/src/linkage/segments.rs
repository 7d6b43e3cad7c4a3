//! Concrete leaf pairs that realise each merge of a linkage table.
//!
//! A renderer drawing the dendrogram in the plane connects, for each row, one
//! leaf from either side of the merge whose separation equals the row
//! distance. The pair is found by expanding both children to leaf sets and
//! scanning them in ascending index order, left side outermost.

use std::collections::BTreeSet;

use tracing::{instrument, warn};

use crate::{
    error::{LinkageError, Result},
    point::Point,
};

use super::{ClusterRef, LinkageRow, LinkageTable, leaves_under};

const RELATIVE_TOLERANCE: f64 = 1e-5;
const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// The leaf pair drawn for one row of a linkage table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeSegment {
    /// Row the segment belongs to.
    pub row: usize,
    /// Leaf on the left side of the merge.
    pub from: usize,
    /// Leaf on the right side of the merge.
    pub to: usize,
    /// Distance between the two leaves.
    pub distance: f64,
}

/// Finds one segment per row of `table`, in row order.
///
/// Rows for which no leaf pair matches the recorded distance are skipped and
/// reported at `warn` level.
///
/// # Errors
/// Returns [`LinkageError::LeafCountMismatch`] when `points` does not hold one
/// point per leaf, and propagates resolver errors for malformed tables.
///
/// # Examples
/// ```
/// use dendra_core::{ClusterBuilder, MergeSegment, Point, merge_segments};
///
/// let points = [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 10.0)];
/// let table = ClusterBuilder::new().build(&points)?;
/// let segments = merge_segments(&points, &table)?;
/// assert_eq!(segments.len(), 2);
/// assert_eq!((segments[1].from, segments[1].to), (2, 1));
/// # Ok::<(), dendra_core::LinkageError>(())
/// ```
#[instrument(
    name = "core.merge_segments",
    err,
    skip(points, table),
    fields(leaves = table.leaf_count(), rows = table.len()),
)]
pub fn merge_segments(points: &[Point], table: &LinkageTable) -> Result<Vec<MergeSegment>> {
    if points.len() != table.leaf_count() {
        return Err(LinkageError::LeafCountMismatch {
            points: points.len(),
            leaf_count: table.leaf_count(),
        });
    }

    let mut segments = Vec::with_capacity(table.len());
    for (index, row) in table.rows().iter().enumerate() {
        match segment_for_row(points, table, index, row)? {
            Some(segment) => segments.push(segment),
            None => warn!(
                row = index,
                distance = row.distance,
                "no leaf pair matches the merge distance"
            ),
        }
    }
    Ok(segments)
}

fn segment_for_row(
    points: &[Point],
    table: &LinkageTable,
    index: usize,
    row: &LinkageRow,
) -> Result<Option<MergeSegment>> {
    let leaf_count = table.leaf_count();
    let left = side_leaves(table, row.left_ref(leaf_count))?;
    let right = side_leaves(table, row.right_ref(leaf_count))?;

    for &from in &left {
        let Some(origin) = points.get(from) else {
            continue;
        };
        for &to in &right {
            let Some(target) = points.get(to) else {
                continue;
            };
            let distance = origin.distance(target);
            if is_close(distance, row.distance) {
                return Ok(Some(MergeSegment {
                    row: index,
                    from,
                    to,
                    distance,
                }));
            }
        }
    }
    Ok(None)
}

fn side_leaves(table: &LinkageTable, side: ClusterRef) -> Result<BTreeSet<usize>> {
    match side {
        ClusterRef::Leaf(leaf) => Ok(BTreeSet::from([leaf])),
        ClusterRef::Node(row) => leaves_under(table.rows(), row, table.leaf_count()),
    }
}

fn is_close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * expected.abs()
}
