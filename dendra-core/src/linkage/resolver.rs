//! Recovery of the leaves beneath an internal node of a linkage table.

use std::collections::BTreeSet;

use crate::error::{LinkageError, Result};

use super::{ClusterRef, LinkageRow};

/// Returns every original leaf beneath the cluster built by `row`.
///
/// The walk follows the offset convention: references below `leaf_count` are
/// leaves and are collected directly, larger references are expanded through
/// row `reference - leaf_count`. The function only reads `rows`, so repeated
/// calls with the same arguments return the same set.
///
/// # Errors
/// Returns [`LinkageError::RowOutOfRange`] when `row` is not a row of
/// `rows`, and [`LinkageError::ForwardReference`] when a visited row refers
/// to itself or to a later row.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
///
/// use dendra_core::{LinkageRow, leaves_under};
///
/// let rows = [
///     LinkageRow { left: 0, right: 1, distance: 1.0, size: 2 },
///     LinkageRow { left: 2, right: 3, distance: 13.45, size: 3 },
/// ];
/// assert_eq!(leaves_under(&rows, 1, 3)?, BTreeSet::from([0, 1, 2]));
/// assert_eq!(leaves_under(&rows, 0, 3)?, BTreeSet::from([0, 1]));
/// # Ok::<(), dendra_core::LinkageError>(())
/// ```
pub fn leaves_under(
    rows: &[LinkageRow],
    row: usize,
    leaf_count: usize,
) -> Result<BTreeSet<usize>> {
    let mut leaves = BTreeSet::new();
    let mut stack = vec![row];
    while let Some(current) = stack.pop() {
        let merge = rows.get(current).ok_or(LinkageError::RowOutOfRange {
            row: current,
            rows: rows.len(),
        })?;
        let limit = leaf_count + current;
        for reference in [merge.left, merge.right] {
            if reference >= limit {
                return Err(LinkageError::ForwardReference {
                    row: current,
                    reference,
                    limit,
                });
            }
            match ClusterRef::decode(reference, leaf_count) {
                ClusterRef::Leaf(leaf) => {
                    leaves.insert(leaf);
                }
                ClusterRef::Node(child) => stack.push(child),
            }
        }
    }
    Ok(leaves)
}

/// Stateless handle over [`leaves_under`] for callers that pass the resolver
/// around as a value.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
///
/// use dendra_core::{ClusterBuilder, Point, SubtreeResolver};
///
/// let points = [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 10.0)];
/// let table = ClusterBuilder::new().build(&points)?;
/// let resolver = SubtreeResolver;
/// assert_eq!(
///     resolver.leaves_under(table.rows(), 1, table.leaf_count())?,
///     BTreeSet::from([0, 1, 2]),
/// );
/// # Ok::<(), dendra_core::LinkageError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SubtreeResolver;

impl SubtreeResolver {
    /// See [`leaves_under`].
    ///
    /// # Errors
    /// Same as [`leaves_under`].
    pub fn leaves_under(
        self,
        rows: &[LinkageRow],
        row: usize,
        leaf_count: usize,
    ) -> Result<BTreeSet<usize>> {
        leaves_under(rows, row, leaf_count)
    }
}
