//! Single-linkage dendrograms encoded as flat linkage tables.
//!
//! A table over `n` leaves holds `n - 1` rows, one per merge, in the order the
//! merges happened. Each row names the two clusters it joins using the offset
//! convention shared by every consumer of the table:
//!
//! - a reference `r < n` is the original leaf `r`;
//! - a reference `r >= n` is the cluster created by row `r - n`.
//!
//! Rows may only refer to rows built before them and no cluster is merged
//! twice, so every table is a forest of binary trees whose internal nodes are
//! rows and whose leaves are the original points.

mod builder;
mod nearest;
mod resolver;
mod segments;
mod state;

use std::collections::BTreeSet;

use crate::error::{LinkageError, Result};

pub use self::builder::{ClusterBuilder, NonFinitePolicy};
pub use self::resolver::{SubtreeResolver, leaves_under};
pub use self::segments::{MergeSegment, merge_segments};

/// A decoded reference to a cluster in a linkage table.
///
/// # Examples
/// ```
/// use dendra_core::ClusterRef;
///
/// assert_eq!(ClusterRef::decode(2, 5), ClusterRef::Leaf(2));
/// assert_eq!(ClusterRef::decode(7, 5), ClusterRef::Node(2));
/// assert_eq!(ClusterRef::Node(2).encode(5), 7);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ClusterRef {
    /// An original input point, by leaf index.
    Leaf(usize),
    /// The cluster produced by the given row.
    Node(usize),
}

impl ClusterRef {
    /// Decodes a raw table reference over `leaf_count` leaves.
    #[must_use]
    pub const fn decode(raw: usize, leaf_count: usize) -> Self {
        if raw < leaf_count {
            Self::Leaf(raw)
        } else {
            Self::Node(raw - leaf_count)
        }
    }

    /// Encodes the reference for storage in a table over `leaf_count` leaves.
    #[must_use]
    pub const fn encode(self, leaf_count: usize) -> usize {
        match self {
            Self::Leaf(index) => index,
            Self::Node(row) => row + leaf_count,
        }
    }
}

/// One merge in a linkage table.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkageRow {
    /// Numerically smaller reference of the two merged clusters.
    pub left: usize,
    /// Numerically larger reference of the two merged clusters.
    pub right: usize,
    /// Distance between the closest pair of leaves across the merge.
    pub distance: f64,
    /// Number of original leaves in the merged cluster.
    pub size: usize,
}

impl LinkageRow {
    /// Decodes the left reference.
    #[must_use]
    pub const fn left_ref(&self, leaf_count: usize) -> ClusterRef {
        ClusterRef::decode(self.left, leaf_count)
    }

    /// Decodes the right reference.
    #[must_use]
    pub const fn right_ref(&self, leaf_count: usize) -> ClusterRef {
        ClusterRef::decode(self.right, leaf_count)
    }

    /// Returns the row as `[left, right, distance, size]`, the layout used by
    /// conventional linkage matrices.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.left as f64,
            self.right as f64,
            self.distance,
            self.size as f64,
        ]
    }
}

/// The complete merge sequence over a set of leaves.
///
/// # Examples
/// ```
/// use dendra_core::{ClusterBuilder, Point};
///
/// let points = [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 10.0)];
/// let table = ClusterBuilder::new().build(&points)?;
/// assert_eq!(table.leaf_count(), 3);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.leaves_under(1)?.into_iter().collect::<Vec<_>>(), [0, 1, 2]);
/// # Ok::<(), dendra_core::LinkageError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkageTable {
    leaf_count: usize,
    rows: Vec<LinkageRow>,
}

impl LinkageTable {
    pub(crate) const fn from_parts(leaf_count: usize, rows: Vec<LinkageRow>) -> Self {
        Self { leaf_count, rows }
    }

    /// Validates externally produced rows and wraps them in a table.
    ///
    /// # Errors
    /// Returns [`LinkageError::RowCountMismatch`] unless there are exactly
    /// `leaf_count - 1` rows (none for fewer than two leaves),
    /// [`LinkageError::UnorderedRow`] when `left >= right`,
    /// [`LinkageError::ForwardReference`] when a row refers to itself or a
    /// later row, [`LinkageError::ReusedReference`] when a leaf or cluster is
    /// merged more than once, [`LinkageError::InvalidDistance`] for negative or
    /// non-finite distances, and [`LinkageError::SizeMismatch`] when a size
    /// is not the sum of its children's sizes.
    ///
    /// # Examples
    /// ```
    /// use dendra_core::{LinkageError, LinkageRow, LinkageTable};
    ///
    /// let rows = vec![
    ///     LinkageRow { left: 0, right: 1, distance: 1.0, size: 2 },
    ///     LinkageRow { left: 2, right: 3, distance: 2.0, size: 3 },
    /// ];
    /// let table = LinkageTable::from_rows(3, rows)?;
    /// assert_eq!(table.len(), 2);
    ///
    /// let forward = vec![
    ///     LinkageRow { left: 0, right: 3, distance: 1.0, size: 2 },
    ///     LinkageRow { left: 1, right: 2, distance: 2.0, size: 2 },
    /// ];
    /// assert!(matches!(
    ///     LinkageTable::from_rows(3, forward),
    ///     Err(LinkageError::ForwardReference { row: 0, .. }),
    /// ));
    /// # Ok::<(), LinkageError>(())
    /// ```
    pub fn from_rows(leaf_count: usize, rows: Vec<LinkageRow>) -> Result<Self> {
        let expected = leaf_count.saturating_sub(1);
        if rows.len() != expected {
            return Err(LinkageError::RowCountMismatch {
                leaf_count,
                expected,
                actual: rows.len(),
            });
        }

        let mut merged = vec![false; leaf_count + rows.len()];
        for (index, row) in rows.iter().enumerate() {
            validate_row(&rows, leaf_count, index, row)?;
            claim(&mut merged, index, row.left)?;
            claim(&mut merged, index, row.right)?;
        }

        Ok(Self { leaf_count, rows })
    }

    /// Returns the number of leaves the table was built over.
    #[must_use]
    pub const fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Returns the rows in merge order.
    #[must_use]
    pub fn rows(&self) -> &[LinkageRow] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table holds no merges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row at `index`.
    ///
    /// # Errors
    /// Returns [`LinkageError::RowOutOfRange`] when `index` is not a row.
    pub fn row(&self, index: usize) -> Result<&LinkageRow> {
        self.rows.get(index).ok_or(LinkageError::RowOutOfRange {
            row: index,
            rows: self.rows.len(),
        })
    }

    /// Returns every leaf beneath the cluster built by `row`.
    ///
    /// # Errors
    /// See [`leaves_under`].
    pub fn leaves_under(&self, row: usize) -> Result<BTreeSet<usize>> {
        leaves_under(&self.rows, row, self.leaf_count)
    }

    /// Returns the table as a list of `[left, right, distance, size]` rows.
    #[must_use]
    pub fn to_matrix(&self) -> Vec<[f64; 4]> {
        self.rows.iter().map(LinkageRow::to_array).collect()
    }
}

fn validate_row(
    rows: &[LinkageRow],
    leaf_count: usize,
    index: usize,
    row: &LinkageRow,
) -> Result<()> {
    if row.left >= row.right {
        return Err(LinkageError::UnorderedRow {
            row: index,
            left: row.left,
            right: row.right,
        });
    }
    let limit = leaf_count + index;
    if row.right >= limit {
        return Err(LinkageError::ForwardReference {
            row: index,
            reference: row.right,
            limit,
        });
    }
    if !row.distance.is_finite() || row.distance < 0.0 {
        return Err(LinkageError::InvalidDistance {
            row: index,
            distance: row.distance,
        });
    }

    let expected = cluster_size(rows, row.left_ref(leaf_count))
        + cluster_size(rows, row.right_ref(leaf_count));
    if row.size != expected {
        return Err(LinkageError::SizeMismatch {
            row: index,
            expected,
            actual: row.size,
        });
    }
    Ok(())
}

/// Marks `reference` as merged, failing if an earlier row already merged it.
fn claim(merged: &mut [bool], row: usize, reference: usize) -> Result<()> {
    match merged.get_mut(reference) {
        Some(slot) if !*slot => {
            *slot = true;
            Ok(())
        }
        _ => Err(LinkageError::ReusedReference { row, reference }),
    }
}

fn cluster_size(rows: &[LinkageRow], cluster: ClusterRef) -> usize {
    match cluster {
        ClusterRef::Leaf(_) => 1,
        ClusterRef::Node(row) => rows.get(row).map_or(0, |node| node.size),
    }
}

#[cfg(test)]
mod property;
#[cfg(test)]
mod tests;
