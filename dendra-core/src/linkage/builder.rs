//! Agglomerative single-linkage construction over planar points.
//!
//! Each round scans every ordered leaf pair for the closest pair whose leaves
//! sit in different clusters, merges the two clusters, and appends a row to
//! the linkage table. Cluster membership is tracked per leaf and migrated
//! eagerly on every merge, so a round costs `O(n^2)` distance checks and the whole
//! build is cubic in the number of points.
//!
//! Leaf pairs that already won a round are recorded and never selected
//! again. Under the membership rule such a pair can no longer be eligible,
//! but the ledger is kept so that the merge order stays identical to tables
//! produced by earlier releases of this algorithm.

use tracing::{debug, info, instrument};

use crate::{
    dendrogram::Dendrogram,
    error::{LinkageError, Result},
    point::{Point, retain_finite},
};

use super::{
    LinkageRow, LinkageTable,
    nearest::closest_pair,
    state::{ActiveClusters, UsedPairs},
};

/// Describes how [`ClusterBuilder`] treats points with NaN or infinite
/// coordinates.
///
/// # Examples
/// ```
/// use dendra_core::NonFinitePolicy;
///
/// assert_eq!(NonFinitePolicy::default(), NonFinitePolicy::Drop);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NonFinitePolicy {
    /// Remove such points before clustering; leaf indices refer to the
    /// surviving points in their original order.
    #[default]
    Drop,
    /// Fail with [`LinkageError::NonFinitePoint`] naming the first such point.
    Reject,
}

/// Builds single-linkage tables from planar points.
///
/// # Examples
/// ```
/// use dendra_core::{ClusterBuilder, NonFinitePolicy, Point};
///
/// let builder = ClusterBuilder::new().with_non_finite_policy(NonFinitePolicy::Reject);
/// assert_eq!(builder.non_finite_policy(), NonFinitePolicy::Reject);
///
/// let table = builder.build(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)])?;
/// let row = table.row(0)?;
/// assert_eq!((row.left, row.right, row.distance, row.size), (0, 1, 5.0, 2));
/// # Ok::<(), dendra_core::LinkageError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClusterBuilder {
    non_finite_policy: NonFinitePolicy,
}

impl ClusterBuilder {
    /// Creates a builder with the default [`NonFinitePolicy::Drop`] policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the treatment of non-finite points.
    #[must_use]
    pub fn with_non_finite_policy(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite_policy = policy;
        self
    }

    /// Returns the configured non-finite policy.
    #[must_use]
    pub fn non_finite_policy(&self) -> NonFinitePolicy {
        self.non_finite_policy
    }

    /// Builds the linkage table for `points`.
    ///
    /// Fewer than two usable points yield an empty table.
    ///
    /// # Errors
    /// Returns [`LinkageError::NonFinitePoint`] when the policy is
    /// [`NonFinitePolicy::Reject`] and a point has a NaN or infinite
    /// coordinate, and [`LinkageError::InvalidDistance`] when the closest
    /// remaining pair lies further apart than an `f64` can represent.
    pub fn build(&self, points: &[Point]) -> Result<LinkageTable> {
        let leaves = self.prepare(points)?;
        build_table(&leaves)
    }

    /// Builds the linkage table and keeps the points its leaves refer to.
    ///
    /// # Errors
    /// Same as [`Self::build`].
    ///
    /// # Examples
    /// ```
    /// use dendra_core::{ClusterBuilder, Point};
    ///
    /// let points = [
    ///     Point::new(0.0, 0.0),
    ///     Point::new(f64::NAN, 0.0),
    ///     Point::new(0.0, 2.0),
    /// ];
    /// let dendrogram = ClusterBuilder::new().cluster(&points)?;
    /// assert_eq!(dendrogram.points().len(), 2);
    /// assert_eq!(dendrogram.table().len(), 1);
    /// # Ok::<(), dendra_core::LinkageError>(())
    /// ```
    pub fn cluster(&self, points: &[Point]) -> Result<Dendrogram> {
        let leaves = self.prepare(points)?;
        let table = build_table(&leaves)?;
        Ok(Dendrogram::new(leaves, table))
    }

    fn prepare(&self, points: &[Point]) -> Result<Vec<Point>> {
        match self.non_finite_policy {
            NonFinitePolicy::Drop => Ok(retain_finite(points)),
            NonFinitePolicy::Reject => {
                if let Some((index, point)) = points
                    .iter()
                    .enumerate()
                    .find(|(_, point)| !point.is_finite())
                {
                    return Err(LinkageError::NonFinitePoint {
                        index,
                        x: point.x,
                        y: point.y,
                    });
                }
                Ok(points.to_vec())
            }
        }
    }
}

#[instrument(
    name = "core.build_table",
    err,
    skip(points),
    fields(leaves = points.len()),
)]
fn build_table(points: &[Point]) -> Result<LinkageTable> {
    let leaf_count = points.len();
    let row_count = leaf_count.saturating_sub(1);
    let mut clusters = ActiveClusters::new(leaf_count);
    let mut used = UsedPairs::with_capacity(row_count);
    let mut rows: Vec<LinkageRow> = Vec::with_capacity(row_count);

    for row in 0..row_count {
        let winner =
            closest_pair(points, &clusters, &used).ok_or(LinkageError::NoEligiblePair { row })?;
        if !winner.distance.is_finite() {
            return Err(LinkageError::InvalidDistance {
                row,
                distance: winner.distance,
            });
        }
        used.record(winner.second, winner.first);

        let mut size = 2;
        let first = absorb(&mut clusters, &rows, leaf_count, row, winner.first, &mut size);
        let second = absorb(&mut clusters, &rows, leaf_count, row, winner.second, &mut size);

        let merged = LinkageRow {
            left: first.min(second),
            right: first.max(second),
            distance: winner.distance,
            size,
        };
        debug!(
            row,
            left = merged.left,
            right = merged.right,
            distance = merged.distance,
            size = merged.size,
            "merged clusters"
        );
        rows.push(merged);
    }

    info!(leaves = leaf_count, rows = rows.len(), "linkage table built");
    Ok(LinkageTable::from_parts(leaf_count, rows))
}

/// Moves `leaf` and its current cluster into `row`, returning the table
/// reference for the cluster being absorbed.
///
/// A singleton contributes the leaf itself. An existing cluster contributes
/// `prior + leaf_count`, adds its extra members to `size`, and has all of its
/// members migrated.
fn absorb(
    clusters: &mut ActiveClusters,
    rows: &[LinkageRow],
    leaf_count: usize,
    row: usize,
    leaf: usize,
    size: &mut usize,
) -> usize {
    match clusters.cluster_of(leaf) {
        None => {
            clusters.assign_leaf(leaf, row);
            leaf
        }
        Some(prior) => {
            let prior_size = rows.get(prior).map_or(1, |merged| merged.size);
            *size += prior_size - 1;
            clusters.migrate(prior, row);
            prior + leaf_count
        }
    }
}
