//! A linkage table paired with the points its leaves refer to.

use std::collections::BTreeSet;

use crate::{
    error::Result,
    linkage::{LinkageTable, MergeSegment, merge_segments},
    point::Point,
};

/// Output of [`crate::ClusterBuilder::cluster`].
///
/// Leaf `i` of [`Self::table`] is [`Self::points`]`[i]`; points removed by
/// the builder's non-finite policy are not present.
///
/// # Examples
/// ```
/// use dendra_core::{ClusterBuilder, Point};
///
/// let points = [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(10.0, 10.0)];
/// let dendrogram = ClusterBuilder::new().cluster(&points)?;
/// assert_eq!(dendrogram.leaves_under(1)?.len(), 3);
/// assert_eq!(dendrogram.segments()?.len(), 2);
/// # Ok::<(), dendra_core::LinkageError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dendrogram {
    points: Vec<Point>,
    table: LinkageTable,
}

impl Dendrogram {
    pub(crate) fn new(points: Vec<Point>, table: LinkageTable) -> Self {
        debug_assert_eq!(points.len(), table.leaf_count());
        Self { points, table }
    }

    /// Returns the clustered points in leaf order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the linkage table.
    #[must_use]
    pub fn table(&self) -> &LinkageTable {
        &self.table
    }

    /// Consumes the dendrogram, returning its points and table.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point>, LinkageTable) {
        (self.points, self.table)
    }

    /// Returns every leaf beneath the cluster built by `row`.
    ///
    /// # Errors
    /// See [`crate::leaves_under`].
    pub fn leaves_under(&self, row: usize) -> Result<BTreeSet<usize>> {
        self.table.leaves_under(row)
    }

    /// Returns the leaf pair realising each merge.
    ///
    /// # Errors
    /// See [`merge_segments`].
    pub fn segments(&self) -> Result<Vec<MergeSegment>> {
        merge_segments(&self.points, &self.table)
    }
}
