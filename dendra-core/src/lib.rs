//! Dendra core library.
//!
//! Builds single-linkage hierarchies over planar points and reads them back.
//! [`ClusterBuilder`] produces a [`LinkageTable`] with one row per merge, and
//! [`leaves_under`] expands any row of such a table into the original points
//! it covers.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dendrogram;
mod error;
mod linkage;
mod point;
mod reduction;

#[cfg(test)]
mod test_utils;

pub use crate::{
    dendrogram::Dendrogram,
    error::{LinkageError, LinkageErrorCode, Result},
    linkage::{
        ClusterBuilder, ClusterRef, LinkageRow, LinkageTable, MergeSegment, NonFinitePolicy,
        SubtreeResolver, leaves_under, merge_segments,
    },
    point::{Point, retain_finite},
    reduction::{FeatureReduction, project},
};
