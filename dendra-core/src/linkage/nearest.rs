//! Closest-pair selection for one merge round.
//!
//! Every ordered pair `(i, j)` with `i != j` is scanned in row-major order.
//! A strictly closer pair always wins. An equally close pair replaces the
//! current best only when [`Candidate::prefers_on_tie`] says so, which
//! biases selection towards low leaf indices without being lexicographic.

use crate::point::Point;

use super::state::{ActiveClusters, UsedPairs};

/// The closest eligible pair found so far in a round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Candidate {
    pub(super) distance: f64,
    /// Row index of the scan step that produced the pair.
    pub(super) first: usize,
    /// Column index of the scan step that produced the pair.
    pub(super) second: usize,
}

impl Candidate {
    /// Decides whether the equidistant pair `(i, j)` displaces `self`.
    ///
    /// The new pair wins when either of its indices is below both of the
    /// incumbent's. Failing that, it wins when it shares one index with the
    /// incumbent and both the shared index and its own other index are below
    /// the incumbent's other index.
    pub(super) fn prefers_on_tie(&self, i: usize, j: usize) -> bool {
        let (a, b) = (self.first, self.second);
        if (i < a && i < b) || (j < a && j < b) {
            return true;
        }
        (i < a && i == b && j < a)
            || (i < b && i == a && j < b)
            || (j < a && j == b && i < a)
            || (j < b && j == a && i < b)
    }
}

/// Scans all ordered pairs and returns the winning pair, or `None` when no pair is
/// eligible.
pub(super) fn closest_pair(
    points: &[Point],
    clusters: &ActiveClusters,
    used: &UsedPairs,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (i, left) in points.iter().enumerate() {
        for (j, right) in points.iter().enumerate() {
            if i == j || !clusters.eligible(i, j) || used.contains(i, j) {
                continue;
            }
            let distance = left.distance(right);
            let replace = match best {
                None => true,
                Some(current) if distance < current.distance => true,
                Some(current) if distance == current.distance => current.prefers_on_tie(i, j),
                Some(_) => false,
            };
            if replace {
                best = Some(Candidate {
                    distance,
                    first: i,
                    second: j,
                });
            }
        }
    }
    best
}
