//! Transient bookkeeping owned by a single linkage build.
//!
//! Both structures are dense arrays indexed by leaf or row, so they never
//! allocate after construction.

/// Maps each leaf to the row of the most recent merge that absorbed it.
///
/// `None` marks a leaf that is still a singleton cluster.
#[derive(Clone, Debug)]
pub(super) struct ActiveClusters {
    membership: Vec<Option<usize>>,
}

impl ActiveClusters {
    pub(super) fn new(leaf_count: usize) -> Self {
        Self {
            membership: vec![None; leaf_count],
        }
    }

    pub(super) fn cluster_of(&self, leaf: usize) -> Option<usize> {
        self.membership.get(leaf).copied().flatten()
    }

    /// Two leaves may merge while they sit in different clusters, or while
    /// both are still singletons.
    pub(super) fn eligible(&self, left: usize, right: usize) -> bool {
        match (self.cluster_of(left), self.cluster_of(right)) {
            (None, None) => true,
            (left_cluster, right_cluster) => left_cluster != right_cluster,
        }
    }

    pub(super) fn assign_leaf(&mut self, leaf: usize, row: usize) {
        if let Some(slot) = self.membership.get_mut(leaf) {
            *slot = Some(row);
        }
    }

    /// Moves every leaf of the cluster built by `from_row` into `to_row`.
    pub(super) fn migrate(&mut self, from_row: usize, to_row: usize) {
        for slot in &mut self.membership {
            if *slot == Some(from_row) {
                *slot = Some(to_row);
            }
        }
    }
}

/// Leaf pairs already chosen as the closest pair of an earlier row.
///
/// A recorded pair is never selected again, whichever order it is scanned in.
#[derive(Clone, Debug)]
pub(super) struct UsedPairs {
    pairs: Vec<(usize, usize)>,
}

impl UsedPairs {
    pub(super) fn with_capacity(rows: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(rows),
        }
    }

    pub(super) fn record(&mut self, first: usize, second: usize) {
        self.pairs.push((first, second));
    }

    pub(super) fn contains(&self, left: usize, right: usize) -> bool {
        self.pairs
            .iter()
            .any(|&pair| pair == (left, right) || pair == (right, left))
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.pairs.len()
    }
}
