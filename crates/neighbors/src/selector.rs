//! Neighbor selection: the k users most similar to a target user among
//! those who rated the target item.
//!
//! ## Algorithm
//! 1. Walk every other user in index order
//! 2. Keep a user only if they rated the target item
//! 3. Score each kept user against the target over their full rows
//! 4. Sort by score, highest first (stable, so ties keep index order).
//!    A NaN score is a barrier: it keeps its index position and only the
//!    runs of users between NaNs are sorted.
//! 5. Truncate to k

use crate::similarity::SimilarityMetric;
use data_loader::{ItemIndex, RatingMatrix, UserIndex};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// A user picked as neighbor, with their similarity to the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub user: UserIndex,
    pub similarity: f64,
}

impl Neighbor {
    pub fn new(user: UserIndex, similarity: f64) -> Self {
        Self { user, similarity }
    }
}

/// Neighbors sorted by non-increasing similarity, at most k long
pub type NeighborList = Vec<Neighbor>;

/// Finds the top-k neighbors for (user, item) cells
#[derive(Debug, Clone, Copy)]
pub struct NeighborSelector {
    metric: SimilarityMetric,
    k: usize,
}

impl NeighborSelector {
    pub fn new(metric: SimilarityMetric, k: usize) -> Self {
        Self { metric, k }
    }

    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Neighbors of `user` that can vote on `item`
    #[instrument(level = "trace", skip(self, matrix), fields(metric = %self.metric, k = self.k))]
    pub fn find(&self, matrix: &RatingMatrix, user: UserIndex, item: ItemIndex) -> NeighborList {
        let target = matrix.row(user);

        let mut neighbors: NeighborList = (0..matrix.n_users())
            .filter(|&other| other != user && matrix.is_rated(other, item))
            .map(|other| Neighbor::new(other, self.metric.score(target, matrix.row(other))))
            .collect();

        let candidates = neighbors.len();
        sort_by_similarity(&mut neighbors);
        neighbors.truncate(self.k);

        debug!(
            "user {} item {}: kept {} of {} candidate neighbors",
            user,
            item,
            neighbors.len(),
            candidates
        );
        neighbors
    }
}

/// Convenience wrapper around [`NeighborSelector::find`]
pub fn find_neighbors(
    matrix: &RatingMatrix,
    user: UserIndex,
    item: ItemIndex,
    k: usize,
    metric: SimilarityMetric,
) -> NeighborList {
    NeighborSelector::new(metric, k).find(matrix, user, item)
}

/// Stable descending sort where NaN-scored neighbors stay in place.
///
/// Nothing moves across a NaN, so each run between NaNs is sorted on its
/// own. Inside a run every score is comparable.
fn sort_by_similarity(neighbors: &mut [Neighbor]) {
    for run in neighbors.split_mut(|n| n.similarity.is_nan()) {
        run.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
    }
}
