//! Similarity-weighted average of the neighbors' ratings.

use crate::traits::Predictor;
use data_loader::{ItemIndex, RatingMatrix, UserIndex};
use neighbors::Neighbor;

/// `Σ sim·r / Σ |sim|` over neighbors who rated the item.
///
/// Neighbors without a rating for the item are skipped. If none remain the
/// result is `0/0`, i.e. NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleWeightedAverage;

impl Predictor for SimpleWeightedAverage {
    fn name(&self) -> &str {
        "SimpleWeightedAverage"
    }

    fn predict(
        &self,
        matrix: &RatingMatrix,
        _user: UserIndex,
        item: ItemIndex,
        neighbors: &[Neighbor],
    ) -> f64 {
        let (numerator, denominator) = neighbors
            .iter()
            .filter_map(|n| matrix.get(n.user, item).map(|r| (n.similarity, r)))
            .fold((0.0, 0.0), |(num, den), (sim, r)| {
                (num + sim * r, den + sim.abs())
            });
        numerator / denominator
    }
}
