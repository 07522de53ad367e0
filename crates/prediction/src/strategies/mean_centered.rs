//! Mean-centered weighted average.
//!
//! Each neighbor votes with how far its rating sits from its own average,
//! and the weighted offset is added to the target user's average.

use crate::traits::Predictor;
use data_loader::{ItemIndex, RatingMatrix, UserIndex};
use neighbors::Neighbor;

/// `mean(user) + Σ sim·(r − mean(neighbor)) / Σ |sim|`.
///
/// Means are over rated cells only. A target user with no ratings has a NaN
/// mean, and so does the prediction. Same NaN as the simple average when no
/// neighbor rated the item.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanCenteredAverage;

impl Predictor for MeanCenteredAverage {
    fn name(&self) -> &str {
        "MeanCenteredAverage"
    }

    fn predict(
        &self,
        matrix: &RatingMatrix,
        user: UserIndex,
        item: ItemIndex,
        neighbors: &[Neighbor],
    ) -> f64 {
        let mean_user = matrix.user_mean(user);

        let (numerator, denominator) = neighbors
            .iter()
            .filter_map(|n| {
                matrix
                    .get(n.user, item)
                    .map(|r| (n.similarity, r - matrix.user_mean(n.user)))
            })
            .fold((0.0, 0.0), |(num, den), (sim, offset)| {
                (num + sim * offset, den + sim.abs())
            });

        mean_user + numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RatingMatrix {
        RatingMatrix::new(vec![
            vec![Some(5.0), Some(3.0), None],
            vec![Some(4.0), Some(3.0), Some(2.0)],
            vec![Some(5.0), Some(4.0), Some(3.0)],
            vec![None, None, None],
        ])
        .unwrap()
    }

    #[test]
    fn test_mean_centered() {
        let m = sample();
        // mean(0) = 4, neighbor offsets: 2 - 3 = -1 and 3 - 4 = -1
        let neighbors = vec![Neighbor::new(1, 0.5), Neighbor::new(2, 1.0)];
        let p = MeanCenteredAverage.predict(&m, 0, 2, &neighbors);
        assert!((p - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_similarity_flips_offset() {
        let m = sample();
        let neighbors = vec![Neighbor::new(1, -1.0), Neighbor::new(2, -1.0)];
        assert_eq!(MeanCenteredAverage.predict(&m, 0, 2, &neighbors), 5.0);
    }

    #[test]
    fn test_user_without_ratings_is_nan() {
        let m = sample();
        let neighbors = vec![Neighbor::new(1, 1.0)];
        assert!(MeanCenteredAverage.predict(&m, 3, 2, &neighbors).is_nan());
    }

    #[test]
    fn test_no_neighbors_is_nan() {
        let m = sample();
        assert!(MeanCenteredAverage.predict(&m, 0, 2, &[]).is_nan());
    }
}
