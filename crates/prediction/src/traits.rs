//! Core trait for rating prediction.
//!
//! A predictor turns the neighbor list of one (user, item) cell into a
//! single rating. Implementations are pure: they only read the matrix.

use data_loader::{ItemIndex, RatingMatrix, UserIndex};
use neighbors::Neighbor;

/// Combines neighbor ratings into a prediction.
///
/// `Send + Sync` lets the filler share one predictor across rayon workers.
pub trait Predictor: Send + Sync {
    /// Returns the name of this predictor (for logging/debugging)
    fn name(&self) -> &str;

    /// Predict the rating of `user` for `item`.
    ///
    /// # Arguments
    /// * `matrix` - The original ratings, never partially filled
    /// * `user` - Row of the target user
    /// * `item` - Column of the target item
    /// * `neighbors` - Neighbors ranked for this cell
    ///
    /// # Returns
    /// The predicted rating. Non-finite when no neighbor contributes weight.
    fn predict(
        &self,
        matrix: &RatingMatrix,
        user: UserIndex,
        item: ItemIndex,
        neighbors: &[Neighbor],
    ) -> f64;
}
