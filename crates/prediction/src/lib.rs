//! Rating prediction and matrix filling.
//!
//! This crate provides:
//! - Predictor trait and the two prediction strategies
//! - MatrixFiller, which predicts every MISSING cell of a matrix
//!
//! ## Architecture
//! Each MISSING cell goes through the same stages:
//! 1. NeighborSelector ranks the users who rated the item
//! 2. A Predictor combines their ratings
//! 3. The filler writes the result into a copy of the input
//!
//! ## Example Usage
//! ```ignore
//! use neighbors::SimilarityMetric;
//! use prediction::{FillConfig, MatrixFiller, PredictionStrategy};
//!
//! let config = FillConfig::new(SimilarityMetric::Pearson, 5, PredictionStrategy::MeanCentered);
//! let (filled, report) = MatrixFiller::new(config).fill_with_report(&matrix);
//! ```

pub mod traits;
pub mod strategies;
pub mod filler;

// Re-export main types
pub use traits::Predictor;
pub use strategies::{MeanCenteredAverage, PredictionStrategy, SimpleWeightedAverage, UnknownStrategy};
pub use filler::{fill, FillConfig, FillReport, MatrixFiller, UndefinedPolicy};
