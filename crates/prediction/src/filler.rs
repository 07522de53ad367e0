//! The MatrixFiller predicts every MISSING cell of a rating matrix.
//!
//! ## Algorithm
//! 1. Copy the input matrix
//! 2. For each MISSING cell in row-major order:
//!    a. Rank neighbors with the configured metric and k
//!    b. Predict with the configured strategy
//!    c. Write the prediction into the copy
//! 3. Return the copy
//!
//! Neighbors and predictions always read the original matrix, so a cell's
//! prediction never depends on cells filled before it. That is also what
//! makes the optional rayon pass produce the same output.

use crate::strategies::PredictionStrategy;
use crate::traits::Predictor;
use data_loader::{ItemIndex, RatingMatrix, UserIndex};
use neighbors::{NeighborSelector, SimilarityMetric};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// What to do with predictions that come out NaN or infinite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedPolicy {
    /// Write the non-finite value into the output
    #[default]
    Propagate,
    /// Keep the cell MISSING
    LeaveMissing,
}

/// Everything the fill pass needs, passed in explicitly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillConfig {
    pub metric: SimilarityMetric,
    pub k: usize,
    pub strategy: PredictionStrategy,
    /// Predict cells on the rayon thread pool (default: false)
    pub parallel: bool,
    /// Handling of non-finite predictions (default: propagate)
    pub undefined: UndefinedPolicy,
}

impl FillConfig {
    pub fn new(metric: SimilarityMetric, k: usize, strategy: PredictionStrategy) -> Self {
        Self {
            metric,
            k,
            strategy,
            parallel: false,
            undefined: UndefinedPolicy::Propagate,
        }
    }

    /// Configure parallel prediction (default: false)
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Configure handling of non-finite predictions (default: Propagate)
    pub fn with_undefined_policy(mut self, policy: UndefinedPolicy) -> Self {
        self.undefined = policy;
        self
    }
}

/// Summary of one fill pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillReport {
    pub metric: SimilarityMetric,
    pub k: usize,
    pub strategy: PredictionStrategy,
    /// MISSING cells in the input
    pub missing: usize,
    /// Cells that received a value in the output
    pub filled: usize,
    /// Predictions that were NaN or infinite
    pub undefined: usize,
}

/// Fills MISSING cells with neighbor-based predictions.
pub struct MatrixFiller {
    config: FillConfig,
    selector: NeighborSelector,
    predictor: Box<dyn Predictor>,
}

impl MatrixFiller {
    pub fn new(config: FillConfig) -> Self {
        Self {
            config,
            selector: NeighborSelector::new(config.metric, config.k),
            predictor: config.strategy.predictor(),
        }
    }

    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Predict a single cell from `matrix`.
    ///
    /// Works for rated cells too; the filler only calls it for MISSING ones.
    pub fn predict_cell(&self, matrix: &RatingMatrix, user: UserIndex, item: ItemIndex) -> f64 {
        let neighbors = self.selector.find(matrix, user, item);
        let prediction = self.predictor.predict(matrix, user, item, &neighbors);
        debug!(
            "user {} item {}: {} from {} neighbors",
            user,
            item,
            prediction,
            neighbors.len()
        );
        prediction
    }

    /// Fill every MISSING cell, returning a new matrix
    pub fn fill(&self, matrix: &RatingMatrix) -> RatingMatrix {
        self.fill_with_report(matrix).0
    }

    /// Fill every MISSING cell and report what happened
    #[instrument(
        skip(self, matrix),
        fields(
            metric = %self.config.metric,
            k = self.config.k,
            strategy = %self.config.strategy,
            predictor = self.predictor.name(),
        )
    )]
    pub fn fill_with_report(&self, matrix: &RatingMatrix) -> (RatingMatrix, FillReport) {
        let cells: Vec<(UserIndex, ItemIndex)> = matrix.missing_cells().collect();

        let predictions: Vec<f64> = if self.config.parallel {
            cells
                .par_iter()
                .map(|&(user, item)| self.predict_cell(matrix, user, item))
                .collect()
        } else {
            cells
                .iter()
                .map(|&(user, item)| self.predict_cell(matrix, user, item))
                .collect()
        };

        let mut result = matrix.clone();
        let mut report = FillReport {
            metric: self.config.metric,
            k: self.config.k,
            strategy: self.config.strategy,
            missing: cells.len(),
            filled: 0,
            undefined: 0,
        };

        for (&(user, item), prediction) in cells.iter().zip(predictions) {
            if !prediction.is_finite() {
                report.undefined += 1;
                debug!("user {} item {}: prediction is {}", user, item, prediction);
                if self.config.undefined == UndefinedPolicy::LeaveMissing {
                    continue;
                }
            }
            result.set(user, item, Some(prediction));
            report.filled += 1;
        }

        if report.undefined > 0 {
            warn!(
                "{} of {} predictions were NaN or infinite ({})",
                report.undefined,
                report.missing,
                match self.config.undefined {
                    UndefinedPolicy::Propagate => "written as is",
                    UndefinedPolicy::LeaveMissing => "left missing",
                }
            );
        }
        info!(
            "Filled {} of {} missing cells ({} undefined)",
            report.filled, report.missing, report.undefined
        );
        (result, report)
    }
}

/// Fill `matrix` with the given configuration
pub fn fill(matrix: &RatingMatrix, config: FillConfig) -> RatingMatrix {
    MatrixFiller::new(config).fill(matrix)
}
