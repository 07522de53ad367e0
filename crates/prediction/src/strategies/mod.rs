//! Prediction strategy implementations.
//!
//! Each strategy implements [`Predictor`]; [`PredictionStrategy`] names them
//! for configuration and the command line.

pub mod mean_centered;
pub mod simple;

pub use mean_centered::MeanCenteredAverage;
pub use simple::SimpleWeightedAverage;

use crate::traits::Predictor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which formula turns neighbors into a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionStrategy {
    #[serde(rename = "simple")]
    Simple,
    #[serde(rename = "mean")]
    MeanCentered,
}

impl PredictionStrategy {
    /// Name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            PredictionStrategy::Simple => "simple",
            PredictionStrategy::MeanCentered => "mean",
        }
    }

    /// The predictor implementing this strategy
    pub fn predictor(&self) -> Box<dyn Predictor> {
        match self {
            PredictionStrategy::Simple => Box::new(SimpleWeightedAverage),
            PredictionStrategy::MeanCentered => Box::new(MeanCenteredAverage),
        }
    }
}

impl fmt::Display for PredictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a strategy name is not `simple` or `mean`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid prediction type '{0}': expected simple or mean")]
pub struct UnknownStrategy(pub String);

impl FromStr for PredictionStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(PredictionStrategy::Simple),
            "mean" => Ok(PredictionStrategy::MeanCentered),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
