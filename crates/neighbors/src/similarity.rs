//! Similarity metrics between two users' rating rows.
//!
//! Every metric only looks at the items both users rated. A MISSING cell on
//! either side drops that item from the computation entirely.
//!
//! Degenerate inputs are not special-cased beyond what is documented on each
//! function: zero variance or an empty overlap can produce NaN, and that NaN
//! flows on into neighbor ranking and prediction.

use data_loader::Cell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which similarity function ranks neighbors.
///
/// All variants follow "higher score = more similar"; Euclidean distance is
/// negated to fit that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityMetric {
    Pearson,
    Cosine,
    Euclidean,
}

impl SimilarityMetric {
    pub const ALL: [SimilarityMetric; 3] = [
        SimilarityMetric::Pearson,
        SimilarityMetric::Cosine,
        SimilarityMetric::Euclidean,
    ];

    /// Name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            SimilarityMetric::Pearson => "pearson",
            SimilarityMetric::Cosine => "cosine",
            SimilarityMetric::Euclidean => "euclidean",
        }
    }

    /// Similarity score of two rows of equal length
    pub fn score(&self, a: &[Cell], b: &[Cell]) -> f64 {
        match self {
            SimilarityMetric::Pearson => pearson_correlation(a, b),
            SimilarityMetric::Cosine => cosine_similarity(a, b),
            SimilarityMetric::Euclidean => euclidean_similarity(a, b),
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a metric name is not one of `pearson`, `cosine`, `euclidean`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid metric '{0}': expected one of pearson, cosine, euclidean")]
pub struct UnknownMetric(pub String);

impl FromStr for SimilarityMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimilarityMetric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Pairs of ratings at the indices both rows have rated
fn co_rated<'a>(a: &'a [Cell], b: &'a [Cell]) -> impl Iterator<Item = (f64, f64)> + 'a {
    a.iter().zip(b).filter_map(|pair| match pair {
        (Some(x), Some(y)) => Some((*x, *y)),
        _ => None,
    })
}

/// Pearson correlation over co-rated items.
///
/// No co-rated items gives `0.0`. If either side has zero variance over the
/// co-rated items the result is NaN.
pub fn pearson_correlation(a: &[Cell], b: &[Cell]) -> f64 {
    let pairs: Vec<(f64, f64)> = co_rated(a, b).collect();
    if pairs.is_empty() {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut numerator, mut denom_a, mut denom_b) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        numerator += dx * dy;
        denom_a += dx * dx;
        denom_b += dy * dy;
    }
    numerator / (denom_a * denom_b).sqrt()
}

/// Cosine similarity over co-rated items.
///
/// Both norms are taken over the co-rated items only, not the full rows.
/// No co-rated items gives `0/0` (NaN).
pub fn cosine_similarity(a: &[Cell], b: &[Cell]) -> f64 {
    let (dot, norm_a, norm_b) = co_rated(a, b).fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
        (dot + x * y, na + x * x, nb + y * y)
    });
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Euclidean distance over co-rated items (always `>= 0`)
pub fn euclidean_distance(a: &[Cell], b: &[Cell]) -> f64 {
    co_rated(a, b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Negated Euclidean distance, so closer rows score higher
pub fn euclidean_similarity(a: &[Cell], b: &[Cell]) -> f64 {
    -euclidean_distance(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn row(values: &[f64]) -> Vec<Cell> {
        values
            .iter()
            .map(|&v| if v < 0.0 { None } else { Some(v) })
            .collect()
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!("pearson".parse::<SimilarityMetric>(), Ok(SimilarityMetric::Pearson));
        assert_eq!("cosine".parse::<SimilarityMetric>(), Ok(SimilarityMetric::Cosine));
        assert_eq!("euclidean".parse::<SimilarityMetric>(), Ok(SimilarityMetric::Euclidean));
        assert_eq!(
            "manhattan".parse::<SimilarityMetric>(),
            Err(UnknownMetric("manhattan".to_string()))
        );
        assert_eq!(SimilarityMetric::Cosine.to_string(), "cosine");
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let a = row(&[1.0, 2.0, 3.0, -1.0]);
        let b = row(&[2.0, 4.0, 6.0, 5.0]);
        assert!((pearson_correlation(&a, &b) - 1.0).abs() < EPS);

        let c = row(&[3.0, 2.0, 1.0, 1.0]);
        assert!((pearson_correlation(&a, &c) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_pearson_bounded_and_symmetric() {
        let a = row(&[5.0, 3.0, -1.0, 1.0, 4.0]);
        let b = row(&[4.0, -1.0, 2.0, 2.0, 5.0]);
        let ab = pearson_correlation(&a, &b);
        let ba = pearson_correlation(&b, &a);
        assert!(ab.is_finite());
        assert!((-1.0 - EPS..=1.0 + EPS).contains(&ab));
        assert!((ab - ba).abs() < EPS);
    }

    #[test]
    fn test_pearson_no_overlap_is_zero() {
        let a = row(&[5.0, -1.0]);
        let b = row(&[-1.0, 3.0]);
        assert_eq!(pearson_correlation(&a, &b), 0.0);
    }

    #[test]
    fn test_pearson_zero_variance_is_nan() {
        let a = row(&[3.0, 3.0, 3.0]);
        let b = row(&[1.0, 2.0, 3.0]);
        assert!(pearson_correlation(&a, &b).is_nan());
    }

    #[test]
    fn test_cosine_self_similarity() {
        let a = row(&[5.0, -1.0, 2.0, 1.0]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_uses_co_rated_norms() {
        // Only item 0 is shared, so both norms come from that item alone
        let a = row(&[2.0, 9.0]);
        let b = row(&[3.0, -1.0]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_no_overlap_is_nan() {
        let a = row(&[5.0, -1.0]);
        let b = row(&[-1.0, 3.0]);
        assert!(cosine_similarity(&a, &b).is_nan());
    }

    #[test]
    fn test_euclidean() {
        let a = row(&[5.0, 3.0, -1.0]);
        let b = row(&[4.0, 3.0, 2.0]);
        assert!((euclidean_distance(&a, &b) - 1.0).abs() < EPS);
        assert!((euclidean_similarity(&a, &b) + 1.0).abs() < EPS);
        assert_eq!(euclidean_distance(&a, &a), 0.0);
        assert_eq!(SimilarityMetric::Euclidean.score(&a, &b), euclidean_similarity(&a, &b));
    }

    #[test]
    fn test_missing_never_treated_as_number() {
        // If MISSING leaked in as a value, these rows would differ
        let a = row(&[4.0, -1.0, 2.0]);
        let b = row(&[4.0, 1.0, 2.0]);
        assert_eq!(euclidean_distance(&a, &b), 0.0);
    }
}
