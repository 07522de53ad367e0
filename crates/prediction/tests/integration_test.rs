//! Integration tests for the fill pass.
//!
//! These tests load a ratings file, run neighbor selection and prediction
//! together, and check the properties the filled matrix must have.

use data_loader::{format_matrix, parse_ratings, RatingMatrix, WriteOptions, MISSING_SENTINEL};
use neighbors::{find_neighbors, SimilarityMetric};
use prediction::{
    fill, FillConfig, MatrixFiller, PredictionStrategy, Predictor, SimpleWeightedAverage,
    UndefinedPolicy,
};

const RATINGS: &str = "\
1
5
5 3 - 1 4
4 - 2 1 5
- 1 5 5 2
5 4 - 1 -
2 2 4 - 3
3 - 3 2 4
";

const STRATEGIES: [PredictionStrategy; 2] =
    [PredictionStrategy::Simple, PredictionStrategy::MeanCentered];

fn load() -> RatingMatrix {
    parse_ratings(RATINGS, "ratings.txt").unwrap().matrix
}

fn all_configs(k: usize) -> Vec<FillConfig> {
    SimilarityMetric::ALL
        .into_iter()
        .flat_map(|metric| STRATEGIES.map(|strategy| FillConfig::new(metric, k, strategy)))
        .collect()
}

fn bits(matrix: &RatingMatrix) -> Vec<Vec<Option<u64>>> {
    matrix
        .rows()
        .iter()
        .map(|row| row.iter().map(|c| c.map(f64::to_bits)).collect())
        .collect()
}

#[test]
fn test_rated_cells_pass_through() {
    let original = load();
    for config in all_configs(2) {
        let filled = fill(&original, config);
        for user in 0..original.n_users() {
            for item in 0..original.n_items() {
                if let Some(r) = original.get(user, item) {
                    assert_eq!(filled.get(user, item).map(f64::to_bits), Some(r.to_bits()));
                }
            }
        }
        assert_eq!(filled.missing_count(), 0);
    }
}

#[test]
fn test_fill_is_idempotent() {
    let original = load();
    for config in all_configs(3) {
        let once = fill(&original, config);
        let twice = fill(&once, config);
        assert_eq!(bits(&once), bits(&twice));
    }
}

#[test]
fn test_predictions_read_original_matrix() {
    let original = load();
    let config = FillConfig::new(SimilarityMetric::Pearson, 2, PredictionStrategy::MeanCentered);
    let filler = MatrixFiller::new(config);
    let filled = filler.fill(&original);

    for (user, item) in original.missing_cells() {
        let expected = filler.predict_cell(&original, user, item);
        assert_eq!(
            filled.get(user, item).map(f64::to_bits),
            Some(expected.to_bits())
        );
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let original = load();
    for config in all_configs(3) {
        let sequential = fill(&original, config);
        let parallel = fill(&original, config.with_parallel(true));
        assert_eq!(bits(&sequential), bits(&parallel));
    }
}

#[test]
fn test_k_zero_gives_undefined_everywhere() {
    let original = load();
    for config in all_configs(0) {
        let (filled, report) = MatrixFiller::new(config).fill_with_report(&original);
        assert_eq!(report.undefined, original.missing_count());
        for (user, item) in original.missing_cells() {
            assert!(!filled.get(user, item).unwrap().is_finite());
        }
    }
}

#[test]
fn test_leave_missing_keeps_only_defined_predictions() {
    let original = load();
    let config = FillConfig::new(SimilarityMetric::Cosine, 0, PredictionStrategy::Simple)
        .with_undefined_policy(UndefinedPolicy::LeaveMissing);
    let filled = fill(&original, config);
    assert_eq!(bits(&filled), bits(&original));
}

#[test]
fn test_neighbors_feed_prediction() {
    let original = load();
    // user 0, item 2: raters are users 1, 2, 4 and 5
    let neighbors = find_neighbors(&original, 0, 2, 2, SimilarityMetric::Euclidean);
    assert_eq!(neighbors.len(), 2);
    for n in &neighbors {
        assert_ne!(n.user, 0);
        assert!(original.is_rated(n.user, 2));
    }

    let expected = SimpleWeightedAverage.predict(&original, 0, 2, &neighbors);
    let config = FillConfig::new(SimilarityMetric::Euclidean, 2, PredictionStrategy::Simple);
    assert_eq!(fill(&original, config).get(0, 2), Some(expected));
}

#[test]
fn test_sentinel_matrix_round_trip() {
    let raw = vec![
        vec![5.0, 3.0, MISSING_SENTINEL],
        vec![4.0, 3.0, 2.0],
        vec![5.0, 4.0, 3.0],
    ];
    let matrix = RatingMatrix::from_sentinel_rows(raw, MISSING_SENTINEL).unwrap();
    let config = FillConfig::new(SimilarityMetric::Euclidean, 2, PredictionStrategy::Simple);
    let filled = fill(&matrix, config);

    assert_eq!(
        filled.to_sentinel_rows(MISSING_SENTINEL),
        vec![vec![5.0, 3.0, -2.5], vec![4.0, 3.0, 2.0], vec![5.0, 4.0, 3.0]]
    );
    assert_eq!(
        format_matrix(&filled, WriteOptions::default()),
        "5 3 -2.5\n4 3 2\n5 4 3\n"
    );
}

#[test]
fn test_report_serializes() {
    let config = FillConfig::new(SimilarityMetric::Pearson, 2, PredictionStrategy::MeanCentered);
    let (_, report) = MatrixFiller::new(config).fill_with_report(&load());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["metric"], "pearson");
    assert_eq!(json["strategy"], "mean");
    assert_eq!(json["k"], 2);
    assert_eq!(json["missing"], 7);
}
