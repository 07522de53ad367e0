use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use data_loader::{read_ratings_file, write_matrix, write_matrix_file, WriteOptions};
use neighbors::SimilarityMetric;
use prediction::{FillConfig, MatrixFiller, PredictionStrategy, UndefinedPolicy};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// cf-predict - fill in missing ratings with user-based collaborative filtering
#[derive(Parser)]
#[command(name = "cf-predict")]
#[command(about = "Predict missing ratings from the k most similar users", long_about = None)]
struct Cli {
    /// Ratings file: min rating, max rating, then one row per user ('-' = not rated)
    filename: PathBuf,

    /// Similarity metric: pearson, cosine or euclidean
    metric: SimilarityMetric,

    /// Number of neighbors per prediction (0 selects none, negative means no limit)
    #[arg(allow_negative_numbers = true)]
    k: i64,

    /// Prediction type: simple or mean
    prediction_type: PredictionStrategy,

    /// File the predicted matrix is written to
    #[arg(short, long, default_value = "predictedMatrix.txt")]
    output: PathBuf,

    /// Only print to stdout, don't write the output file
    #[arg(long)]
    no_file: bool,

    /// Print ratings with this many decimals instead of the shortest exact form
    #[arg(long)]
    precision: Option<usize>,

    /// Predict cells in parallel
    #[arg(long)]
    parallel: bool,

    /// Leave cells MISSING when their prediction is NaN or infinite
    #[arg(long)]
    leave_undefined: bool,

    /// Write a JSON summary of the fill pass to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing on stderr so stdout only carries the matrix
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let ratings = read_ratings_file(&cli.filename)
        .with_context(|| format!("Failed to load ratings from {}", cli.filename.display()))?;
    info!(
        "Loaded {} users x {} items ({} missing) in {:?}",
        ratings.matrix.n_users(),
        ratings.matrix.n_items(),
        ratings.matrix.missing_count(),
        start.elapsed()
    );

    let out_of_range = ratings.out_of_range();
    if !out_of_range.is_empty() {
        warn!(
            "{} ratings fall outside [{}, {}], first at user {} item {}",
            out_of_range.len(),
            ratings.min_rating,
            ratings.max_rating,
            out_of_range[0].0,
            out_of_range[0].1
        );
    }

    let undefined = if cli.leave_undefined {
        UndefinedPolicy::LeaveMissing
    } else {
        UndefinedPolicy::Propagate
    };
    let config = FillConfig::new(cli.metric, neighbor_count(cli.k), cli.prediction_type)
        .with_parallel(cli.parallel)
        .with_undefined_policy(undefined);

    let start = Instant::now();
    let (predicted, report) = MatrixFiller::new(config).fill_with_report(&ratings.matrix);
    info!("Fill pass took {:?}", start.elapsed());

    let options = WriteOptions {
        precision: cli.precision,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", "Predicted Utility Matrix:".bold().blue())?;
    write_matrix(&mut out, &predicted, options).context("Failed to print matrix")?;
    out.flush()?;

    if !cli.no_file {
        write_matrix_file(&cli.output, &predicted, options)
            .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    }

    if let Some(path) = &cli.report {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        writer.flush()?;
        info!("Wrote fill report to {}", path.display());
    }

    Ok(())
}

/// Negative neighbor counts mean every candidate is kept
fn neighbor_count(k: i64) -> usize {
    usize::try_from(k).unwrap_or(usize::MAX)
}
