//! Parser for ratings files.
//!
//! Format:
//! - line 1: minimum rating
//! - line 2: maximum rating
//! - every further line: one user's ratings, whitespace-separated, where
//!   `-` marks an item the user has not rated
//!
//! Blank rating lines are skipped. Every row must have as many tokens as
//! the first one.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Token that marks an unrated item
pub const MISSING_TOKEN: &str = "-";

/// Read and parse a ratings file from disk
pub fn read_ratings_file(path: &Path) -> Result<RatingsFile> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_ratings(&content, &file_name)
}

/// Parse the text of a ratings file.
///
/// `file_name` is only used to give parse errors some context.
pub fn parse_ratings(content: &str, file_name: &str) -> Result<RatingsFile> {
    let mut lines = content.lines().enumerate();

    let min_rating = parse_header(lines.next(), file_name, 1, "minimum rating")?;
    let max_rating = parse_header(lines.next(), file_name, 2, "maximum rating")?;
    if min_rating > max_rating {
        return Err(DataLoadError::ValidationError(format!(
            "minimum rating {} is greater than maximum rating {}",
            min_rating, max_rating
        )));
    }

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    let mut expected: Option<usize> = None;

    for (idx, line) in lines {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }

        let row = line_trimmed
            .split_whitespace()
            .map(|token| parse_cell(token, file_name, line_no))
            .collect::<Result<Vec<Cell>>>()?;

        match expected {
            None => expected = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(DataLoadError::FieldCountMismatch {
                    expected,
                    found: row.len(),
                    line: line_no,
                });
            }
            Some(_) => {}
        }

        rows.push(row);
    }

    debug!(
        "Parsed {} users x {} items from {}",
        rows.len(),
        expected.unwrap_or(0),
        file_name
    );

    Ok(RatingsFile {
        min_rating,
        max_rating,
        matrix: RatingMatrix::new(rows)?,
    })
}

fn parse_header(
    line: Option<(usize, &str)>,
    file_name: &str,
    line_no: usize,
    what: &str,
) -> Result<f64> {
    let (_, line) = line.ok_or_else(|| DataLoadError::ParseError {
        file: file_name.to_string(),
        line: line_no,
        reason: format!("Missing {}", what),
    })?;

    line.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file_name.to_string(),
        line: line_no,
        reason: format!("Invalid {}: {}", what, e),
    })
}

/// Parse one rating token: `-` is MISSING, anything else must be a number
fn parse_cell(token: &str, file_name: &str, line_no: usize) -> Result<Cell> {
    if token == MISSING_TOKEN {
        return Ok(None);
    }
    token
        .parse::<f64>()
        .map(Some)
        .map_err(|e| DataLoadError::ParseError {
            file: file_name.to_string(),
            line: line_no,
            reason: format!("Invalid rating '{}': {}", token, e),
        })
}
