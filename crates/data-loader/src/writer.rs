//! Writing matrices back out in the ratings-file row format.
//!
//! Each row becomes one line of space-separated tokens, with `-` for cells
//! that are still MISSING. Non-finite values print as `NaN`, `inf` or
//! `-inf`, which `parse_ratings` reads back as numbers.

use crate::error::Result;
use crate::parser::MISSING_TOKEN;
use crate::types::{Cell, RatingMatrix};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// How numbers are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Fixed number of decimals, or `None` for the shortest exact form
    pub precision: Option<usize>,
}

impl WriteOptions {
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Render one cell
pub fn format_cell(cell: Cell, options: WriteOptions) -> String {
    match (cell, options.precision) {
        (None, _) => MISSING_TOKEN.to_string(),
        (Some(v), Some(p)) if v.is_finite() => format!("{:.*}", p, v),
        (Some(v), _) => v.to_string(),
    }
}

/// Write the matrix rows to any writer
pub fn write_matrix<W: Write>(out: &mut W, matrix: &RatingMatrix, options: WriteOptions) -> Result<()> {
    for row in matrix.rows() {
        let line = row
            .iter()
            .map(|&cell| format_cell(cell, options))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Render the whole matrix into a string
pub fn format_matrix(matrix: &RatingMatrix, options: WriteOptions) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_matrix(&mut buf, matrix, options);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write the matrix to a file, replacing any existing content
pub fn write_matrix_file(path: &Path, matrix: &RatingMatrix, options: WriteOptions) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_matrix(&mut out, matrix, options)?;
    out.flush()?;
    info!("Wrote {} rows to {}", matrix.n_users(), path.display());
    Ok(())
}
