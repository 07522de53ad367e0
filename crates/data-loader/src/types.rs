//! Core domain types for the rating data.
//!
//! A utility matrix holds one row per user and one column per item. A cell
//! is either a rating or MISSING, which is modelled as `None` so that no
//! numeric value is ever mistaken for "not rated".

use crate::error::{DataLoadError, Result};
use serde::Serialize;

// =============================================================================
// Type Aliases
// =============================================================================

/// Row index of a user in the utility matrix
pub type UserIndex = usize;

/// Column index of an item in the utility matrix
pub type ItemIndex = usize;

/// A single cell: `Some(rating)` or `None` for MISSING
pub type Cell = Option<f64>;

/// Marker historically used for unrated cells in plain `f64` matrices.
///
/// Only meaningful at the boundary: see [`RatingMatrix::from_sentinel_rows`].
pub const MISSING_SENTINEL: f64 = -1.0;

// =============================================================================
// RatingMatrix
// =============================================================================

/// User × item ratings with MISSING cells.
///
/// Invariant: every row has exactly `n_items` cells. The constructor checks
/// this so the similarity code can index two rows in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingMatrix {
    rows: Vec<Vec<Cell>>,
    n_items: usize,
}

impl RatingMatrix {
    /// Build a matrix from rows of cells.
    ///
    /// Returns `DataLoadError::RaggedRow` if any row length differs from the
    /// first row.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let n_items = rows.first().map(|r| r.len()).unwrap_or(0);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != n_items {
                return Err(DataLoadError::RaggedRow {
                    row,
                    expected: n_items,
                    found: cells.len(),
                });
            }
        }
        Ok(Self { rows, n_items })
    }

    /// Build a matrix from raw doubles, treating every value equal to
    /// `missing` as MISSING.
    pub fn from_sentinel_rows(rows: Vec<Vec<f64>>, missing: f64) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|v| if v == missing { None } else { Some(v) })
                    .collect()
            })
            .collect();
        Self::new(rows)
    }

    /// Inverse of [`RatingMatrix::from_sentinel_rows`].
    pub fn to_sentinel_rows(&self, missing: f64) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.unwrap_or(missing)).collect())
            .collect()
    }

    pub fn n_users(&self) -> usize {
        self.rows.len()
    }

    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Get one cell.
    ///
    /// Panics if either index is out of bounds, like slice indexing.
    pub fn get(&self, user: UserIndex, item: ItemIndex) -> Cell {
        self.rows[user][item]
    }

    /// Overwrite one cell.
    pub fn set(&mut self, user: UserIndex, item: ItemIndex, value: Cell) {
        self.rows[user][item] = value;
    }

    /// Whether `user` has rated `item`
    pub fn is_rated(&self, user: UserIndex, item: ItemIndex) -> bool {
        self.rows[user][item].is_some()
    }

    /// All cells of a user, in item order
    pub fn row(&self, user: UserIndex) -> &[Cell] {
        &self.rows[user]
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Positions of all MISSING cells in row-major order
    pub fn missing_cells(&self) -> impl Iterator<Item = (UserIndex, ItemIndex)> + '_ {
        self.rows.iter().enumerate().flat_map(|(user, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_none())
                .map(move |(item, _)| (user, item))
        })
    }

    /// Number of MISSING cells
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|c| c.is_none()).count())
            .sum()
    }

    /// Average of the user's rated cells.
    ///
    /// A user without ratings gives `0.0 / 0.0`, i.e. NaN.
    pub fn user_mean(&self, user: UserIndex) -> f64 {
        mean_rating(&self.rows[user])
    }
}

/// Average over the rated cells of a row (NaN if none are rated)
pub fn mean_rating(row: &[Cell]) -> f64 {
    let (sum, count) = row
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), &r| (sum + r, count + 1));
    sum / count as f64
}

// =============================================================================
// RatingsFile
// =============================================================================

/// Contents of a ratings file: the declared rating range plus the matrix.
///
/// The range is descriptive metadata; prediction never clamps to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingsFile {
    pub min_rating: f64,
    pub max_rating: f64,
    pub matrix: RatingMatrix,
}

impl RatingsFile {
    /// Rated cells whose value lies outside `[min_rating, max_rating]`
    pub fn out_of_range(&self) -> Vec<(UserIndex, ItemIndex, f64)> {
        let mut found = Vec::new();
        for (user, row) in self.matrix.rows().iter().enumerate() {
            for (item, cell) in row.iter().enumerate() {
                if let Some(r) = *cell {
                    if r < self.min_rating || r > self.max_rating {
                        found.push((user, item, r));
                    }
                }
            }
        }
        found
    }
}
