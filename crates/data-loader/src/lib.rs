//! # Data Loader Crate
//!
//! Loads and writes user × item rating matrices.
//!
//! ## Main Components
//!
//! - **types**: `RatingMatrix` (cells are `Option<f64>`, `None` = MISSING)
//!   and `RatingsFile` (rating range + matrix)
//! - **parser**: Parse ratings files into a `RatingsFile`
//! - **writer**: Print matrices in the same row format
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{read_ratings_file, write_matrix_file, WriteOptions};
//! use std::path::Path;
//!
//! let ratings = read_ratings_file(Path::new("ratings.txt"))?;
//! println!(
//!     "{} users, {} items, {} missing",
//!     ratings.matrix.n_users(),
//!     ratings.matrix.n_items(),
//!     ratings.matrix.missing_count()
//! );
//! write_matrix_file(Path::new("copy.txt"), &ratings.matrix, WriteOptions::default())?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod writer;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{parse_ratings, read_ratings_file, MISSING_TOKEN};
pub use types::{
    // Type aliases
    Cell,
    ItemIndex,
    UserIndex,
    // Core types
    RatingMatrix,
    RatingsFile,
    // Helpers
    mean_rating,
    MISSING_SENTINEL,
};
pub use writer::{format_cell, format_matrix, write_matrix, write_matrix_file, WriteOptions};
