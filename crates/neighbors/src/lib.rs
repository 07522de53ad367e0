//! # Neighbors Crate
//!
//! User-based neighborhood search for collaborative filtering:
//! "users who rate like you, and who rated this item".
//!
//! ## Components
//!
//! ### Similarity
//! Three interchangeable metrics over co-rated items:
//! - Pearson correlation
//! - Cosine similarity
//! - Negated Euclidean distance
//!
//! ### Selector
//! Ranks every other user who rated the target item and keeps the top k.
//!
//! ## Example Usage
//!
//! ```ignore
//! use neighbors::{find_neighbors, SimilarityMetric};
//!
//! let metric: SimilarityMetric = "pearson".parse()?;
//! let neighbors = find_neighbors(&matrix, user, item, 5, metric);
//! ```

pub mod similarity;
pub mod selector;

pub use similarity::{
    cosine_similarity, euclidean_distance, euclidean_similarity, pearson_correlation,
    SimilarityMetric, UnknownMetric,
};
pub use selector::{find_neighbors, Neighbor, NeighborList, NeighborSelector};
