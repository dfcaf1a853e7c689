//! Core domain types

pub mod embeddings;
pub mod error;
pub mod similarity;

pub use embeddings::{normalize, Embeddings, Iter};
pub use error::{Error, Result};
pub use similarity::{dot_product, ScoreBackend, WordSimilarity};
