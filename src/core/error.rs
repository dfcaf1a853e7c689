//! Error types for the vector store and similarity engine.

use thiserror::Error;

/// Result type alias for store and query operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the embeddings core.
#[derive(Error, Debug)]
pub enum Error {
	/// The stream header is not two decimal integers.
	#[error("invalid header: {0}")]
	Format(String),

	/// The stream ended before all declared bytes were read.
	#[error("truncated input: {0}")]
	Truncated(String),

	/// Embedding length does not match the store's embedding size.
	#[error("dimension mismatch: expected {expected}, got {actual}")]
	DimensionMismatch { expected: usize, actual: usize },

	/// A query referenced a word that is not in the vocabulary.
	#[error("unknown word: {0}")]
	UnknownWord(String),

	/// Matrix view could not be built over the embedding buffer.
	#[error("matrix shape error: {0}")]
	Shape(#[from] ndarray::ShapeError),

	/// IO error.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),
}
