//! Similarity ranking over the embedding matrix

use std::collections::HashSet;
use std::fmt;

use ndarray::{ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::embeddings::Embeddings;
use super::error::{Error, Result};

/// How the matrix-vector product of a query is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreBackend {
	/// ndarray general matrix-vector product
	#[default]
	Gemv,
	/// Plain dot product per row
	Scalar,
}

/// A word and its similarity to a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSimilarity {
	pub word: String,
	pub similarity: f32,
}

impl fmt::Display for WordSimilarity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.word, self.similarity)
	}
}

impl Embeddings {
	/// Words most similar to `word`, best first. The word itself is never
	/// returned.
	pub fn similarity(&self, word: &str, limit: usize) -> Result<Vec<WordSimilarity>> {
		let idx = self.index_or_unknown(word)?;
		self.rank(self.row(idx), &HashSet::from([idx]), limit)
	}

	/// Answer "`word1` is to `word2` as `word3` is to ?".
	///
	/// With `e1..e3` the embeddings of the query words, the candidates are
	/// the words closest to `(e2 - e1) + e3`. Query words are never
	/// returned.
	pub fn analogy(
		&self,
		word1: &str,
		word2: &str,
		word3: &str,
		limit: usize,
	) -> Result<Vec<WordSimilarity>> {
		let idx1 = self.index_or_unknown(word1)?;
		let idx2 = self.index_or_unknown(word2)?;
		let idx3 = self.index_or_unknown(word3)?;

		let query: Vec<f32> = self
			.row(idx2)
			.iter()
			.zip(self.row(idx1))
			.zip(self.row(idx3))
			.map(|((v2, v1), v3)| (v2 - v1) + v3)
			.collect();

		self.rank(&query, &HashSet::from([idx1, idx2, idx3]), limit)
	}

	/// Words most similar to an arbitrary query vector, skipping the rows
	/// in `skip`.
	pub fn embedding_similarity(
		&self,
		query: &[f32],
		skip: &HashSet<usize>,
		limit: usize,
	) -> Result<Vec<WordSimilarity>> {
		if query.len() != self.embed_size {
			return Err(Error::DimensionMismatch {
				expected: self.embed_size,
				actual: query.len(),
			});
		}

		self.rank(query, skip, limit)
	}

	fn index_or_unknown(&self, word: &str) -> Result<usize> {
		self.word_index(word)
			.ok_or_else(|| Error::UnknownWord(word.to_owned()))
	}

	fn rank(
		&self,
		query: &[f32],
		skip: &HashSet<usize>,
		limit: usize,
	) -> Result<Vec<WordSimilarity>> {
		if limit == 0 {
			return Ok(Vec::new());
		}

		let scores = self.scores(query)?;

		let mut top = TopK::new(limit);
		for (idx, &score) in scores.iter().enumerate() {
			if !skip.contains(&idx) {
				top.push(idx, score);
			}
		}

		Ok(top
			.into_entries()
			.into_iter()
			.map(|(idx, similarity)| WordSimilarity {
				word: self.words[idx].clone(),
				similarity,
			})
			.collect())
	}

	/// Dot product of every row with `query`, in row order
	fn scores(&self, query: &[f32]) -> Result<Vec<f32>> {
		match self.backend {
			ScoreBackend::Gemv => {
				let matrix = ArrayView2::from_shape((self.len(), self.embed_size), self.matrix.as_slice())?;
				Ok(matrix.dot(&ArrayView1::from(query)).to_vec())
			}
			ScoreBackend::Scalar => {
				if self.embed_size == 0 {
					return Ok(vec![0.0; self.len()]);
				}
				Ok(self
					.matrix
					.chunks_exact(self.embed_size)
					.map(|row| dot_product(row, query))
					.collect())
			}
		}
	}
}

/// Dot product of two equal-length vectors
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Bounded list of the best `limit` (row, score) pairs, best first.
///
/// Among equal scores the row pushed first ranks higher.
struct TopK {
	limit: usize,
	entries: Vec<(usize, f32)>,
}

impl TopK {
	fn new(limit: usize) -> Self {
		Self {
			limit,
			entries: Vec::with_capacity(limit.min(1024)),
		}
	}

	fn push(&mut self, idx: usize, score: f32) {
		if score.is_nan() {
			return;
		}

		let full = self.entries.len() >= self.limit;
		if full {
			match self.entries.last() {
				Some(&(_, worst)) if score > worst => {}
				_ => return,
			}
		}

		let pos = self.entries.partition_point(|&(_, s)| s >= score);
		if pos >= self.limit {
			return;
		}

		if full {
			self.entries.pop();
		}
		self.entries.insert(pos, (idx, score));
	}

	fn into_entries(self) -> Vec<(usize, f32)> {
		self.entries
	}
}
