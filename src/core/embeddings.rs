//! Word embedding matrix with word/row index maps

use std::collections::HashMap;
use std::iter::FusedIterator;
use std::ops::ControlFlow;

use super::error::{Error, Result};
use super::similarity::ScoreBackend;

/// A vocabulary of word embeddings stored as one row-major matrix.
///
/// Row `i` of the matrix holds the embedding of `words[i]`. Embeddings are
/// handed out as slices borrowed from the matrix, so they cannot outlive
/// a call to [`Embeddings::put`].
#[derive(Debug, Clone, Default)]
pub struct Embeddings {
	pub(crate) matrix: Vec<f32>,
	pub(crate) embed_size: usize,
	pub(crate) indices: HashMap<String, usize>,
	pub(crate) words: Vec<String>,
	pub(crate) backend: ScoreBackend,
}

impl Embeddings {
	/// Create an empty store, to be populated with `put`
	pub fn new(embed_size: usize) -> Self {
		Self {
			embed_size,
			..Self::default()
		}
	}

	/// Create an empty store with room for `n_words` rows
	pub fn with_capacity(embed_size: usize, n_words: usize) -> Self {
		Self {
			matrix: Vec::with_capacity(n_words.saturating_mul(embed_size)),
			embed_size,
			indices: HashMap::with_capacity(n_words),
			words: Vec::with_capacity(n_words),
			backend: ScoreBackend::default(),
		}
	}

	/// Add or replace the embedding of a word.
	///
	/// A known word keeps its row and has the row overwritten. A new word is
	/// appended as the last row.
	pub fn put(&mut self, word: &str, embedding: &[f32]) -> Result<()> {
		if embedding.len() != self.embed_size {
			return Err(Error::DimensionMismatch {
				expected: self.embed_size,
				actual: embedding.len(),
			});
		}

		if let Some(&idx) = self.indices.get(word) {
			let start = idx * self.embed_size;
			self.matrix[start..start + self.embed_size].copy_from_slice(embedding);
		} else {
			self.indices.insert(word.to_owned(), self.words.len());
			self.words.push(word.to_owned());
			self.matrix.extend_from_slice(embedding);
		}

		Ok(())
	}

	/// Embedding of a word, borrowed from the matrix
	pub fn embedding(&self, word: &str) -> Option<&[f32]> {
		self.indices.get(word).map(|&idx| self.row(idx))
	}

	/// Row index of a word
	pub fn word_index(&self, word: &str) -> Option<usize> {
		self.indices.get(word).copied()
	}

	/// Word stored at a row index
	pub fn word(&self, idx: usize) -> Option<&str> {
		self.words.get(idx).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	pub fn embed_size(&self) -> usize {
		self.embed_size
	}

	/// Words in row order
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Select how similarity scores are computed.
	pub fn set_backend(&mut self, backend: ScoreBackend) {
		self.backend = backend;
	}

	pub fn backend(&self) -> ScoreBackend {
		self.backend
	}

	/// Iterate over `(word, embedding)` pairs in row order.
	pub fn iter(&self) -> Iter<'_> {
		Iter {
			embeddings: self,
			idx: 0,
		}
	}

	/// Feed `(word, embedding)` pairs to `visitor` in row order until it
	/// returns `ControlFlow::Break`.
	pub fn visit<F>(&self, mut visitor: F)
	where
		F: FnMut(&str, &[f32]) -> ControlFlow<()>,
	{
		for (word, embedding) in self.iter() {
			if visitor(word, embedding).is_break() {
				break;
			}
		}
	}

	pub(crate) fn row(&self, idx: usize) -> &[f32] {
		let start = idx * self.embed_size;
		&self.matrix[start..start + self.embed_size]
	}
}

impl<'a> IntoIterator for &'a Embeddings {
	type Item = (&'a str, &'a [f32]);
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Row-order iterator over a store's words and embeddings
pub struct Iter<'a> {
	embeddings: &'a Embeddings,
	idx: usize,
}

impl<'a> Iterator for Iter<'a> {
	type Item = (&'a str, &'a [f32]);

	fn next(&mut self) -> Option<Self::Item> {
		let word = self.embeddings.words.get(self.idx)?;
		let embedding = self.embeddings.row(self.idx);
		self.idx += 1;
		Some((word.as_str(), embedding))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.embeddings.len() - self.idx;
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Scale a vector to unit L2 norm in place. Zero vectors are left as-is.
pub fn normalize(embedding: &mut [f32]) {
	let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
	if norm > 0.0 {
		embedding.iter_mut().for_each(|x| *x /= norm);
	}
}
