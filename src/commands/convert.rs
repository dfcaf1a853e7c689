//! Convert command - export embeddings as text or binary

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::cli::{Format, VectorArgs};
use crate::config::TEXT_PRECISION;
use crate::core::Embeddings;
use crate::storage;
use crate::ui;

pub fn run(args: &VectorArgs, output: Option<&Path>, format: Format) -> Result<()> {
	let embeds = super::load_vectors(args)?;
	if embeds.is_empty() {
		ui::warn("Embeddings file contains no words");
	}

	match output {
		Some(path) => {
			let start = Instant::now();
			let file = File::create(path)
				.with_context(|| format!("Cannot create {}", path.display()))?;
			write(&embeds, BufWriter::new(file), format)
				.with_context(|| format!("Cannot write {}", path.display()))?;
			ui::success(&format!(
				"Wrote {} words to {} in {}ms",
				embeds.len(),
				path.display(),
				start.elapsed().as_millis()
			));
		}
		None => {
			let stdout = io::stdout();
			write(&embeds, stdout.lock(), format).context("Cannot write to stdout")?;
		}
	}

	Ok(())
}

/// Write embeddings to `writer` in the requested format.
pub fn write<W: Write>(embeds: &Embeddings, writer: W, format: Format) -> Result<()> {
	match format {
		Format::Text => storage::write_text(embeds, writer, TEXT_PRECISION)?,
		Format::Binary => storage::write_word2vec_binary(embeds, writer)?,
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Embeddings {
		let mut embeds = Embeddings::new(2);
		embeds.put("apple", &[1.0, 0.0]).unwrap();
		embeds.put("pear", &[0.8, 0.1]).unwrap();
		embeds
	}

	#[test]
	fn test_write_text() {
		let mut out = Vec::new();
		write(&sample(), &mut out, Format::Text).unwrap();
		assert_eq!(
			String::from_utf8(out).unwrap(),
			"apple 1.000000 0.000000\npear 0.800000 0.100000\n"
		);
	}

	#[test]
	fn test_write_binary_reads_back() {
		let mut out = Vec::new();
		write(&sample(), &mut out, Format::Binary).unwrap();

		let read = storage::read_word2vec_binary(&out[..], false).unwrap();
		assert_eq!(read.words(), sample().words());
		assert_eq!(read.embedding("pear"), Some(&[0.8, 0.1][..]));
	}
}
