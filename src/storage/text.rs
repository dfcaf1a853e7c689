//! Plain-text embedding export, one `word f1 f2 ... fD` line per word

use std::io::Write;

use crate::core::{Embeddings, Result};

/// Write every embedding as a text line with `precision` decimal places.
pub fn write_text<W: Write>(embeds: &Embeddings, mut writer: W, precision: usize) -> Result<()> {
	for (word, embedding) in embeds {
		write!(writer, "{}", word)?;
		for value in embedding {
			write!(writer, " {:.*}", precision, value)?;
		}
		writeln!(writer)?;
	}

	writer.flush()?;
	Ok(())
}
