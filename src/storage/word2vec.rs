//! word2vec binary format
//!
//! ```text
//! <word_count> <embed_size>\n
//! <word> <f32 LE x embed_size><word> <f32 LE x embed_size>...
//! ```
//!
//! A word runs up to a single space byte; its embedding follows directly
//! as `embed_size` little-endian floats with no record separator.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::core::{normalize, Embeddings, Error, Result};

/// Longest header field accepted before giving up on the header
const MAX_HEADER_FIELD: usize = 32;

/// Upper bound on floats reserved up front from an untrusted header
const MAX_PREALLOC_FLOATS: usize = 1 << 24;

/// Open and read a word2vec binary file.
pub fn load(path: &Path, normalize: bool) -> Result<Embeddings> {
	let file = File::open(path)?;
	read_word2vec_binary(BufReader::new(file), normalize)
}

/// Write a store to a word2vec binary file.
pub fn save(embeds: &Embeddings, path: &Path) -> Result<()> {
	let file = File::create(path)?;
	write_word2vec_binary(embeds, BufWriter::new(file))
}

/// Read embeddings in word2vec binary format, optionally scaling every
/// embedding to unit length.
///
/// A word that occurs more than once keeps the row of its first
/// occurrence and the embedding of its last.
pub fn read_word2vec_binary<R: BufRead>(mut reader: R, normalize_rows: bool) -> Result<Embeddings> {
	let n_words = read_header_field(&mut reader, "word count")?;
	let embed_size = read_header_field(&mut reader, "embedding size")?;

	let row_bytes = embed_size
		.checked_mul(4)
		.filter(|_| n_words.checked_mul(embed_size).is_some())
		.ok_or_else(|| Error::Format(format!("{} x {} embeddings is too large", n_words, embed_size)))?;

	let prealloc = n_words.min(MAX_PREALLOC_FLOATS / embed_size.max(1));
	let mut embeds = Embeddings::with_capacity(embed_size, prealloc);

	let mut word_buf = Vec::new();
	let mut row_buf = Vec::new();
	let mut embedding = Vec::with_capacity(embed_size);

	for idx in 0..n_words {
		word_buf.clear();
		reader.read_until(b' ', &mut word_buf)?;
		if word_buf.last() != Some(&b' ') {
			return Err(Error::Truncated(format!(
				"expected {} words, stream ends in word {}",
				n_words,
				idx + 1
			)));
		}

		// Strips the delimiter plus the newline after the header or a record
		let word = std::str::from_utf8(word_buf.trim_ascii()).map_err(|_| {
			Error::Format(format!("word {} is not valid UTF-8", idx + 1))
		})?;

		row_buf.clear();
		let read = reader.by_ref().take(row_bytes as u64).read_to_end(&mut row_buf)?;
		if read < row_bytes {
			return Err(Error::Truncated(format!(
				"embedding of '{}' has {} of {} bytes",
				word, read, row_bytes
			)));
		}

		embedding.clear();
		embedding.extend(
			row_buf
				.chunks_exact(4)
				.map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]])),
		);

		if normalize_rows {
			normalize(&mut embedding);
		}

		embeds.put(word, &embedding)?;
	}

	Ok(embeds)
}

/// Write embeddings in word2vec binary format, in row order.
///
/// Nothing is written for an empty store or a store with zero-length
/// embeddings.
pub fn write_word2vec_binary<W: Write>(embeds: &Embeddings, mut writer: W) -> Result<()> {
	if embeds.is_empty() || embeds.embed_size() == 0 {
		return Ok(());
	}

	writeln!(writer, "{} {}", embeds.len(), embeds.embed_size())?;

	for (word, embedding) in embeds {
		writer.write_all(word.as_bytes())?;
		writer.write_all(b" ")?;
		for value in embedding {
			writer.write_all(&value.to_le_bytes())?;
		}
	}

	writer.flush()?;
	Ok(())
}

/// Read one whitespace-delimited decimal integer from the header.
fn read_header_field<R: BufRead>(reader: &mut R, name: &str) -> Result<usize> {
	let mut token = Vec::new();

	loop {
		let byte = match reader.fill_buf()?.first() {
			Some(&byte) => byte,
			None => break,
		};
		reader.consume(1);

		if byte.is_ascii_whitespace() {
			if token.is_empty() {
				continue;
			}
			break;
		}

		// Leading zeros do not count against the field length
		if token == b"0" {
			token.clear();
		}
		token.push(byte);
		if token.len() > MAX_HEADER_FIELD {
			return Err(Error::Format(format!("{} is too long", name)));
		}
	}

	if token.is_empty() {
		return Err(Error::Format(format!("missing {}", name)));
	}

	let token = String::from_utf8_lossy(&token);
	token
		.parse()
		.map_err(|_| Error::Format(format!("{} '{}' is not a number", name, token)))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(word: &str, embedding: &[f32]) -> Vec<u8> {
		let mut bytes = format!("{} ", word).into_bytes();
		for v in embedding {
			bytes.extend_from_slice(&v.to_le_bytes());
		}
		bytes
	}

	fn file(header: &str, records: &[(&str, &[f32])]) -> Vec<u8> {
		let mut bytes = header.as_bytes().to_vec();
		for (word, embedding) in records {
			bytes.extend(record(word, embedding));
		}
		bytes
	}

	fn fruit_file() -> Vec<u8> {
		file(
			"3 2\n",
			&[
				("apple", &[1.0, 0.0][..]),
				("pear", &[0.8, 0.1][..]),
				("banana", &[0.2, 1.0][..]),
			],
		)
	}

	#[test]
	fn test_read_binary() {
		let embeds = read_word2vec_binary(&fruit_file()[..], false).unwrap();

		assert_eq!(embeds.len(), 3);
		assert_eq!(embeds.embed_size(), 2);
		assert_eq!(embeds.words(), &["apple", "pear", "banana"]);
		assert_eq!(embeds.embedding("pear"), Some(&[0.8, 0.1][..]));
		assert!(embeds.embedding("Bogus").is_none());
	}

	#[test]
	fn test_read_records_with_newlines() {
		// Some writers put a newline after each embedding
		let mut bytes = b"2 1\n".to_vec();
		bytes.extend(record("a", &[1.5]));
		bytes.push(b'\n');
		bytes.extend(record("b", &[-2.0]));
		bytes.push(b'\n');

		let embeds = read_word2vec_binary(&bytes[..], false).unwrap();
		assert_eq!(embeds.words(), &["a", "b"]);
		assert_eq!(embeds.embedding("b"), Some(&[-2.0][..]));
	}

	#[test]
	fn test_read_normalized() {
		let bytes = file("2 2\n", &[("a", &[3.0, 4.0][..]), ("b", &[0.0, -2.0][..])]);
		let embeds = read_word2vec_binary(&bytes[..], true).unwrap();

		for (_, embedding) in &embeds {
			let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
			assert!((norm - 1.0).abs() < 1e-6);
		}
		let a = embeds.embedding("a").unwrap();
		assert!((a[0] - 0.6).abs() < 1e-6);
		assert!((a[1] - 0.8).abs() < 1e-6);
	}

	#[test]
	fn test_duplicate_words_keep_first_row_last_embedding() {
		let bytes = file(
			"3 2\n",
			&[("a", &[1.0, 0.0][..]), ("b", &[0.0, 1.0][..]), ("a", &[2.0, 2.0][..])],
		);
		let embeds = read_word2vec_binary(&bytes[..], false).unwrap();

		assert_eq!(embeds.len(), 2);
		assert_eq!(embeds.word_index("a"), Some(0));
		assert_eq!(embeds.word_index("b"), Some(1));
		assert_eq!(embeds.embedding("a"), Some(&[2.0, 2.0][..]));
	}

	#[test]
	fn test_round_trip_is_bit_exact() {
		let mut embeds = Embeddings::new(3);
		embeds.put("zebra", &[f32::MAX, -0.0, 1e-30]).unwrap();
		embeds.put("aardvark", &[0.1, 0.2, 0.3]).unwrap();
		embeds.put("mole", &[-7.25, f32::MIN_POSITIVE, 42.0]).unwrap();
		embeds.put("ant", &[1.0, 1.0, 1.0]).unwrap();

		let mut bytes = Vec::new();
		write_word2vec_binary(&embeds, &mut bytes).unwrap();
		let read = read_word2vec_binary(&bytes[..], false).unwrap();

		assert_eq!(read.words(), embeds.words());
		for ((w1, e1), (w2, e2)) in embeds.iter().zip(read.iter()) {
			assert_eq!(w1, w2);
			let bits1: Vec<u32> = e1.iter().map(|v| v.to_bits()).collect();
			let bits2: Vec<u32> = e2.iter().map(|v| v.to_bits()).collect();
			assert_eq!(bits1, bits2);
		}
	}

	#[test]
	fn test_write_uses_row_order() {
		let mut embeds = Embeddings::new(1);
		embeds.put("zebra", &[1.0]).unwrap();
		embeds.put("apple", &[2.0]).unwrap();

		let mut bytes = Vec::new();
		write_word2vec_binary(&embeds, &mut bytes).unwrap();

		let mut expected = b"2 1\n".to_vec();
		expected.extend(record("zebra", &[1.0]));
		expected.extend(record("apple", &[2.0]));
		assert_eq!(bytes, expected);
	}

	#[test]
	fn test_write_empty_store_writes_nothing() {
		let mut bytes = Vec::new();
		write_word2vec_binary(&Embeddings::new(4), &mut bytes).unwrap();
		assert!(bytes.is_empty());

		let mut zero_dim = Embeddings::new(0);
		zero_dim.put("a", &[]).unwrap();
		write_word2vec_binary(&zero_dim, &mut bytes).unwrap();
		assert!(bytes.is_empty());
	}

	#[test]
	fn test_bad_header() {
		for header in ["", "   ", "abc 2\n", "3\n", "3 x\n", "-1 2\n", "99999999999999999999999999 2\n"] {
			let result = read_word2vec_binary(header.as_bytes(), false);
			assert!(
				matches!(result, Err(Error::Format(_))),
				"header {:?} should be rejected",
				header
			);
		}
	}

	#[test]
	fn test_oversized_header_is_format_error() {
		let header = format!("{} {}\n", usize::MAX, 2);
		let result = read_word2vec_binary(header.as_bytes(), false);
		assert!(matches!(result, Err(Error::Format(_))));
	}

	#[test]
	fn test_header_leading_zeros() {
		let mut bytes = format!("{}3 {}2\n", "0".repeat(40), "0".repeat(40)).into_bytes();
		bytes.extend(&fruit_file()[4..]);

		let embeds = read_word2vec_binary(&bytes[..], false).unwrap();
		assert_eq!(embeds.len(), 3);
		assert_eq!(embeds.embed_size(), 2);

		let long = format!("{} 2\n", "1".repeat(40));
		let result = read_word2vec_binary(long.as_bytes(), false);
		assert!(matches!(result, Err(Error::Format(ref msg)) if msg.contains("too long")));
	}

	#[test]
	fn test_invalid_utf8_words_are_rejected() {
		let mut bytes = b"2 1\n".to_vec();
		bytes.extend([0xff, b' ']);
		bytes.extend_from_slice(&1.0f32.to_le_bytes());
		bytes.extend([0xfe, b' ']);
		bytes.extend_from_slice(&2.0f32.to_le_bytes());

		let result = read_word2vec_binary(&bytes[..], false);
		assert!(matches!(result, Err(Error::Format(ref msg)) if msg.contains("word 1")));

		// A valid first record still fails on the second
		let mut bytes = b"2 1\n".to_vec();
		bytes.extend(record("ok", &[1.0]));
		bytes.extend([b'a', 0xfe, b' ']);
		bytes.extend_from_slice(&2.0f32.to_le_bytes());

		let result = read_word2vec_binary(&bytes[..], false);
		assert!(matches!(result, Err(Error::Format(ref msg)) if msg.contains("word 2")));
	}

	#[test]
	fn test_truncated_embedding() {
		let mut bytes = fruit_file();
		bytes.truncate(bytes.len() - 3);

		let result = read_word2vec_binary(&bytes[..], false);
		assert!(matches!(result, Err(Error::Truncated(ref msg)) if msg.contains("banana")));
	}

	#[test]
	fn test_missing_records() {
		let bytes = file("4 2\n", &[("apple", &[1.0, 0.0][..])]);
		let result = read_word2vec_binary(&bytes[..], false);
		assert!(matches!(result, Err(Error::Truncated(_))));
	}

	#[test]
	fn test_header_only() {
		let embeds = read_word2vec_binary(&b"0 5\n"[..], false).unwrap();
		assert!(embeds.is_empty());
		assert_eq!(embeds.embed_size(), 5);
	}

	#[test]
	fn test_load_and_save_files() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("vectors.bin");

		let embeds = read_word2vec_binary(&fruit_file()[..], false).unwrap();
		save(&embeds, &path).unwrap();
		assert_eq!(std::fs::read(&path).unwrap(), fruit_file());

		let loaded = load(&path, false).unwrap();
		assert_eq!(loaded.words(), embeds.words());

		let missing = load(&dir.path().join("missing.bin"), false);
		assert!(matches!(missing, Err(Error::Io(_))));
	}
}
