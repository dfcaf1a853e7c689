//! # Command Implementations
//!
//! Each submodule handles one CLI command (similar, analogy, convert).

pub mod analogy;
pub mod convert;
pub mod similar;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::time::Instant;

use crate::cli::VectorArgs;
use crate::config::{resolve_vectors_path, VECTORS_ENV};
use crate::core::{Embeddings, WordSimilarity};
use crate::storage;
use crate::ui;

/// Load the embeddings file named on the command line or in the
/// environment.
pub fn load_vectors(args: &VectorArgs) -> Result<Embeddings> {
	let path = resolve_vectors_path(args.vectors.as_deref())
		.ok_or_else(|| anyhow!("No embeddings file given and {} is not set", VECTORS_ENV))?;

	ui::debug(&format!("Loading {} (normalize: {})", path.display(), !args.raw));
	let start = Instant::now();

	let embeds = storage::load(&path, !args.raw)
		.with_context(|| format!("Cannot read vectors from {}", path.display()))?;

	ui::debug(&format!(
		"Loaded {} words, {} dimensions in {:.2}s",
		embeds.len(),
		embeds.embed_size(),
		start.elapsed().as_secs_f32()
	));

	Ok(embeds)
}

/// Print one `word score` line per result, or a single JSON array.
pub fn print_results<W: Write>(out: &mut W, results: &[WordSimilarity], json: bool) -> Result<()> {
	if json {
		serde_json::to_writer(&mut *out, results)?;
		writeln!(out)?;
	} else {
		for result in results {
			writeln!(out, "{}", result)?;
		}
	}

	out.flush()?;
	Ok(())
}

/// Words that end an interactive session
pub(crate) fn is_exit(input: &str) -> bool {
	matches!(input, "exit" | "quit" | "q")
}

pub(crate) fn prompt(name: &str) -> Result<()> {
	eprint!("{} ", format!("{}>", name).bright_blue().bold());
	io::stderr().flush()?;
	Ok(())
}
