//! Similar command - nearest words for each word on stdin

use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::cli::VectorArgs;
use crate::core::Embeddings;
use crate::ui;

use super::{is_exit, load_vectors, print_results, prompt};

pub fn run(args: &VectorArgs, limit: usize, json: bool) -> Result<()> {
	let embeds = load_vectors(args)?;
	let interactive = io::stdin().is_terminal();

	if interactive {
		ui::print_logo();
		ui::success(&format!("Loaded {} words", embeds.len()));
		ui::info("Type words to find their neighbors, or 'exit' to quit");
	}

	let stdin = io::stdin();
	let stdout = io::stdout();
	answer(&embeds, stdin.lock(), &mut stdout.lock(), limit, json, interactive)
}

/// Answer every whitespace-separated word of `input`.
///
/// An unknown word aborts the session unless it is interactive, where it
/// is reported and skipped.
pub fn answer<R: BufRead, W: Write>(
	embeds: &Embeddings,
	input: R,
	out: &mut W,
	limit: usize,
	json: bool,
	interactive: bool,
) -> Result<()> {
	if interactive {
		prompt("similar")?;
	}

	for line in input.lines() {
		let line = line.context("Cannot read query")?;

		for word in line.split_whitespace() {
			if interactive && is_exit(word) {
				return Ok(());
			}

			match embeds.similarity(word, limit) {
				Ok(results) => {
					if interactive && results.is_empty() {
						ui::warn("No neighbors found");
					}
					print_results(out, &results, json)?;
				}
				Err(e) if interactive => ui::error(&e.to_string()),
				Err(e) => return Err(e).context("Similarity query failed"),
			}
		}

		if interactive {
			prompt("similar")?;
		}
	}

	Ok(())
}
