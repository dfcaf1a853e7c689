//! Analogy command - "a b c" lines from stdin, a is to b as c is to ?

use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::cli::VectorArgs;
use crate::config::ANALOGY_ARITY;
use crate::core::Embeddings;
use crate::ui;

use super::{is_exit, load_vectors, print_results, prompt};

pub fn run(args: &VectorArgs, limit: usize, json: bool) -> Result<()> {
	let embeds = load_vectors(args)?;
	let interactive = io::stdin().is_terminal();

	if interactive {
		ui::print_logo();
		ui::success(&format!("Loaded {} words", embeds.len()));
		ui::info("Type 'a b c' to solve a is to b as c is to ?, or 'exit' to quit");
	}

	let stdin = io::stdin();
	let stdout = io::stdout();
	answer(&embeds, stdin.lock(), &mut stdout.lock(), limit, json, interactive)
}

/// Answer every analogy line of `input`. Malformed lines and lines with
/// unknown words are reported and skipped.
pub fn answer<R: BufRead, W: Write>(
	embeds: &Embeddings,
	input: R,
	out: &mut W,
	limit: usize,
	json: bool,
	interactive: bool,
) -> Result<()> {
	if interactive {
		prompt("analogy")?;
	}

	for line in input.lines() {
		let line = line.context("Cannot read query")?;

		if interactive && is_exit(line.trim()) {
			break;
		}

		if !line.trim().is_empty() {
			match parse_query(&line) {
				Some([a, b, c]) => match embeds.analogy(a, b, c, limit) {
					Ok(results) => print_results(out, &results, json)?,
					Err(e) => ui::error(&e.to_string()),
				},
				None => ui::warn(&format!(
					"Skipping line that does not have {} words: {}",
					ANALOGY_ARITY, line
				)),
			}
		}

		if interactive {
			prompt("analogy")?;
		}
	}

	Ok(())
}

/// Split a query line on single spaces into exactly three words.
pub fn parse_query(line: &str) -> Option<[&str; ANALOGY_ARITY]> {
	let parts: Vec<&str> = line.split(' ').collect();
	match parts.as_slice() {
		&[a, b, c] if !a.is_empty() && !b.is_empty() && !c.is_empty() => Some([a, b, c]),
		_ => None,
	}
}
