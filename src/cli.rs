use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DEFAULT_LIMIT;

/// Output format for `convert`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
	/// One `word f1 f2 ... fD` line per word
	#[default]
	Text,
	/// word2vec binary
	Binary,
}

fn styles() -> Styles {
	let blue = Some(Color::Ansi(AnsiColor::Blue));
	Styles::styled()
		.header(Style::new().bold().fg_color(blue))
		.usage(Style::new().bold().fg_color(blue))
		.literal(Style::new().fg_color(blue))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(blue))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "wordscout",
	author,
	version,
	about = "Word embedding similarity and analogy search",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {similar}  {similar_args}          {similar_desc}
  {bin} {analogy}  {analogy_args}      {analogy_desc}
  {bin} {convert}  {convert_args}  {convert_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "wordscout".bright_blue(),
		similar = "similar".yellow(),
		similar_args = "vectors.bin -n 5",
		similar_desc = "Nearest words for each word on stdin".dimmed(),
		analogy = "analogy".yellow(),
		analogy_args = "vectors.bin --json",
		analogy_desc = "Solve 'a b c' lines from stdin".dimmed(),
		convert = "convert".yellow(),
		convert_args = "vectors.bin -o vectors.txt",
		convert_desc = "Export embeddings as text".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Options shared by every command that loads an embeddings file
#[derive(Args, Debug, Clone)]
pub struct VectorArgs {
	/// word2vec binary file (default: $WORDSCOUT_VECTORS)
	#[arg(value_name = "VECTORS")]
	pub vectors: Option<PathBuf>,

	/// Keep embeddings as stored instead of scaling them to unit length
	#[arg(long = "raw")]
	pub raw: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Find the nearest words for each word read from stdin
	Similar {
		#[command(flatten)]
		vectors: VectorArgs,

		/// Number of results per query
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_LIMIT)]
		limit: usize,

		/// Print results as JSON
		#[arg(long = "json")]
		json: bool,
	},

	/// Complete analogies read from stdin as "a b c" lines (a is to b as c is to ?)
	Analogy {
		#[command(flatten)]
		vectors: VectorArgs,

		/// Number of results per query
		#[arg(short = 'n', long = "limit", default_value_t = DEFAULT_LIMIT)]
		limit: usize,

		/// Print results as JSON
		#[arg(long = "json")]
		json: bool,
	},

	/// Convert an embeddings file to text or (re-)normalized binary
	Convert {
		#[command(flatten)]
		vectors: VectorArgs,

		/// Output file (default: stdout)
		#[arg(short = 'o', long = "output", value_name = "PATH")]
		output: Option<PathBuf>,

		/// Output format
		#[arg(short = 'f', long = "format", default_value = "text")]
		format: Format,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
