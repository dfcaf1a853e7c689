//! Wordscout - word embedding similarity and analogy search
//!
//! Loads word2vec binary embeddings and answers similarity or analogy
//! queries read from stdin, or converts the embeddings to text.

use clap::{CommandFactory, Parser};

use wordscout::cli::{Cli, Command};
use wordscout::commands;
use wordscout::ui::{self, Log};

fn main() {
	let cli = Cli::parse();
	Log::set_verbose(cli.verbose);

	if let Err(e) = run(cli.command) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(command: Command) -> anyhow::Result<()> {
	match command {
		Command::Similar { vectors, limit, json } => commands::similar::run(&vectors, limit, json),
		Command::Analogy { vectors, limit, json } => commands::analogy::run(&vectors, limit, json),
		Command::Convert { vectors, output, format } => {
			commands::convert::run(&vectors, output.as_deref(), format)
		}
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					ui::error(&format!("Unknown subcommand: {}", sub));
					cmd.print_help()?;
				}
			} else {
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}
