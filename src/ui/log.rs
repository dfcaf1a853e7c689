//! Unified logging system
//!
//! Everything here is written to stderr. Stdout is reserved for query
//! results so they can be piped.

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
                       __                      __
 _    _____  _______ _/ /__ _______  __ __ ___/ /_
| |/|/ / _ \/ __/ _ `/ (_-</ __/ _ \/ // / __/ __/
|__,__/\___/_/  \_,_/_/___/\__/\___/\_,_/\__/\__/ "#;

const SLOGANS: &[&str] = &[
	"King - man + woman = ?",
	"Your vocabulary, one matrix at a time",
	"Nearest neighbors, no strangers",
	"Cosine is the new grep",
	"Paris is to France as Berlin is to ...",
	"Three hundred dimensions of pure vibes",
	"We put the dot in dot product",
	"BEEP. BOOP. Normalized!",
];

pub fn random_slogan() -> &'static str {
	SLOGANS[rand::random_range(0..SLOGANS.len())]
}

pub fn print_logo() {
	eprintln!("{}", LOGO.bright_blue().bold());
	eprintln!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	eprintln!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	eprintln!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		let time = Local::now().format("%H:%M:%S").to_string();
		eprintln!(
			"{} {} {}",
			"⚙".bright_black().bold(),
			format!("[{}]", time).dimmed(),
			msg.dimmed()
		);
	}
}
