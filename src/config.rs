//! Application configuration and constants

use std::path::{Path, PathBuf};

// === Query Defaults ===
pub const DEFAULT_LIMIT: usize = 10;
pub const ANALOGY_ARITY: usize = 3;

// === Text Export ===
pub const TEXT_PRECISION: usize = 6;

// === Environment ===
pub const VECTORS_ENV: &str = "WORDSCOUT_VECTORS";

/// Resolve the embeddings file: explicit argument first, then the
/// WORDSCOUT_VECTORS environment variable.
pub fn resolve_vectors_path(arg: Option<&Path>) -> Option<PathBuf> {
	if let Some(path) = arg {
		return Some(path.to_path_buf());
	}

	if let Ok(env_path) = std::env::var(VECTORS_ENV) {
		if !env_path.is_empty() {
			crate::ui::debug(&format!("Using {}: {}", VECTORS_ENV, env_path));
			return Some(PathBuf::from(env_path));
		}
	}

	None
}
