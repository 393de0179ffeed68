use crate::config::types::Options;
use crate::error::{NtestError, Result};
use std::path::Path;

/// Parse an options file from the given path.
pub fn parse_options_file(path: &Path) -> Result<Options> {
	let content = std::fs::read_to_string(path).map_err(|source| NtestError::ConfigRead {
		path: path.to_path_buf(),
		source,
	})?;

	parse_options_str(&content, path)
}

/// Parse options from a JSON string (useful for testing).
pub fn parse_options_str(content: &str, path: &Path) -> Result<Options> {
	serde_json::from_str(content).map_err(|source| NtestError::ConfigParse {
		path: path.to_path_buf(),
		source,
	})
}
