use crate::config::parser::parse_options_file;
use crate::config::types::Options;
use crate::error::{NtestError, Result};
use std::path::{Path, PathBuf};

/// The project manifest file marking a package root.
pub const MANIFEST_FILE: &str = "package.json";

/// Default config file names, checked in priority order in the package root.
pub const CONFIG_FILES: [&str; 2] = ["ntest.json", ".ntest.json"];

/// The manifest property holding inline options.
pub const MANIFEST_FIELD: &str = "ntest";

/// Resolve the configured options for a run starting from `start_dir`.
///
/// Lookup order:
/// 1. An explicitly named config file, if given (no fallback on failure)
/// 2. `ntest.json`, then `.ntest.json`, in the nearest package root
/// 3. The `"ntest"` property of that root's `package.json`
///
/// A package root with no config at all yields default (empty) options; a
/// missing package root is an error.
pub fn resolve(explicit: Option<&Path>, start_dir: &Path) -> Result<Options> {
	if let Some(path) = explicit {
		return parse_options_file(path);
	}

	let root = find_package_root(start_dir)?;

	for name in CONFIG_FILES {
		let candidate = root.join(name);
		if candidate.is_file() {
			return parse_options_file(&candidate);
		}
	}

	manifest_options(&root.join(MANIFEST_FILE))
}

/// Walk upward from `start_dir` to the nearest directory containing
/// `package.json`.
pub fn find_package_root(start_dir: &Path) -> Result<PathBuf> {
	let mut current = start_dir;

	loop {
		if current.join(MANIFEST_FILE).is_file() {
			return Ok(current.to_path_buf());
		}

		match current.parent() {
			Some(parent) => current = parent,
			None => {
				return Err(NtestError::NoPackageRoot {
					start: start_dir.to_path_buf(),
				});
			}
		}
	}
}

/// Extract options from the manifest's `"ntest"` property. An absent
/// property is an empty config, not an error.
fn manifest_options(manifest_path: &Path) -> Result<Options> {
	let content =
		std::fs::read_to_string(manifest_path).map_err(|source| NtestError::ConfigRead {
			path: manifest_path.to_path_buf(),
			source,
		})?;

	let manifest: serde_json::Value =
		serde_json::from_str(&content).map_err(|source| NtestError::ConfigParse {
			path: manifest_path.to_path_buf(),
			source,
		})?;

	match manifest.get(MANIFEST_FIELD) {
		Some(value) => {
			serde_json::from_value(value.clone()).map_err(|source| NtestError::ConfigParse {
				path: manifest_path.to_path_buf(),
				source,
			})
		}
		None => Ok(Options::default()),
	}
}
