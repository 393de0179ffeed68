use std::path::PathBuf;

/// Library-level structured errors for ntest.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum NtestError {
	#[error("Failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("No package.json found from {start} up to the filesystem root")]
	NoPackageRoot { start: PathBuf },

	#[error("{message}")]
	CliParse { message: String },

	#[error("Failed to start {command}")]
	ProcessSpawn {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("{command} exited with code {code}")]
	ProcessExit { command: String, code: i32 },
}

/// Result type alias using NtestError.
pub type Result<T> = std::result::Result<T, NtestError>;
