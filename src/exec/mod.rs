//! Subprocess launching for ntest.
//!
//! This module handles:
//! - Spawning the runtime with built parameters plus raw passthrough
//! - Exit status and spawn failure mapping
//! - Runtime binary resolution and major-version detection

use crate::error::{NtestError, Result};
use crate::invocation::STABLE_ISOLATION_MAJOR;
use std::process::{Command, Stdio};

/// The runtime launched when no override is configured.
pub const DEFAULT_RUNTIME: &str = "node";

/// Environment variable naming an alternative runtime binary.
pub const RUNTIME_ENV_VAR: &str = "NTEST_RUNTIME";

/// Resolve which runtime binary to launch. An empty override is ignored.
pub fn runtime_binary() -> String {
	std::env::var(RUNTIME_ENV_VAR)
		.ok()
		.filter(|value| !value.is_empty())
		.unwrap_or_else(|| DEFAULT_RUNTIME.to_string())
}

/// Launch the runtime with built parameters followed by raw passthrough
/// parameters, stdio inherited from the parent.
///
/// Exit code 0 resolves successfully; any other exit code or a failure to
/// spawn at all is an error. No retries, no timeout of our own.
pub fn launch(runtime: &str, params: &[String], passthrough: &[String]) -> Result<()> {
	let mut cmd = Command::new(runtime);
	cmd.args(params)
		.args(passthrough)
		.stdin(Stdio::inherit())
		.stdout(Stdio::inherit())
		.stderr(Stdio::inherit());

	let status = cmd.status().map_err(|source| NtestError::ProcessSpawn {
		command: runtime.to_string(),
		source,
	})?;

	if status.success() {
		Ok(())
	} else {
		Err(NtestError::ProcessExit {
			command: runtime.to_string(),
			// Signal-terminated children carry no code; report 1.
			code: status.code().unwrap_or(1),
		})
	}
}

/// Detect the runtime's major version by running `<runtime> --version`.
///
/// Output the parser doesn't recognize falls back to the stable-flag era;
/// only a failure to spawn the runtime at all is an error.
pub fn runtime_major_version(runtime: &str) -> Result<u32> {
	let output = Command::new(runtime)
		.arg("--version")
		.output()
		.map_err(|source| NtestError::ProcessSpawn {
			command: runtime.to_string(),
			source,
		})?;

	let version = String::from_utf8_lossy(&output.stdout);
	Ok(parse_major(version.trim()).unwrap_or(STABLE_ISOLATION_MAJOR))
}

/// Parse the major component out of a `v<major>.<minor>.<patch>` string.
pub fn parse_major(version: &str) -> Option<u32> {
	version
		.trim_start_matches('v')
		.split('.')
		.next()?
		.parse()
		.ok()
}
