use serde::Deserialize;
use std::str::FromStr;

use crate::error::NtestError;

/// Merged options controlling one test-runner invocation.
///
/// Every field is optional: anything absent from both the config file and
/// the CLI is simply not translated into an invocation parameter. Field
/// names follow the camelCase convention of the JSON config files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
	/// Test file paths or globs, passed to the runner as positionals.
	pub files: Option<StringOrList>,

	/// Reporters in declaration order.
	pub reporters: Option<Vec<Reporter>>,

	/// Number of test files to run in parallel.
	pub concurrency: Option<u64>,

	/// Whether each test file gets its own process.
	pub isolation: Option<Isolation>,

	/// Enable module mocking support.
	pub module_mocks: Option<bool>,

	/// Force the runner to exit once all tests finish.
	pub force_exit: Option<bool>,

	/// Path to a global setup module.
	pub global_setup: Option<String>,

	/// Run only tests marked with `only`.
	pub only: Option<bool>,

	/// Shard descriptor of the form `<index>/<total>`, forwarded unvalidated.
	pub shard: Option<String>,

	/// Regex patterns selecting test names to run.
	pub test_pattern: Option<StringOrList>,

	/// Regex patterns selecting test names to skip.
	pub skip_pattern: Option<StringOrList>,

	/// Per-test timeout in milliseconds.
	pub timeout: Option<u64>,

	/// Regenerate snapshot files instead of asserting against them.
	pub update_snapshots: Option<bool>,

	/// Path to a file tracking failures to rerun.
	pub rerun_failures: Option<String>,

	/// Rerun on file changes.
	pub watch: Option<bool>,

	/// Code-coverage options.
	pub coverage: Option<Coverage>,
}

/// Code-coverage options. Everything below `enabled` is inert unless
/// `enabled` is true.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
	pub enabled: Option<bool>,
	pub include: Option<StringOrList>,
	pub exclude: Option<StringOrList>,
	pub lines: Option<f64>,
	pub branches: Option<f64>,
	pub functions: Option<f64>,
}

/// A named reporter plus optional destination. An absent or blank
/// destination means standard output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
	pub name: String,
	pub destination: Option<String>,
}

impl FromStr for Reporter {
	type Err = std::convert::Infallible;

	/// Parse the CLI form `<name>[:<destination>]`. Only the first colon
	/// splits; later colons stay in the destination (`lcov:C:/lcov.info`).
	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let (name, destination) = match value.split_once(':') {
			Some((name, destination)) if !destination.is_empty() => {
				(name.to_string(), Some(destination.to_string()))
			}
			Some((name, _)) => (name.to_string(), None),
			None => (value.to_string(), None),
		};
		Ok(Reporter { name, destination })
	}
}

/// Whether each test file runs in its own subprocess or all share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Isolation {
	Process,
	None,
}

impl Isolation {
	/// The mode string as it appears in config files and on the runner flag.
	pub fn as_str(&self) -> &'static str {
		match self {
			Isolation::Process => "process",
			Isolation::None => "none",
		}
	}
}

impl FromStr for Isolation {
	type Err = NtestError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"process" => Ok(Isolation::Process),
			"none" => Ok(Isolation::None),
			other => Err(NtestError::CliParse {
				message: format!("invalid isolation mode '{other}' (expected 'process' or 'none')"),
			}),
		}
	}
}

/// A field that accepts either a single string or an ordered list of
/// strings. A single string is equivalent to a one-element list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
	One(String),
	List(Vec<String>),
}

impl StringOrList {
	/// Normalize to a list.
	pub fn to_vec(&self) -> Vec<String> {
		match self {
			StringOrList::One(value) => vec![value.clone()],
			StringOrList::List(values) => values.clone(),
		}
	}
}

impl From<String> for StringOrList {
	fn from(value: String) -> Self {
		StringOrList::One(value)
	}
}

impl From<Vec<String>> for StringOrList {
	fn from(values: Vec<String>) -> Self {
		StringOrList::List(values)
	}
}
