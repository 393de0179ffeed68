use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use ntest_cli::config::{Coverage, Isolation, Options, Reporter, StringOrList, resolve};
use ntest_cli::error::NtestError;
use ntest_cli::exec::{launch, runtime_binary, runtime_major_version};
use ntest_cli::invocation::{STABLE_ISOLATION_MAJOR, build, merge};

#[derive(Parser)]
#[command(name = "ntest")]
#[command(
	author,
	version,
	about = "Translate project test options into a node --test invocation"
)]
struct Cli {
	/// Path to an explicit config file (skips the default lookup)
	#[arg(long, short = 'c', value_name = "PATH")]
	config: Option<PathBuf>,

	/// Number of test files to run in parallel
	#[arg(long, value_name = "N")]
	concurrency: Option<u64>,

	/// Enable code coverage collection
	#[arg(long)]
	coverage: bool,

	/// Minimum branch coverage threshold
	#[arg(long, value_name = "N")]
	coverage_branches: Option<f64>,

	/// Minimum function coverage threshold
	#[arg(long, value_name = "N")]
	coverage_functions: Option<f64>,

	/// Minimum line coverage threshold
	#[arg(long, value_name = "N")]
	coverage_lines: Option<f64>,

	/// Glob of files to exclude from coverage (repeatable)
	#[arg(long, value_name = "GLOB")]
	coverage_exclude: Vec<String>,

	/// Glob of files to include in coverage (repeatable)
	#[arg(long, value_name = "GLOB")]
	coverage_include: Vec<String>,

	/// Force the runner to exit once all tests finish
	#[arg(long)]
	force_exit: bool,

	/// Path to a global setup module
	#[arg(long, value_name = "FILE")]
	global_setup: Option<String>,

	/// Test isolation mode: 'process' or 'none'
	#[arg(long, value_name = "MODE", value_parser = Isolation::from_str)]
	isolation: Option<Isolation>,

	/// Enable module mocking support
	#[arg(long)]
	module_mocks: bool,

	/// Run only tests marked with `only`
	#[arg(long)]
	only: bool,

	/// Reporter to use, with optional destination (repeatable)
	#[arg(long, value_name = "NAME[:DESTINATION]", value_parser = Reporter::from_str)]
	reporter: Vec<Reporter>,

	/// Path to a file tracking failures to rerun
	#[arg(long, value_name = "FILE")]
	rerun_failures: Option<String>,

	/// Run only the given shard, as <index>/<total>
	#[arg(long, value_name = "INDEX/TOTAL")]
	shard: Option<String>,

	/// Regex of test names to skip (repeatable)
	#[arg(long, short = 's', value_name = "REGEX")]
	skip_pattern: Vec<String>,

	/// Regex of test names to run (repeatable)
	#[arg(long, short = 't', value_name = "REGEX")]
	test_pattern: Vec<String>,

	/// Per-test timeout in milliseconds
	#[arg(long, value_name = "MS")]
	timeout: Option<u64>,

	/// Regenerate snapshot files instead of asserting against them
	#[arg(long, short = 'u')]
	update_snapshots: bool,

	/// Rerun on file changes
	#[arg(long, short = 'w')]
	watch: bool,

	/// Test files or globs to run
	#[arg(value_name = "FILE")]
	files: Vec<String>,

	/// Raw arguments forwarded to the runner after the built parameters
	#[arg(last = true, value_name = "ARGS")]
	passthrough: Vec<String>,
}

impl Cli {
	/// Convert the parsed flags into an Options overlay. Absent flags map
	/// to `None` so they never mask config-file values.
	fn to_options(&self) -> Options {
		Options {
			files: non_empty(&self.files).map(StringOrList::from),
			reporters: (!self.reporter.is_empty()).then(|| self.reporter.clone()),
			concurrency: self.concurrency,
			isolation: self.isolation,
			module_mocks: self.module_mocks.then_some(true),
			force_exit: self.force_exit.then_some(true),
			global_setup: self.global_setup.clone(),
			only: self.only.then_some(true),
			shard: self.shard.clone(),
			test_pattern: non_empty(&self.test_pattern).map(StringOrList::from),
			skip_pattern: non_empty(&self.skip_pattern).map(StringOrList::from),
			timeout: self.timeout,
			update_snapshots: self.update_snapshots.then_some(true),
			rerun_failures: self.rerun_failures.clone(),
			watch: self.watch.then_some(true),
			coverage: self.coverage_overrides(),
		}
	}

	fn coverage_overrides(&self) -> Option<Coverage> {
		let coverage = Coverage {
			enabled: self.coverage.then_some(true),
			include: non_empty(&self.coverage_include).map(StringOrList::from),
			exclude: non_empty(&self.coverage_exclude).map(StringOrList::from),
			lines: self.coverage_lines,
			branches: self.coverage_branches,
			functions: self.coverage_functions,
		};

		(coverage != Coverage::default()).then_some(coverage)
	}
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
	(!values.is_empty()).then(|| values.to_vec())
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("ntest: {e:#}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = parse_cli()?;

	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let config = resolve(cli.config.as_deref(), &cwd).context("Failed to load configuration")?;
	let options = merge(config, cli.to_options());

	let runtime = runtime_binary();

	// The runtime version only influences the isolation flag's name, so
	// detection is skipped entirely when isolation isn't configured.
	let major_version = match options.isolation {
		Some(_) => runtime_major_version(&runtime)?,
		None => STABLE_ISOLATION_MAJOR,
	};

	let params = build(&options, major_version);
	launch(&runtime, &params, &cli.passthrough)?;

	Ok(ExitCode::SUCCESS)
}

/// Parse CLI arguments, letting help/version render and exit 0 while any
/// real parse error becomes the usual single-line diagnostic with exit 1.
fn parse_cli() -> Result<Cli> {
	match Cli::try_parse() {
		Ok(cli) => Ok(cli),
		Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
			e.exit()
		}
		Err(e) => {
			let rendered = e.to_string();
			let line = rendered.lines().next().unwrap_or("invalid arguments");
			let message = line.strip_prefix("error: ").unwrap_or(line).to_string();
			Err(NtestError::CliParse { message }.into())
		}
	}
}
