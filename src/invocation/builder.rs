use crate::config::types::Options;

/// First Node.js major version where the isolation flag is stable.
pub const STABLE_ISOLATION_MAJOR: u32 = 24;

/// Destination token meaning "write reporter output to standard output".
const STDOUT_DESTINATION: &str = "stdout";

/// Pick the isolation flag name for a runtime major version.
///
/// Node renamed `--experimental-test-isolation` to `--test-isolation` in
/// major 24; the value is the mode string either way.
pub fn isolation_flag(major_version: u32) -> &'static str {
	if major_version < STABLE_ISOLATION_MAJOR {
		"--experimental-test-isolation"
	} else {
		"--test-isolation"
	}
}

/// Translate merged options into the ordered runner parameter list.
///
/// The append order below is an observable contract: the runner resolves
/// duplicate keys (e.g. repeated name patterns) positionally, so the
/// sequence must stay exactly as written. Absent fields append nothing.
pub fn build(options: &Options, major_version: u32) -> Vec<String> {
	let mut params = vec!["--test".to_string()];

	if let Some(ref coverage) = options.coverage
		&& coverage.enabled == Some(true)
	{
		params.push("--experimental-test-coverage".to_string());

		if let Some(ref exclude) = coverage.exclude {
			for glob in exclude.to_vec() {
				params.push(format!("--test-coverage-exclude={glob}"));
			}
		}
		if let Some(ref include) = coverage.include {
			for glob in include.to_vec() {
				params.push(format!("--test-coverage-include={glob}"));
			}
		}
		if let Some(branches) = coverage.branches {
			params.push(format!("--test-coverage-branches={branches}"));
		}
		if let Some(functions) = coverage.functions {
			params.push(format!("--test-coverage-functions={functions}"));
		}
		if let Some(lines) = coverage.lines {
			params.push(format!("--test-coverage-lines={lines}"));
		}
	}

	if let Some(ref reporters) = options.reporters {
		for reporter in reporters {
			params.push(format!("--test-reporter={}", reporter.name));
			let destination = reporter
				.destination
				.as_deref()
				.filter(|destination| !destination.is_empty())
				.unwrap_or(STDOUT_DESTINATION);
			params.push(format!("--test-reporter-destination={destination}"));
		}
	}

	if let Some(ref patterns) = options.test_pattern {
		for pattern in patterns.to_vec() {
			params.push(format!("--test-name-pattern={pattern}"));
		}
	}

	if let Some(ref patterns) = options.skip_pattern {
		for pattern in patterns.to_vec() {
			params.push(format!("--test-skip-pattern={pattern}"));
		}
	}

	if let Some(isolation) = options.isolation {
		params.push(format!(
			"{}={}",
			isolation_flag(major_version),
			isolation.as_str()
		));
	}

	if options.module_mocks == Some(true) {
		params.push("--experimental-test-module-mocks".to_string());
	}

	if let Some(concurrency) = options.concurrency {
		params.push(format!("--test-concurrency={concurrency}"));
	}

	if options.force_exit == Some(true) {
		params.push("--test-force-exit".to_string());
	}

	if options.only == Some(true) {
		params.push("--test-only".to_string());
	}

	if let Some(ref shard) = options.shard {
		params.push(format!("--test-shard={shard}"));
	}

	if let Some(timeout) = options.timeout {
		params.push(format!("--test-timeout={timeout}"));
	}

	if options.update_snapshots == Some(true) {
		params.push("--test-update-snapshots".to_string());
	}

	if let Some(ref rerun_failures) = options.rerun_failures {
		params.push(format!("--test-rerun-failures={rerun_failures}"));
	}

	if let Some(ref global_setup) = options.global_setup {
		params.push(format!("--test-global-setup={global_setup}"));
	}

	if options.watch == Some(true) {
		params.push("--watch".to_string());
	}

	if let Some(ref files) = options.files {
		params.extend(files.to_vec());
	}

	params
}
