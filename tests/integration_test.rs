#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn ntest_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("ntest").unwrap()
}

/// Write a fake runtime script that answers `--version` with `version`,
/// records any other argv (one argument per line) into $NTEST_ARGS_FILE,
/// and exits with `exit_code`.
#[cfg(unix)]
fn write_fake_runtime(dir: &Path, version: &str, exit_code: i32) -> PathBuf {
	use std::os::unix::fs::PermissionsExt;

	let script_path = dir.join("fake-node.sh");
	let script = format!(
		r#"#!/bin/sh
if [ "$1" = "--version" ]; then
	echo "{version}"
	exit 0
fi
printf '%s\n' "$@" > "$NTEST_ARGS_FILE"
exit {exit_code}
"#
	);
	fs::write(&script_path, script).unwrap();
	fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755)).unwrap();
	script_path
}

#[cfg(unix)]
fn recorded_args(args_file: &Path) -> Vec<String> {
	fs::read_to_string(args_file)
		.unwrap()
		.lines()
		.map(str::to_string)
		.collect()
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	ntest_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"Translate project test options into a node --test invocation",
		));
}

#[test]
fn test_version_flag() {
	ntest_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("ntest"));
}

#[test]
fn test_unknown_flag_rejected() {
	ntest_cmd()
		.arg("--bogus")
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("ntest:"))
		.stderr(predicate::str::contains("--bogus"));
}

#[test]
fn test_missing_flag_value_rejected() {
	ntest_cmd()
		.arg("--concurrency")
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("ntest:"));
}

#[test]
fn test_invalid_isolation_mode_rejected() {
	ntest_cmd()
		.args(["--isolation", "thread"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("ntest:"));
}

// ============================================================================
// Config resolution tests
// ============================================================================

#[test]
fn test_no_package_root_fails_before_spawn() {
	let temp_dir = tempfile::tempdir().unwrap();

	// No package.json from the tempdir upward; the missing fake runtime
	// would fail differently if a spawn were ever attempted.
	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", "/nonexistent/runtime")
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("No package.json found"));
}

#[test]
fn test_explicit_config_missing() {
	let temp_dir = tempfile::tempdir().unwrap();

	ntest_cmd()
		.current_dir(temp_dir.path())
		.args(["--config", "absent.json"])
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("Failed to read config file"))
		.stderr(predicate::str::contains("absent.json"));
}

#[test]
fn test_explicit_config_malformed() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join("bad.json");
	fs::write(&config_path, "{not json").unwrap();

	ntest_cmd()
		.current_dir(temp_dir.path())
		.args(["--config", "bad.json"])
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("Failed to parse config file"))
		.stderr(predicate::str::contains("bad.json"));
}

// ============================================================================
// Invocation forwarding tests (Unix only - these use a shell-script runtime)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_empty_project_builds_base_param_only() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.0.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.assert()
		.success();

	assert_eq!(recorded_args(&args_file), vec!["--test"]);
}

#[cfg(unix)]
#[test]
fn test_coverage_flags_forwarded_in_order() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.0.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.args(["--coverage", "--coverage-branches=13"])
		.assert()
		.success();

	assert_eq!(
		recorded_args(&args_file),
		vec![
			"--test",
			"--experimental-test-coverage",
			"--test-coverage-branches=13",
		]
	);
}

#[cfg(unix)]
#[test]
fn test_passthrough_args_come_after_built_params() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.0.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.args(["a.test.js", "--", "--inspect-brk", "--no-warnings"])
		.assert()
		.success();

	assert_eq!(
		recorded_args(&args_file),
		vec!["--test", "a.test.js", "--inspect-brk", "--no-warnings"]
	);
}

#[cfg(unix)]
#[test]
fn test_reporter_destination_keeps_colons() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.0.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.args(["--reporter", "lcov:C:/lcov.info", "--reporter", "spec"])
		.assert()
		.success();

	assert_eq!(
		recorded_args(&args_file),
		vec![
			"--test",
			"--test-reporter=lcov",
			"--test-reporter-destination=C:/lcov.info",
			"--test-reporter=spec",
			"--test-reporter-destination=stdout",
		]
	);
}

#[cfg(unix)]
#[test]
fn test_cli_overrides_config_value() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	fs::write(
		temp_dir.path().join("ntest.json"),
		r#"{ "concurrency": 5, "timeout": 2000 }"#,
	)
	.unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.0.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.args(["--concurrency", "3"])
		.assert()
		.success();

	// CLI wins for concurrency, config timeout survives untouched.
	assert_eq!(
		recorded_args(&args_file),
		vec!["--test", "--test-concurrency=3", "--test-timeout=2000"]
	);
}

#[cfg(unix)]
#[test]
fn test_manifest_field_options_forwarded() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join("package.json"),
		r#"{ "name": "demo", "ntest": { "timeout": 1000, "only": true } }"#,
	)
	.unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.0.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.assert()
		.success();

	assert_eq!(
		recorded_args(&args_file),
		vec!["--test", "--test-only", "--test-timeout=1000"]
	);
}

// ============================================================================
// Isolation version fork tests (Unix only)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_isolation_uses_experimental_flag_below_24() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.14.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.args(["--isolation", "process"])
		.assert()
		.success();

	assert_eq!(
		recorded_args(&args_file),
		vec!["--test", "--experimental-test-isolation=process"]
	);
}

#[cfg(unix)]
#[test]
fn test_isolation_uses_stable_flag_at_24() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v24.1.0", 0);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.args(["--isolation", "process"])
		.assert()
		.success();

	assert_eq!(
		recorded_args(&args_file),
		vec!["--test", "--test-isolation=process"]
	);
}

// ============================================================================
// Exit outcome tests (Unix only)
// ============================================================================

#[cfg(unix)]
#[test]
fn test_child_nonzero_exit_becomes_failure() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();
	let runtime = write_fake_runtime(temp_dir.path(), "v22.0.0", 9);
	let args_file = temp_dir.path().join("argv");

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", &runtime)
		.env("NTEST_ARGS_FILE", &args_file)
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("exited with code 9"));
}

#[test]
fn test_runtime_spawn_failure_reported() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join("package.json"), "{}").unwrap();

	ntest_cmd()
		.current_dir(temp_dir.path())
		.env("NTEST_RUNTIME", "/nonexistent/path/to/runtime")
		.assert()
		.failure()
		.code(1)
		.stderr(predicate::str::contains("Failed to start"));
}
