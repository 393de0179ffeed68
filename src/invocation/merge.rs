use crate::config::types::{Coverage, Options};

/// Overlay CLI-supplied options onto config-supplied options.
///
/// CLI wins at the field level. The nested coverage record is the one
/// exception to whole-field replacement: its sub-fields each override
/// individually, so `--coverage` on the CLI doesn't wipe out thresholds
/// configured in the file.
pub fn merge(config: Options, cli: Options) -> Options {
	Options {
		files: cli.files.or(config.files),
		reporters: cli.reporters.or(config.reporters),
		concurrency: cli.concurrency.or(config.concurrency),
		isolation: cli.isolation.or(config.isolation),
		module_mocks: cli.module_mocks.or(config.module_mocks),
		force_exit: cli.force_exit.or(config.force_exit),
		global_setup: cli.global_setup.or(config.global_setup),
		only: cli.only.or(config.only),
		shard: cli.shard.or(config.shard),
		test_pattern: cli.test_pattern.or(config.test_pattern),
		skip_pattern: cli.skip_pattern.or(config.skip_pattern),
		timeout: cli.timeout.or(config.timeout),
		update_snapshots: cli.update_snapshots.or(config.update_snapshots),
		rerun_failures: cli.rerun_failures.or(config.rerun_failures),
		watch: cli.watch.or(config.watch),
		coverage: merge_coverage(config.coverage, cli.coverage),
	}
}

fn merge_coverage(config: Option<Coverage>, cli: Option<Coverage>) -> Option<Coverage> {
	match (config, cli) {
		(base, None) => base,
		(None, overlay) => overlay,
		(Some(base), Some(overlay)) => Some(Coverage {
			enabled: overlay.enabled.or(base.enabled),
			include: overlay.include.or(base.include),
			exclude: overlay.exclude.or(base.exclude),
			lines: overlay.lines.or(base.lines),
			branches: overlay.branches.or(base.branches),
			functions: overlay.functions.or(base.functions),
		}),
	}
}
