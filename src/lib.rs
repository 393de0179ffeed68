//! Ntest - thin CLI over the Node.js built-in test runner.
//!
//! This library provides the core functionality for ntest, including:
//! - JSON config resolution (explicit file, package-root lookup, manifest field)
//! - Overlaying CLI flag values onto config options
//! - Translating merged options into the runner's ordered parameter list
//! - Launching the runtime with proper stdio handling
//!
//! # Example
//!
//! ```no_run
//! use ntest_cli::config::resolve;
//! use ntest_cli::invocation::{STABLE_ISOLATION_MAJOR, build};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let options = resolve(None, &cwd).unwrap();
//! let params = build(&options, STABLE_ISOLATION_MAJOR);
//!
//! println!("node {}", params.join(" "));
//! ```

pub mod config;
pub mod error;
pub mod exec;
pub mod invocation;

pub use error::{NtestError, Result};
