//! Option translation for ntest.
//!
//! This module handles:
//! - Overlaying CLI flag values onto config-file options (CLI wins)
//! - Translating merged options into the runner's ordered parameter list
//! - The version-dependent isolation flag naming fork

pub mod builder;
pub mod merge;

pub use builder::{STABLE_ISOLATION_MAJOR, build, isolation_flag};
pub use merge::merge;
