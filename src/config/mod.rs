//! Configuration loading and parsing for ntest.
//!
//! This module handles:
//! - JSON options file parsing
//! - Package-root discovery (upward walk to the nearest package.json)
//! - Default config file priority and the manifest `"ntest"` fallback

pub mod parser;
pub mod resolver;
pub mod types;

pub use parser::{parse_options_file, parse_options_str};
pub use resolver::{CONFIG_FILES, MANIFEST_FIELD, MANIFEST_FILE, find_package_root, resolve};
pub use types::{Coverage, Isolation, Options, Reporter, StringOrList};
