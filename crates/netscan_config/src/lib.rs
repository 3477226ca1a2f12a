//! Parsing and validation of `netscan.toml` configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`NetscanConfig`], then merges command-line overrides on top
//! of it to yield [`ResolvedSettings`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{
    load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME, MAX_THREADS,
};
pub use resolve::{resolve_settings, Overrides, ResolvedSettings};
pub use types::*;
