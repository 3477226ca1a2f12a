//! Configuration types deserialized from `netscan.toml`.

use serde::Deserialize;

pub use netscan_extract::MergeStrategy;

/// Number of workers used when neither the file nor the command line says otherwise.
pub const DEFAULT_THREADS: usize = 4;

/// The top-level configuration parsed from `netscan.toml`.
///
/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetscanConfig {
    /// Extraction engine settings.
    #[serde(default)]
    pub extract: ExtractConfig,
    /// Output settings for the command-line front end.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the extraction engines.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Number of concurrent workers. `0` and `1` both select a single worker.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// How partitioned workers combine their pin bindings.
    #[serde(default)]
    pub merge: MergeStrategy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            merge: MergeStrategy::default(),
        }
    }
}

fn default_threads() -> usize {
    DEFAULT_THREADS
}

/// Settings controlling how results are printed.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Format used by `dump`.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for netlist dumps.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable sections.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}
