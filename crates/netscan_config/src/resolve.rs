//! Settings resolution: command-line overrides layered over the config file.

use crate::loader::MAX_THREADS;
use crate::types::{MergeStrategy, NetscanConfig, OutputFormat};

/// Values given on the command line. `None` defers to the config file.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overrides {
    /// Worker count (`-j`).
    pub threads: Option<usize>,
    /// Merge strategy (`--merge`).
    pub merge: Option<MergeStrategy>,
    /// Output format (`--format`).
    pub format: Option<OutputFormat>,
}

/// The effective settings for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// Worker count, between 1 and [`MAX_THREADS`]. A value of 1 selects the sequential engine.
    pub threads: usize,
    /// Merge strategy for the partitioned engine.
    pub merge: MergeStrategy,
    /// Output format for dumps.
    pub format: OutputFormat,
}

impl ResolvedSettings {
    /// Returns `true` if the partitioned engine should be used.
    pub fn is_partitioned(&self) -> bool {
        self.threads > 1
    }
}

/// Merges `overrides` on top of `config`.
///
/// Overrides win. The worker count is clamped to `1..=MAX_THREADS`, the same
/// ceiling the config file is validated against.
pub fn resolve_settings(config: &NetscanConfig, overrides: &Overrides) -> ResolvedSettings {
    ResolvedSettings {
        threads: overrides
            .threads
            .unwrap_or(config.extract.threads)
            .clamp(1, MAX_THREADS),
        merge: overrides.merge.unwrap_or(config.extract.merge),
        format: overrides.format.unwrap_or(config.output.format),
    }
}
