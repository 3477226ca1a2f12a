//! The stateful entry point that owns the most recently extracted netlist.

use std::path::Path;
use std::time::Instant;

use crate::error::ExtractResult;
use crate::netlist::Netlist;
use crate::partition::{self, MergeStrategy};
use crate::sequential;

/// Owns a [`Netlist`] and rebuilds it from source files.
///
/// Each successful parse replaces the previous netlist entirely. A failed
/// parse (the file cannot be opened or read) leaves the previous netlist
/// untouched.
#[derive(Debug, Default)]
pub struct Extractor {
    netlist: Netlist,
    merge: MergeStrategy,
}

impl Extractor {
    /// Creates an extractor with an empty netlist and batched merging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor that merges partitioned results with `merge`.
    pub fn with_merge(merge: MergeStrategy) -> Self {
        Self {
            netlist: Netlist::new(),
            merge,
        }
    }

    /// The merge strategy used by [`parse_file_multithreaded`](Self::parse_file_multithreaded).
    pub fn merge(&self) -> MergeStrategy {
        self.merge
    }

    /// Rebuilds the netlist from `path` with the single-threaded engine.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> ExtractResult<()> {
        let path = path.as_ref();
        let started = Instant::now();
        let netlist = sequential::extract_file(path).inspect_err(|e| log::error!("{e}"))?;
        self.replace(path, netlist, started);
        Ok(())
    }

    /// Rebuilds the netlist from `path` by scanning `num_threads` chunks concurrently.
    ///
    /// `num_threads` is clamped to at least 1.
    pub fn parse_file_multithreaded(
        &mut self,
        path: impl AsRef<Path>,
        num_threads: usize,
    ) -> ExtractResult<()> {
        let path = path.as_ref();
        let started = Instant::now();
        let netlist = partition::extract_file_partitioned(path, num_threads.max(1), self.merge)
            .inspect_err(|e| log::error!("{e}"))?;
        self.replace(path, netlist, started);
        Ok(())
    }

    fn replace(&mut self, path: &Path, netlist: Netlist, started: Instant) {
        log::info!(
            "parsed {}: {} port(s), {} net(s), {} cell(s), {} binding(s) in {:.2?}",
            path.display(),
            netlist.port_slice().len(),
            netlist.net_slice().len(),
            netlist.cell_slice().len(),
            netlist.binding_count(),
            started.elapsed()
        );
        self.netlist = netlist;
    }

    /// The most recently extracted netlist.
    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// See [`Netlist::ports`].
    pub fn ports(&self) -> Vec<String> {
        self.netlist.ports()
    }

    /// See [`Netlist::cells`].
    pub fn cells(&self) -> Vec<String> {
        self.netlist.cells()
    }

    /// See [`Netlist::nets`].
    pub fn nets(&self) -> Vec<String> {
        self.netlist.nets()
    }

    /// See [`Netlist::pins`].
    pub fn pins(&self, cell: &str) -> Vec<String> {
        self.netlist.pins(cell)
    }

    /// See [`Netlist::net_for_pin`].
    pub fn net_for_pin(&self, cell: &str, pin: &str) -> String {
        self.netlist.net_for_pin(cell, pin)
    }
}
