//! Conformance test helpers for the netscan extraction engines.
//!
//! Writes source text to a temporary file, runs it through the sequential
//! engine and the partitioned engine at several worker counts, and returns
//! the results for comparison in integration tests.

#![warn(missing_docs)]

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use netscan_extract::{ExtractResult, Extractor, MergeStrategy, Netlist};
use tempfile::TempDir;

/// A source file written to a temporary directory that lives as long as the fixture.
pub struct Fixture {
    _dir: TempDir,
    /// Path of the written file.
    pub path: PathBuf,
}

impl Fixture {
    /// Writes `source` to `design.v` in a fresh temporary directory.
    pub fn new(source: &str) -> Self {
        Self::named("design.v", source)
    }

    /// Writes `source` to `name` in a fresh temporary directory.
    pub fn named(name: &str, source: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(name);
        fs::write(&path, source).expect("write fixture");
        Self { _dir: dir, path }
    }

    /// Parses the fixture with the sequential engine.
    pub fn sequential(&self) -> ExtractResult<Netlist> {
        let mut extractor = Extractor::new();
        extractor.parse_file(&self.path)?;
        Ok(extractor.netlist().clone())
    }

    /// Parses the fixture with the partitioned engine.
    pub fn partitioned(&self, threads: usize, merge: MergeStrategy) -> ExtractResult<Netlist> {
        let mut extractor = Extractor::with_merge(merge);
        extractor.parse_file_multithreaded(&self.path, threads)?;
        Ok(extractor.netlist().clone())
    }
}

/// Ports, nets, and cells of a netlist as sets, for order-insensitive comparison.
#[derive(Debug, PartialEq, Eq)]
pub struct EntitySets {
    /// Distinct port names.
    pub ports: BTreeSet<String>,
    /// Distinct net names.
    pub nets: BTreeSet<String>,
    /// Distinct cell names.
    pub cells: BTreeSet<String>,
}

impl EntitySets {
    /// Collects the entity sets of `netlist`.
    pub fn of(netlist: &Netlist) -> Self {
        Self {
            ports: netlist.port_slice().iter().cloned().collect(),
            nets: netlist.net_slice().iter().cloned().collect(),
            cells: netlist.cell_slice().iter().cloned().collect(),
        }
    }
}

/// Builds a gate-level module with `gates` single-line inverter instances chained
/// through nets `n0..n{gates}`, one statement per line.
pub fn inverter_chain(gates: usize) -> String {
    let mut src = String::from("module chain (n0, out);\n");
    for i in 1..=gates {
        src.push_str(&format!("wire n{i};\n"));
    }
    for i in 0..gates {
        src.push_str(&format!("INV g{i} (.A(n{i}), .Y(n{}));\n", i + 1));
    }
    src.push_str("endmodule\n");
    src
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverter_chain_shape() {
        let src = inverter_chain(2);
        assert_eq!(
            src,
            "module chain (n0, out);\nwire n1;\nwire n2;\nINV g0 (.A(n0), .Y(n1));\nINV g1 (.A(n1), .Y(n2));\nendmodule\n"
        );
    }

    #[test]
    fn fixture_round_trips_through_engines() {
        let fixture = Fixture::new(&inverter_chain(3));
        let seq = fixture.sequential().unwrap();
        let par = fixture.partitioned(2, MergeStrategy::Batched).unwrap();
        assert_eq!(EntitySets::of(&seq), EntitySets::of(&par));
        assert_eq!(seq.cells(), vec!["g0", "g1", "g2"]);
    }
}
