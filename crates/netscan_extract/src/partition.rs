//! Partitioned extraction: contiguous line chunks scanned concurrently.
//!
//! The line sequence is split into `threads` contiguous ranges of
//! `total / threads` lines, the last range taking the remainder. Each range is
//! scanned by its own [`Scanner`] on a dedicated `rayon` pool, so buffering
//! never crosses a chunk boundary: an instantiation whose opening line ends one
//! chunk and whose continuation lines start the next is lost.
//!
//! Ports, nets, and cells are collected per chunk and concatenated in chunk
//! order. How pin bindings reach the shared maps depends on the
//! [`MergeStrategy`].

use std::fs::File;
use std::io::{self, BufReader};
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::classify::Instance;
use crate::error::{ExtractError, ExtractResult};
use crate::netlist::{Netlist, PinMap};
use crate::preprocess::source_lines;
use crate::scan::{MatchSink, Scanner};

/// How worker pin bindings are combined into the final netlist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Workers keep their bindings locally and the coordinator folds them in
    /// chunk order once every worker has finished. Deterministic.
    #[default]
    Batched,
    /// Workers write bindings straight into shared maps behind one mutex.
    /// The order of each cell's pin list depends on lock acquisition order.
    Locked,
}

/// Splits `total` lines into `threads` contiguous ranges.
///
/// `threads` is clamped to at least 1. Every range but the last has
/// `total / threads` lines; the last one also takes the remainder.
pub fn chunk_ranges(total: usize, threads: usize) -> Vec<Range<usize>> {
    let threads = threads.max(1);
    let chunk = total / threads;
    (0..threads)
        .map(|i| {
            let end = if i == threads - 1 { total } else { (i + 1) * chunk };
            i * chunk..end
        })
        .collect()
}

/// Matches collected by one worker.
#[derive(Debug, Default)]
struct ChunkOutput {
    ports: Vec<String>,
    nets: Vec<String>,
    cells: Vec<String>,
    instances: Vec<Instance>,
}

impl MatchSink for ChunkOutput {
    fn port(&mut self, name: String) {
        self.ports.push(name);
    }

    fn net(&mut self, name: String) {
        self.nets.push(name);
    }

    fn instance(&mut self, instance: Instance) {
        self.cells.push(instance.name.clone());
        self.instances.push(instance);
    }
}

/// Worker sink that writes bindings into the shared maps as soon as they are found.
struct LockedSink<'a> {
    local: ChunkOutput,
    shared: &'a Mutex<PinMap>,
}

impl MatchSink for LockedSink<'_> {
    fn port(&mut self, name: String) {
        self.local.port(name);
    }

    fn net(&mut self, name: String) {
        self.local.net(name);
    }

    fn instance(&mut self, instance: Instance) {
        self.local.cells.push(instance.name.clone());
        // A poisoned lock means another worker panicked; that chunk fails the pass.
        let mut pins = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        pins.bind_all(&instance.name, &instance.pins);
    }
}

fn scan_chunk(index: usize, first_line: usize, lines: &[String], sink: &mut impl MatchSink) {
    let mut scanner = Scanner::starting_at(first_line);
    for line in lines {
        scanner.feed(line, sink);
    }
    if scanner.finish() {
        log::debug!("chunk {index}: instantiation left open at chunk end");
    }
}

/// Runs `work` once per range on `pool` and returns the outputs in range order.
///
/// A worker that panics is reported as [`ExtractError::Internal`] once every
/// other worker has finished.
fn run_chunks<F>(
    pool: &rayon::ThreadPool,
    ranges: &[Range<usize>],
    work: F,
) -> ExtractResult<Vec<ChunkOutput>>
where
    F: Fn(usize, Range<usize>) -> ChunkOutput + Sync,
{
    let mut slots: Vec<Option<ChunkOutput>> = ranges.iter().map(|_| None).collect();
    pool.scope(|s| {
        let work = &work;
        for (index, (range, slot)) in ranges.iter().zip(slots.iter_mut()).enumerate() {
            let range = range.clone();
            s.spawn(move |_| {
                match panic::catch_unwind(AssertUnwindSafe(|| work(index, range))) {
                    Ok(out) => *slot = Some(out),
                    Err(_) => log::error!("chunk {index}: worker panicked"),
                }
            });
        }
    });

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| ExtractError::Internal(format!("worker for chunk {index} panicked")))
        })
        .collect()
}

/// Extracts a netlist from `lines` using `threads` concurrent workers.
pub fn extract_partitioned(
    lines: &[String],
    threads: usize,
    merge: MergeStrategy,
) -> ExtractResult<Netlist> {
    let threads = threads.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("netscan-worker-{i}"))
        .build()
        .map_err(|e| ExtractError::Internal(format!("failed to start worker pool: {e}")))?;

    let ranges = chunk_ranges(lines.len(), threads);
    log::debug!(
        "partitioning {} line(s) into {} chunk(s) ({:?} merge)",
        lines.len(),
        ranges.len(),
        merge
    );

    let shared = Mutex::new(PinMap::default());
    let outputs = run_chunks(&pool, &ranges, |index, range| {
        let first_line = range.start;
        let chunk = &lines[range];
        match merge {
            MergeStrategy::Batched => {
                let mut out = ChunkOutput::default();
                scan_chunk(index, first_line, chunk, &mut out);
                out
            }
            MergeStrategy::Locked => {
                let mut sink = LockedSink {
                    local: ChunkOutput::default(),
                    shared: &shared,
                };
                scan_chunk(index, first_line, chunk, &mut sink);
                sink.local
            }
        }
    })?;

    // Every worker returned, so nothing panicked while holding the lock.
    let pins = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
    Ok(merge_chunks(outputs, pins))
}

/// Concatenates worker outputs in chunk order.
fn merge_chunks(outputs: Vec<ChunkOutput>, mut pins: PinMap) -> Netlist {
    let mut netlist = Netlist::new();
    for out in outputs {
        netlist.ports.extend(out.ports);
        netlist.nets.extend(out.nets);
        netlist.cells.extend(out.cells);
        for instance in &out.instances {
            pins.bind_all(&instance.name, &instance.pins);
        }
    }
    netlist.pins = pins;
    netlist
}

/// Reads `path` fully, then extracts it with [`extract_partitioned`].
pub fn extract_file_partitioned(
    path: &Path,
    threads: usize,
    merge: MergeStrategy,
) -> ExtractResult<Netlist> {
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let lines = source_lines(BufReader::new(file))
        .collect::<io::Result<Vec<String>>>()
        .map_err(|e| ExtractError::io(path, e))?;
    extract_partitioned(&lines, threads, merge)
}
