//! netscan CLI: structural netlist queries from the command line.
//!
//! Each subcommand parses one source file and prints a single view of the
//! extracted netlist: `ports`, `cells`, `nets`, `pins`, `net`, or a full
//! `dump`.

#![warn(missing_docs)]

mod query;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use netscan_config::{MergeStrategy, OutputFormat, MAX_THREADS};

/// netscan, a line-oriented netlist extractor.
#[derive(Parser, Debug)]
#[command(name = "netscan", version, about = "Structural netlist extractor")]
pub struct Cli {
    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a `netscan.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of concurrent workers, at most 1024; 1 selects the sequential engine.
    #[arg(
        short = 'j',
        long,
        global = true,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_THREADS as u64)
    )]
    pub threads: Option<usize>,

    /// How partitioned workers merge pin bindings.
    #[arg(long, global = true, value_enum)]
    pub merge: Option<MergeArg>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List module ports.
    Ports {
        /// Source file to parse.
        file: PathBuf,
    },
    /// List cell instance names.
    Cells {
        /// Source file to parse.
        file: PathBuf,
    },
    /// List declared nets.
    Nets {
        /// Source file to parse.
        file: PathBuf,
    },
    /// List the pins bound on a cell.
    Pins {
        /// Source file to parse.
        file: PathBuf,
        /// Cell instance name.
        cell: String,
    },
    /// Print the net bound to a cell pin.
    Net {
        /// Source file to parse.
        file: PathBuf,
        /// Cell instance name.
        cell: String,
        /// Pin name.
        pin: String,
    },
    /// Print the whole netlist.
    Dump {
        /// Source file to parse.
        file: PathBuf,
        /// Output format.
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
}

impl Command {
    /// The source file named by the command.
    pub fn file(&self) -> &PathBuf {
        match self {
            Command::Ports { file }
            | Command::Cells { file }
            | Command::Nets { file }
            | Command::Pins { file, .. }
            | Command::Net { file, .. }
            | Command::Dump { file, .. } => file,
        }
    }
}

/// Merge strategy selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MergeArg {
    /// Fold per-worker bindings after all workers finish.
    Batched,
    /// Write bindings into shared maps under a lock.
    Locked,
}

impl From<MergeArg> for MergeStrategy {
    fn from(arg: MergeArg) -> Self {
        match arg {
            MergeArg::Batched => MergeStrategy::Batched,
            MergeArg::Locked => MergeStrategy::Locked,
        }
    }
}

/// Dump output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable sections.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
    /// Worker count override.
    pub threads: Option<usize>,
    /// Merge strategy override.
    pub merge: Option<MergeStrategy>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        config: cli.config,
        threads: cli.threads,
        merge: cli.merge.map(Into::into),
    };

    match query::run(&cli.command, &global) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the logger. `RUST_LOG` takes precedence over the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
