//! Subcommand execution: load settings, extract, print one view.

use std::path::Path;

use netscan_config::{resolve_settings, NetscanConfig, Overrides, ResolvedSettings};
use netscan_extract::Extractor;

use crate::render;
use crate::{Command, GlobalArgs};

/// Runs one query subcommand and returns the process exit code.
pub fn run(command: &Command, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let format = match command {
        Command::Dump { format, .. } => format.map(Into::into),
        _ => None,
    };
    let settings = resolve_settings(
        &config,
        &Overrides {
            threads: global.threads,
            merge: global.merge,
            format,
        },
    );

    let extractor = extract(command.file(), &settings)?;
    print!("{}", render_command(command, &extractor, &settings)?);
    Ok(0)
}

/// Loads the explicit `--config` file, or `netscan.toml` from the working directory if present.
fn load_config(global: &GlobalArgs) -> Result<NetscanConfig, Box<dyn std::error::Error>> {
    let config = match global.config {
        Some(ref path) => netscan_config::load_config_file(path)?,
        None => netscan_config::load_config(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Parses `file` with the engine selected by `settings`.
pub fn extract(file: &Path, settings: &ResolvedSettings) -> Result<Extractor, Box<dyn std::error::Error>> {
    let mut extractor = Extractor::with_merge(settings.merge);
    if settings.is_partitioned() {
        log::debug!(
            "extracting {} with {} workers",
            file.display(),
            settings.threads
        );
        extractor.parse_file_multithreaded(file, settings.threads)?;
    } else {
        extractor.parse_file(file)?;
    }
    Ok(extractor)
}

/// Produces the text printed for `command`.
pub fn render_command(
    command: &Command,
    extractor: &Extractor,
    settings: &ResolvedSettings,
) -> Result<String, Box<dyn std::error::Error>> {
    let out = match command {
        Command::Ports { .. } => render::lines(&extractor.ports()),
        Command::Cells { .. } => render::lines(&extractor.cells()),
        Command::Nets { .. } => render::lines(&extractor.nets()),
        Command::Pins { cell, .. } => render::lines(&extractor.pins(cell)),
        Command::Net { cell, pin, .. } => format!("{}\n", extractor.net_for_pin(cell, pin)),
        Command::Dump { .. } => render::dump(extractor.netlist(), settings.format)?,
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use netscan_config::{MergeStrategy, OutputFormat};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SOURCE: &str = "\
module top (a, y);
wire n1;
INV u1 (.A(a), .Y(n1));
BUF u2 (
  .A(n1),
  .Y(y)
);
endmodule
";

    fn settings(threads: usize) -> ResolvedSettings {
        ResolvedSettings {
            threads,
            merge: MergeStrategy::Batched,
            format: OutputFormat::Text,
        }
    }

    fn setup() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("top.v");
        fs::write(&path, SOURCE).unwrap();
        (dir, path)
    }

    #[test]
    fn ports_one_per_line() {
        let (_dir, file) = setup();
        let ex = extract(&file, &settings(1)).unwrap();
        let out = render_command(&Command::Ports { file }, &ex, &settings(1)).unwrap();
        assert_eq!(out, "a\ny\n");
    }

    #[test]
    fn pins_and_net_queries() {
        let (_dir, file) = setup();
        let ex = extract(&file, &settings(2)).unwrap();
        let pins = Command::Pins {
            file: file.clone(),
            cell: "u1".to_string(),
        };
        assert_eq!(render_command(&pins, &ex, &settings(2)).unwrap(), "A\nY\n");

        let net = Command::Net {
            file,
            cell: "u1".to_string(),
            pin: "Y".to_string(),
        };
        assert_eq!(render_command(&net, &ex, &settings(2)).unwrap(), "n1\n");
    }

    #[test]
    fn unknown_cell_prints_nothing() {
        let (_dir, file) = setup();
        let ex = extract(&file, &settings(1)).unwrap();
        let pins = Command::Pins {
            file: file.clone(),
            cell: "nope".to_string(),
        };
        assert_eq!(render_command(&pins, &ex, &settings(1)).unwrap(), "");
        let net = Command::Net {
            file,
            cell: "nope".to_string(),
            pin: "A".to_string(),
        };
        assert_eq!(render_command(&net, &ex, &settings(1)).unwrap(), "\n");
    }

    #[test]
    fn missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let err = extract(&dir.path().join("none.v"), &settings(4)).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }
}
