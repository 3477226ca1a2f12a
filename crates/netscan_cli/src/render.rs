//! Text and JSON rendering of extracted netlists.

use std::collections::{HashMap, HashSet};
use std::fmt::Write;

use netscan_config::OutputFormat;
use netscan_extract::Netlist;

/// Joins `items` one per line, each terminated by a newline.
pub fn lines(items: &[String]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}

/// Renders the whole netlist in `format`.
pub fn dump(netlist: &Netlist, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(dump_text(netlist)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&netlist.snapshot())?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Text layout: one section per sequence, then each distinct cell with its bindings.
///
/// A repeated instance name is listed once with its occurrence count, since
/// the pin maps already merge every occurrence under that name.
fn dump_text(netlist: &Netlist) -> String {
    let mut out = String::new();
    section(&mut out, "ports", netlist.port_slice());
    section(&mut out, "nets", netlist.net_slice());

    let cells = netlist.cell_slice();
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for cell in cells {
        *occurrences.entry(cell.as_str()).or_default() += 1;
    }

    let bindings = netlist.net_by_pin();
    let pins = netlist.pins_by_cell();
    let _ = writeln!(out, "cells ({}):", cells.len());
    for cell in cells {
        let Some(count) = occurrences.remove(cell.as_str()) else {
            continue;
        };
        if count > 1 {
            let _ = writeln!(out, "  {cell} (x{count})");
        } else {
            let _ = writeln!(out, "  {cell}");
        }
        let mut printed = HashSet::new();
        for pin in pins.get(cell).into_iter().flatten() {
            if !printed.insert(pin) {
                continue;
            }
            let net = bindings
                .get(&(cell.clone(), pin.clone()))
                .map(String::as_str)
                .unwrap_or("");
            let _ = writeln!(out, "    .{pin} -> {net}");
        }
    }
    out
}

fn section(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "{title} ({}):", items.len());
    for item in items {
        let _ = writeln!(out, "  {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netscan_extract::sequential::extract_str;

    #[test]
    fn lines_empty_and_nonempty() {
        assert_eq!(lines(&[]), "");
        assert_eq!(lines(&["a".to_string(), "b".to_string()]), "a\nb\n");
    }

    #[test]
    fn text_dump_layout() {
        let netlist = extract_str("module m (a);\nwire w;\nINV u1 (.A(a), .Y(w));");
        let text = dump(&netlist, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "ports (1):\n  a\nnets (1):\n  w\ncells (1):\n  u1\n    .A -> a\n    .Y -> w\n"
        );
    }

    #[test]
    fn repeated_cell_listed_once() {
        let netlist = extract_str("inv u1 (.A(a), .Y(y));\ninv u2 (.A(y));\ninv u1 (.A(b));");
        let text = dump(&netlist, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "ports (0):\nnets (0):\ncells (3):\n  u1 (x2)\n    .A -> b\n    .Y -> y\n  u2\n    .A -> y\n"
        );
    }

    #[test]
    fn json_dump_is_valid() {
        let netlist = extract_str("module m (a);\nINV u1 (.A(a));");
        let json = dump(&netlist, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ports"], serde_json::json!(["a"]));
        assert_eq!(value["bindings"][0]["net"], "a");
    }
}
