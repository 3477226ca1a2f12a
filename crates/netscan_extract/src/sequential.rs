//! Single-threaded extraction over a whole file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{ExtractError, ExtractResult};
use crate::netlist::Netlist;
use crate::preprocess::source_lines;
use crate::scan::Scanner;

/// Runs one scanner over `lines` in order and returns the resulting netlist.
pub fn extract_lines<I, S>(lines: I) -> Netlist
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new();
    let mut netlist = Netlist::new();
    for line in lines {
        scanner.feed(line.as_ref(), &mut netlist);
    }
    scanner.finish();
    netlist
}

/// Extracts a netlist from an in-memory source string.
pub fn extract_str(source: &str) -> Netlist {
    extract_lines(source.lines())
}

/// Streams lines from `reader` through a single scanner.
///
/// Bytes that are not valid UTF-8 are decoded lossily rather than rejected.
pub fn extract_reader(reader: impl BufRead) -> io::Result<Netlist> {
    let mut scanner = Scanner::new();
    let mut netlist = Netlist::new();
    for line in source_lines(reader) {
        scanner.feed(&line?, &mut netlist);
    }
    scanner.finish();
    Ok(netlist)
}

/// Opens `path` and extracts its netlist line by line.
pub fn extract_file(path: &Path) -> ExtractResult<Netlist> {
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    extract_reader(BufReader::new(file)).map_err(|e| ExtractError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTER: &str = "\
module counter (clk, rst, q);
  wire n1;
  wire n2; // feedback
  DFF r0 (.D(n1), .CK(clk), .Q(q));
  INV u1 (
    .A(q),
    .Y(n2)
  );
endmodule
";

    #[test]
    fn extracts_all_entities_in_order() {
        let netlist = extract_str(COUNTER);
        assert_eq!(netlist.ports(), vec!["clk", "rst", "q"]);
        assert_eq!(netlist.nets(), vec!["n1", "n2"]);
        assert_eq!(netlist.cells(), vec!["r0", "u1"]);
        assert_eq!(netlist.pins("r0"), vec!["D", "CK", "Q"]);
        assert_eq!(netlist.net_for_pin("u1", "Y"), "n2");
        assert_eq!(netlist.binding_count(), 5);
    }

    #[test]
    fn reader_and_str_agree() {
        let from_reader = extract_reader(COUNTER.as_bytes()).unwrap();
        assert_eq!(from_reader, extract_str(COUNTER));
    }

    #[test]
    fn line_wrapping_preserves_bindings() {
        let single = extract_str("NAND2 g1 ( .A(a), .B(b), .Y(y) );");
        let wrapped = extract_str("NAND2 g1 (\n .A(a),\n .B(b),\n .Y(y)\n);");
        assert_eq!(single.cells(), wrapped.cells());
        assert_eq!(single.net_by_pin(), wrapped.net_by_pin());
        assert_eq!(single.pins_by_cell(), wrapped.pins_by_cell());
    }

    #[test]
    fn duplicates_are_kept() {
        let netlist = extract_str("wire a;\nwire a;\ninv u1 (.A(a));\ninv u1 (.A(b));");
        assert_eq!(netlist.nets(), vec!["a", "a"]);
        assert_eq!(netlist.cells(), vec!["u1", "u1"]);
        assert_eq!(netlist.pins("u1"), vec!["A", "A"]);
        assert_eq!(netlist.net_for_pin("u1", "A"), "b");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = extract_file(Path::new("/nonexistent/design.v")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn non_utf8_comment_does_not_abort() {
        let bytes: &[u8] = b"// copyright \xa9 2020\nwire a;\nINV u1 (.A(a));\n";
        let netlist = extract_reader(bytes).unwrap();
        assert_eq!(netlist.nets(), vec!["a"]);
        assert_eq!(netlist.cells(), vec!["u1"]);
        assert_eq!(netlist.net_for_pin("u1", "A"), "a");
    }

    #[test]
    fn crlf_line_endings() {
        let netlist = extract_reader(&b"wire a;\r\nINV u1 (\r\n.A(a)\r\n);\r\n"[..]).unwrap();
        assert_eq!(netlist.nets(), vec!["a"]);
        assert_eq!(netlist.cells(), vec!["u1"]);
    }
}
