//! Per-line preprocessing applied before classification.

use std::io::{self, BufRead};

/// The line comment marker.
pub const LINE_COMMENT: &str = "//";

/// Removes everything from the first `//` to the end of the line.
///
/// Block comments are not recognized: text between `/*` and `*/` is left in
/// place and classified like any other code.
pub fn strip_comment(line: &str) -> &str {
    match line.find(LINE_COMMENT) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Iterator over the lines of a byte stream, decoded leniently.
///
/// Created by [`source_lines`].
#[derive(Debug)]
pub struct SourceLines<R> {
    reader: R,
    buf: Vec<u8>,
}

/// Splits `reader` into lines without requiring valid UTF-8.
///
/// Each line loses its `\n` or `\r\n` terminator. Byte sequences that are not
/// UTF-8, such as a Latin-1 copyright sign in a header comment, become U+FFFD.
/// Only failures of the underlying reader are reported as errors.
pub fn source_lines<R: BufRead>(reader: R) -> SourceLines<R> {
    SourceLines {
        reader,
        buf: Vec::new(),
    }
}

impl<R: BufRead> Iterator for SourceLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
