//! The per-worker extraction state machine.
//!
//! A [`Scanner`] owns one [`BufferState`] and turns a stream of raw lines into
//! calls on a [`MatchSink`]. Both engines drive the same scanner: the
//! sequential engine over the whole file, the partitioned engine once per
//! chunk.

use crate::classify::{self, Instance, LineClass, CLOSE_SEQUENCE};
use crate::preprocess::strip_comment;

/// Receives the matches produced by a [`Scanner`].
pub trait MatchSink {
    /// A module port, in declaration order.
    fn port(&mut self, name: String);
    /// A wire net.
    fn net(&mut self, name: String);
    /// A resolved instantiation with its pin connections.
    fn instance(&mut self, instance: Instance);
}

/// Buffer for an instantiation that spans several lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BufferState {
    buffering: bool,
    text: String,
}

impl BufferState {
    /// Returns `true` while a multi-line instantiation is being accumulated.
    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    /// The text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn start(&mut self, line: &str) {
        self.buffering = true;
        self.text.clear();
        self.text.push_str(line);
    }

    /// Appends `line` and, once the buffer holds `);`, returns the complete
    /// text and resets.
    fn push(&mut self, line: &str) -> Option<String> {
        self.text.push(' ');
        self.text.push_str(line);
        if self.text.contains(CLOSE_SEQUENCE) {
            self.buffering = false;
            Some(std::mem::take(&mut self.text))
        } else {
            None
        }
    }

    fn abandon(&mut self) -> Option<String> {
        if !self.buffering {
            return None;
        }
        self.buffering = false;
        Some(std::mem::take(&mut self.text))
    }
}

/// Line-by-line driver of the classifier.
#[derive(Debug, Default)]
pub struct Scanner {
    state: BufferState,
    line_no: usize,
}

impl Scanner {
    /// Creates a scanner whose first line is line 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scanner whose first line is `first_line + 1`. Only affects logging.
    pub fn starting_at(first_line: usize) -> Self {
        Self {
            state: BufferState::default(),
            line_no: first_line,
        }
    }

    /// The current buffer state.
    pub fn state(&self) -> &BufferState {
        &self.state
    }

    /// Strips comments from `raw`, classifies it, and forwards any match to `sink`.
    pub fn feed(&mut self, raw: &str, sink: &mut impl MatchSink) {
        self.line_no += 1;
        let line = strip_comment(raw);
        log::trace!("line {}: {}", self.line_no, line);

        match classify::classify(line, self.state.is_buffering()) {
            LineClass::Continuation => {
                if let Some(text) = self.state.push(line) {
                    match classify::match_instance(&text) {
                        Some(instance) => self.emit_instance(instance, sink),
                        None => log::debug!(
                            "line {}: dropping unrecognized instantiation `{}`",
                            self.line_no,
                            text.trim()
                        ),
                    }
                }
            }
            LineClass::ModuleHeader { name, ports } => {
                log::debug!(
                    "line {}: module `{}` with {} port(s)",
                    self.line_no,
                    name,
                    ports.len()
                );
                for port in ports {
                    sink.port(port);
                }
            }
            LineClass::WireDecl { net } => {
                log::debug!("line {}: wire `{}`", self.line_no, net);
                sink.net(net);
            }
            LineClass::InstanceLine(instance) => self.emit_instance(instance, sink),
            LineClass::InstanceStart => self.state.start(line),
            LineClass::NoMatch => {}
        }
    }

    /// Ends the stream, silently dropping any unterminated instantiation.
    ///
    /// Returns `true` if an instantiation was still being buffered.
    pub fn finish(mut self) -> bool {
        match self.state.abandon() {
            Some(text) => {
                log::debug!(
                    "end of input after line {}: dropping unterminated `{}`",
                    self.line_no,
                    text.trim()
                );
                true
            }
            None => false,
        }
    }

    fn emit_instance(&self, instance: Instance, sink: &mut impl MatchSink) {
        log::debug!(
            "line {}: cell `{}` of `{}` with {} pin(s)",
            self.line_no,
            instance.name,
            instance.module,
            instance.pins.len()
        );
        sink.instance(instance);
    }
}
