//! Line classification for the extraction state machine.
//!
//! A comment-stripped line is classified into exactly one [`LineClass`]. While
//! a multi-line instantiation is being buffered every line is a
//! [`LineClass::Continuation`]; otherwise the patterns in [`PRIORITY`] are
//! tried in order and the first match wins.
//!
//! The grammar is deliberately shallow: identifiers are `\w+`, parentheses
//! are not balanced, and a `);` anywhere closes an instantiation.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MODULE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*module\s+(\w+)\s*\(([^;]*)\);").expect("valid regex"));

static WIRE_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*wire\s+(\S+);").expect("valid regex"));

static INSTANCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)\s+(\w+)\s*\(.*\);$").expect("valid regex"));

static INSTANCE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)\s+(\w+)\s*\(\s*$").expect("valid regex"));

static INSTANCE_FULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\w+)\s+(\w+)\s*\(.*\)\s*;\s*$").expect("valid regex"));

static PIN_CONNECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.([A-Za-z0-9_]+)\s*\(\s*([A-Za-z0-9_]+)\s*\)").expect("valid regex")
});

/// The sequence that terminates a buffered instantiation.
pub const CLOSE_SEQUENCE: &str = ");";

/// A `.pin(net)` connection found inside an instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinConnection {
    /// The pin name on the instantiated cell.
    pub pin: String,
    /// The net the pin is connected to.
    pub net: String,
}

/// A recognized instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    /// The instantiated module type. Observed but not stored in the netlist.
    pub module: String,
    /// The instance name.
    pub name: String,
    /// Pin connections in source order.
    pub pins: Vec<PinConnection>,
}

/// The outcome of classifying a single line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineClass {
    /// `module <name> ( <ports> );` on a single line.
    ModuleHeader {
        /// The module name.
        name: String,
        /// Non-empty port identifiers in declaration order.
        ports: Vec<String>,
    },
    /// `wire <net>;`
    WireDecl {
        /// The declared net.
        net: String,
    },
    /// A complete instantiation on one line.
    InstanceLine(Instance),
    /// `<type> <name> (` with nothing after the parenthesis.
    InstanceStart,
    /// A line appended to an instantiation that is being buffered.
    Continuation,
    /// Nothing recognized; the line is inert.
    NoMatch,
}

/// The single-line patterns, without the continuation rule that precedes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// See [`LineClass::ModuleHeader`].
    ModuleHeader,
    /// See [`LineClass::WireDecl`].
    WireDecl,
    /// See [`LineClass::InstanceLine`].
    InstanceLine,
    /// See [`LineClass::InstanceStart`].
    InstanceStart,
}

/// Order in which patterns are tried when not buffering.
pub const PRIORITY: [LineKind; 4] = [
    LineKind::ModuleHeader,
    LineKind::WireDecl,
    LineKind::InstanceLine,
    LineKind::InstanceStart,
];

impl LineKind {
    fn pattern(self) -> &'static Regex {
        match self {
            LineKind::ModuleHeader => &MODULE_HEADER,
            LineKind::WireDecl => &WIRE_DECL,
            LineKind::InstanceLine => &INSTANCE_LINE,
            LineKind::InstanceStart => &INSTANCE_START,
        }
    }

    /// Tries this pattern against `line`, returning the classification on a match.
    pub fn try_match(self, line: &str) -> Option<LineClass> {
        let caps = self.pattern().captures(line)?;
        Some(match self {
            LineKind::ModuleHeader => LineClass::ModuleHeader {
                name: caps[1].to_string(),
                ports: split_ports(&caps[2]),
            },
            LineKind::WireDecl => LineClass::WireDecl {
                net: caps[1].to_string(),
            },
            LineKind::InstanceLine => LineClass::InstanceLine(instance_from(&caps, line)),
            LineKind::InstanceStart => LineClass::InstanceStart,
        })
    }
}

/// Classifies one comment-stripped line.
///
/// `buffering` is the state of the caller's instantiation buffer; when it is
/// set the line is always a continuation.
pub fn classify(line: &str, buffering: bool) -> LineClass {
    if buffering {
        return LineClass::Continuation;
    }
    PRIORITY
        .iter()
        .find_map(|kind| kind.try_match(line))
        .unwrap_or(LineClass::NoMatch)
}

/// Matches an accumulated multi-line buffer against the full instance grammar.
pub fn match_instance(text: &str) -> Option<Instance> {
    INSTANCE_FULL
        .captures(text)
        .map(|caps| instance_from(&caps, text))
}

/// Returns every `.pin(net)` fragment in `text`, left to right.
pub fn pin_connections(text: &str) -> Vec<PinConnection> {
    PIN_CONNECTION
        .captures_iter(text)
        .map(|caps| PinConnection {
            pin: caps[1].to_string(),
            net: caps[2].to_string(),
        })
        .collect()
}

/// Splits a module port list on commas, removing all whitespace and empty tokens.
pub fn split_ports(list: &str) -> Vec<String> {
    list.split(',')
        .map(|token| token.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|token| !token.is_empty())
        .collect()
}

fn instance_from(caps: &Captures<'_>, text: &str) -> Instance {
    Instance {
        module: caps[1].to_string(),
        name: caps[2].to_string(),
        pins: pin_connections(text),
    }
}
