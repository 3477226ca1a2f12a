//! The extracted netlist graph and its read-only query surface.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::classify::{Instance, PinConnection};
use crate::scan::MatchSink;

/// Pin bindings keyed by cell instance name.
///
/// `pins_by_cell` is append-only and keeps duplicates; `net_by_pin` keeps the
/// last net written for each `(cell, pin)` pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinMap {
    pins_by_cell: HashMap<String, Vec<String>>,
    net_by_pin: HashMap<(String, String), String>,
}

impl PinMap {
    /// Records every connection of `cell`.
    pub fn bind_all(&mut self, cell: &str, pins: &[PinConnection]) {
        for conn in pins {
            self.bind(cell, &conn.pin, &conn.net);
        }
    }

    /// Records that `pin` of `cell` is connected to `net`.
    pub fn bind(&mut self, cell: &str, pin: &str, net: &str) {
        self.pins_by_cell
            .entry(cell.to_string())
            .or_default()
            .push(pin.to_string());
        self.net_by_pin
            .insert((cell.to_string(), pin.to_string()), net.to_string());
    }

    /// Number of distinct `(cell, pin)` bindings.
    pub fn len(&self) -> usize {
        self.net_by_pin.len()
    }

    /// Returns `true` if no pin has been bound.
    pub fn is_empty(&self) -> bool {
        self.net_by_pin.is_empty()
    }
}

/// A flat structural netlist: ports, nets, cells, and pin bindings.
///
/// Sequences are kept in the order the extraction engine appended them and are
/// never deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Netlist {
    pub(crate) ports: Vec<String>,
    pub(crate) nets: Vec<String>,
    pub(crate) cells: Vec<String>,
    pub(crate) pins: PinMap,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the module ports.
    pub fn ports(&self) -> Vec<String> {
        self.ports.clone()
    }

    /// Returns a copy of the cell instance names.
    pub fn cells(&self) -> Vec<String> {
        self.cells.clone()
    }

    /// Returns a copy of the declared nets.
    pub fn nets(&self) -> Vec<String> {
        self.nets.clone()
    }

    /// Borrows the module ports.
    pub fn port_slice(&self) -> &[String] {
        &self.ports
    }

    /// Borrows the cell instance names.
    pub fn cell_slice(&self) -> &[String] {
        &self.cells
    }

    /// Borrows the declared nets.
    pub fn net_slice(&self) -> &[String] {
        &self.nets
    }

    /// Returns every pin name bound for `cell`, or an empty list if the cell is unknown.
    pub fn pins(&self, cell: &str) -> Vec<String> {
        self.pins
            .pins_by_cell
            .get(cell)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the net bound to `pin` of `cell`, or an empty string if unbound.
    pub fn net_for_pin(&self, cell: &str, pin: &str) -> String {
        self.pins
            .net_by_pin
            .get(&(cell.to_string(), pin.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of distinct `(cell, pin)` bindings.
    pub fn binding_count(&self) -> usize {
        self.pins.len()
    }

    /// Bulk view of the cell to pin-list mapping, sorted by cell name.
    pub fn pins_by_cell(&self) -> BTreeMap<String, Vec<String>> {
        self.pins
            .pins_by_cell
            .iter()
            .map(|(cell, pins)| (cell.clone(), pins.clone()))
            .collect()
    }

    /// Bulk view of the `(cell, pin)` to net mapping, sorted by key.
    pub fn net_by_pin(&self) -> BTreeMap<(String, String), String> {
        self.pins
            .net_by_pin
            .iter()
            .map(|(key, net)| (key.clone(), net.clone()))
            .collect()
    }

    /// Returns a serializable copy of the whole netlist.
    pub fn snapshot(&self) -> NetlistSnapshot {
        NetlistSnapshot {
            ports: self.ports.clone(),
            nets: self.nets.clone(),
            cells: self.cells.clone(),
            pins: self.pins_by_cell(),
            bindings: self
                .net_by_pin()
                .into_iter()
                .map(|((cell, pin), net)| Binding { cell, pin, net })
                .collect(),
        }
    }
}

impl MatchSink for Netlist {
    fn port(&mut self, name: String) {
        self.ports.push(name);
    }

    fn net(&mut self, name: String) {
        self.nets.push(name);
    }

    fn instance(&mut self, instance: Instance) {
        self.pins.bind_all(&instance.name, &instance.pins);
        self.cells.push(instance.name);
    }
}

/// A single `(cell, pin) -> net` entry in a [`NetlistSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Binding {
    /// Cell instance name.
    pub cell: String,
    /// Pin name on the cell.
    pub pin: String,
    /// Connected net.
    pub net: String,
}

/// A serializable, order-stable copy of a [`Netlist`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetlistSnapshot {
    /// Module ports in append order.
    pub ports: Vec<String>,
    /// Nets in append order.
    pub nets: Vec<String>,
    /// Cell instance names in append order.
    pub cells: Vec<String>,
    /// Pins bound per cell, keyed by cell name.
    pub pins: BTreeMap<String, Vec<String>>,
    /// Every pin binding, sorted by `(cell, pin)`.
    pub bindings: Vec<Binding>,
}
