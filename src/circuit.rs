//! Step-driven host circuit.
//!
//! The circuit owns the shared [`NodeBank`] and every chip element in
//! the graph. Each element pin is bound to one node; wiring ties pins
//! together by pointing their bindings at a shared node. One call to
//! [`Circuit::step`] evaluates every element once, in insertion order,
//! and that order is part of the simulation contract: the same order
//! always produces the same result.

use std::collections::HashMap;

use tracing::debug;

use crate::element::ChipElement;
use crate::error::CircuitError;
use crate::node::{MappedNodes, NodeBank};
use crate::pin::Level;

struct Slot {
    name: String,
    element: Box<dyn ChipElement>,
    node_map: Vec<usize>,
    voltage_sources: usize,
}

#[derive(Default)]
pub struct Circuit {
    nodes: NodeBank,
    slots: Vec<Slot>,
    names: HashMap<String, usize>,
}

impl Circuit {
    pub fn new() -> Self {
        Circuit {
            nodes: NodeBank::new(),
            slots: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Add an element to the graph. Every pin gets a fresh node and
    /// the element's voltage sources are reserved. Returns the element
    /// id used by the other methods.
    pub fn add_element(
        &mut self,
        name: &str,
        element: Box<dyn ChipElement>,
    ) -> Result<usize, CircuitError> {
        if self.names.contains_key(name) {
            return Err(CircuitError::DuplicateElement(name.to_string()));
        }

        let node_map: Vec<usize> = (0..element.post_count())
            .map(|_| self.nodes.alloc())
            .collect();
        let voltage_sources = element.voltage_source_count();
        debug!(
            name,
            pins = node_map.len(),
            voltage_sources,
            "element added"
        );

        let id = self.slots.len();
        self.slots.push(Slot {
            name: name.to_string(),
            element,
            node_map,
            voltage_sources,
        });
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn element(&self, id: usize) -> &dyn ChipElement {
        self.slots[id].element.as_ref()
    }

    pub fn element_mut(&mut self, id: usize) -> &mut dyn ChipElement {
        self.slots[id].element.as_mut()
    }

    pub fn element_count(&self) -> usize {
        self.slots.len()
    }

    /// Total voltage sources reserved across the graph.
    pub fn voltage_source_count(&self) -> usize {
        self.slots.iter().map(|s| s.voltage_sources).sum()
    }

    /// Global node id a pin is bound to.
    pub fn node_of(&self, id: usize, pin: usize) -> Result<usize, CircuitError> {
        let slot = &self.slots[id];
        slot.node_map
            .get(pin)
            .copied()
            .ok_or_else(|| CircuitError::PinOutOfRange {
                element: slot.name.clone(),
                pin,
            })
    }

    /// Tie two pins to one shared node. Every binding that pointed at
    /// the second pin's old node is retargeted, so chains of joins
    /// form a single electrical net.
    pub fn join(
        &mut self,
        a_id: usize,
        a_pin: usize,
        b_id: usize,
        b_pin: usize,
    ) -> Result<(), CircuitError> {
        let keep = self.node_of(a_id, a_pin)?;
        let drop = self.node_of(b_id, b_pin)?;
        if keep == drop {
            return Ok(());
        }
        for slot in &mut self.slots {
            for node in &mut slot.node_map {
                if *node == drop {
                    *node = keep;
                }
            }
        }
        Ok(())
    }

    /// Host-side stimulus: drive the node bound to a pin.
    pub fn set_pin(&mut self, id: usize, pin: usize, level: bool) -> Result<(), CircuitError> {
        let node = self.node_of(id, pin)?;
        self.nodes.set_level(node, Level::from_bool(level));
        Ok(())
    }

    pub fn read_pin(&self, id: usize, pin: usize) -> Result<bool, CircuitError> {
        let node = self.node_of(id, pin)?;
        Ok(self.nodes.level(node).is_high())
    }

    /// Evaluate every element once, in insertion order. Writes are
    /// visible to elements evaluated later in the same pass. Returns
    /// true when no element asked for another convergence iteration.
    pub fn step(&mut self) -> bool {
        let mut settled = true;
        for slot in &mut self.slots {
            let mut view = MappedNodes::new(&mut self.nodes, &slot.node_map);
            if slot.element.step(&mut view) {
                settled = false;
            }
        }
        settled
    }

    /// Apply a parameter edit. If the edit changed the element's pin
    /// count, the pins are rebound to fresh nodes: old wiring to the
    /// element is discarded and the host must rewire.
    pub fn set_edit_value(&mut self, id: usize, n: usize, value: i64) {
        let before = self.slots[id].element.post_count();
        self.slots[id].element.set_edit_value(n, value);
        let after = self.slots[id].element.post_count();

        if after != before {
            let node_map: Vec<usize> = (0..after).map(|_| self.nodes.alloc()).collect();
            let slot = &mut self.slots[id];
            slot.node_map = node_map;
            slot.voltage_sources = slot.element.voltage_source_count();
            debug!(name = %slot.name, pins = after, "pins reallocated");
        }
    }
}
