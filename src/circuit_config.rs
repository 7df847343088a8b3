//! # JSON Circuit Configuration
//!
//! A JSON-based system for describing and building circuits.
//!
//! ## Key Features
//!
//! - **JSON circuit definition**: elements and wiring stored in one
//!   JSON document
//! - **Element factory**: dynamic creation of chip elements from
//!   configuration, with a registry open to new element types
//! - **Automatic wiring**: pin-level nets built from wire entries
//!
//! ## Configuration File Format
//!
//! ```json
//! {
//!   "name": "decade",
//!   "description": "4-bit decade counter",
//!   "elements": {
//!     "CTR": {
//!       "element_type": "sync_counter",
//!       "properties": {"bits": 4, "modulus": 10}
//!     }
//!   },
//!   "wires": [
//!     {"from": {"element": "CTR", "pin": 10},
//!      "to":   {"element": "CTR", "pin": 13}}
//!   ]
//! }
//! ```
//!
//! Pins are addressed by index using each element's published pin
//! layout (for the counter: `Q0..Qn-1, I0..In-1, CLK, CLR, EnP, RCO,
//! LOAD, EnT`).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::Circuit;
use crate::element::ChipElement;
use crate::elements::counter::SyncCounter;
use crate::error::CircuitError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub elements: HashMap<String, ElementConfig>,
    #[serde(default)]
    pub wires: Vec<WireConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementConfig {
    pub element_type: String,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireConfig {
    pub from: PinRef,
    pub to: PinRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinRef {
    pub element: String,
    pub pin: usize,
}

type ElementCtor = fn(&ElementConfig) -> Result<Box<dyn ChipElement>, CircuitError>;

/// Factory building circuits from configuration.
pub struct ElementFactory {
    registry: HashMap<String, ElementCtor>,
}

impl ElementFactory {
    pub fn new() -> Self {
        let mut factory = ElementFactory {
            registry: HashMap::new(),
        };
        factory.register_default_elements();
        factory
    }

    fn register_default_elements(&mut self) {
        self.registry
            .insert("sync_counter".to_string(), |config: &ElementConfig| {
                let bits = config
                    .properties
                    .get("bits")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(SyncCounter::DEFAULT_BITS as u64) as usize;
                let modulus = config
                    .properties
                    .get("modulus")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0);
                let mut counter = SyncCounter::new(bits);
                counter.set_modulus(modulus);
                Ok(Box::new(counter))
            });
    }

    /// Register an element type. Replaces any previous constructor
    /// under the same name.
    pub fn register(&mut self, element_type: &str, ctor: ElementCtor) {
        self.registry.insert(element_type.to_string(), ctor);
    }

    pub fn create(&self, config: &ElementConfig) -> Result<Box<dyn ChipElement>, CircuitError> {
        let ctor = self
            .registry
            .get(&config.element_type)
            .ok_or_else(|| CircuitError::UnknownElementType(config.element_type.clone()))?;
        ctor(config)
    }

    /// Build a wired circuit from a parsed configuration.
    ///
    /// Elements are added in name order so the evaluation order of the
    /// resulting circuit is deterministic for a given configuration.
    pub fn build(&self, config: &CircuitConfig) -> Result<Circuit, CircuitError> {
        let mut circuit = Circuit::new();

        let mut names: Vec<&String> = config.elements.keys().collect();
        names.sort();
        for name in names {
            let element = self.create(&config.elements[name])?;
            circuit.add_element(name, element)?;
        }

        for wire in &config.wires {
            let from = circuit
                .id_of(&wire.from.element)
                .ok_or_else(|| CircuitError::UnknownElement(wire.from.element.clone()))?;
            let to = circuit
                .id_of(&wire.to.element)
                .ok_or_else(|| CircuitError::UnknownElement(wire.to.element.clone()))?;
            circuit.join(from, wire.from.pin, to, wire.to.pin)?;
        }

        debug!(
            name = %config.name,
            elements = circuit.element_count(),
            wires = config.wires.len(),
            "circuit built"
        );
        Ok(circuit)
    }

    pub fn build_from_json(&self, json: &str) -> Result<Circuit, CircuitError> {
        let config: CircuitConfig = serde_json::from_str(json)?;
        self.build(&config)
    }

    pub fn build_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Circuit, CircuitError> {
        let json = std::fs::read_to_string(path)?;
        self.build_from_json(&json)
    }
}

impl Default for ElementFactory {
    fn default() -> Self {
        ElementFactory::new()
    }
}
