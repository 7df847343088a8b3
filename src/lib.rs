//! # Rusty Circuit Library
//!
//! An interactive digital circuit simulator written in Rust.
//!
//! This library provides:
//! - Step-driven simulation of chip elements over a shared node graph
//! - A synchronous up-counter chip with configurable width and modulus,
//!   parallel load, asynchronous clear and cascaded enable/carry
//! - JSON-configurable circuit definition for flexible wiring
//! - Textual dump/restore of element parameters
//! - Extensible element system with trait-based architecture

pub mod circuit;
pub mod circuit_config;
pub mod element;
pub mod elements;
pub mod error;
pub mod node;
pub mod pin;

// Re-export commonly used items for easier importing
pub use circuit::Circuit;
pub use circuit_config::{CircuitConfig, ElementFactory};
pub use element::{ChipBase, ChipElement, EditInfo, NoTranslation, Translate};
pub use elements::counter::SyncCounter;
pub use error::CircuitError;
pub use node::{MappedNodes, NodeAccess, NodeBank};
pub use pin::{Level, Pin, Side};
