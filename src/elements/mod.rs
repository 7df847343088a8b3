//! Chip element implementations.

pub mod counter;
