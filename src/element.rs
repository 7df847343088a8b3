//! Chip element capability layer.
//!
//! Every chip in the simulator is built the same way: a concrete
//! element struct composed around a [`ChipBase`] that owns the pin
//! array and the generic persisted fields, plus a [`ChipElement`]
//! implementation supplying the per-step transition function. The
//! host circuit only ever talks to the trait.

use std::str::SplitAsciiWhitespace;

use crate::error::CircuitError;
use crate::node::NodeAccess;
use crate::pin::Pin;

/// Translation lookup for human-readable element names.
///
/// The simulator shell owns the actual string tables; elements only
/// compose looked-up fragments.
pub trait Translate {
    fn ls(&self, text: &str) -> String;
}

/// Identity translation, used when no language table is loaded.
pub struct NoTranslation;

impl Translate for NoTranslation {
    fn ls(&self, text: &str) -> String {
        text.to_string()
    }
}

/// One editable element parameter, as shown by the parameter editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditInfo {
    pub name: String,
    pub value: i64,
    pub min_val: i64,
    pub dimensionless: bool,
}

impl EditInfo {
    pub fn new(name: &str, value: i64, min_val: i64) -> Self {
        EditInfo {
            name: name.to_string(),
            value,
            min_val,
            dimensionless: false,
        }
    }

    /// Integer-only parameter with no physical unit.
    pub fn dimensionless(mut self) -> Self {
        self.dimensionless = true;
        self
    }
}

/// Generic state shared by every chip element: the pin array, the
/// register width, the persisted placement fields, and the clock level
/// latched for edge detection.
#[derive(Debug, Clone)]
pub struct ChipBase {
    pub bits: usize,
    pub pins: Vec<Pin>,
    pub x: i32,
    pub y: i32,
    pub flags: u32,
    pub size_x: usize,
    pub size_y: usize,
    pub last_clock: bool,
}

impl ChipBase {
    pub fn new(bits: usize) -> Self {
        ChipBase {
            bits,
            pins: Vec::new(),
            x: 0,
            y: 0,
            flags: 0,
            size_x: 0,
            size_y: 0,
            last_clock: false,
        }
    }

    /// Drive an output pin. Input pins are owned by whoever feeds
    /// them, so writing one is a wiring bug in the element.
    pub fn write_output(&self, nodes: &mut dyn NodeAccess, pin: usize, level: bool) {
        debug_assert!(self.pins[pin].output, "write to non-output pin {}", pin);
        nodes.write(pin, level);
    }

    /// Generic persisted fields, in dump order.
    pub fn dump(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.flags, self.bits)
    }

    /// Restore the generic fields from a dump token stream. The
    /// element re-runs `setup_pins` afterwards, so only the scalar
    /// fields are read here.
    pub fn restore(&mut self, tokens: &mut SplitAsciiWhitespace) -> Result<(), CircuitError> {
        self.x = next_int(tokens, "x")?;
        self.y = next_int(tokens, "y")?;
        self.flags = next_int(tokens, "flags")?;
        let bits: usize = next_int(tokens, "bits")?;
        if bits < 1 {
            return Err(CircuitError::BadDump("bits must be >= 1".to_string()));
        }
        self.bits = bits;
        Ok(())
    }
}

fn next_int<T: std::str::FromStr>(
    tokens: &mut SplitAsciiWhitespace,
    field: &str,
) -> Result<T, CircuitError> {
    tokens
        .next()
        .ok_or_else(|| CircuitError::BadDump(format!("missing `{}` field", field)))?
        .parse()
        .map_err(|_| CircuitError::BadDump(format!("bad `{}` field", field)))
}

/// Capability interface every chip element implements.
///
/// `step` is the per-tick transition function: the host calls it once
/// per simulation step with a node view scoped to the element's pins.
/// The return value reports whether the element needs another
/// convergence iteration within the same step; purely digital chips
/// always return `false`.
pub trait ChipElement {
    fn base(&self) -> &ChipBase;
    fn base_mut(&mut self) -> &mut ChipBase;

    /// Rebuild the pin array from the current configuration. Called at
    /// construction and again whenever a parameter edit changes the
    /// pin count; the host rebinds nodes afterwards.
    fn setup_pins(&mut self);

    fn step(&mut self, nodes: &mut dyn NodeAccess) -> bool;

    fn chip_name(&self, loc: &dyn Translate) -> String;

    fn post_count(&self) -> usize {
        self.base().pins.len()
    }

    /// Voltage sources the host solver reserves for this element: one
    /// per driven output pin.
    fn voltage_source_count(&self) -> usize {
        self.base().pins.iter().filter(|p| p.output).count()
    }

    /// Persisted record for this element: the generic base fields plus
    /// any element-specific trailing tokens.
    fn dump(&self) -> String {
        self.base().dump()
    }

    fn edit_info(&self, _n: usize) -> Option<EditInfo> {
        None
    }

    fn set_edit_value(&mut self, _n: usize, _value: i64) {}
}
