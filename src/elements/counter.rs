use std::str::SplitAsciiWhitespace;

use tracing::trace;

use crate::element::{ChipBase, ChipElement, EditInfo, Translate};
use crate::error::CircuitError;
use crate::node::NodeAccess;
use crate::pin::{Pin, Side};

/// Synchronous up-counter chip with parallel load, asynchronous clear
/// and cascaded enable/carry, modeled on 74163-style parts.
///
/// Hardware architecture:
/// - `bits`-wide register exposed on the Q pins, counting up modulo a
///   configurable modulus (0 selects the full `2^bits` range)
/// - rising-edge clocked; EnP and EnT must both be high for a count,
///   sampled one step ahead of the edge they gate
/// - LOAD (active low) synchronously copies the I pins onto Q on a
///   clock edge, overriding a concurrent count
/// - CLR (active low) asynchronously forces Q and carry to zero,
///   overriding everything else the same step
/// - RCO follows `carry && EnT` every step, for cascading stages
///
/// The register has no private storage: its value lives on the Q
/// output nodes and is reconstructed from them on every counting edge.
pub struct SyncCounter {
    base: ChipBase,
    modulus: u64,
    carry: bool,
    enabled: bool,
}

impl SyncCounter {
    pub const DEFAULT_BITS: usize = 4;

    pub fn new(bits: usize) -> Self {
        let mut counter = SyncCounter {
            base: ChipBase::new(bits.max(1)),
            modulus: 0,
            carry: false,
            enabled: false,
        };
        counter.setup_pins();
        counter
    }

    /// Restore from a dump record. The generic fields are mandatory;
    /// the trailing modulus token is best-effort: missing or malformed,
    /// the full-range default of 0 is kept and no error is raised.
    pub fn restore(tokens: &mut SplitAsciiWhitespace) -> Result<Self, CircuitError> {
        let mut counter = SyncCounter::new(Self::DEFAULT_BITS);
        counter.base.restore(tokens)?;
        counter.modulus = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
        counter.setup_pins();
        Ok(counter)
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn set_modulus(&mut self, modulus: u64) {
        self.modulus = modulus;
    }

    /// Wrap-around bound for the register value.
    pub fn effective_modulus(&self) -> u64 {
        if self.modulus == 0 {
            1u64 << self.base.bits
        } else {
            self.modulus
        }
    }

    // Pin index layout, LSB first:
    // Q0..Qn-1, I0..In-1, CLK, CLR, EnP, RCO, LOAD, EnT.
    fn pin_q(&self, bit: usize) -> usize {
        bit
    }

    fn pin_i(&self, bit: usize) -> usize {
        self.base.bits + bit
    }

    fn pin_clk(&self) -> usize {
        2 * self.base.bits
    }

    fn pin_clr(&self) -> usize {
        2 * self.base.bits + 1
    }

    fn pin_enp(&self) -> usize {
        2 * self.base.bits + 2
    }

    fn pin_rco(&self) -> usize {
        2 * self.base.bits + 3
    }

    fn pin_load(&self) -> usize {
        2 * self.base.bits + 4
    }

    fn pin_ent(&self) -> usize {
        2 * self.base.bits + 5
    }

    /// Reconstruct the register value from the Q output nodes.
    fn read_value(&self, nodes: &dyn NodeAccess) -> u64 {
        let mut value = 0u64;
        for bit in 0..self.base.bits {
            if nodes.read(self.pin_q(bit)) {
                value |= 1 << bit;
            }
        }
        value
    }

    fn write_value(&self, nodes: &mut dyn NodeAccess, value: u64) {
        for bit in 0..self.base.bits {
            self.base
                .write_output(nodes, self.pin_q(bit), value & (1 << bit) != 0);
        }
    }
}

impl Default for SyncCounter {
    fn default() -> Self {
        SyncCounter::new(Self::DEFAULT_BITS)
    }
}

impl ChipElement for SyncCounter {
    fn base(&self) -> &ChipBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ChipBase {
        &mut self.base
    }

    fn chip_name(&self, loc: &dyn Translate) -> String {
        if self.modulus == 0 {
            return loc.ls("Counter");
        }
        format!("{}{}{})", loc.ls("Counter"), loc.ls(" (mod "), self.modulus)
    }

    fn setup_pins(&mut self) {
        let bits = self.base.bits;
        self.base.size_x = 2;
        self.base.size_y = bits + 3;

        let mut pins = Vec::with_capacity(2 * bits + 6);
        // Most significant bit on the top row, matching the printed
        // pinout of the real part.
        for bit in 0..bits {
            pins.push(Pin::new(bits - bit, Side::East, &format!("Q{}", bit)).output());
        }
        for bit in 0..bits {
            pins.push(Pin::new(bits - bit, Side::West, &format!("I{}", bit)));
        }
        pins.push(Pin::new(0, Side::West, "").clock());
        pins.push(Pin::new(bits + 1, Side::West, "CLR").bubble());
        pins.push(Pin::new(bits + 2, Side::West, "EnP"));
        pins.push(Pin::new(0, Side::East, "RCO").output());
        pins.push(Pin::new(bits + 1, Side::East, "LOAD").bubble());
        pins.push(Pin::new(bits + 2, Side::East, "EnT"));
        self.base.pins = pins;
    }

    fn step(&mut self, nodes: &mut dyn NodeAccess) -> bool {
        let clk = nodes.read(self.pin_clk());
        if clk && !self.base.last_clock {
            // Count with the enable latched on the previous step, so
            // enable changes gate the next edge, not this one.
            if self.enabled {
                let modulus = self.effective_modulus();
                let value = (self.read_value(nodes) + 1) % modulus;
                self.write_value(nodes, value);
                self.carry = value == modulus - 1;
                trace!(value, carry = self.carry, "counted");
            }

            // Synchronous load runs after the count so an asserted
            // LOAD wins over a concurrent count on the same edge.
            if !nodes.read(self.pin_load()) {
                for bit in 0..self.base.bits {
                    let level = nodes.read(self.pin_i(bit));
                    self.base.write_output(nodes, self.pin_q(bit), level);
                }
                trace!(value = self.read_value(nodes), "loaded");
            }
        }

        self.enabled = nodes.read(self.pin_enp()) && nodes.read(self.pin_ent());

        // Asynchronous clear, highest precedence: overrides whatever
        // the edge produced this same step.
        if !nodes.read(self.pin_clr()) {
            self.write_value(nodes, 0);
            self.carry = false;
        }

        self.base.last_clock = clk;

        let rco = self.carry && nodes.read(self.pin_ent());
        self.base.write_output(nodes, self.pin_rco(), rco);
        false
    }

    fn voltage_source_count(&self) -> usize {
        self.base.bits + 1
    }

    fn dump(&self) -> String {
        format!("{} {}", self.base.dump(), self.modulus)
    }

    fn edit_info(&self, n: usize) -> Option<EditInfo> {
        match n {
            0 => Some(EditInfo::new("# of Bits", self.base.bits as i64, 1).dimensionless()),
            1 => Some(EditInfo::new("Modulus", self.modulus as i64, 1).dimensionless()),
            _ => None,
        }
    }

    fn set_edit_value(&mut self, n: usize, value: i64) {
        if n == 0 && value >= 1 {
            self.base.bits = value as usize;
            self.setup_pins();
        }
        if n == 1 && value >= 1 {
            self.modulus = value as u64;
        }
    }
}
