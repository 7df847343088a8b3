//! Shared test bench for driving a single counter element through
//! discrete simulation steps, the way the host circuit would.

#![allow(dead_code)]

use rusty_circuit::{ChipElement, NodeAccess, NodeBank, SyncCounter};

pub struct CounterBench {
    pub counter: SyncCounter,
    pub nodes: NodeBank,
}

impl CounterBench {
    /// Bench with EnP/EnT high, CLR/LOAD deasserted, clock low, and
    /// one settling step already taken so the enable latch is primed.
    pub fn new(bits: usize, modulus: u64) -> Self {
        let mut counter = SyncCounter::new(bits);
        counter.set_modulus(modulus);
        let nodes = NodeBank::with_len(counter.post_count());
        let mut bench = CounterBench { counter, nodes };

        let controls = [
            bench.pin_clr(),
            bench.pin_enp(),
            bench.pin_load(),
            bench.pin_ent(),
        ];
        for pin in controls {
            bench.nodes.write(pin, true);
        }
        bench.settle();
        bench
    }

    fn bits(&self) -> usize {
        self.counter.base().bits
    }

    pub fn pin_q(&self, bit: usize) -> usize {
        bit
    }

    pub fn pin_i(&self, bit: usize) -> usize {
        self.bits() + bit
    }

    pub fn pin_clk(&self) -> usize {
        2 * self.bits()
    }

    pub fn pin_clr(&self) -> usize {
        2 * self.bits() + 1
    }

    pub fn pin_enp(&self) -> usize {
        2 * self.bits() + 2
    }

    pub fn pin_rco(&self) -> usize {
        2 * self.bits() + 3
    }

    pub fn pin_load(&self) -> usize {
        2 * self.bits() + 4
    }

    pub fn pin_ent(&self) -> usize {
        2 * self.bits() + 5
    }

    pub fn set(&mut self, pin: usize, level: bool) {
        self.nodes.write(pin, level);
    }

    /// One simulation step with the inputs as currently driven.
    pub fn settle(&mut self) {
        self.counter.step(&mut self.nodes);
    }

    /// Full clock pulse: rising-edge step, then falling step.
    pub fn clock_edge(&mut self) {
        self.set(self.pin_clk(), true);
        self.settle();
        self.set(self.pin_clk(), false);
        self.settle();
    }

    /// Register value reconstructed from the Q output nodes.
    pub fn value(&self) -> u64 {
        let mut value = 0u64;
        for bit in 0..self.bits() {
            if self.nodes.read(self.pin_q(bit)) {
                value |= 1 << bit;
            }
        }
        value
    }

    /// Force the Q nodes to a value, as external stimulus.
    pub fn force_value(&mut self, value: u64) {
        for bit in 0..self.bits() {
            self.nodes.write(self.pin_q(bit), value & (1 << bit) != 0);
        }
    }

    /// Drive the parallel-load input pins to a value.
    pub fn set_inputs(&mut self, value: u64) {
        for bit in 0..self.bits() {
            self.nodes.write(self.pin_i(bit), value & (1 << bit) != 0);
        }
    }

    pub fn rco(&self) -> bool {
        self.nodes.read(self.pin_rco())
    }
}
