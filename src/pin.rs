use std::fmt;

/// Logic level of a node or pin.
///
/// Levels are two-valued: every node carries a well-defined `Low` or
/// `High` at every step, so there is no tri-state variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::High => "High",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Level::Low => '0',
            Level::High => '1',
        }
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Level::High
        } else {
            Level::Low
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Level::High)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Side of the chip body a pin is placed on. Layout data only; the
/// evaluator never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    West,
    East,
    North,
    South,
}

/// One pin of a chip element.
///
/// A pin belongs exclusively to its element. `pos` is the row offset
/// along `side` in grid units. The `bubble` marker flags an active-low
/// input for display; it does not invert anything during evaluation.
#[derive(Debug, Clone)]
pub struct Pin {
    pub label: String,
    pub side: Side,
    pub pos: usize,
    pub output: bool,
    pub bubble: bool,
    pub clock: bool,
}

impl Pin {
    pub fn new(pos: usize, side: Side, label: &str) -> Self {
        Pin {
            label: label.to_string(),
            side,
            pos,
            output: false,
            bubble: false,
            clock: false,
        }
    }

    /// Mark this pin as an element-driven output.
    pub fn output(mut self) -> Self {
        self.output = true;
        self
    }

    /// Mark this pin with an active-low display bubble.
    pub fn bubble(mut self) -> Self {
        self.bubble = true;
        self
    }

    /// Mark this pin as the clock input.
    pub fn clock(mut self) -> Self {
        self.clock = true;
        self
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.output { "out" } else { "in" };
        write!(f, "{} ({})", self.label, kind)
    }
}
