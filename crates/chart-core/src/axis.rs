// File: crates/chart-core/src/axis.rs
// Summary: Axis configuration with labels and category ticks.

/// A category tick at data index `v`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub v: usize,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisConfig {
    pub label: String,
    pub ticks: Vec<Tick>,
    /// Number of value ticks to draw when the axis carries values.
    pub tick_count: usize,
}

impl AxisConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ticks: Vec::new(), tick_count: 5 }
    }

    pub fn with_ticks(mut self, ticks: Vec<Tick>) -> Self {
        self.ticks = ticks;
        self
    }

    /// Tick label at data index `v`, if any.
    pub fn tick_label(&self, v: usize) -> Option<&str> {
        self.ticks.iter().find(|t| t.v == v).map(|t| t.label.as_str())
    }
}
