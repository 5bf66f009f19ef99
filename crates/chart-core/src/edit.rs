// File: crates/chart-core/src/edit.rs
// Summary: Closed set of document edits; the unit of local mutation and of collaborative replay.

use crate::color::RgbColor;
use crate::types::ChartKind;

#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    /// Add through the "add" affordance at a resolved position (duplicate guard applies).
    Add { label: String, value: String, position: Option<usize> },
    Remove { position: usize },
    ValueChanged { position: usize, value: String },
    LabelChanged { position: usize, label: String },
    TypeChanged(ChartKind),
    XLabel(String),
    YLabel(String),
    ChartColor(RgbColor),
    LineColor(RgbColor),
}

impl Edit {
    /// Short human description used in logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Edit::Add { .. } => "value added",
            Edit::Remove { .. } => "value removed",
            Edit::ValueChanged { .. } => "value changed",
            Edit::LabelChanged { .. } => "label changed",
            Edit::TypeChanged(_) => "chart type changed",
            Edit::XLabel(_) => "x label changed",
            Edit::YLabel(_) => "y label changed",
            Edit::ChartColor(_) => "chart color changed",
            Edit::LineColor(_) => "line color changed",
        }
    }
}
