// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (raster size, paddings, chart kinds).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GraphError;

/// Default surface width in pixels.
pub const WIDTH: i32 = 600;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 460;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(64, 24, 40, 56)
    }
}

/// The four chart kinds; exactly one is active per document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChartKind {
    #[default]
    VerticalBar,
    HorizontalBar,
    Line,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [ChartKind::VerticalBar, ChartKind::HorizontalBar, ChartKind::Line, ChartKind::Pie];

    /// Tag stored in documents and sharing messages.
    pub fn tag(self) -> &'static str {
        match self {
            ChartKind::VerticalBar => "vbar",
            ChartKind::HorizontalBar => "hbar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
        }
    }

    /// Numeric code used by later document versions (1..=4).
    pub fn code(self) -> u8 {
        match self {
            ChartKind::VerticalBar => 1,
            ChartKind::HorizontalBar => 2,
            ChartKind::Line => 3,
            ChartKind::Pie => 4,
        }
    }

    pub fn from_code(code: u64) -> Result<Self, GraphError> {
        match code {
            1 => Ok(ChartKind::VerticalBar),
            2 => Ok(ChartKind::HorizontalBar),
            3 => Ok(ChartKind::Line),
            4 => Ok(ChartKind::Pie),
            other => Err(GraphError::InvalidChartKind(other.to_string())),
        }
    }

    pub fn has_axes(self) -> bool { !matches!(self, ChartKind::Pie) }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChartKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "vbar" => Ok(ChartKind::VerticalBar),
            "hbar" => Ok(ChartKind::HorizontalBar),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            other => match other.parse::<u64>() {
                Ok(code) => ChartKind::from_code(code),
                Err(_) => Err(GraphError::InvalidChartKind(other.to_string())),
            },
        }
    }
}

impl Serialize for ChartKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Accepts either the string tag or the numeric code.
impl<'de> Deserialize<'de> for ChartKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Tag(String),
            Code(u64),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Tag(t) => t.parse().map_err(serde::de::Error::custom),
            Raw::Code(c) => ChartKind::from_code(c).map_err(serde::de::Error::custom),
        }
    }
}
