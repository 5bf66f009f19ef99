// File: crates/chart-core/src/config.rs
// Summary: Renderer-agnostic chart configuration derived from a data series and style settings.
// Notes:
// - Bars and lines get one dataset of (index, value) pairs; the index drives axis order.
// - Pies get one dataset per entry, keyed by its label, each holding a single (0, value) pair.

use crate::axis::{AxisConfig, Tick};
use crate::color::RgbColor;
use crate::series::DataSeries;
use crate::style::{ChartStyle, FontOptions};
use crate::types::ChartKind;

/// Name of the single dataset used by bar and line charts.
pub const SERIES_NAME: &str = "Dots";

/// Whether per-element font settings from the style reach the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigMode {
    #[default]
    Basic,
    Full,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: RgbColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    pub chart_color: RgbColor,
    pub line_color: RgbColor,
}

/// Gradient scheme: one color per dataset, lightened from `initial` toward white.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScheme {
    pub initial: RgbColor,
}

impl ColorScheme {
    pub fn colors(&self, n: usize) -> Vec<RgbColor> {
        if n <= 1 {
            return vec![self.initial; n];
        }
        (0..n)
            .map(|i| self.initial.lighten(i as f64 / (n as f64 + 1.0)))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub hide_legend: bool,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub datasets: Vec<Dataset>,
    pub color_scheme: ColorScheme,
    pub stroke: Stroke,
    pub background: Background,
    pub axis_line_color: RgbColor,
    pub fonts: FontOptions,
}

impl ChartConfig {
    /// Derive the configuration for `kind` from the current data and style.
    pub fn build(series: &DataSeries, style: &ChartStyle, kind: ChartKind, mode: ConfigMode) -> Self {
        let (datasets, ticks) = match kind {
            ChartKind::Pie => {
                let sets = series
                    .iter()
                    .map(|e| Dataset { name: e.label.clone(), points: vec![(0.0, e.value)] })
                    .collect();
                (sets, Vec::new())
            }
            _ => {
                let points = series.iter().enumerate().map(|(i, e)| (i as f64, e.value)).collect();
                let ticks = series
                    .iter()
                    .enumerate()
                    .map(|(i, e)| Tick { v: i, label: e.label.clone() })
                    .collect();
                (vec![Dataset { name: SERIES_NAME.to_string(), points }], ticks)
            }
        };

        let fonts = match (mode, style.fonts()) {
            (ConfigMode::Full, Some(f)) => {
                let mut fonts = f.clone();
                if kind == ChartKind::Pie {
                    // No axes on a pie; slice labels use the tick styling.
                    fonts.label = fonts.tick.clone();
                }
                fonts
            }
            _ => FontOptions::default(),
        };

        Self {
            kind,
            title: style.title().to_string(),
            hide_legend: kind != ChartKind::Pie,
            x_axis: AxisConfig::new(style.x_label()).with_ticks(ticks),
            y_axis: AxisConfig::new(style.y_label()),
            datasets,
            color_scheme: ColorScheme { initial: style.chart_color() },
            stroke: Stroke { width: 3.0, color: style.line_color() },
            background: Background {
                chart_color: RgbColor::WHITE,
                line_color: RgbColor::new(0xcc, 0xcc, 0xcc),
            },
            axis_line_color: RgbColor::new(0xb3, 0xb3, 0xb3),
            fonts,
        }
    }

    /// Use `title` when the style left the chart title empty.
    pub fn with_fallback_title(mut self, title: &str) -> Self {
        if self.title.is_empty() {
            self.title = title.to_string();
        }
        self
    }

    /// Total number of data points across datasets.
    pub fn point_count(&self) -> usize {
        self.datasets.iter().map(|d| d.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool { self.point_count() == 0 }

    pub fn dataset_colors(&self) -> Vec<RgbColor> {
        self.color_scheme.colors(self.datasets.len())
    }

    /// Min/max over all values, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.datasets
            .iter()
            .flat_map(|d| d.points.iter().map(|p| p.1))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
