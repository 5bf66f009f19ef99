// File: crates/chart-core/src/document.rs
// Summary: ChartDocument aggregate (data series + style); applies edits and reader imports.

use tracing::{debug, info};

use crate::config::{ChartConfig, ConfigMode};
use crate::edit::Edit;
use crate::error::{GraphError, GraphResult};
use crate::readers::FormatReader;
use crate::series::DataSeries;
use crate::style::ChartStyle;
use crate::theme::UserColors;
use crate::types::ChartKind;

/// The unit of persistence: data, style and the active chart kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartDocument {
    /// Title of the surrounding document; the chart title falls back to it.
    pub document_title: String,
    pub series: DataSeries,
    pub style: ChartStyle,
}

impl ChartDocument {
    pub fn new() -> Self { Self::default() }

    pub fn with_user_colors(colors: UserColors) -> Self {
        Self { style: ChartStyle::with_user_colors(colors), ..Self::default() }
    }

    pub fn kind(&self) -> ChartKind { self.style.kind() }

    /// Configuration for the active kind.
    pub fn config(&self, mode: ConfigMode) -> ChartConfig {
        self.config_for(self.kind(), mode)
    }

    pub fn config_for(&self, kind: ChartKind, mode: ConfigMode) -> ChartConfig {
        ChartConfig::build(&self.series, &self.style, kind, mode).with_fallback_title(&self.document_title)
    }

    /// Apply one edit. Returns `false` when it was a no-op (a rejected duplicate add).
    pub fn apply(&mut self, edit: &Edit) -> GraphResult<bool> {
        debug!(edit = edit.describe(), "applying edit");
        match edit {
            Edit::Add { label, value, position } => {
                return Ok(self.series.add_at(label.clone(), value, *position)?.is_some());
            }
            Edit::Remove { position } => {
                self.series.remove(*position)?;
            }
            Edit::ValueChanged { position, value } => self.series.set_value(*position, value)?,
            Edit::LabelChanged { position, label } => self.series.set_label(*position, label.clone())?,
            Edit::TypeChanged(kind) => self.style.set_kind(*kind),
            Edit::XLabel(s) => self.style.set_x_label(s.clone()),
            Edit::YLabel(s) => self.style.set_y_label(s.clone()),
            Edit::ChartColor(c) => self.style.set_chart_color(*c),
            Edit::LineColor(c) => self.style.set_line_color(*c),
        }
        Ok(true)
    }

    /// Replace the series with a reader's data and take its axis names.
    pub fn import(&mut self, reader: &dyn FormatReader) -> GraphResult<usize> {
        let names = reader.labels_name();
        if let Some((label, value)) = reader.chart_data().iter().find(|(_, v)| !v.is_finite()) {
            return Err(GraphError::InvalidValue(format!("{label}: {value}")));
        }
        self.series.clear();
        for (label, value) in reader.chart_data() {
            self.series.insert_value(label.clone(), *value, None)?;
        }
        self.style.set_x_label(names.horizontal);
        self.style.set_y_label(names.vertical);
        info!(entries = self.series.len(), "imported chart data");
        Ok(self.series.len())
    }
}
