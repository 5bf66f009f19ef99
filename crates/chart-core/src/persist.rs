// File: crates/chart-core/src/persist.rs
// Summary: Document persistence: the JSON format and the read/write-compatible legacy line format.
// Notes:
// - Loading replays `insert` for each stored pair in file order rather than bulk-assigning,
//   so selection state ends on the last entry exactly as if a user had typed them in.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::RgbColor;
use crate::document::ChartDocument;
use crate::error::{GraphError, GraphResult};
use crate::style::FontOptions;
use crate::types::ChartKind;

#[derive(Serialize, Deserialize)]
struct StoredDocument {
    #[serde(default)]
    title: String,
    #[serde(default)]
    x_label: String,
    #[serde(default)]
    y_label: String,
    chart_color: RgbColor,
    chart_line_color: RgbColor,
    #[serde(rename = "current_chart.type")]
    chart_type: ChartKind,
    #[serde(default)]
    chart_data: Vec<(String, StoredValue)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_options: Option<FontOptions>,
}

// Older documents store the typed text instead of a number.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Number(f64),
    Text(String),
}

pub fn to_json(doc: &ChartDocument) -> GraphResult<String> {
    let stored = StoredDocument {
        title: doc.style.title().to_string(),
        x_label: doc.style.x_label().to_string(),
        y_label: doc.style.y_label().to_string(),
        chart_color: doc.style.chart_color(),
        chart_line_color: doc.style.line_color(),
        chart_type: doc.kind(),
        chart_data: doc
            .series
            .iter()
            .map(|e| (e.label.clone(), StoredValue::Number(e.value)))
            .collect(),
        font_options: doc.style.fonts().cloned(),
    };
    Ok(serde_json::to_string(&stored)?)
}

/// Replace `doc`'s content with a JSON document. `doc` is untouched on error.
pub fn from_json_into(doc: &mut ChartDocument, text: &str) -> GraphResult<()> {
    let stored: StoredDocument = serde_json::from_str(text)?;
    for (_, value) in &stored.chart_data {
        if let StoredValue::Text(t) = value {
            crate::series::parse_value(t)?;
        }
    }

    doc.style.set_title(stored.title);
    doc.style.set_x_label(stored.x_label);
    doc.style.set_y_label(stored.y_label);
    doc.style.set_chart_color(stored.chart_color);
    doc.style.set_line_color(stored.chart_line_color);
    doc.style.set_kind(stored.chart_type);
    doc.style.set_fonts(stored.font_options);

    doc.series.clear();
    for (label, value) in stored.chart_data {
        match value {
            StoredValue::Number(v) => doc.series.insert_value(label, v, None)?,
            StoredValue::Text(t) => doc.series.insert(label, &t, None)?,
        };
    }
    debug!(entries = doc.series.len(), "document loaded");
    Ok(())
}

pub fn from_json(text: &str) -> GraphResult<ChartDocument> {
    let mut doc = ChartDocument::new();
    from_json_into(&mut doc, text)?;
    Ok(doc)
}

const LEGACY_LINES: usize = 7;

/// Encode in the legacy seven-line format. Fails for fields the format cannot represent:
/// labels containing `:` or `,`, and any field containing a newline.
pub fn to_legacy(doc: &ChartDocument) -> GraphResult<String> {
    let style = &doc.style;
    for field in [style.title(), style.x_label(), style.y_label()] {
        if field.contains('\n') {
            return Err(GraphError::AmbiguousLegacyLabel(field.to_string()));
        }
    }
    let mut pairs = Vec::with_capacity(doc.series.len());
    for e in doc.series.iter() {
        if e.label.contains([':', ',', '\n']) {
            return Err(GraphError::AmbiguousLegacyLabel(e.label.clone()));
        }
        pairs.push(format!("{}:{}", e.label, e.display_value()));
    }

    let lines = [
        style.title().to_string(),
        style.x_label().to_string(),
        style.y_label().to_string(),
        style.chart_color().to_hex(),
        style.line_color().to_hex(),
        pairs.join(","),
        doc.kind().tag().to_string(),
    ];
    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Replace `doc`'s content with a legacy-format document. `doc` is untouched on error.
pub fn from_legacy_into(doc: &mut ChartDocument, text: &str) -> GraphResult<()> {
    let lines = text.split_inclusive('\n').collect::<Vec<_>>();
    if lines.len() < LEGACY_LINES {
        return Err(GraphError::UnsupportedFormat(format!(
            "legacy document has {} lines, expected {LEGACY_LINES}",
            lines.len()
        )));
    }
    let field = |i: usize| {
        let line = lines[i].strip_suffix('\n').unwrap_or(lines[i]);
        line.strip_suffix('\r').unwrap_or(line)
    };

    let chart_color = RgbColor::from_hex(field(3))?;
    let line_color = RgbColor::from_hex(field(4))?;
    let mut pairs = Vec::new();
    if !field(5).is_empty() {
        for item in field(5).split(',') {
            let (label, value) = item
                .split_once(':')
                .ok_or_else(|| GraphError::UnsupportedFormat(format!("legacy data item {item:?}")))?;
            pairs.push((label, value));
        }
    }
    // The kind line is the last one; FromStr trims its terminator.
    let kind: ChartKind = lines[LEGACY_LINES - 1].parse()?;

    // Validate every value before touching the document.
    for (_, value) in &pairs {
        crate::series::parse_value(value)?;
    }

    doc.style.set_title(field(0));
    doc.style.set_x_label(field(1));
    doc.style.set_y_label(field(2));
    doc.style.set_chart_color(chart_color);
    doc.style.set_line_color(line_color);
    doc.style.set_kind(kind);
    doc.series.clear();
    for (label, value) in pairs {
        doc.series.insert(label, value, None)?;
    }
    Ok(())
}

pub fn from_legacy(text: &str) -> GraphResult<ChartDocument> {
    let mut doc = ChartDocument::new();
    from_legacy_into(&mut doc, text)?;
    Ok(doc)
}

/// Load either format, telling them apart by the leading `{` of JSON.
pub fn load_into(doc: &mut ChartDocument, text: &str) -> GraphResult<()> {
    if text.trim_start().starts_with('{') {
        from_json_into(doc, text)
    } else {
        from_legacy_into(doc, text)
    }
}

pub fn read_file(doc: &mut ChartDocument, path: impl AsRef<Path>) -> GraphResult<()> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    load_into(doc, &text)?;
    info!(path = %path.display(), entries = doc.series.len(), "read document");
    Ok(())
}

pub fn write_file(doc: &ChartDocument, path: impl AsRef<Path>) -> GraphResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json(doc)?)?;
    info!(path = %path.display(), "wrote document");
    Ok(())
}
