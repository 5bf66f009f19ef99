// File: crates/chart-core/src/readers.rs
// Summary: Readers that normalize data from companion activities into (label, value) pairs.
// Notes:
// - A reader either parses completely or fails; malformed data rows are skipped, but an
//   unreadable header or overall shape aborts the import with `UnsupportedFormat`.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GraphError, GraphResult};

/// Axis captions suggested by a reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisNames {
    pub vertical: String,
    pub horizontal: String,
}

impl AxisNames {
    fn new(vertical: &str, horizontal: &str) -> Self {
        Self { vertical: vertical.to_string(), horizontal: horizontal.to_string() }
    }
}

pub trait FormatReader {
    /// Ordered `(label, value)` pairs.
    fn chart_data(&self) -> &[(String, f64)];
    fn labels_name(&self) -> AxisNames;
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Reads a stopwatch journal.
///
/// The journal is a JSON array: element 1 holds the stopwatch names, element 2 one state per
/// stopwatch whose first element is an array starting with the elapsed seconds, and the last
/// element the recorded marks (lap times) per stopwatch.
#[derive(Clone, Debug)]
pub struct StopWatchReader {
    data: Vec<(String, f64)>,
    horizontal: &'static str,
}

impl StopWatchReader {
    pub fn from_reader<R: Read>(rdr: R) -> GraphResult<Self> {
        let root: Value = serde_json::from_reader(rdr)
            .map_err(|e| GraphError::UnsupportedFormat(format!("stopwatch journal: {e}")))?;
        let parts = root
            .as_array()
            .filter(|a| a.len() >= 4)
            .ok_or_else(|| GraphError::UnsupportedFormat("stopwatch journal is not a 4+ element array".into()))?;

        let names = parts[1]
            .as_array()
            .ok_or_else(|| GraphError::UnsupportedFormat("stopwatch names missing".into()))?
            .iter()
            .map(|n| match n {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>();
        let states = parts[2]
            .as_array()
            .ok_or_else(|| GraphError::UnsupportedFormat("stopwatch states missing".into()))?;
        let marks = parts[parts.len() - 1]
            .as_array()
            .ok_or_else(|| GraphError::UnsupportedFormat("stopwatch marks missing".into()))?
            .iter()
            .map(|m| {
                m.as_array()
                    .map(|xs| xs.iter().filter_map(Value::as_f64).filter(|v| v.is_finite()).collect::<Vec<_>>())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();

        let with_marks = marks.iter().enumerate().filter(|(_, m)| !m.is_empty()).collect::<Vec<_>>();
        if let [(_, only)] = with_marks.as_slice() {
            let mut sorted = (*only).clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let data = sorted
                .into_iter()
                .enumerate()
                .map(|(i, m)| ((i + 1).to_string(), round2(m)))
                .collect();
            return Ok(Self { data, horizontal: "Mark" });
        }

        let mut data = Vec::with_capacity(names.len());
        for (i, state) in states.iter().enumerate() {
            let first = state.get(0).and_then(|s| s.get(0)).and_then(Value::as_f64);
            match (names.get(i), first) {
                (Some(name), Some(t)) if t.is_finite() => data.push((name.clone(), round2(t))),
                _ => debug!(index = i, "skipping stopwatch without a recorded time"),
            }
        }
        Ok(Self { data, horizontal: "StopWatch" })
    }

    pub fn from_path(path: impl AsRef<Path>) -> GraphResult<Self> {
        Self::from_reader(File::open(path)?)
    }
}

impl FormatReader for StopWatchReader {
    fn chart_data(&self) -> &[(String, f64)] { &self.data }
    fn labels_name(&self) -> AxisNames { AxisNames::new("Time", self.horizontal) }
}

/// Rows before the first sample in a measure log.
pub const MEASURE_HEADER_ROWS: usize = 6;

/// Reads a sensor log: a fixed header, then rows whose first cell is `label: value` or
/// `label.channel: value`.
#[derive(Clone, Debug)]
pub struct MeasureReader {
    data: Vec<(String, f64)>,
}

impl MeasureReader {
    /// `channel` is 1-based; rows carrying a channel suffix are kept only for that channel.
    ///
    /// The header is counted in physical lines, blank ones included.
    pub fn from_reader<R: Read>(rdr: R, channel: usize) -> GraphResult<Self> {
        if channel == 0 {
            return Err(GraphError::InvalidValue("measure channel 0 (channels start at 1)".into()));
        }
        let token = (channel - 1).to_string();

        let mut rdr = BufReader::new(rdr);
        let mut line = Vec::new();
        for n in 0..MEASURE_HEADER_ROWS {
            line.clear();
            if rdr.read_until(b'\n', &mut line)? == 0 {
                return Err(GraphError::UnsupportedFormat(format!(
                    "measure log has {n} lines, expected a {MEASURE_HEADER_ROWS}-line header"
                )));
            }
        }

        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(rdr);

        let mut data = Vec::new();
        for (i, record) in csv.records().enumerate() {
            let row = MEASURE_HEADER_ROWS + i + 1;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!(row, error = %e, "skipping unreadable measure row");
                    continue;
                }
            };
            match parse_measure_cell(record.get(0).unwrap_or_default(), &token) {
                Some(Some(pair)) => data.push(pair),
                Some(None) => {}
                None => debug!(row, "skipping malformed measure row"),
            }
        }
        Ok(Self { data })
    }

    pub fn from_path(path: impl AsRef<Path>, channel: usize) -> GraphResult<Self> {
        Self::from_reader(File::open(path)?, channel)
    }
}

// None: malformed. Some(None): other channel. Some(Some(..)): sample.
fn parse_measure_cell(cell: &str, token: &str) -> Option<Option<(String, f64)>> {
    let (label, value) = cell.split_once(": ")?;
    let value = value.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let label = label.trim();
    match label.rsplit_once('.') {
        Some((name, chan)) if !chan.is_empty() && chan.chars().all(|c| c.is_ascii_digit()) => {
            Some((chan == token).then(|| (name.to_string(), value)))
        }
        _ => Some(Some((label.to_string(), value))),
    }
}

impl FormatReader for MeasureReader {
    fn chart_data(&self) -> &[(String, f64)] { &self.data }
    fn labels_name(&self) -> AxisNames { AxisNames::new("Values", "Samples") }
}
