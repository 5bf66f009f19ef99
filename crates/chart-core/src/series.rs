// File: crates/chart-core/src/series.rs
// Summary: Ordered (label, value) data series; the single source of truth for chart content.
// Notes:
// - Order is meaningful: it is the X position for bars/lines and the slice order for pies.
// - Every insert selects the new entry, so default-position inserts append in sequence.

use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::observer::{Observers, SubscriptionId};

/// One labeled value.
///
/// `decimals` remembers how many fractional digits the user typed so "3.10" redisplays as
/// "3.10"; it does not take part in equality.
#[derive(Clone, Debug)]
pub struct Entry {
    pub label: String,
    pub value: f64,
    decimals: Option<usize>,
}

impl Entry {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self { label: label.into(), value, decimals: None }
    }

    fn typed(label: impl Into<String>, value: f64, decimals: Option<usize>) -> Self {
        Self { label: label.into(), value, decimals }
    }

    pub fn decimals(&self) -> Option<usize> { self.decimals }

    /// Value as shown in the data table.
    pub fn display_value(&self) -> String {
        match self.decimals {
            Some(d) => format!("{:.*}", d, self.value),
            None => format!("{}", self.value),
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.value == other.value
    }
}

/// Count of fractional digits in user-typed numeric text (`.` or `,` separator).
pub fn decimals(text: &str) -> Option<usize> {
    let t = text.trim();
    let (_, frac) = t.split_once(['.', ','])?;
    if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(frac.len())
}

/// Parse user-typed numeric text. Accepts `,` as decimal separator; rejects NaN/infinity.
pub fn parse_value(text: &str) -> GraphResult<(f64, Option<usize>)> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok((v, decimals(&normalized))),
        _ => Err(GraphError::InvalidValue(text.to_string())),
    }
}

/// Whether [`DataSeries::add`] silently ignores an exact (label, value) repeat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Allow,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SeriesEvent {
    EntryAdded { position: usize },
    EntryRemoved { position: usize, entry: Entry },
    EntryChanged { position: usize },
    EntryMoved { from: usize, to: usize },
    Cleared,
}

#[derive(Clone, Debug, Default)]
pub struct DataSeries {
    entries: Vec<Entry>,
    selection: Option<usize>,
    duplicates: DuplicatePolicy,
    observers: Observers<SeriesEvent>,
}

impl PartialEq for DataSeries {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl DataSeries {
    pub fn new() -> Self { Self::default() }

    pub fn with_policy(duplicates: DuplicatePolicy) -> Self {
        Self { duplicates, ..Self::default() }
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy { self.duplicates }
    pub fn set_duplicate_policy(&mut self, policy: DuplicatePolicy) { self.duplicates = policy; }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn entries(&self) -> &[Entry] { &self.entries }
    pub fn get(&self, position: usize) -> Option<&Entry> { self.entries.get(position) }
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> { self.entries.iter() }

    pub fn selection(&self) -> Option<usize> { self.selection }

    pub fn select(&mut self, position: Option<usize>) -> GraphResult<()> {
        if let Some(p) = position {
            self.check(p)?;
        }
        self.selection = position;
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SeriesEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Position used when none is given: right after the selection, else the start.
    pub fn default_position(&self) -> usize {
        self.selection.map(|s| s + 1).unwrap_or(0)
    }

    /// Insert parsed user text at `position` (or the default position). Duplicates allowed.
    pub fn insert(&mut self, label: impl Into<String>, value: &str, position: Option<usize>) -> GraphResult<usize> {
        let (v, decimals) = parse_value(value)?;
        self.insert_entry(Entry::typed(label, v, decimals), position)
    }

    /// Insert an already numeric value, as readers and persisted documents provide.
    pub fn insert_value(&mut self, label: impl Into<String>, value: f64, position: Option<usize>) -> GraphResult<usize> {
        if !value.is_finite() {
            return Err(GraphError::InvalidValue(value.to_string()));
        }
        self.insert_entry(Entry::new(label, value), position)
    }

    /// The "add" affordance: like [`DataSeries::insert`] at the default position, but
    /// returns `Ok(None)` without change when the policy rejects an exact repeat.
    pub fn add(&mut self, label: impl Into<String>, value: &str) -> GraphResult<Option<usize>> {
        self.add_at(label, value, None)
    }

    /// [`DataSeries::add`] at an explicit position, as replayed from a peer.
    pub fn add_at(&mut self, label: impl Into<String>, value: &str, position: Option<usize>) -> GraphResult<Option<usize>> {
        let label = label.into();
        let (v, decimals) = parse_value(value)?;
        if self.duplicates == DuplicatePolicy::Reject
            && self.entries.iter().any(|e| e.label == label && e.value == v)
        {
            debug!(%label, value = v, "duplicate entry ignored");
            return Ok(None);
        }
        self.insert_entry(Entry::typed(label, v, decimals), position).map(Some)
    }

    fn insert_entry(&mut self, entry: Entry, position: Option<usize>) -> GraphResult<usize> {
        let position = position.unwrap_or_else(|| self.default_position());
        if position > self.entries.len() {
            return Err(GraphError::IndexOutOfRange { position, len: self.entries.len() });
        }
        debug!(position, label = %entry.label, value = entry.value, "entry added");
        self.entries.insert(position, entry);
        self.selection = Some(position);
        self.observers.emit(&SeriesEvent::EntryAdded { position });
        Ok(position)
    }

    pub fn remove(&mut self, position: usize) -> GraphResult<Entry> {
        self.check(position)?;
        let entry = self.entries.remove(position);
        self.selection = match self.selection {
            Some(s) if s == position => None,
            Some(s) if s > position => Some(s - 1),
            other => other,
        };
        debug!(position, label = %entry.label, "entry removed");
        self.observers.emit(&SeriesEvent::EntryRemoved { position, entry: entry.clone() });
        Ok(entry)
    }

    pub fn set_label(&mut self, position: usize, label: impl Into<String>) -> GraphResult<()> {
        self.check(position)?;
        self.entries[position].label = label.into();
        self.observers.emit(&SeriesEvent::EntryChanged { position });
        Ok(())
    }

    /// Replace the value from user text; the series is unchanged on `InvalidValue`.
    pub fn set_value(&mut self, position: usize, value: &str) -> GraphResult<()> {
        self.check(position)?;
        let (v, decimals) = parse_value(value)?;
        let entry = &mut self.entries[position];
        entry.value = v;
        entry.decimals = decimals;
        self.observers.emit(&SeriesEvent::EntryChanged { position });
        Ok(())
    }

    /// Swap with the previous entry. `None` at the first position or out of range.
    pub fn move_up(&mut self, position: usize) -> Option<(usize, usize)> {
        if position == 0 || position >= self.entries.len() {
            return None;
        }
        Some(self.swap(position, position - 1))
    }

    /// Swap with the next entry. `None` at the last position or out of range.
    pub fn move_down(&mut self, position: usize) -> Option<(usize, usize)> {
        if position.checked_add(1).map_or(true, |next| next >= self.entries.len()) {
            return None;
        }
        Some(self.swap(position, position + 1))
    }

    fn swap(&mut self, from: usize, to: usize) -> (usize, usize) {
        self.entries.swap(from, to);
        self.selection = match self.selection {
            Some(s) if s == from => Some(to),
            Some(s) if s == to => Some(from),
            other => other,
        };
        self.observers.emit(&SeriesEvent::EntryMoved { from, to });
        (from, to)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.selection = None;
        self.observers.emit(&SeriesEvent::Cleared);
    }

    /// `(label, value)` pairs in order.
    pub fn pairs(&self) -> Vec<(String, f64)> {
        self.entries.iter().map(|e| (e.label.clone(), e.value)).collect()
    }

    fn check(&self, position: usize) -> GraphResult<()> {
        if position < self.entries.len() {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange { position, len: self.entries.len() })
        }
    }
}
