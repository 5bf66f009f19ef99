// File: crates/chart-core/src/sharing.rs
// Summary: Wire codec for collaborative edits (`"<token>|<json>"`) and inbound echo suppression.

use std::fmt;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::color::RgbColor;
use crate::edit::Edit;
use crate::error::{GraphError, GraphResult};
use crate::types::ChartKind;

/// Message tokens; the vocabulary is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Add,
    Remove,
    Value,
    Label,
    Type,
    XLabel,
    YLabel,
    ChartColor,
    LineColor,
}

impl Token {
    pub const ALL: [Token; 9] = [
        Token::Add,
        Token::Remove,
        Token::Value,
        Token::Label,
        Token::Type,
        Token::XLabel,
        Token::YLabel,
        Token::ChartColor,
        Token::LineColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Token::Add => "a",
            Token::Remove => "r",
            Token::Value => "v",
            Token::Label => "l",
            Token::Type => "t",
            Token::XLabel => "x",
            Token::YLabel => "y",
            Token::ChartColor => "cc",
            Token::LineColor => "lc",
        }
    }

    pub fn parse(s: &str) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn of(edit: &Edit) -> Token {
        match edit {
            Edit::Add { .. } => Token::Add,
            Edit::Remove { .. } => Token::Remove,
            Edit::ValueChanged { .. } => Token::Value,
            Edit::LabelChanged { .. } => Token::Label,
            Edit::TypeChanged(_) => Token::Type,
            Edit::XLabel(_) => Token::XLabel,
            Edit::YLabel(_) => Token::YLabel,
            Edit::ChartColor(_) => Token::ChartColor,
            Edit::LineColor(_) => Token::LineColor,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn encode(edit: &Edit) -> String {
    let payload = match edit {
        Edit::Add { label, value, position } => json!([label, value, position]),
        Edit::Remove { position } => json!([position]),
        Edit::ValueChanged { position, value } => json!([position, value]),
        Edit::LabelChanged { position, label } => json!([position, label]),
        Edit::TypeChanged(kind) => json!(kind.tag()),
        Edit::XLabel(s) | Edit::YLabel(s) => json!(s),
        Edit::ChartColor(c) | Edit::LineColor(c) => json!(c.to_hex()),
    };
    format!("{}|{}", Token::of(edit), payload)
}

/// Decode one message. Fails with `MalformedMessage` when the separator or the payload
/// shape is wrong and with `UnknownToken` for tokens outside the vocabulary.
pub fn decode(message: &str) -> GraphResult<Edit> {
    let (raw_token, payload) = message
        .split_once('|')
        .ok_or_else(|| GraphError::MalformedMessage(format!("no separator in {message:?}")))?;
    let token = Token::parse(raw_token).ok_or_else(|| GraphError::UnknownToken(raw_token.to_string()))?;
    let data: Value = serde_json::from_str(payload)
        .map_err(|e| GraphError::MalformedMessage(format!("{token} payload: {e}")))?;
    let bad = || GraphError::MalformedMessage(format!("{token} payload: {data}"));

    let edit = match token {
        Token::Add => {
            let label = data.get(0).and_then(text).ok_or_else(bad)?;
            let value = data.get(1).and_then(text).ok_or_else(bad)?;
            let position = match data.get(2) {
                None | Some(Value::Null) => None,
                Some(p) => Some(position(p).ok_or_else(bad)?),
            };
            Edit::Add { label, value, position }
        }
        Token::Remove => {
            let p = if data.is_array() { data.get(0) } else { Some(&data) };
            Edit::Remove { position: p.and_then(position).ok_or_else(bad)? }
        }
        Token::Value => Edit::ValueChanged {
            position: data.get(0).and_then(position).ok_or_else(bad)?,
            value: data.get(1).and_then(text).ok_or_else(bad)?,
        },
        Token::Label => Edit::LabelChanged {
            position: data.get(0).and_then(position).ok_or_else(bad)?,
            label: data.get(1).and_then(text).ok_or_else(bad)?,
        },
        Token::Type => {
            let kind = match &data {
                Value::String(s) => s.parse::<ChartKind>().ok(),
                Value::Number(n) => n.as_u64().and_then(|c| ChartKind::from_code(c).ok()),
                _ => None,
            };
            Edit::TypeChanged(kind.ok_or_else(bad)?)
        }
        Token::XLabel => Edit::XLabel(text(&data).ok_or_else(bad)?),
        Token::YLabel => Edit::YLabel(text(&data).ok_or_else(bad)?),
        Token::ChartColor => Edit::ChartColor(color(&data).ok_or_else(bad)?),
        Token::LineColor => Edit::LineColor(color(&data).ok_or_else(bad)?),
    };
    Ok(edit)
}

fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn position(v: &Value) -> Option<usize> {
    v.as_u64().and_then(|p| usize::try_from(p).ok())
}

fn color(v: &Value) -> Option<RgbColor> {
    v.as_str().and_then(|s| RgbColor::from_hex(s).ok())
}

/// Transport for outgoing messages (a shared message tube).
pub trait Tube {
    fn send_text(&mut self, text: &str);
}

/// In-memory tube collecting every sent message.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    pub sent: Vec<String>,
}

impl Tube for Outbox {
    fn send_text(&mut self, text: &str) {
        self.sent.push(text.to_string());
    }
}

/// Identity of this participant on the shared tube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharingSession {
    local_id: String,
}

impl SharingSession {
    pub fn new(local_id: impl Into<String>) -> Self {
        Self { local_id: local_id.into() }
    }

    pub fn local_id(&self) -> &str { &self.local_id }

    pub fn send(&self, tube: &mut dyn Tube, edit: &Edit) {
        let text = encode(edit);
        debug!(message = %text, "sending event");
        tube.send_text(&text);
    }

    /// Decode an inbound message. `Ok(None)` for our own broadcast and for empty messages.
    pub fn receive(&self, sender: &str, message: &str) -> GraphResult<Option<Edit>> {
        if sender == self.local_id {
            return Ok(None);
        }
        if message.is_empty() {
            return Ok(None);
        }
        match decode(message) {
            Ok(edit) => {
                info!(from = sender, event = edit.describe(), "event received");
                Ok(Some(edit))
            }
            Err(e) => {
                warn!(from = sender, error = %e, "dropping event message");
                Err(e)
            }
        }
    }
}
