// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for document edits, imports, sharing messages and persistence.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    /// User input that does not parse as a finite number.
    #[error("invalid value: {0:?}")]
    InvalidValue(String),

    #[error("position {position} out of range (len {len})")]
    IndexOutOfRange { position: usize, len: usize },

    /// Import source whose header or overall shape is not understood.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("malformed message: {0}")]
    MalformedMessage(String),

    #[error("unknown event token: {0:?}")]
    UnknownToken(String),

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error("invalid chart kind: {0}")]
    InvalidChartKind(String),

    /// The legacy text format cannot represent this field without corrupting it.
    #[error("field cannot be stored in the legacy format: {0:?}")]
    AmbiguousLegacyLabel(String),

    #[error(transparent)]
    Render(#[from] crate::render::RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
