// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; data model, chart configuration, readers and codecs.

pub mod axis;
pub mod color;
pub mod config;
pub mod document;
pub mod edit;
pub mod error;
pub mod observer;
pub mod persist;
pub mod readers;
pub mod render;
pub mod series;
pub mod session;
pub mod sharing;
pub mod style;
pub mod theme;
pub mod types;

pub use axis::{AxisConfig, Tick};
pub use color::RgbColor;
pub use config::{ChartConfig, ConfigMode, Dataset};
pub use document::ChartDocument;
pub use edit::Edit;
pub use error::{GraphError, GraphResult};
pub use readers::{AxisNames, FormatReader, MeasureReader, StopWatchReader};
pub use render::{render_guarded, ChartRenderer, ChartView, RenderError, RenderOptions, RenderOutcome, RenderedChart};
pub use series::{DataSeries, DuplicatePolicy, Entry, SeriesEvent};
pub use session::{ActivityContext, ChartSession};
pub use sharing::{SharingSession, Tube};
pub use style::{ChartStyle, FontOptions, FontSpec, StyleEvent};
pub use theme::UserColors;
pub use types::{ChartKind, Insets};
