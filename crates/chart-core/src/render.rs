// File: crates/chart-core/src/render.rs
// Summary: Renderer contract, render options, and the chart view holding the last raster.
// Notes:
// - Empty data never reaches a renderer; the view shows no chart instead.
// - DivisionByZero/InvalidNumericState from a renderer are suppressed and the previous
//   raster stays on screen. Any other error propagates.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::color::RgbColor;
use crate::config::{ChartConfig, ConfigMode};
use crate::document::ChartDocument;
use crate::observer::{Observers, SubscriptionId};
use crate::types::{Insets, HEIGHT, WIDTH};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("division by zero while laying out the chart")]
    DivisionByZero,

    #[error("invalid numeric state: {0}")]
    InvalidNumericState(String),

    #[error("renderer failed: {0}")]
    Backend(String),

    #[error("nothing has been rendered yet")]
    NothingRendered,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Failures caused by degenerate data rather than by the renderer itself.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, RenderError::DivisionByZero | RenderError::InvalidNumericState(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub background: RgbColor,
    /// Text drawing can be switched off for pixel-stable snapshots.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            background: RgbColor::WHITE,
            draw_labels: true,
        }
    }
}

/// An encoded raster of one chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedChart {
    pub width: i32,
    pub height: i32,
    pub png: Vec<u8>,
}

impl RenderedChart {
    pub fn write_png(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, &self.png)
    }
}

pub trait ChartRenderer {
    fn render(&self, config: &ChartConfig, opts: &RenderOptions) -> Result<RenderedChart, RenderError>;
}

/// Render unless the config is empty; degenerate-data failures yield `Ok(None)`.
pub fn render_guarded<R: ChartRenderer + ?Sized>(
    renderer: &R,
    config: &ChartConfig,
    opts: &RenderOptions,
) -> Result<Option<RenderedChart>, RenderError> {
    if config.is_empty() {
        return Ok(None);
    }
    match renderer.render(config, opts) {
        Ok(image) => Ok(Some(image)),
        Err(e) if e.is_degenerate() => {
            warn!(kind = %config.kind, error = %e, "skipping render of degenerate chart");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    Rendered { width: i32, height: i32 },
    Cleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// No data: the view holds no chart.
    Empty,
    /// Degenerate data: the previous raster was kept.
    Skipped,
}

/// Owns a renderer and the last successfully rendered raster.
pub struct ChartView<R> {
    renderer: R,
    options: RenderOptions,
    mode: ConfigMode,
    current: Option<RenderedChart>,
    observers: Observers<ViewEvent>,
}

impl<R: ChartRenderer> ChartView<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_options(renderer, RenderOptions::default())
    }

    pub fn with_options(renderer: R, options: RenderOptions) -> Self {
        Self { renderer, options, mode: ConfigMode::default(), current: None, observers: Observers::new() }
    }

    pub fn set_mode(&mut self, mode: ConfigMode) { self.mode = mode; }
    pub fn mode(&self) -> ConfigMode { self.mode }
    pub fn options(&self) -> &RenderOptions { &self.options }
    pub fn renderer(&self) -> &R { &self.renderer }
    pub fn current(&self) -> Option<&RenderedChart> { self.current.as_ref() }

    pub fn subscribe(&mut self, listener: impl FnMut(&ViewEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    /// Change the raster size used from the next refresh on (at least 1x1).
    pub fn resize(&mut self, width: i32, height: i32) {
        self.options.width = width.max(1);
        self.options.height = height.max(1);
    }

    /// Re-derive the config from the document and render it.
    pub fn refresh(&mut self, doc: &ChartDocument) -> Result<RenderOutcome, RenderError> {
        if doc.series.is_empty() {
            self.current = None;
            self.observers.emit(&ViewEvent::Cleared);
            return Ok(RenderOutcome::Empty);
        }
        let config = doc.config(self.mode);
        match render_guarded(&self.renderer, &config, &self.options)? {
            Some(image) => {
                debug!(kind = %config.kind, width = image.width, height = image.height, "chart rendered");
                let event = ViewEvent::Rendered { width: image.width, height: image.height };
                self.current = Some(image);
                self.observers.emit(&event);
                Ok(RenderOutcome::Rendered)
            }
            None => Ok(RenderOutcome::Skipped),
        }
    }

    /// Write the current raster as PNG.
    pub fn export_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let image = self.current.as_ref().ok_or(RenderError::NothingRendered)?;
        image.write_png(path)?;
        Ok(())
    }
}
