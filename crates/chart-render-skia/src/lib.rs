// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia renderer crate; draws bar, line and pie charts from a chart configuration.

pub mod chart;
pub mod color;
pub mod geometry;
pub mod grid;
pub mod text;

pub use chart::SkiaRenderer;
pub use text::TextShaper;
