// File: crates/chart-render-skia/src/color.rs
// Summary: Conversion from chart colors to Skia colors.

use skia_safe as skia;

use simplegraph_core::RgbColor;

#[inline]
pub fn to_skia(c: RgbColor) -> skia::Color {
    skia::Color::from_argb(255, c.r, c.g, c.b)
}
