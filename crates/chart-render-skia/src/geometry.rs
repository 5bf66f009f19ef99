// File: crates/chart-render-skia/src/geometry.rs
// Summary: Plot-area rectangle and the index/value to pixel mappings used by the painters.

use simplegraph_core::RenderOptions;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotRect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Surface minus insets; `None` when nothing is left to draw in.
    pub fn from_options(opts: &RenderOptions) -> Option<Self> {
        let r = Self::from_ltrb(
            opts.insets.left as f32,
            opts.insets.top as f32,
            (opts.width - opts.insets.right as i32) as f32,
            (opts.height - opts.insets.bottom as i32) as f32,
        );
        (r.width() > 0.0 && r.height() > 0.0).then_some(r)
    }

    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    /// Center of category slot `i` of `n` along the horizontal extent.
    pub fn slot_x(&self, i: usize, n: usize) -> f32 {
        self.left + (i as f32 + 0.5) * self.width() / n.max(1) as f32
    }

    /// Center of category slot `i` of `n` along the vertical extent, top to bottom.
    pub fn slot_y(&self, i: usize, n: usize) -> f32 {
        self.top + (i as f32 + 0.5) * self.height() / n.max(1) as f32
    }
}

/// Linear mapping of `[lo, hi]` onto the pixel interval `[p0, p1]`.
#[derive(Clone, Copy, Debug)]
pub struct Linear {
    lo: f64,
    hi: f64,
    p0: f32,
    p1: f32,
}

impl Linear {
    pub fn new(lo: f64, hi: f64, p0: f32, p1: f32) -> Self {
        Self { lo, hi, p0, p1 }
    }

    #[inline]
    pub fn map(&self, v: f64) -> f32 {
        let span = (self.hi - self.lo).max(1e-12);
        self.p0 + ((v - self.lo) / span) as f32 * (self.p1 - self.p0)
    }
}
