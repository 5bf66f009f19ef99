// File: crates/chart-render-skia/src/chart.rs
// Summary: Headless PNG rendering of chart configurations using Skia CPU raster surfaces.

use anyhow::anyhow;
use skia_safe as skia;
use tracing::debug;

use simplegraph_core::{ChartConfig, ChartKind, ChartRenderer, RenderError, RenderOptions, RenderedChart, RgbColor};

use crate::color::to_skia;
use crate::geometry::{Linear, PlotRect};
use crate::grid::{linspace, tick_text, value_span};
use crate::text::TextShaper;

pub struct SkiaRenderer {
    text: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new() }
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { text: TextShaper::new() }
    }

    pub fn render_to_png_bytes(&self, config: &ChartConfig, opts: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        Ok(self.render(config, opts)?.png)
    }

    /// Render `config` and write it to `output_png_path`.
    pub fn render_to_png(
        &self,
        config: &ChartConfig,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<(), RenderError> {
        self.render(config, opts)?.write_png(output_png_path)?;
        Ok(())
    }

    fn paint(&self, config: &ChartConfig, opts: &RenderOptions, plot: PlotRect) -> anyhow::Result<Vec<u8>> {
        // Create raster surface
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(to_skia(opts.background));

        let painter = Painter { canvas, text: &self.text, config, plot, labels: opts.draw_labels };
        if painter.labels && !config.title.is_empty() {
            self.text.draw_centered(canvas, &config.title, opts.width as f32 * 0.5, 8.0, &config.fonts.title);
        }
        match config.kind {
            ChartKind::VerticalBar => painter.vertical_bars(),
            ChartKind::HorizontalBar => painter.horizontal_bars(),
            ChartKind::Line => painter.line(),
            ChartKind::Pie => painter.pie(),
        }
        if painter.labels && config.kind.has_axes() {
            painter.axis_labels(opts);
        }

        // Snapshot and encode PNG
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }
}

impl ChartRenderer for SkiaRenderer {
    fn render(&self, config: &ChartConfig, opts: &RenderOptions) -> Result<RenderedChart, RenderError> {
        check_numeric(config)?;
        let plot = PlotRect::from_options(opts)
            .ok_or_else(|| RenderError::InvalidNumericState(format!("no plot area in {}x{}", opts.width, opts.height)))?;
        let png = self.paint(config, opts, plot).map_err(|e| RenderError::Backend(format!("{e:#}")))?;
        debug!(kind = %config.kind, bytes = png.len(), "encoded chart");
        Ok(RenderedChart { width: opts.width, height: opts.height, png })
    }
}

/// Reject data the layout math cannot handle before touching a surface.
fn check_numeric(config: &ChartConfig) -> Result<(), RenderError> {
    let values = config.datasets.iter().flat_map(|d| d.points.iter().map(|p| p.1));
    for v in values.clone() {
        if !v.is_finite() {
            return Err(RenderError::InvalidNumericState(format!("non-finite value {v}")));
        }
    }
    if config.kind == ChartKind::Pie {
        if values.clone().any(|v| v < 0.0) {
            return Err(RenderError::InvalidNumericState("negative pie slice".into()));
        }
        if values.sum::<f64>() == 0.0 {
            return Err(RenderError::DivisionByZero);
        }
    }
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn fill(color: RgbColor) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(color));
    paint
}

fn stroke(color: RgbColor, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(to_skia(color));
    paint
}

struct Painter<'a> {
    canvas: &'a skia::Canvas,
    text: &'a TextShaper,
    config: &'a ChartConfig,
    plot: PlotRect,
    labels: bool,
}

impl Painter<'_> {
    fn categories(&self) -> usize {
        self.config.datasets.iter().map(|d| d.points.len()).max().unwrap_or(0)
    }

    fn span(&self) -> (f64, f64) {
        let (lo, hi) = self.config.value_range().unwrap_or((0.0, 1.0));
        value_span(lo, hi)
    }

    fn value_ticks(&self, lo: f64, hi: f64) -> Vec<f64> {
        linspace(lo, hi, self.config.y_axis.tick_count.max(1) + 1)
    }

    /// Horizontal grid lines with value ticks on the left.
    fn value_grid_y(&self, ys: &Linear, lo: f64, hi: f64) {
        let grid = stroke(self.config.background.line_color, 1.0);
        let p = self.plot;
        for v in self.value_ticks(lo, hi) {
            let y = ys.map(v);
            self.canvas.draw_line((p.left, y), (p.right, y), &grid);
            if self.labels {
                self.text.draw_right(self.canvas, &tick_text(v), p.left - 6.0, y, &self.config.fonts.tick);
            }
        }
    }

    /// Vertical grid lines with value ticks below.
    fn value_grid_x(&self, xs: &Linear, lo: f64, hi: f64) {
        let grid = stroke(self.config.background.line_color, 1.0);
        let p = self.plot;
        for v in self.value_ticks(lo, hi) {
            let x = xs.map(v);
            self.canvas.draw_line((x, p.top), (x, p.bottom), &grid);
            if self.labels {
                self.text.draw_centered(self.canvas, &tick_text(v), x, p.bottom + 6.0, &self.config.fonts.tick);
            }
        }
    }

    fn axes(&self) {
        let axis = stroke(self.config.axis_line_color, 1.5);
        let p = self.plot;
        self.canvas.draw_line((p.left, p.bottom), (p.right, p.bottom), &axis);
        self.canvas.draw_line((p.left, p.top), (p.left, p.bottom), &axis);
    }

    fn vertical_bars(&self) {
        let p = self.plot;
        let (lo, hi) = self.span();
        let ys = Linear::new(lo, hi, p.bottom, p.top);
        self.value_grid_y(&ys, lo, hi);
        self.axes();

        let n = self.categories();
        let sets = self.config.datasets.len().max(1);
        let slot = p.width() / n.max(1) as f32;
        let bw = slot * 0.7 / sets as f32;
        let colors = self.config.dataset_colors();
        let outline = stroke(self.config.stroke.color, 1.0);
        let y0 = ys.map(0.0);
        for (k, set) in self.config.datasets.iter().enumerate() {
            let body = fill(colors[k]);
            for (i, &(_, v)) in set.points.iter().enumerate() {
                let x = p.slot_x(i, n) - slot * 0.35 + bw * k as f32;
                let y1 = ys.map(v);
                let rect = skia::Rect::from_ltrb(x, y0.min(y1), x + bw, y0.max(y1));
                self.canvas.draw_rect(rect, &body);
                self.canvas.draw_rect(rect, &outline);
            }
        }
        if self.labels {
            for t in &self.config.x_axis.ticks {
                self.text.draw_centered(self.canvas, &t.label, p.slot_x(t.v, n), p.bottom + 6.0, &self.config.fonts.tick);
            }
        }
    }

    fn horizontal_bars(&self) {
        let p = self.plot;
        let (lo, hi) = self.span();
        let xs = Linear::new(lo, hi, p.left, p.right);
        self.value_grid_x(&xs, lo, hi);
        self.axes();

        let n = self.categories();
        let sets = self.config.datasets.len().max(1);
        let slot = p.height() / n.max(1) as f32;
        let bh = slot * 0.7 / sets as f32;
        let colors = self.config.dataset_colors();
        let outline = stroke(self.config.stroke.color, 1.0);
        let x0 = xs.map(0.0);
        for (k, set) in self.config.datasets.iter().enumerate() {
            let body = fill(colors[k]);
            for (i, &(_, v)) in set.points.iter().enumerate() {
                let y = p.slot_y(i, n) - slot * 0.35 + bh * k as f32;
                let x1 = xs.map(v);
                let rect = skia::Rect::from_ltrb(x0.min(x1), y, x0.max(x1), y + bh);
                self.canvas.draw_rect(rect, &body);
                self.canvas.draw_rect(rect, &outline);
            }
        }
        if self.labels {
            for t in &self.config.x_axis.ticks {
                self.text.draw_right(self.canvas, &t.label, p.left - 6.0, p.slot_y(t.v, n), &self.config.fonts.tick);
            }
        }
    }

    fn line(&self) {
        let p = self.plot;
        let (lo, hi) = match self.config.value_range() {
            Some((lo, hi)) if (hi - lo).abs() >= 1e-12 => (lo, hi),
            Some((v, _)) => (v - 1.0, v + 1.0),
            None => (0.0, 1.0),
        };
        let ys = Linear::new(lo, hi, p.bottom, p.top);
        self.value_grid_y(&ys, lo, hi);
        self.axes();

        let n = self.categories();
        let colors = self.config.dataset_colors();
        let line = stroke(self.config.stroke.color, self.config.stroke.width);
        for (k, set) in self.config.datasets.iter().enumerate() {
            let pts = set.points.iter().enumerate().map(|(i, &(_, v))| (p.slot_x(i, n), ys.map(v))).collect::<Vec<_>>();
            if pts.len() >= 2 {
                let mut path = skia::Path::new();
                path.move_to(pts[0]);
                for &pt in pts.iter().skip(1) {
                    path.line_to(pt);
                }
                self.canvas.draw_path(&path, &line);
            }
            let dot = fill(colors[k]);
            for &pt in &pts {
                self.canvas.draw_circle(pt, 4.0, &dot);
            }
        }
        if self.labels {
            for t in &self.config.x_axis.ticks {
                self.text.draw_centered(self.canvas, &t.label, p.slot_x(t.v, n), p.bottom + 6.0, &self.config.fonts.tick);
            }
        }
    }

    fn pie(&self) {
        let p = self.plot;
        let legend_w = if self.config.hide_legend { 0.0 } else { p.width() * 0.3 };
        let cx = p.left + (p.width() - legend_w) * 0.5;
        let cy = p.top + p.height() * 0.5;
        let radius = ((p.width() - legend_w).min(p.height()) * 0.5 * 0.85).max(1.0);
        let oval = skia::Rect::from_ltrb(cx - radius, cy - radius, cx + radius, cy + radius);

        let values = self.config.datasets.iter().map(|d| d.points.first().map(|pt| pt.1).unwrap_or(0.0)).collect::<Vec<_>>();
        let total: f64 = values.iter().sum();
        let colors = self.config.dataset_colors();
        let edge = stroke(self.config.background.chart_color, 1.5);

        let mut start = -90.0f32;
        for (i, &v) in values.iter().enumerate() {
            let sweep = (v / total * 360.0) as f32;
            self.canvas.draw_arc(oval, start, sweep, true, &fill(colors[i]));
            self.canvas.draw_arc(oval, start, sweep, true, &edge);
            if self.labels && sweep > 0.0 {
                let mid = (start + sweep * 0.5).to_radians();
                let lx = cx + (radius + 14.0) * mid.cos();
                let ly = cy + (radius + 14.0) * mid.sin();
                let name = &self.config.datasets[i].name;
                self.text.draw_centered(self.canvas, name, lx, ly - self.config.fonts.label.size * 0.6, &self.config.fonts.label);
            }
            start += sweep;
        }

        if !self.config.hide_legend {
            let x = p.right - legend_w + 12.0;
            let row = (self.config.fonts.tick.size + 8.0).max(14.0);
            for (i, set) in self.config.datasets.iter().enumerate() {
                let y = p.top + row * i as f32;
                self.canvas.draw_rect(skia::Rect::from_xywh(x, y, 12.0, 12.0), &fill(colors[i]));
                if self.labels {
                    self.text.draw_at(self.canvas, &set.name, x + 18.0, y - 2.0, &self.config.fonts.tick);
                }
            }
        }
    }

    fn axis_labels(&self, opts: &RenderOptions) {
        let p = self.plot;
        let font = &self.config.fonts.label;
        let (bottom, side) = match self.config.kind {
            // Categories run down the side on a horizontal bar chart.
            ChartKind::HorizontalBar => (&self.config.y_axis.label, &self.config.x_axis.label),
            _ => (&self.config.x_axis.label, &self.config.y_axis.label),
        };
        if !bottom.is_empty() {
            let y = opts.height as f32 - font.size - 10.0;
            self.text.draw_centered(self.canvas, bottom, p.left + p.width() * 0.5, y, font);
        }
        if !side.is_empty() {
            self.text.draw_vertical(self.canvas, side, font.size * 0.5 + 6.0, p.top + p.height() * 0.5, font);
        }
    }
}
