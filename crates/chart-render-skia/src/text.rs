// File: crates/chart-render-skia/src/text.rs
// Summary: Text shaping/painting with Skia textlayout, driven by the chart's font settings.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use simplegraph_core::FontSpec;

use crate::color::to_skia;

const FALLBACK_FAMILIES: [&str; 5] = ["DejaVu Sans", "Arial", "Helvetica", "Roboto", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(font: &FontSpec) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(font.size.max(1.0));
        ts.set_color(to_skia(font.color));
        let mut families = vec![font.family.as_str()];
        // "Sans" is a fontconfig alias; keep concrete families behind it.
        families.extend(FALLBACK_FAMILIES);
        ts.set_font_families(families.as_slice());
        ts
    }

    pub fn layout(&self, text: &str, font: &FontSpec) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(font));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw with the top-left corner at `(x, y)`.
    pub fn draw_at(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, font: &FontSpec) {
        let mut p = self.layout(text, font);
        p.paint(canvas, (x, y));
    }

    /// Draw horizontally centered on `cx`, top edge at `y`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, y: f32, font: &FontSpec) {
        let mut p = self.layout(text, font);
        let w = p.longest_line();
        p.paint(canvas, (cx - w * 0.5, y));
    }

    /// Draw right-aligned to `right`, vertically centered on `cy`.
    pub fn draw_right(&self, canvas: &skia::Canvas, text: &str, right: f32, cy: f32, font: &FontSpec) {
        let mut p = self.layout(text, font);
        let w = p.longest_line();
        let h = p.height();
        p.paint(canvas, (right - w, cy - h * 0.5));
    }

    /// Draw rotated a quarter turn counter-clockwise, centered on `(cx, cy)`.
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, font: &FontSpec) {
        let mut p = self.layout(text, font);
        let w = p.longest_line();
        let h = p.height();
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        p.paint(canvas, (-w * 0.5, -h * 0.5));
        canvas.restore();
    }
}
