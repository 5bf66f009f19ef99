// File: crates/chart-core/src/style.rs
// Summary: Chart style settings (title, axis labels, colors, kind, fonts) with change notification.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::RgbColor;
use crate::observer::{Observers, SubscriptionId};
use crate::theme::UserColors;
use crate::types::ChartKind;

#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub color: RgbColor,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32, color: RgbColor) -> Self {
        Self { family: family.into(), size, color }
    }
}

/// Independently configurable fonts for the title, the axis labels and the tick labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "FontOptionsWire", into = "FontOptionsWire")]
pub struct FontOptions {
    pub title: FontSpec,
    pub label: FontSpec,
    pub tick: FontSpec,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            title: FontSpec::new("Tahoma", 12.0, RgbColor::BLACK),
            label: FontSpec::new("Sans", 14.0, RgbColor::new(0x66, 0x66, 0x66)),
            tick: FontSpec::new("Sans", 12.0, RgbColor::BLACK),
        }
    }
}

// Stored shape: title settings at the top level, label and tick settings under "axis".
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FontOptionsWire {
    title_font: String,
    title_font_size: f32,
    title_color: RgbColor,
    axis: AxisFontsWire,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AxisFontsWire {
    label_font: String,
    label_font_size: f32,
    label_color: RgbColor,
    tick_font: String,
    tick_font_size: f32,
    tick_color: RgbColor,
}

impl Default for FontOptionsWire {
    fn default() -> Self { FontOptions::default().into() }
}

impl Default for AxisFontsWire {
    fn default() -> Self { FontOptionsWire::from(FontOptions::default()).axis }
}

impl From<FontOptions> for FontOptionsWire {
    fn from(o: FontOptions) -> Self {
        Self {
            title_font: o.title.family,
            title_font_size: o.title.size,
            title_color: o.title.color,
            axis: AxisFontsWire {
                label_font: o.label.family,
                label_font_size: o.label.size,
                label_color: o.label.color,
                tick_font: o.tick.family,
                tick_font_size: o.tick.size,
                tick_color: o.tick.color,
            },
        }
    }
}

impl From<FontOptionsWire> for FontOptions {
    fn from(w: FontOptionsWire) -> Self {
        Self {
            title: FontSpec::new(w.title_font, w.title_font_size, w.title_color),
            label: FontSpec::new(w.axis.label_font, w.axis.label_font_size, w.axis.label_color),
            tick: FontSpec::new(w.axis.tick_font, w.axis.tick_font_size, w.axis.tick_color),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleField {
    Title,
    XLabel,
    YLabel,
    ChartColor,
    LineColor,
    Kind,
    Fonts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleEvent {
    Changed(StyleField),
}

#[derive(Clone, Debug)]
pub struct ChartStyle {
    title: String,
    x_label: String,
    y_label: String,
    chart_color: RgbColor,
    line_color: RgbColor,
    kind: ChartKind,
    fonts: Option<FontOptions>,
    observers: Observers<StyleEvent>,
}

impl PartialEq for ChartStyle {
    fn eq(&self, o: &Self) -> bool {
        self.title == o.title
            && self.x_label == o.x_label
            && self.y_label == o.y_label
            && self.chart_color == o.chart_color
            && self.line_color == o.line_color
            && self.kind == o.kind
            && self.fonts == o.fonts
    }
}

impl Default for ChartStyle {
    fn default() -> Self { Self::with_user_colors(UserColors::default()) }
}

impl ChartStyle {
    pub fn with_user_colors(colors: UserColors) -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            chart_color: colors.chart_color(),
            line_color: colors.line_color(),
            kind: ChartKind::default(),
            fonts: None,
            observers: Observers::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StyleEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn x_label(&self) -> &str { &self.x_label }
    pub fn y_label(&self) -> &str { &self.y_label }
    pub fn chart_color(&self) -> RgbColor { self.chart_color }
    pub fn line_color(&self) -> RgbColor { self.line_color }
    pub fn kind(&self) -> ChartKind { self.kind }
    pub fn fonts(&self) -> Option<&FontOptions> { self.fonts.as_ref() }

    /// Axis label fonts only apply to kinds that draw axes.
    pub fn axis_label_fonts_enabled(&self) -> bool { self.kind.has_axes() }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.changed(StyleField::Title);
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
        self.changed(StyleField::XLabel);
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
        self.changed(StyleField::YLabel);
    }

    pub fn set_chart_color(&mut self, color: RgbColor) {
        self.chart_color = color;
        self.changed(StyleField::ChartColor);
    }

    pub fn set_line_color(&mut self, color: RgbColor) {
        self.line_color = color;
        self.changed(StyleField::LineColor);
    }

    pub fn set_kind(&mut self, kind: ChartKind) {
        self.kind = kind;
        self.changed(StyleField::Kind);
    }

    pub fn set_fonts(&mut self, fonts: Option<FontOptions>) {
        self.fonts = fonts;
        self.changed(StyleField::Fonts);
    }

    fn changed(&mut self, field: StyleField) {
        debug!(?field, "style changed");
        self.observers.emit(&StyleEvent::Changed(field));
    }
}
