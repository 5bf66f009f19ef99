// File: crates/chart-core/tests/config.rs
// Purpose: Chart configuration derived per kind from the series and style.

use simplegraph_core::config::SERIES_NAME;
use simplegraph_core::{ChartDocument, ChartKind, ConfigMode, FontOptions, FontSpec, RgbColor};

fn doc() -> ChartDocument {
    let mut doc = ChartDocument::new();
    for (label, value) in [("a", "1"), ("b", "4"), ("c", "2")] {
        doc.series.insert(label, value, None).unwrap();
    }
    doc
}

#[test]
fn bars_and_lines_use_one_indexed_dataset() {
    let doc = doc();
    for kind in [ChartKind::VerticalBar, ChartKind::HorizontalBar, ChartKind::Line] {
        let cfg = doc.config_for(kind, ConfigMode::Basic);
        assert_eq!(cfg.datasets.len(), 1);
        assert_eq!(cfg.datasets[0].name, SERIES_NAME);
        assert_eq!(cfg.datasets[0].points, vec![(0.0, 1.0), (1.0, 4.0), (2.0, 2.0)]);
        assert_eq!(cfg.point_count(), 3);
        assert!(cfg.hide_legend);
        assert_eq!(cfg.x_axis.tick_label(1), Some("b"));
        assert_eq!(cfg.value_range(), Some((1.0, 4.0)));
    }
}

#[test]
fn pie_uses_one_dataset_per_entry_with_legend() {
    let cfg = doc().config_for(ChartKind::Pie, ConfigMode::Basic);
    let names: Vec<_> = cfg.datasets.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert!(cfg.datasets.iter().all(|d| d.points.len() == 1 && d.points[0].0 == 0.0));
    assert!(!cfg.hide_legend);
    assert!(cfg.x_axis.ticks.is_empty());
    assert_eq!(cfg.point_count(), 3);
}

#[test]
fn empty_series_gives_empty_config() {
    let empty = ChartDocument::new();
    for kind in ChartKind::ALL {
        let cfg = empty.config_for(kind, ConfigMode::Basic);
        assert!(cfg.is_empty());
        assert_eq!(cfg.value_range(), None);
    }
}

#[test]
fn style_flows_into_config() {
    let mut doc = doc();
    doc.style.set_title("Heights");
    doc.style.set_x_label("Kid");
    doc.style.set_y_label("cm");
    doc.style.set_chart_color(RgbColor::new(0, 0, 255));
    doc.style.set_line_color(RgbColor::new(255, 0, 0));

    let cfg = doc.config(ConfigMode::Basic);
    assert_eq!(cfg.title, "Heights");
    assert_eq!(cfg.x_axis.label, "Kid");
    assert_eq!(cfg.y_axis.label, "cm");
    assert_eq!(cfg.color_scheme.initial, RgbColor::new(0, 0, 255));
    assert_eq!(cfg.stroke.color, RgbColor::new(255, 0, 0));
    assert_eq!(cfg.stroke.width, 3.0);
    assert_eq!(cfg.axis_line_color.to_hex(), "#b3b3b3");
    assert_eq!(cfg.background.line_color.to_hex(), "#cccccc");
}

#[test]
fn document_title_is_the_fallback_chart_title() {
    let mut doc = doc();
    doc.document_title = "My journal".into();
    assert_eq!(doc.config(ConfigMode::Basic).title, "My journal");
    doc.style.set_title("Own");
    assert_eq!(doc.config(ConfigMode::Basic).title, "Own");
}

#[test]
fn gradient_scheme_lightens_per_dataset() {
    let cfg = doc().config_for(ChartKind::Pie, ConfigMode::Basic);
    let colors = cfg.dataset_colors();
    assert_eq!(colors.len(), 3);
    assert_eq!(colors[0], cfg.color_scheme.initial);
    assert_ne!(colors[1], colors[2]);
}

#[test]
fn fonts_only_apply_in_full_mode() {
    let mut doc = doc();
    let fonts = FontOptions {
        label: FontSpec::new("Mono", 9.0, RgbColor::BLACK),
        tick: FontSpec::new("Serif", 11.0, RgbColor::new(9, 9, 9)),
        ..FontOptions::default()
    };
    doc.style.set_fonts(Some(fonts.clone()));

    assert_eq!(doc.config(ConfigMode::Basic).fonts, FontOptions::default());
    assert_eq!(doc.config(ConfigMode::Full).fonts, fonts);

    // Pies have no axes; slice labels take the tick font.
    let pie = doc.config_for(ChartKind::Pie, ConfigMode::Full);
    assert_eq!(pie.fonts.label, fonts.tick);
    assert!(doc.style.axis_label_fonts_enabled());
    doc.style.set_kind(ChartKind::Pie);
    assert!(!doc.style.axis_label_fonts_enabled());
}
