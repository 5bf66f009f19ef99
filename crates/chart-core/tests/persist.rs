// File: crates/chart-core/tests/persist.rs
// Purpose: JSON and legacy document formats: round trips, compatibility and rejection paths.

use proptest::prelude::*;
use simplegraph_core::persist::{self, from_json, from_legacy, to_json, to_legacy};
use simplegraph_core::{ChartDocument, ChartKind, FontOptions, FontSpec, GraphError, RgbColor};

fn doc_with(entries: &[(&str, f64)]) -> ChartDocument {
    let mut doc = ChartDocument::new();
    doc.style.set_title("Growth");
    doc.style.set_x_label("Day");
    doc.style.set_y_label("cm");
    doc.style.set_chart_color(RgbColor::new(0x12, 0x34, 0x56));
    doc.style.set_line_color(RgbColor::new(0xab, 0xcd, 0xef));
    doc.style.set_kind(ChartKind::Line);
    for (label, value) in entries {
        doc.series.insert_value(*label, *value, None).unwrap();
    }
    doc
}

#[test]
fn json_round_trip_zero_one_many() {
    for entries in [&[][..], &[("solo", 1.5)][..], &[("a", -2.0), ("b", 0.0), ("ß→", 1e6)][..]] {
        let doc = doc_with(entries);
        let back = from_json(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}

#[test]
fn json_uses_stored_field_names() {
    let json = to_json(&doc_with(&[("a", 1.0)])).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["current_chart.type"], "line");
    assert_eq!(v["chart_color"], "#123456");
    assert_eq!(v["chart_line_color"], "#abcdef");
    assert_eq!(v["chart_data"][0][0], "a");
    assert!(v.get("font_options").is_none());
}

#[test]
fn json_without_font_options_loads_with_defaults() {
    let json = r##"{"title":"T","x_label":"","y_label":"","chart_color":"#000000",
        "chart_line_color":"#ffffff","current_chart.type":"pie","chart_data":[["a","3,5"],["b",2]]}"##;
    let doc = from_json(json).unwrap();
    assert_eq!(doc.kind(), ChartKind::Pie);
    assert!(doc.style.fonts().is_none());
    assert_eq!(doc.series.pairs(), vec![("a".to_string(), 3.5), ("b".to_string(), 2.0)]);
}

#[test]
fn json_accepts_numeric_kind_codes() {
    for (code, kind) in [(1, ChartKind::VerticalBar), (2, ChartKind::HorizontalBar), (3, ChartKind::Line), (4, ChartKind::Pie)] {
        let json = format!(
            r##"{{"chart_color":"#000000","chart_line_color":"#000000","current_chart.type":{code}}}"##
        );
        assert_eq!(from_json(&json).unwrap().kind(), kind);
    }
    let bad = r##"{"chart_color":"#000000","chart_line_color":"#000000","current_chart.type":9}"##;
    assert!(matches!(from_json(bad), Err(GraphError::Json(_))));
}

#[test]
fn font_options_round_trip_in_nested_shape() {
    let mut doc = doc_with(&[("a", 1.0)]);
    let fonts = FontOptions { title: FontSpec::new("Serif", 20.0, RgbColor::new(1, 2, 3)), ..FontOptions::default() };
    doc.style.set_fonts(Some(fonts.clone()));

    let json = to_json(&doc).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["font_options"]["titleFont"], "Serif");
    assert_eq!(v["font_options"]["axis"]["labelFontSize"], 14.0);
    assert_eq!(from_json(&json).unwrap().style.fonts(), Some(&fonts));
}

#[test]
fn failed_load_leaves_document_untouched() {
    let mut doc = doc_with(&[("keep", 1.0)]);
    let before = doc.clone();
    let bad = r##"{"chart_color":"#000000","chart_line_color":"#000000","current_chart.type":"vbar","chart_data":[["x","oops"]]}"##;
    assert!(persist::from_json_into(&mut doc, bad).is_err());
    assert_eq!(doc, before);
}

#[test]
fn legacy_round_trip() {
    let doc = doc_with(&[("a", 1.25), ("b", -3.0)]);
    let text = to_legacy(&doc).unwrap();
    assert_eq!(text, "Growth\nDay\ncm\n#123456\n#abcdef\na:1.25,b:-3\nline\n");
    assert_eq!(from_legacy(&text).unwrap(), doc);
}

#[test]
fn legacy_keeps_typed_decimals() {
    let mut doc = ChartDocument::new();
    doc.series.insert("a", "2.50", None).unwrap();
    let text = to_legacy(&doc).unwrap();
    assert!(text.contains("a:2.50\n"));
    assert_eq!(from_legacy(&text).unwrap().series.get(0).unwrap().display_value(), "2.50");
}

#[test]
fn legacy_reads_unterminated_last_line() {
    let doc = from_legacy("t\nx\ny\n#000000\n#000000\na:1\npie").unwrap();
    assert_eq!(doc.kind(), ChartKind::Pie);
    assert_eq!(doc.style.title(), "t");
    assert_eq!(doc.series.pairs(), vec![("a".to_string(), 1.0)]);
}

#[test]
fn legacy_reads_crlf_lines() {
    let doc = from_legacy("t\r\nx\r\ny\r\n#000000\r\n#ffffff\r\nb:2.5,c:-1\r\nhbar\r\n").unwrap();
    assert_eq!(doc.kind(), ChartKind::HorizontalBar);
    assert_eq!((doc.style.title(), doc.style.x_label(), doc.style.y_label()), ("t", "x", "y"));
    assert_eq!(doc.style.line_color(), RgbColor::WHITE);
    assert_eq!(doc.series.pairs(), vec![("b".to_string(), 2.5), ("c".to_string(), -1.0)]);
}

#[test]
fn legacy_rejects_unrepresentable_labels() {
    for label in ["a:b", "a,b", "a\nb"] {
        let doc = doc_with(&[(label, 1.0)]);
        assert!(matches!(to_legacy(&doc), Err(GraphError::AmbiguousLegacyLabel(_))), "{label:?}");
    }
    let mut doc = doc_with(&[]);
    doc.style.set_title("two\nlines");
    assert!(matches!(to_legacy(&doc), Err(GraphError::AmbiguousLegacyLabel(_))));
}

#[test]
fn legacy_rejects_short_or_bad_input() {
    assert!(matches!(from_legacy("t\nx\ny\n"), Err(GraphError::UnsupportedFormat(_))));
    let bad_color = "t\nx\ny\nblue\n#000000\n\nvbar\n";
    assert!(matches!(from_legacy(bad_color), Err(GraphError::InvalidColor(_))));
    let bad_kind = "t\nx\ny\n#000000\n#000000\n\ndonut\n";
    assert!(matches!(from_legacy(bad_kind), Err(GraphError::InvalidChartKind(_))));
}

#[test]
fn files_are_detected_by_content() {
    let dir = tempfile::tempdir().unwrap();
    let doc = doc_with(&[("a", 1.0)]);

    let json_path = dir.path().join("sub/doc.json");
    persist::write_file(&doc, &json_path).unwrap();
    let legacy_path = dir.path().join("doc.txt");
    std::fs::write(&legacy_path, to_legacy(&doc).unwrap()).unwrap();

    for path in [json_path, legacy_path] {
        let mut loaded = ChartDocument::new();
        persist::read_file(&mut loaded, &path).unwrap();
        assert_eq!(loaded, doc, "{}", path.display());
    }
}

fn label() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 äöüß€→\"\\\\]{0,12}").unwrap()
}

proptest! {
    #[test]
    fn json_round_trip_any_entries(
        entries in proptest::collection::vec((label(), -1_000_000i64..1_000_000), 0..20),
        kind in proptest::sample::select(ChartKind::ALL.to_vec()),
        title in label(),
    ) {
        let mut doc = ChartDocument::new();
        doc.style.set_title(title);
        doc.style.set_kind(kind);
        for (l, cents) in &entries {
            doc.series.insert_value(l.clone(), *cents as f64 / 100.0, None).unwrap();
        }
        let back = from_json(&to_json(&doc).unwrap()).unwrap();
        prop_assert_eq!(back, doc);
    }
}
