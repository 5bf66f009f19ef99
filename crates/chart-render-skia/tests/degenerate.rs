// File: crates/chart-render-skia/tests/degenerate.rs
// Purpose: Degenerate data is reported as suppressible errors and never replaces a good raster.

use simplegraph_core::{
    ActivityContext, ChartDocument, ChartKind, ChartRenderer, ChartSession, ChartView, ConfigMode, Edit, RenderError,
    RenderOptions, RenderOutcome,
};
use simplegraph_render_skia::SkiaRenderer;

#[test]
fn all_zero_pie_is_division_by_zero() {
    let mut doc = ChartDocument::new();
    doc.series.insert("a", "0", None).unwrap();
    doc.series.insert("b", "0", None).unwrap();
    let config = doc.config_for(ChartKind::Pie, ConfigMode::Basic);

    let err = SkiaRenderer::new().render(&config, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, RenderError::DivisionByZero));
    assert!(err.is_degenerate());
}

#[test]
fn all_zero_bars_still_render() {
    let mut doc = ChartDocument::new();
    doc.series.insert("a", "0", None).unwrap();
    let config = doc.config_for(ChartKind::VerticalBar, ConfigMode::Basic);
    assert!(SkiaRenderer::new().render(&config, &RenderOptions::default()).is_ok());
}

#[test]
fn tiny_surface_is_invalid_numeric_state() {
    let mut doc = ChartDocument::new();
    doc.series.insert("a", "1", None).unwrap();
    let mut opts = RenderOptions::default();
    opts.width = 10;
    opts.height = 10;
    let err = SkiaRenderer::new().render(&doc.config(ConfigMode::Basic), &opts).unwrap_err();
    assert!(matches!(err, RenderError::InvalidNumericState(_)));
}

#[test]
fn view_keeps_previous_raster_when_pie_degenerates() {
    let mut doc = ChartDocument::new();
    doc.series.insert("a", "2", None).unwrap();
    let mut view = ChartView::new(SkiaRenderer::new());
    assert_eq!(view.refresh(&doc).unwrap(), RenderOutcome::Rendered);
    let before = view.current().cloned().expect("rendered");

    doc.series.set_value(0, "0").unwrap();
    doc.style.set_kind(ChartKind::Pie);
    assert_eq!(view.refresh(&doc).unwrap(), RenderOutcome::Skipped);
    assert_eq!(view.current(), Some(&before));
}

#[test]
fn session_export_numbers_chart_files() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = ActivityContext::new(dir.path());
    let mut session = ChartSession::new(&ctx, SkiaRenderer::new());
    session.add_value("x", "1").unwrap();
    session.apply_local(Edit::TypeChanged(ChartKind::Line)).unwrap();

    let first = session.export(&ctx).unwrap();
    let second = session.export(&ctx).unwrap();
    assert_eq!(first, dir.path().join("chart-1.png"));
    assert_eq!(second, dir.path().join("chart-2.png"));
    assert!(std::fs::read(&second).unwrap().starts_with(&[137, 80, 78, 71]));
}
