// File: crates/chart-render-skia/benches/render_bench.rs
// Summary: Rendering throughput per chart kind for interactive-size documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use simplegraph_core::{ChartDocument, ChartKind, ConfigMode, RenderError, RenderOptions};
use simplegraph_render_skia::SkiaRenderer;

fn build_document(n: usize) -> ChartDocument {
    let mut doc = ChartDocument::new();
    for i in 0..n {
        let v = (i as f64 * 0.37).sin().abs() * 10.0 + 1.0;
        doc.series.insert_value(format!("e{i}"), v, Some(i)).expect("insert");
    }
    doc
}

fn bench_render(c: &mut Criterion) {
    let renderer = SkiaRenderer::new();
    let doc = build_document(200);
    let mut group = c.benchmark_group("render_png_bytes");
    for kind in ChartKind::ALL {
        group.bench_function(kind.tag(), |b| {
            let config = doc.config_for(kind, ConfigMode::Basic);
            let mut opts = RenderOptions::default();
            opts.draw_labels = false;
            b.iter(|| -> Result<(), RenderError> {
                let bytes = renderer.render_to_png_bytes(&config, &opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
