// File: crates/chart-render-skia/src/grid.rs
// Summary: Tick layout helpers: evenly spaced positions, value ranges and tick text.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Value range for bar-like charts: always includes zero, never zero-width.
pub fn value_span(lo: f64, hi: f64) -> (f64, f64) {
    let lo = lo.min(0.0);
    let mut hi = hi.max(0.0);
    if (hi - lo).abs() < 1e-12 { hi = lo + 1.0; }
    (lo, hi)
}

/// Short tick text: integers without decimals, otherwise at most two decimals.
pub fn tick_text(v: f64) -> String {
    if v.abs() < 1e-9 { return "0".to_string(); }
    if (v - v.round()).abs() < 1e-9 { return format!("{}", v.round() as i64); }
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
