// File: crates/demo/src/commands.rs
// Summary: Command implementations on top of the core session and the Skia renderer.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use simplegraph_core::persist;
use simplegraph_core::{
    ActivityContext, ChartSession, ChartView, ConfigMode, FormatReader, MeasureReader, RenderOutcome, SharingSession,
    StopWatchReader, Tube,
};
use simplegraph_render_skia::SkiaRenderer;

use crate::cli::{Format, RenderArgs};

/// Writes each outgoing message on its own stdout line.
struct StdoutTube;

impl Tube for StdoutTube {
    fn send_text(&mut self, text: &str) {
        println!("{text}");
    }
}

fn activity_of(path: &Path) -> ActivityContext {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    ActivityContext::from_env(dir)
}

pub(crate) fn import(format: Format, input: &Path, output: &Path, channel: usize) -> Result<()> {
    let reader: Box<dyn FormatReader> = match format {
        Format::Stopwatch => Box::new(
            StopWatchReader::from_path(input).with_context(|| format!("failed to read StopWatch file '{}'", input.display()))?,
        ),
        Format::Measure => Box::new(
            MeasureReader::from_path(input, channel)
                .with_context(|| format!("failed to read Measure file '{}'", input.display()))?,
        ),
    };

    let mut doc = activity_of(output).new_document();
    let n = doc.import(reader.as_ref())?;
    if n == 0 {
        warn!(input = %input.display(), "recording holds no data points");
    }
    persist::write_file(&doc, output)?;
    info!(entries = n, output = %output.display(), "imported recording");
    Ok(())
}

pub(crate) fn render(args: &RenderArgs) -> Result<()> {
    let mut ctx = ActivityContext::from_env(&args.activity_dir);
    if args.full_fonts {
        ctx.mode = ConfigMode::Full;
    }

    let mut doc = ctx.new_document();
    persist::read_file(&mut doc, &args.input).with_context(|| format!("failed to load '{}'", args.input.display()))?;
    if let Some(kind) = args.kind {
        doc.style.set_kind(kind);
    }

    let mut view = ChartView::new(SkiaRenderer::new());
    view.set_mode(ctx.mode);
    view.resize(args.width, args.height);
    match view.refresh(&doc)? {
        RenderOutcome::Rendered => {}
        RenderOutcome::Empty => bail!("'{}' has no entries to chart", args.input.display()),
        RenderOutcome::Skipped => bail!("the data in '{}' cannot be drawn as a {} chart", args.input.display(), doc.kind()),
    }

    let path = args.output.clone().unwrap_or_else(|| ctx.next_chart_file());
    view.export_png(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

pub(crate) fn convert(input: &Path, output: &Path, legacy: bool) -> Result<()> {
    let mut doc = activity_of(input).new_document();
    persist::read_file(&mut doc, input).with_context(|| format!("failed to load '{}'", input.display()))?;
    if legacy {
        std::fs::write(output, persist::to_legacy(&doc)?)
            .with_context(|| format!("failed to write '{}'", output.display()))?;
    } else {
        persist::write_file(&doc, output)?;
    }
    info!(output = %output.display(), legacy, "converted document");
    Ok(())
}

pub(crate) fn add(document: &Path, label: String, value: &str, share_id: String) -> Result<()> {
    let ctx = activity_of(document);
    let mut session = ChartSession::new(&ctx, SkiaRenderer::new());
    session.load(document).with_context(|| format!("failed to load '{}'", document.display()))?;
    session.share(SharingSession::new(share_id));

    // Append after the last entry.
    let last = session.document().series.len().checked_sub(1);
    session.select(last)?;
    if !session.add_value(label, value)? {
        bail!("an entry with the same label and value already exists");
    }
    session.save(document)?;
    session.flush(&mut StdoutTube);
    Ok(())
}

pub(crate) fn replay(document: &Path, log: &Path, local_id: String) -> Result<()> {
    let ctx = activity_of(document);
    let mut session = ChartSession::new(&ctx, SkiaRenderer::new());
    session.load(document).with_context(|| format!("failed to load '{}'", document.display()))?;
    session.share(SharingSession::new(local_id));

    let text = std::fs::read_to_string(log).with_context(|| format!("failed to read '{}'", log.display()))?;
    let (mut applied, mut dropped) = (0usize, 0usize);
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let (sender, message) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match session.apply_remote(sender, message.trim_start()) {
            Ok(true) => applied += 1,
            Ok(false) => {}
            Err(e) => {
                warn!(line = lineno + 1, error = %e, "skipping message");
                dropped += 1;
            }
        }
    }

    session.save(document)?;
    info!(applied, dropped, "replayed message log");
    Ok(())
}
