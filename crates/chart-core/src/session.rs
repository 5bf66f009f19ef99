// File: crates/chart-core/src/session.rs
// Summary: Activity context (paths, user colors, policies) and the session tying a document,
//          its chart view and the sharing outbox together on one event loop.
// Notes:
// - Every mutation is applied to completion, then (for local edits) the wire message is
//   queued, then the chart is re-rendered. Remote edits follow the same path minus the queueing.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ConfigMode;
use crate::document::ChartDocument;
use crate::edit::Edit;
use crate::error::GraphResult;
use crate::persist;
use crate::readers::FormatReader;
use crate::render::{ChartRenderer, ChartView, RenderOutcome};
use crate::series::DuplicatePolicy;
use crate::sharing::{self, SharingSession, Tube};
use crate::style::FontOptions;
use crate::theme::UserColors;

/// Per-activity settings passed explicitly to persistence and export.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityContext {
    pub activity_dir: PathBuf,
    pub user_colors: UserColors,
    pub duplicates: DuplicatePolicy,
    pub mode: ConfigMode,
}

impl ActivityContext {
    pub fn new(activity_dir: impl Into<PathBuf>) -> Self {
        Self {
            activity_dir: activity_dir.into(),
            user_colors: UserColors::default(),
            duplicates: DuplicatePolicy::default(),
            mode: ConfigMode::default(),
        }
    }

    /// Like [`ActivityContext::new`] but with the user's colors from the environment.
    pub fn from_env(activity_dir: impl Into<PathBuf>) -> Self {
        Self { user_colors: UserColors::from_env(), ..Self::new(activity_dir) }
    }

    pub fn new_document(&self) -> ChartDocument {
        let mut doc = ChartDocument::with_user_colors(self.user_colors);
        doc.series.set_duplicate_policy(self.duplicates);
        doc
    }

    /// First `chart-N.png` (N >= 1) that does not exist yet in the activity directory.
    pub fn next_chart_file(&self) -> PathBuf {
        let mut n = 1u32;
        loop {
            let candidate = self.activity_dir.join(format!("chart-{n}.png"));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

pub struct ChartSession<R> {
    document: ChartDocument,
    view: ChartView<R>,
    sharing: Option<SharingSession>,
    outgoing: Vec<String>,
}

impl<R: ChartRenderer> ChartSession<R> {
    pub fn new(ctx: &ActivityContext, renderer: R) -> Self {
        let mut view = ChartView::new(renderer);
        view.set_mode(ctx.mode);
        Self { document: ctx.new_document(), view, sharing: None, outgoing: Vec::new() }
    }

    pub fn document(&self) -> &ChartDocument { &self.document }
    pub fn view(&self) -> &ChartView<R> { &self.view }
    pub fn view_mut(&mut self) -> &mut ChartView<R> { &mut self.view }

    /// Start broadcasting local edits and accepting remote ones as `sharing`.
    pub fn share(&mut self, sharing: SharingSession) {
        self.sharing = Some(sharing);
    }

    pub fn is_shared(&self) -> bool { self.sharing.is_some() }

    pub fn set_document_title(&mut self, title: impl Into<String>) -> GraphResult<RenderOutcome> {
        self.document.document_title = title.into();
        self.render()
    }

    pub fn render(&mut self) -> GraphResult<RenderOutcome> {
        Ok(self.view.refresh(&self.document)?)
    }

    /// Apply a local edit, queue it for peers, and re-render. Returns `false` for no-ops.
    pub fn apply_local(&mut self, edit: Edit) -> GraphResult<bool> {
        if !self.document.apply(&edit)? {
            return Ok(false);
        }
        // Peers get the edit even when the render below fails.
        if self.sharing.is_some() {
            self.outgoing.push(sharing::encode(&edit));
        }
        self.render()?;
        Ok(true)
    }

    /// The "add" affordance: resolves the position locally so peers insert at the same place.
    pub fn add_value(&mut self, label: impl Into<String>, value: &str) -> GraphResult<bool> {
        let position = Some(self.document.series.default_position());
        self.apply_local(Edit::Add { label: label.into(), value: value.to_string(), position })
    }

    pub fn select(&mut self, position: Option<usize>) -> GraphResult<()> {
        self.document.series.select(position)
    }

    pub fn move_up(&mut self, position: usize) -> GraphResult<Option<(usize, usize)>> {
        let moved = self.document.series.move_up(position);
        if moved.is_some() {
            self.render()?;
        }
        Ok(moved)
    }

    pub fn move_down(&mut self, position: usize) -> GraphResult<Option<(usize, usize)>> {
        let moved = self.document.series.move_down(position);
        if moved.is_some() {
            self.render()?;
        }
        Ok(moved)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> GraphResult<RenderOutcome> {
        self.document.style.set_title(title);
        self.render()
    }

    pub fn set_fonts(&mut self, fonts: Option<FontOptions>) -> GraphResult<RenderOutcome> {
        self.document.style.set_fonts(fonts);
        self.render()
    }

    /// Apply a message from `sender`. Our own broadcasts and empty messages are ignored.
    pub fn apply_remote(&mut self, sender: &str, message: &str) -> GraphResult<bool> {
        let Some(sharing) = self.sharing.as_ref() else {
            return Ok(false);
        };
        let Some(edit) = sharing.receive(sender, message)? else {
            return Ok(false);
        };
        if !self.document.apply(&edit)? {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Messages queued since the last call.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    /// Hand queued messages to `tube`.
    pub fn flush(&mut self, tube: &mut dyn Tube) -> usize {
        let messages = self.take_outgoing();
        for m in &messages {
            tube.send_text(m);
        }
        messages.len()
    }

    pub fn import(&mut self, reader: &dyn FormatReader) -> GraphResult<usize> {
        let n = self.document.import(reader)?;
        self.render()?;
        Ok(n)
    }

    pub fn load(&mut self, path: impl AsRef<Path>) -> GraphResult<()> {
        persist::read_file(&mut self.document, path)?;
        self.render()?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GraphResult<()> {
        persist::write_file(&self.document, path)
    }

    /// Write the current chart to the next free `chart-N.png` of the activity directory.
    pub fn export(&self, ctx: &ActivityContext) -> GraphResult<PathBuf> {
        let path = ctx.next_chart_file();
        self.view.export_png(&path)?;
        info!(path = %path.display(), "exported chart");
        Ok(path)
    }
}
