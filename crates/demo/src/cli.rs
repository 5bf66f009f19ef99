// File: crates/demo/src/cli.rs
// Summary: Command-line arguments.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

use simplegraph_core::ChartKind;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build a chart document from a StopWatch or Measure recording.
    Import {
        /// The recording format of the input file.
        #[arg(short, long, value_enum)]
        format: Format,

        /// Path of the recording to read.
        input: PathBuf,

        /// Path where the chart document (JSON) is written.
        #[arg(short, long)]
        output: PathBuf,

        /// Measure channel to read, counted from 1.
        #[arg(short, long, default_value_t = 1, value_parser(parse_channel))]
        channel: usize,
    },
    /// Render a chart document to PNG.
    Render(RenderArgs),
    /// Rewrite a chart document as JSON or in the legacy line format.
    Convert {
        /// Document to read. Both formats are detected automatically.
        input: PathBuf,

        /// Path of the converted document.
        output: PathBuf,

        /// Write the legacy seven-line format instead of JSON.
        #[arg(short, long)]
        legacy: bool,
    },
    /// Append an entry and print the message peers would receive.
    Add {
        /// Document to update in place.
        document: PathBuf,

        /// Label of the new entry.
        label: String,

        /// Value of the new entry, as typed (`,` is accepted as decimal separator).
        value: String,

        /// Identity used when broadcasting the edit.
        #[arg(long, default_value = "local")]
        share_id: String,
    },
    /// Apply a log of shared edits to a document.
    ///
    /// Each line of the log holds the sender id, whitespace, and the
    /// message as it travelled on the wire, e.g. `peer-2 v|[0,"4.5"]`.
    Replay {
        /// Document to update in place.
        document: PathBuf,

        /// Message log to apply, one message per line.
        log: PathBuf,

        /// Our own identity; messages from it are ignored.
        #[arg(long, default_value = "local")]
        local_id: String,
    },
}

#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Chart document to render.
    pub(crate) input: PathBuf,

    /// PNG path. Defaults to the next free `chart-N.png` in the activity directory.
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Directory used for numbered chart files.
    #[arg(short = 'd', long, default_value = ".")]
    pub(crate) activity_dir: PathBuf,

    /// Chart kind (vbar, hbar, line, pie or 1-4). Defaults to the document's kind.
    #[arg(short, long)]
    pub(crate) kind: Option<ChartKind>,

    /// Image width in pixels.
    #[arg(long, default_value_t = simplegraph_core::types::WIDTH)]
    pub(crate) width: i32,

    /// Image height in pixels.
    #[arg(long, default_value_t = simplegraph_core::types::HEIGHT)]
    pub(crate) height: i32,

    /// Apply the document's font options to the chart.
    #[arg(long)]
    pub(crate) full_fonts: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Stopwatch,
    Measure,
}

fn parse_channel(channel: &str) -> Result<usize, String> {
    match channel.parse::<usize>() {
        Ok(0) => Err("Measure channels are counted from 1.".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("`{channel}` is not a channel number: {e}")),
    }
}
