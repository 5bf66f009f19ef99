// File: crates/demo/src/main.rs
// Summary: `simplegraph` binary; parses arguments, sets up logging and dispatches commands.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use cli::Commands;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { format, input, output, channel } => commands::import(format, &input, &output, channel),
        Commands::Render(args) => commands::render(&args),
        Commands::Convert { input, output, legacy } => commands::convert(&input, &output, legacy),
        Commands::Add { document, label, value, share_id } => commands::add(&document, label, &value, share_id),
        Commands::Replay { document, log, local_id } => commands::replay(&document, &log, local_id),
    }
}
