mod commands;
mod input;
mod shutdown;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wowpa_core::{MemoryLayout, load_layout};

#[derive(Parser)]
#[command(name = "wowpa")]
#[command(about = "Positional audio data for World of Warcraft 3.3.5a", version)]
struct Args {
    /// Memory layout file overriding the built-in 3.3.5a.12340 addresses
    #[arg(long, value_name = "FILE", global = true)]
    layout: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Wait for the game, then print positional data every tick (default)
    Watch {
        /// Print one JSON object per frame instead of the console view
        #[arg(long)]
        json: bool,
    },
    /// Attach once and print a single frame
    Status {
        /// Attach to this process ID instead of searching for Wow.exe
        #[arg(long)]
        pid: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Print or save the active memory layout
    Layout {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decide the voice channel for one published context and identity
    Route {
        /// Router configuration (TOML)
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
        /// Context string as produced by the plugin, e.g. ' {"Map ID": 0}'
        #[arg(long, allow_hyphen_values = true)]
        context: String,
        /// Identity JSON as produced by the plugin
        #[arg(long)]
        identity: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wowpa_cli=info,wowpa_core=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let layout = resolve_layout(args.layout.as_deref())?;

    match args.command {
        None => commands::watch::run(layout, false),
        Some(Command::Watch { json }) => commands::watch::run(layout, json),
        Some(Command::Status { pid, json }) => commands::status::run(layout, pid, json),
        Some(Command::Layout { output }) => commands::layout::run(&layout, output.as_deref()),
        Some(Command::Route {
            config,
            context,
            identity,
        }) => commands::route::run(&config, &context, &identity),
    }
}

fn resolve_layout(path: Option<&std::path::Path>) -> Result<MemoryLayout> {
    let Some(path) = path else {
        return Ok(MemoryLayout::wow_3_3_5a());
    };
    let layout = load_layout(path)
        .with_context(|| format!("Failed to load layout from {}", path.display()))?;
    info!("Loaded layout {} from {}", layout.build, path.display());
    Ok(layout)
}
