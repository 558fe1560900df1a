//! # Larder CLI Entry Point
//!
//! Terminal front end for the food catalog.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Parse the command line
//! 3. Load client config (file, then environment, then `--api-url`)
//! 4. Build the gateway and Store, run the command
//!
//! ```text
//! $ larder list --search pizza
//! $ larder add --name Margherita --image https://... --rating 4.5 --price 12.99 \
//!              --restaurant "Luigi's" --logo https://... --status "Open Now"
//! $ larder edit 12 --price 13.50
//! $ larder delete 12 --yes
//! $ larder search
//! $ larder config init
//! ```

mod args;
mod commands;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    commands::run(cli).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=larder_sync=trace` - Trace the sync layer only
/// - Default: warnings, plus info from larder crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,larder=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
