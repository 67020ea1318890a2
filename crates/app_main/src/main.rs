//! PhotoShelf - Local Photo Gallery Engine
//!
//! Main entry point for the command-line shell around the gallery core.

mod app;
mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    app_log::init()?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("PhotoShelf starting...");

    let cli = cli::Cli::parse();

    // Load configuration
    let config = app_core::GalleryConfig::load().unwrap_or_default();

    let mut app = app::App::open(&config)?;
    app.run(cli.command)
}
