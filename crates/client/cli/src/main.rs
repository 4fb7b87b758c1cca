//! Terminal client entry point.
mod app;
mod config;
mod input;
mod logging;
mod presentation;

use anyhow::{Context, Result};
use app::App;
use config::CliConfig;
use game_content::ContentFactory;
use game_core::GameEngine;
use presentation::terminal::{self, TerminalGuard};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _log_guard = logging::init(&config)?;

    let engine = build_engine(&config)?;

    let mut tui = terminal::init()?;
    let _terminal_guard = TerminalGuard;
    App::new(engine, config.ui).run(&mut tui)
}

fn build_engine(config: &CliConfig) -> Result<GameEngine> {
    match &config.data_dir {
        Some(data_dir) => {
            tracing::info!(data_dir = %data_dir.display(), "loading content");
            ContentFactory::new(data_dir).build_engine(config.seed)
        }
        None => GameEngine::new(config.seed).context("Failed to initialize the first level"),
    }
}
