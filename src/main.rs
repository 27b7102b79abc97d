//! Strictly Party - Unified CLI
//!
//! Play at the table or ask the advisor about a single position.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_party::{ConsoleSession, JsonLinesRecorder, PartyConfig, Position, TracingRecorder};
use strictly_range::Game;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the console stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            players,
            config,
            record,
            hide_advice,
        } => run_play(players, config, record, hide_advice),
        Command::Advise {
            low,
            high,
            players,
            host,
            current,
            excluded,
            guessed_seats,
        } => run_advise(Position::new(
            low,
            high,
            players,
            host,
            current,
            excluded,
            guessed_seats,
        )),
    }
}

/// Run an interactive game on stdin/stdout
#[instrument]
fn run_play(
    players: Option<usize>,
    config: Option<PathBuf>,
    record: Option<PathBuf>,
    hide_advice: bool,
) -> Result<()> {
    let config =
        PartyConfig::load(config.as_deref())?.with_overrides(players, record, hide_advice)?;
    info!(num_players = config.num_players(), "Starting party");

    let mut game = Game::new(*config.num_players())?.with_observer(TracingRecorder);
    if let Some(path) = config.telemetry_path() {
        game.add_observer(JsonLinesRecorder::create(path)?);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ConsoleSession::new(game, stdin.lock(), stdout.lock())
        .with_advice(*config.show_advice())
        .run()?;
    Ok(())
}

/// Print advice for one position as JSON
#[instrument]
fn run_advise(position: Position) -> Result<()> {
    let report = position.advise()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
