//! Command-line interface for strictly_party.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Party - the narrowing-range guessing game at the table
#[derive(Parser, Debug)]
#[command(name = "strictly_party")]
#[command(about = "Host a narrowing-range guessing game from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on stdin/stdout
    Play {
        /// Number of players (2-10), overrides the config file
        #[arg(short, long)]
        players: Option<usize>,

        /// Path to a TOML config file (falls back to $STRICTLY_RANGE_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Append telemetry as JSON lines to this file
        #[arg(long)]
        record: Option<PathBuf>,

        /// Hide the advisor's recommendation
        #[arg(long)]
        hide_advice: bool,
    },

    /// Print the advisor's recommendation for a position as JSON
    Advise {
        /// Current lower bound
        #[arg(long, default_value = "1")]
        low: i32,

        /// Current upper bound
        #[arg(long, default_value = "100")]
        high: i32,

        /// Number of players
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Seat of the host (0-based)
        #[arg(long, default_value = "0")]
        host: usize,

        /// Seat on the move (0-based), defaults to the seat after the host
        #[arg(long)]
        current: Option<usize>,

        /// Previously used boundaries, comma separated
        #[arg(long, value_delimiter = ',')]
        excluded: Vec<i32>,

        /// Seats that already guessed the current interval, comma separated
        #[arg(long, value_delimiter = ',')]
        guessed_seats: Vec<usize>,
    },
}
