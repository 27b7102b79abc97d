//! Plain-value views of a round for renderers and persistence.

use crate::action::Verdict;
use crate::round::{Round, RoundResult};
use crate::types::GuessLogEntry;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Context of one guess, captured just before its verdict was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// Seat that guessed.
    pub player: usize,
    /// Round number (1-based).
    pub round: u32,
    /// 1-based position of this guess within the round.
    pub turn_in_round: usize,
    /// Lower bound the guess was made against.
    pub low: i32,
    /// Upper bound the guess was made against.
    pub high: i32,
    /// `high - low - 1`.
    pub range_size: i32,
    /// Seats clockwise from the host to the guesser.
    pub position_from_host: usize,
    /// Seats at the table.
    pub players_count: usize,
    /// True if the host was forced to guess.
    pub is_forced_turn: bool,
    /// Earlier guesses this round, oldest first.
    pub prior_guesses: Vec<i32>,
    /// The number guessed.
    pub guess: i32,
    /// The host's answer.
    pub verdict: Verdict,
    /// `(guess - low) / (high - low)` when any slot was open.
    pub relative_position_in_range: Option<f64>,
}

/// Everything a renderer needs after a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct GameSnapshot {
    /// Round number (1-based).
    round: u32,
    /// Seats at the table.
    num_players: usize,
    /// Seat on the move.
    current_player: usize,
    /// Seat holding the secret.
    host_player: usize,
    /// Lower bound.
    low: i32,
    /// Upper bound.
    high: i32,
    /// This round's guesses, oldest first.
    log: Vec<GuessLogEntry>,
    /// True if the host has to move.
    is_forced_host_turn: bool,
    /// Guess waiting for a verdict.
    pending_guess: Option<i32>,
    /// Advisor's number, while the round is open.
    recommended_guess: Option<i32>,
    /// Label such as `"Trap: 12"`.
    strategy_label: Option<String>,
    /// Advisor's reasoning.
    explanation: Option<String>,
    /// How the round ended, once it has.
    result: Option<RoundResult>,
}

impl GameSnapshot {
    /// Captures the round as it stands, advice included while it is open.
    pub fn capture(round: &Round) -> Self {
        let advice = match round.advice() {
            Ok(advice) => Some(advice),
            Err(err) => {
                debug!(%err, "No advice for snapshot");
                None
            }
        };
        let recommendation = advice.as_ref().map(|a| a.recommendation());

        Self {
            round: round.number(),
            num_players: round.turn().num_players(),
            current_player: round.turn().current(),
            host_player: round.turn().host(),
            low: round.range().low(),
            high: round.range().high(),
            log: round.range().log().to_vec(),
            is_forced_host_turn: !round.is_over() && round.turn().is_forced_host_turn(),
            pending_guess: round.pending(),
            recommended_guess: recommendation.map(|r| r.guess()),
            strategy_label: recommendation.map(|r| r.label()),
            explanation: recommendation.map(|r| r.explanation().to_string()),
            result: round.result().copied(),
        }
    }

    /// True once the round has a loser.
    pub fn is_round_over(&self) -> bool {
        self.result.is_some()
    }
}
