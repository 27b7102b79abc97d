//! First-class input tokens and error types for a round.
//!
//! Verdicts and host intents are domain events, not button presses. They
//! can be parsed from text, validated against the round, and logged.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The host's reply to a submitted guess.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Verdict {
    /// The secret is lower than the guess.
    #[strum(to_string = "lower", serialize = "l")]
    Lower,
    /// The secret is higher than the guess.
    #[strum(to_string = "higher", serialize = "h")]
    Higher,
    /// The guess hit the secret; the guesser loses the round.
    #[strum(to_string = "correct", serialize = "c")]
    Correct,
}

impl Verdict {
    /// Returns true if this verdict ends the round.
    pub fn ends_round(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// What the host declares on a forced turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum HostIntent {
    /// The secret is higher than the number the host reveals.
    #[strum(to_string = "higher")]
    Higher,
    /// The secret is lower than the number the host reveals.
    #[strum(to_string = "lower")]
    Lower,
    /// The host gives up and is caught: the round ends with the host as loser.
    #[strum(to_string = "exact")]
    Exact,
}

/// Why a candidate guess is not admissible right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GuessError {
    /// The guess lies outside the current interval.
    #[display("Guess {guess} is outside the range {low}-{high}")]
    OutOfRange {
        /// The rejected guess.
        guess: i32,
        /// Current lower bound.
        low: i32,
        /// Current upper bound.
        high: i32,
    },

    /// The guess equals one of the current bounds.
    #[display("{} is a range boundary and cannot be guessed", _0)]
    Boundary(i32),

    /// Someone already guessed this number in the round.
    #[display("{} has already been guessed this round", _0)]
    AlreadyGuessed(i32),

    /// The number was a range boundary earlier in the round.
    #[display("{} was used as a range boundary", _0)]
    Excluded(i32),
}

impl std::error::Error for GuessError {}

/// Error raised by round and game transitions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RoundError {
    /// The submitted guess is not admissible.
    #[display("Invalid guess: {}", _0)]
    InvalidGuess(GuessError),

    /// No admissible integer remains in the interval.
    #[display("No valid guesses remain in the range")]
    NoValidGuess,

    /// A verdict arrived with no guess waiting for it.
    #[display("No guess is waiting for feedback")]
    NoPendingGuess,

    /// A guess was submitted while another is waiting for feedback.
    #[display("Guess {} is still waiting for feedback", _0)]
    GuessPending(i32),

    /// The round has already ended.
    #[display("The round is over")]
    RoundOver,

    /// A new round was requested while the current one is still being played.
    #[display("The round is still in progress")]
    RoundInProgress,

    /// A host intent was declared outside a forced host turn.
    #[display("It is not the host's forced turn")]
    NotHostForcedTurn,

    /// Player count outside the supported table size.
    #[display("Player count {} is outside 2-10", _0)]
    InvalidPlayerCount(usize),

    /// Seat index outside the table.
    #[display("Seat {} is not at the table", _0)]
    InvalidSeat(usize),

    /// Interval bounds that cannot describe a round.
    #[display("Range {low}-{high} is not a valid interval")]
    InvalidRange {
        /// Requested lower bound.
        low: i32,
        /// Requested upper bound.
        high: i32,
    },

    /// A postcondition failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for RoundError {}

impl From<GuessError> for RoundError {
    fn from(err: GuessError) -> Self {
        RoundError::InvalidGuess(err)
    }
}
