//! Core domain types: the interval, its exclusions, and the guess log.

use crate::action::RoundError;
use crate::validator::AdmissibleGuess;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// Lowest number a round can start from.
pub const FLOOR: i32 = 1;

/// Highest number a round can start from.
pub const CEILING: i32 = 100;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 10;

/// One guess as it was resolved, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuessLogEntry {
    /// Seat that made the guess.
    pub player: usize,
    /// The number guessed.
    pub guess: i32,
    /// Lower bound before feedback.
    pub previous_low: i32,
    /// Upper bound before feedback.
    pub previous_high: i32,
    /// Lower bound after feedback.
    pub new_low: i32,
    /// Upper bound after feedback.
    pub new_high: i32,
    /// True if this guess ended the round.
    pub was_correct: bool,
}

impl std::fmt::Display for GuessLogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{} guessed {}. ", self.player + 1, self.guess)?;
        if self.was_correct {
            write!(f, "Correct! P{} loses.", self.player + 1)
        } else {
            write!(f, "Range: {}-{}.", self.new_low, self.new_high)
        }
    }
}

/// The current interval, every boundary it has ever had, and the guess log.
///
/// Mutation goes through the round controller; this type only keeps its own
/// bookkeeping consistent (bounds are always excluded, guessed values are
/// indexed alongside the ordered log).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeState {
    low: i32,
    high: i32,
    excluded: BTreeSet<i32>,
    log: Vec<GuessLogEntry>,
    guessed: BTreeSet<i32>,
}

impl RangeState {
    /// Creates the opening interval `(1, 100)`.
    #[instrument]
    pub fn new() -> Self {
        Self {
            low: FLOOR,
            high: CEILING,
            excluded: BTreeSet::from([FLOOR, CEILING]),
            log: Vec::new(),
            guessed: BTreeSet::new(),
        }
    }

    /// Creates an already narrowed interval with an empty log.
    ///
    /// Both bounds and the opening bounds are excluded.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::InvalidRange` unless `1 <= low < high <= 100`.
    #[instrument]
    pub fn narrowed(low: i32, high: i32) -> Result<Self, RoundError> {
        if low < FLOOR || high > CEILING || low >= high {
            return Err(RoundError::InvalidRange { low, high });
        }
        let mut range = Self::new();
        range.low = low;
        range.high = high;
        range.excluded.extend([low, high]);
        Ok(range)
    }

    /// Adds extra previously-used boundaries to the exclusion set.
    pub fn with_excluded(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.excluded.extend(values);
        self
    }

    /// Current lower bound (never guessable).
    pub fn low(&self) -> i32 {
        self.low
    }

    /// Current upper bound (never guessable).
    pub fn high(&self) -> i32 {
        self.high
    }

    /// Every value that has been a bound this round.
    pub fn excluded(&self) -> &BTreeSet<i32> {
        &self.excluded
    }

    /// Guess log in chronological order.
    pub fn log(&self) -> &[GuessLogEntry] {
        &self.log
    }

    /// Numbers strictly between the bounds, before exclusions.
    pub fn slots(&self) -> i32 {
        self.high - self.low - 1
    }

    /// Integer midpoint `floor((low + high) / 2)`.
    pub fn midpoint(&self) -> i32 {
        (self.low + self.high).div_euclid(2)
    }

    /// True if the number appears in the guess log.
    pub fn was_guessed(&self, value: i32) -> bool {
        self.guessed.contains(&value)
    }

    /// True if `value` is an admissible guess right now.
    pub fn is_valid_guess(&self, value: i32) -> bool {
        AdmissibleGuess::holds(self, value)
    }

    /// All admissible guesses in ascending order.
    pub fn valid_guesses(&self) -> Vec<i32> {
        ((self.low + 1)..self.high)
            .filter(|&n| self.is_valid_guess(n))
            .collect()
    }

    /// Secret is below `guess`: it becomes the new upper bound.
    pub(crate) fn lower_high_to(&mut self, guess: i32) {
        self.high = guess;
        self.excluded.insert(guess);
    }

    /// Secret is above `guess`: it becomes the new lower bound.
    pub(crate) fn raise_low_to(&mut self, guess: i32) {
        self.low = guess;
        self.excluded.insert(guess);
    }

    /// Appends a resolved guess to the log.
    pub(crate) fn record(&mut self, entry: GuessLogEntry) {
        self.guessed.insert(entry.guess);
        self.log.push(entry);
    }
}

impl Default for RangeState {
    fn default() -> Self {
        Self::new()
    }
}
