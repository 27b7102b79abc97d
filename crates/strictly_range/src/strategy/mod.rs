//! Guess recommendation.
//!
//! The advisor picks a strategy from the number of slots left in the
//! interval:
//!
//! | slots   | strategy                                   |
//! |---------|--------------------------------------------|
//! | 0       | none, the round cannot continue            |
//! | 1       | forced                                     |
//! | 2..=5   | defensive (hug a boundary)                 |
//! | 6..=20  | trap (corner a player across the table)    |
//! | 21..    | aggressive (bisect)                        |
//!
//! On a forced host turn the advisor hands over to
//! [`HostForcedChoiceResolver`](crate::HostForcedChoiceResolver).

mod aggressive;
mod defensive;
mod trap;

pub use aggressive::nearest_valid_to;
pub use trap::{TrapCandidate, TrapPlan};

use crate::action::RoundError;
use crate::host_choice::HostForcedChoiceResolver;
use crate::turn::TurnState;
use crate::types::RangeState;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, instrument};

/// Largest slot count played defensively.
pub const DEFENSIVE_MAX_SLOTS: i32 = 5;

/// Largest slot count where a trap is attempted.
pub const TRAP_MAX_SLOTS: i32 = 20;

/// Which heuristic produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Strategy {
    /// Only one number is left.
    Forced,
    /// Stay next to a boundary.
    Defensive,
    /// Leave a chosen opponent exactly one slot.
    Trap,
    /// Bisection at (or within a tenth of the width of) the midpoint.
    Aggressive,
    /// Bisection pushed away from the midpoint by used numbers.
    #[strum(to_string = "Semi-Aggressive")]
    SemiAggressive,
    /// Nothing near the middle was free; lowest free number.
    Fallback,
    /// The host's own pick on a forced turn.
    #[strum(to_string = "Host Forced")]
    HostForced,
}

/// A concrete number to guess, with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    guess: i32,
    strategy: Strategy,
    explanation: String,
}

impl Recommendation {
    /// Creates a recommendation.
    pub fn new(guess: i32, strategy: Strategy, explanation: impl Into<String>) -> Self {
        Self {
            guess,
            strategy,
            explanation: explanation.into(),
        }
    }

    /// The recommended number.
    pub fn guess(&self) -> i32 {
        self.guess
    }

    /// The heuristic that chose it.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// One-line reasoning for display.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Display label such as `"Defensive: 13"`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Prepends a note to the explanation.
    pub(crate) fn prefixed(mut self, note: &str) -> Self {
        self.explanation = format!("{note}{}", self.explanation);
        self
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.strategy, self.guess)
    }
}

/// What the advisor tells the player on the move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advice {
    /// A regular guess.
    Guess(Recommendation),
    /// The host is forced; the recommendation is the number closest to the
    /// estimated secret, and the host should pick higher, lower, or exact.
    HostChoice(Recommendation),
}

impl Advice {
    /// The recommendation regardless of kind.
    pub fn recommendation(&self) -> &Recommendation {
        match self {
            Advice::Guess(rec) | Advice::HostChoice(rec) => rec,
        }
    }

    /// True if this is the host's forced turn.
    pub fn is_host_choice(&self) -> bool {
        matches!(self, Advice::HostChoice(_))
    }
}

/// Picks a strategy by range size and produces a recommendation.
pub struct StrategyAdvisor;

impl StrategyAdvisor {
    /// Advice for whoever is on the move.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoValidGuess` if nothing can be guessed.
    #[instrument(
        skip(range, turn),
        fields(low = range.low(), high = range.high(), current = turn.current())
    )]
    pub fn advise(range: &RangeState, turn: &TurnState) -> Result<Advice, RoundError> {
        if turn.is_forced_host_turn() {
            let suggested = HostForcedChoiceResolver::suggest(range)?;
            debug!(suggested, "Host forced turn");
            return Ok(Advice::HostChoice(Recommendation::new(
                suggested,
                Strategy::HostForced,
                "Choose the closest number to your secret.",
            )));
        }
        Self::recommend(range, turn).map(Advice::Guess)
    }

    /// Recommendation for a regular (non-forced) turn.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoValidGuess` if nothing can be guessed.
    #[instrument(skip(range, turn), fields(slots = range.slots()))]
    pub fn recommend(range: &RangeState, turn: &TurnState) -> Result<Recommendation, RoundError> {
        let slots = range.slots();
        let rec = if slots <= 0 {
            return Err(RoundError::NoValidGuess);
        } else if slots == 1 {
            Recommendation::new(range.low() + 1, Strategy::Forced, "Only one possible guess.")
        } else if slots <= DEFENSIVE_MAX_SLOTS {
            defensive::recommend(range)?
        } else if slots <= TRAP_MAX_SLOTS {
            match trap::recommend(range, turn) {
                Some(rec) => rec,
                None => defensive::recommend(range)?.prefixed("Trap not viable. "),
            }
        } else {
            aggressive::recommend(range)?
        };
        debug!(guess = rec.guess(), strategy = %rec.strategy(), "Recommendation");
        Ok(rec)
    }

    /// The trap the advisor would set this turn, if one exists.
    pub fn trap_plan(range: &RangeState, turn: &TurnState) -> Option<TrapPlan> {
        trap::plan(range, turn)
    }
}
