//! One-shot advice for an arbitrary table position.

use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_range::{
    Advice, MAX_PLAYERS, MIN_PLAYERS, RangeState, RoundError, StrategyAdvisor, TrapPlan, TurnState,
};
use tracing::{info, instrument};

/// A table position described from the outside.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Position {
    low: i32,
    high: i32,
    num_players: usize,
    host: usize,
    current: Option<usize>,
    excluded: Vec<i32>,
    guessed_seats: Vec<usize>,
}

/// What the advisor says about a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceReport {
    /// Lower bound.
    pub low: i32,
    /// Upper bound.
    pub high: i32,
    /// Admissible guesses left.
    pub valid_guesses: usize,
    /// Seat on the move.
    pub current_player: usize,
    /// True if the host has to move.
    pub is_forced_host_turn: bool,
    /// The recommendation.
    pub advice: Advice,
    /// The trap the advisor would set, when one exists.
    pub trap: Option<TrapPlan>,
}

impl Position {
    /// Runs the advisor on this position.
    ///
    /// # Errors
    ///
    /// Returns an error for an impossible position or when no guess is left.
    #[instrument(skip(self), fields(low = self.low, high = self.high))]
    pub fn advise(&self) -> Result<AdviceReport, RoundError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(RoundError::InvalidPlayerCount(self.num_players));
        }
        let range = RangeState::narrowed(self.low, self.high)?
            .with_excluded(self.excluded.iter().copied());
        let current = self.current.unwrap_or((self.host + 1) % self.num_players);
        let turn = TurnState::with_current(self.num_players, self.host, current)?
            .with_guessed(self.guessed_seats.iter().copied());

        let advice = StrategyAdvisor::advise(&range, &turn)?;
        let trap = if advice.is_host_choice() {
            None
        } else {
            StrategyAdvisor::trap_plan(&range, &turn)
        };
        info!(guess = advice.recommendation().guess(), "Advice ready");

        Ok(AdviceReport {
            low: range.low(),
            high: range.high(),
            valid_guesses: range.valid_guesses().len(),
            current_player: turn.current(),
            is_forced_host_turn: turn.is_forced_host_turn(),
            advice,
            trap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_range::Strategy;

    #[test]
    fn test_defaults_to_seat_after_host() {
        let report = Position::new(1, 100, 4, 3, None, vec![], vec![])
            .advise()
            .unwrap();
        assert_eq!(report.current_player, 0);
        assert_eq!(report.valid_guesses, 98);
        assert_eq!(report.advice.recommendation().strategy(), Strategy::Aggressive);
    }

    #[test]
    fn test_forced_host_position() {
        let report = Position::new(1, 50, 2, 0, Some(0), vec![], vec![1])
            .advise()
            .unwrap();
        assert!(report.is_forced_host_turn);
        assert!(report.advice.is_host_choice());
        assert!(report.trap.is_none());
    }

    #[test]
    fn test_rejects_bad_table() {
        let position = Position::new(1, 100, 11, 0, None, vec![], vec![]);
        assert_eq!(position.advise(), Err(RoundError::InvalidPlayerCount(11)));
        let position = Position::new(60, 40, 3, 0, None, vec![], vec![]);
        assert!(position.advise().is_err());
    }
}
