//! The admissibility predicate every guess path goes through.

use crate::action::GuessError;
use crate::types::RangeState;

/// Precondition: a number may be guessed right now.
///
/// Holds iff `low < n < high`, nobody has guessed `n` this round, and `n`
/// has never been a boundary. Submission, every strategy, and the host
/// resolver all ask this one check.
pub struct AdmissibleGuess;

impl AdmissibleGuess {
    /// Checks the guess and reports the first rule it breaks.
    ///
    /// Rules are checked in order: outside the bounds, equal to a bound,
    /// already guessed, previously a boundary.
    pub fn check(range: &RangeState, guess: i32) -> Result<(), GuessError> {
        let (low, high) = (range.low(), range.high());
        if guess < low || guess > high {
            return Err(GuessError::OutOfRange { guess, low, high });
        }
        if guess == low || guess == high {
            return Err(GuessError::Boundary(guess));
        }
        if range.was_guessed(guess) {
            return Err(GuessError::AlreadyGuessed(guess));
        }
        if range.excluded().contains(&guess) {
            return Err(GuessError::Excluded(guess));
        }
        Ok(())
    }

    /// True if the guess passes [`AdmissibleGuess::check`].
    pub fn holds(range: &RangeState, guess: i32) -> bool {
        Self::check(range, guess).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GuessLogEntry;

    #[test]
    fn test_bounds_never_admissible() {
        for (low, high) in [(1, 100), (10, 14), (49, 51), (1, 2)] {
            let range = RangeState::narrowed(low, high).unwrap();
            assert!(!AdmissibleGuess::holds(&range, low));
            assert!(!AdmissibleGuess::holds(&range, high));
        }
    }

    #[test]
    fn test_reports_reason_in_order() {
        let mut range = RangeState::narrowed(10, 40).unwrap().with_excluded([20]);
        range.record(GuessLogEntry {
            player: 1,
            guess: 30,
            previous_low: 10,
            previous_high: 40,
            new_low: 10,
            new_high: 40,
            was_correct: false,
        });

        assert_eq!(
            AdmissibleGuess::check(&range, 5),
            Err(GuessError::OutOfRange {
                guess: 5,
                low: 10,
                high: 40
            })
        );
        assert_eq!(
            AdmissibleGuess::check(&range, 40),
            Err(GuessError::Boundary(40))
        );
        assert_eq!(
            AdmissibleGuess::check(&range, 30),
            Err(GuessError::AlreadyGuessed(30))
        );
        assert_eq!(
            AdmissibleGuess::check(&range, 20),
            Err(GuessError::Excluded(20))
        );
        assert_eq!(AdmissibleGuess::check(&range, 25), Ok(()));
    }
}
