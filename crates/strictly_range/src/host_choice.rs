//! The host's own move on a forced turn.
//!
//! The host knows the secret but has to reveal a number anyway. They either
//! say the secret is higher or lower than a number they pick, or declare
//! "exact" and take the loss. The resolver turns that intent into a number,
//! working from an estimate of where the table thinks the secret is.

use crate::action::{HostIntent, RoundError};
use crate::types::{CEILING, FLOOR, RangeState};
use tracing::{debug, instrument};

/// How much more one boundary must have moved (as a fraction of the
/// opening span) before the estimate leans away from it.
const MOVEMENT_MARGIN: f64 = 0.1;

/// Estimate position when leaning toward the upper bound.
const UPPER_LEAN: f64 = 0.7;

/// Estimate position when leaning toward the lower bound.
const LOWER_LEAN: f64 = 0.3;

/// Resolves a host intent into a concrete number.
pub struct HostForcedChoiceResolver;

impl HostForcedChoiceResolver {
    /// Where the secret probably sits, judged by how the bounds have moved.
    ///
    /// Defaults to the midpoint. After two or more guesses, if the lower
    /// bound has travelled noticeably further from 1 than the upper bound
    /// has from 100, the secret is assumed to sit high in the interval, and
    /// the other way round.
    #[instrument(skip(range), fields(low = range.low(), high = range.high()))]
    pub fn estimate_secret(range: &RangeState) -> i32 {
        let (low, high) = (range.low(), range.high());
        let midpoint = range.midpoint();
        if range.log().len() < 2 {
            return midpoint;
        }

        let span = f64::from(CEILING - FLOOR);
        let lower_movement = f64::from(low - FLOOR) / span;
        let upper_movement = f64::from(CEILING - high) / span;
        let width = f64::from(high - low);

        let estimate = if lower_movement > upper_movement + MOVEMENT_MARGIN {
            (f64::from(low) + width * UPPER_LEAN).floor() as i32
        } else if upper_movement > lower_movement + MOVEMENT_MARGIN {
            (f64::from(low) + width * LOWER_LEAN).floor() as i32
        } else {
            midpoint
        };
        debug!(lower_movement, upper_movement, estimate, "Estimated secret");
        estimate
    }

    /// The number the host reveals for the given intent.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoValidGuess` if nothing can be guessed.
    #[instrument(skip(range), fields(low = range.low(), high = range.high()))]
    pub fn resolve(range: &RangeState, intent: HostIntent) -> Result<i32, RoundError> {
        let valid = range.valid_guesses();
        let (Some(&min), Some(&max)) = (valid.first(), valid.last()) else {
            return Err(RoundError::NoValidGuess);
        };
        let estimate = Self::estimate_secret(range);

        let pick = match intent {
            HostIntent::Higher => valid.iter().copied().find(|&n| n > estimate).unwrap_or(max),
            HostIntent::Lower => valid
                .iter()
                .rev()
                .copied()
                .find(|&n| n < estimate)
                .unwrap_or(min),
            HostIntent::Exact => closest(&valid, estimate).unwrap_or(min),
        };
        debug!(%intent, estimate, pick, "Host choice resolved");
        Ok(pick)
    }

    /// The free number closest to the estimate, shown to the host as advice.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoValidGuess` if nothing can be guessed.
    pub fn suggest(range: &RangeState) -> Result<i32, RoundError> {
        Self::resolve(range, HostIntent::Exact)
    }
}

/// Minimum distance to `target`; the first (lowest) value wins ties.
fn closest(values: &[i32], target: i32) -> Option<i32> {
    values
        .iter()
        .copied()
        .fold(None, |best: Option<i32>, n| match best {
            Some(b) if (b - target).abs() <= (n - target).abs() => Some(b),
            _ => Some(n),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GuessLogEntry;

    fn with_history(low: i32, high: i32, guesses: &[i32]) -> RangeState {
        let mut range = RangeState::narrowed(low, high).unwrap();
        for &guess in guesses {
            range.record(GuessLogEntry {
                player: 1,
                guess,
                previous_low: low,
                previous_high: high,
                new_low: low,
                new_high: high,
                was_correct: false,
            });
        }
        range
    }

    #[test]
    fn test_estimate_defaults_to_midpoint() {
        let range = with_history(60, 90, &[60]);
        assert_eq!(HostForcedChoiceResolver::estimate_secret(&range), 75);
    }

    #[test]
    fn test_estimate_leans_high_when_low_moved() {
        // Low moved 59/99, high moved 10/99.
        let range = with_history(60, 90, &[60, 90]);
        assert_eq!(HostForcedChoiceResolver::estimate_secret(&range), 81);
    }

    #[test]
    fn test_estimate_leans_low_when_high_moved() {
        let range = with_history(5, 40, &[5, 40]);
        assert_eq!(HostForcedChoiceResolver::estimate_secret(&range), 15);
    }

    #[test]
    fn test_higher_takes_next_above_estimate() {
        let range = RangeState::narrowed(20, 30).unwrap().with_excluded([26]);
        assert_eq!(
            HostForcedChoiceResolver::resolve(&range, HostIntent::Higher),
            Ok(27)
        );
    }

    #[test]
    fn test_lower_takes_next_below_estimate() {
        let range = RangeState::narrowed(20, 30).unwrap().with_excluded([24]);
        assert_eq!(
            HostForcedChoiceResolver::resolve(&range, HostIntent::Lower),
            Ok(23)
        );
    }

    #[test]
    fn test_falls_back_to_extremes() {
        // Only 21 is free and the estimate is 25.
        let range = RangeState::narrowed(20, 30)
            .unwrap()
            .with_excluded(22..=29);
        assert_eq!(
            HostForcedChoiceResolver::resolve(&range, HostIntent::Higher),
            Ok(21)
        );
        assert_eq!(
            HostForcedChoiceResolver::resolve(&range, HostIntent::Lower),
            Ok(21)
        );
    }

    #[test]
    fn test_exact_tie_takes_lower() {
        let range = RangeState::narrowed(20, 30).unwrap().with_excluded([25]);
        assert_eq!(
            HostForcedChoiceResolver::resolve(&range, HostIntent::Exact),
            Ok(24)
        );
    }

    #[test]
    fn test_empty_range_fails() {
        let range = RangeState::narrowed(20, 21).unwrap();
        assert_eq!(
            HostForcedChoiceResolver::resolve(&range, HostIntent::Exact),
            Err(RoundError::NoValidGuess)
        );
    }
}
