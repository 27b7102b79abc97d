//! Aggressive play: bisect the interval for maximum information.

use super::{Recommendation, Strategy};
use crate::action::RoundError;
use crate::types::RangeState;

/// Deviation from the midpoint (as a fraction of the width) still counted as
/// a true bisection.
const BISECTION_TOLERANCE: f64 = 0.1;

/// Free number nearest `target`, checking `target - d` before `target + d`
/// at each distance `d`, without leaving the open interval.
pub fn nearest_valid_to(range: &RangeState, target: i32) -> Option<i32> {
    if range.is_valid_guess(target) {
        return Some(target);
    }
    let (low, high) = (range.low(), range.high());
    (1..(high - low)).find_map(|offset| {
        let below = target - offset;
        let above = target + offset;
        if below > low && range.is_valid_guess(below) {
            Some(below)
        } else if above < high && range.is_valid_guess(above) {
            Some(above)
        } else {
            None
        }
    })
}

/// Midpoint guess, labelled by how far used numbers pushed it off center.
pub(super) fn recommend(range: &RangeState) -> Result<Recommendation, RoundError> {
    let ideal = range.midpoint();

    if let Some(guess) = nearest_valid_to(range, ideal) {
        let deviation = f64::from((guess - ideal).abs()) / f64::from(range.high() - range.low());
        return Ok(if deviation <= BISECTION_TOLERANCE {
            Recommendation::new(
                guess,
                Strategy::Aggressive,
                "Cutting the range in half for maximum information gain.",
            )
        } else {
            Recommendation::new(
                guess,
                Strategy::SemiAggressive,
                "Approximating a bisection strategy with available numbers.",
            )
        });
    }

    range
        .valid_guesses()
        .first()
        .map(|&guess| {
            Recommendation::new(
                guess,
                Strategy::Fallback,
                "No ideal guess available - this is the safest option.",
            )
        })
        .ok_or(RoundError::NoValidGuess)
}
