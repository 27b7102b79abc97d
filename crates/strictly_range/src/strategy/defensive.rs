//! Defensive play: guess next to a boundary, where the secret is least likely.

use super::{Recommendation, Strategy, aggressive};
use crate::action::RoundError;
use crate::types::RangeState;

const NEAR_UPPER: &str = "Playing it safe near the upper boundary.";
const NEAR_LOWER: &str = "Playing it safe near the lower boundary.";

/// Prefers `low + 1` or `high - 1`, then the free number closest to either
/// bound, then bisection.
pub(super) fn recommend(range: &RangeState) -> Result<Recommendation, RoundError> {
    let lower_option = range.low() + 1;
    let upper_option = range.high() - 1;

    match (
        range.is_valid_guess(lower_option),
        range.is_valid_guess(upper_option),
    ) {
        (true, true) => {
            // Follow the table: if guesses have skewed high, stay high.
            let (above, below) = guess_skew(range);
            if above >= below {
                Ok(Recommendation::new(upper_option, Strategy::Defensive, NEAR_UPPER))
            } else {
                Ok(Recommendation::new(lower_option, Strategy::Defensive, NEAR_LOWER))
            }
        }
        (true, false) => Ok(Recommendation::new(
            lower_option,
            Strategy::Defensive,
            NEAR_LOWER,
        )),
        (false, true) => Ok(Recommendation::new(
            upper_option,
            Strategy::Defensive,
            NEAR_UPPER,
        )),
        (false, false) => match closest_to_boundary(range) {
            Some(guess) => Ok(Recommendation::new(
                guess,
                Strategy::Defensive,
                "Playing it safe near a boundary.",
            )),
            None => aggressive::recommend(range),
        },
    }
}

/// Counts logged guesses above and below the exact midpoint of the interval.
fn guess_skew(range: &RangeState) -> (usize, usize) {
    // Compare doubled values so a half-integer midpoint stays exact.
    let doubled_mid = range.low() + range.high();
    range.log().iter().fold((0, 0), |(above, below), entry| {
        let doubled = entry.guess * 2;
        if doubled > doubled_mid {
            (above + 1, below)
        } else if doubled < doubled_mid {
            (above, below + 1)
        } else {
            (above, below)
        }
    })
}

/// Free number with the smallest distance to its nearest bound; the lowest
/// such number wins ties.
fn closest_to_boundary(range: &RangeState) -> Option<i32> {
    let (low, high) = (range.low(), range.high());
    range
        .valid_guesses()
        .into_iter()
        .fold(None, |best: Option<(i32, i32)>, n| {
            let distance = (n - low).min(high - n);
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((n, distance)),
            }
        })
        .map(|(n, _)| n)
}
