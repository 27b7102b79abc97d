//! Bounds invariant: the interval is well formed and its bounds are spent.

use super::Invariant;
use crate::round::Round;
use crate::types::{CEILING, FLOOR};

/// Invariant: `1 <= low < high <= 100`, and both current bounds as well as
/// the opening bounds sit in the exclusion set.
pub struct BoundsExcludedInvariant;

impl Invariant<Round> for BoundsExcludedInvariant {
    fn holds(round: &Round) -> bool {
        let range = round.range();
        let (low, high) = (range.low(), range.high());
        let excluded = range.excluded();

        FLOOR <= low
            && low < high
            && high <= CEILING
            && [FLOOR, CEILING, low, high]
                .iter()
                .all(|bound| excluded.contains(bound))
    }

    fn description() -> &'static str {
        "Interval is ordered within 1-100 and every bound is excluded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Verdict;

    #[test]
    fn test_new_round_holds() {
        let round = Round::new(1, 3, 0).unwrap();
        assert!(BoundsExcludedInvariant::holds(&round));
    }

    #[test]
    fn test_holds_after_narrowing() {
        let mut round = Round::new(1, 3, 0).unwrap();
        round.submit_guess(70).unwrap();
        round.apply_verdict(Verdict::Lower).unwrap();
        round.submit_guess(10).unwrap();
        round.apply_verdict(Verdict::Higher).unwrap();
        assert!(BoundsExcludedInvariant::holds(&round));
        assert_eq!(round.range().excluded().len(), 4);
    }
}
