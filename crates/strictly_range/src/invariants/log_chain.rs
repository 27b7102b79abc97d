//! Log chain invariant: every entry picks up where the previous one ended.

use super::Invariant;
use crate::round::Round;

/// Invariant: each log entry's previous bounds equal the prior entry's new
/// bounds, the last entry's new bounds are the current interval, and only
/// the final entry can be a correct guess.
pub struct LogChainInvariant;

impl Invariant<Round> for LogChainInvariant {
    fn holds(round: &Round) -> bool {
        let range = round.range();
        let log = range.log();

        let chained = log.windows(2).all(|pair| {
            pair[0].new_low == pair[1].previous_low
                && pair[0].new_high == pair[1].previous_high
                && !pair[0].was_correct
        });
        let current = log
            .last()
            .is_none_or(|last| last.new_low == range.low() && last.new_high == range.high());

        chained && current
    }

    fn description() -> &'static str {
        "Guess log forms an unbroken chain ending at the current interval"
    }
}
