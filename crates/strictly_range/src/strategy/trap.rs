//! Trap play: leave a player across the table with exactly one slot.
//!
//! With `k` guesses due before the target's turn, guessing `low + k + 1`
//! leaves `k` slots below it. If the secret turns out to be down there, the
//! intermediate players use up `k - 1` of them and the target is left with
//! the last one. `high - k - 1` is the mirror image from above.

use super::{Recommendation, Strategy};
use crate::turn::TurnState;
use crate::types::RangeState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One candidate trap guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrapCandidate {
    /// The number to guess.
    pub guess: i32,
    /// Slots on the side of the guess away from the trap.
    pub complementary_slots: i32,
}

/// A viable trap: who it targets, how far away they are, and the guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapPlan {
    /// Seat the trap is set for.
    pub target: usize,
    /// Guesses (including this one) before the target moves.
    pub turns_until_target: usize,
    /// Every candidate that validated, low trap first.
    pub candidates: Vec<TrapCandidate>,
    /// The candidate with the larger complementary segment.
    pub chosen: TrapCandidate,
}

/// Seat roughly opposite the current player, never the host.
pub(super) fn target_seat(turn: &TurnState) -> usize {
    let n = turn.num_players();
    let target = (turn.current() + n / 2) % n;
    if target == turn.host() {
        (target + 1) % n
    } else {
        target
    }
}

/// Guesses due before `target` moves, counting the current one.
pub(super) fn turns_until(turn: &TurnState, target: usize) -> usize {
    let n = turn.num_players();
    let mut k = turn.steps_between(turn.current(), target);
    // The host is walked past without taking a turn unless forced.
    if turn.lies_between(turn.host(), turn.current(), target) && !turn.all_non_hosts_guessed() {
        k = k.saturating_sub(1);
    }
    k.clamp(1, n.saturating_sub(1).max(1))
}

/// Works out the trap for this turn, or `None` if neither candidate is free.
pub(super) fn plan(range: &RangeState, turn: &TurnState) -> Option<TrapPlan> {
    let target = target_seat(turn);
    let k = turns_until(turn, target);
    let offset = i32::try_from(k).ok()? + 1;
    let (low, high) = (range.low(), range.high());

    let below = low + offset;
    let above = high - offset;

    let mut candidates = Vec::with_capacity(2);
    if range.is_valid_guess(below) {
        candidates.push(TrapCandidate {
            guess: below,
            complementary_slots: high - below - 2,
        });
    }
    if above != below && range.is_valid_guess(above) {
        candidates.push(TrapCandidate {
            guess: above,
            complementary_slots: above - low - 2,
        });
    }

    let chosen = match candidates.as_slice() {
        [] => {
            debug!(target, k, below, above, "No trap candidate is free");
            return None;
        }
        [only] => *only,
        [first, second, ..] => {
            if first.complementary_slots >= second.complementary_slots {
                *first
            } else {
                *second
            }
        }
    };

    Some(TrapPlan {
        target,
        turns_until_target: k,
        candidates,
        chosen,
    })
}

/// Trap recommendation, or `None` so the caller can fall back.
pub(super) fn recommend(range: &RangeState, turn: &TurnState) -> Option<Recommendation> {
    let plan = plan(range, turn)?;
    Some(Recommendation::new(
        plan.chosen.guess,
        Strategy::Trap,
        format!(
            "Setting trap for Player {} with {} slots for intermediates.",
            plan.target + 1,
            plan.turns_until_target - 1
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_skips_host() {
        // Four seats, current 2: opposite is 0, which is the host.
        let turn = TurnState::with_current(4, 0, 2).unwrap();
        assert_eq!(target_seat(&turn), 1);
    }

    #[test]
    fn test_host_skip_reduces_distance() {
        // Five seats, host 3, current 2 -> target 4, host sits in between.
        let turn = TurnState::with_current(5, 3, 2).unwrap();
        assert_eq!(target_seat(&turn), 4);
        assert_eq!(turns_until(&turn, 4), 1);
    }

    #[test]
    fn test_host_counts_once_everyone_guessed() {
        let turn = TurnState::with_current(5, 3, 2)
            .unwrap()
            .with_guessed([0, 1, 2, 4]);
        assert_eq!(turns_until(&turn, 4), 2);
    }

    #[test]
    fn test_wrapping_host_between() {
        // Six seats, host 0, current 4 -> target 1, path 4 -> 5 -> 0 -> 1.
        let turn = TurnState::with_current(6, 0, 4).unwrap();
        assert_eq!(target_seat(&turn), 1);
        assert_eq!(turns_until(&turn, 1), 2);
    }

    #[test]
    fn test_two_players_clamped() {
        let turn = TurnState::new(2, 0).unwrap();
        let target = target_seat(&turn);
        assert_eq!(target, 1);
        assert_eq!(turns_until(&turn, target), 1);
    }

    #[test]
    fn test_no_candidate_is_not_viable() {
        let turn = TurnState::new(2, 0).unwrap();
        // k = 1, so the traps are low + 2 and high - 2.
        let range = RangeState::narrowed(10, 20).unwrap().with_excluded([12, 18]);
        assert!(plan(&range, &turn).is_none());
    }

    #[test]
    fn test_equal_complements_prefer_low_trap() {
        let turn = TurnState::new(2, 0).unwrap();
        let range = RangeState::narrowed(10, 20).unwrap();
        let plan = plan(&range, &turn).unwrap();
        assert_eq!(plan.candidates.len(), 2);
        assert_eq!(plan.chosen.guess, 12);
        assert_eq!(plan.chosen.complementary_slots, 6);
    }

    #[test]
    fn test_single_candidate_taken() {
        let turn = TurnState::new(2, 0).unwrap();
        let range = RangeState::narrowed(10, 20).unwrap().with_excluded([12]);
        let plan = plan(&range, &turn).unwrap();
        assert_eq!(plan.candidates.len(), 1);
        assert_eq!(plan.chosen.guess, 18);
    }
}
