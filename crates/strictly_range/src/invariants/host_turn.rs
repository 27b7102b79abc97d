//! Host turn invariant: the host only moves when forced.

use super::Invariant;
use crate::round::Round;

/// Invariant: while the round is open, the host is on the move only if
/// every non-host seat has guessed the current interval. The host itself is
/// never counted among those seats.
pub struct HostTurnInvariant;

impl Invariant<Round> for HostTurnInvariant {
    fn holds(round: &Round) -> bool {
        let turn = round.turn();
        if turn.guessed_this_sub_round().contains(&turn.host()) {
            return false;
        }
        if round.is_over() || turn.num_players() <= 1 {
            return true;
        }
        turn.current() != turn.host() || turn.all_non_hosts_guessed()
    }

    fn description() -> &'static str {
        "Host moves only after every other seat has guessed the interval"
    }
}
