//! Turn order: host skipping and the forced host turn.
//!
//! Non-host seats take turns clockwise. The host is skipped until every
//! other seat has had a shot at the current interval; the tracking set is
//! cleared whenever the interval narrows, so the host is only ever reached
//! after a full lap of misses against the same bounds.

use crate::action::RoundError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// A regular guess from the given seat.
    Normal(usize),
    /// Every other seat has guessed this interval; the host must move.
    HostForced,
    /// The round has a loser.
    RoundOver,
}

/// Seat bookkeeping for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    num_players: usize,
    current: usize,
    host: usize,
    guessed_this_sub_round: BTreeSet<usize>,
}

impl TurnState {
    /// Starts a round: the seat after the host moves first.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::InvalidPlayerCount` for an empty table and
    /// `RoundError::InvalidSeat` if the host is not seated.
    #[instrument]
    pub fn new(num_players: usize, host: usize) -> Result<Self, RoundError> {
        if num_players == 0 {
            return Err(RoundError::InvalidPlayerCount(num_players));
        }
        Self::with_current(num_players, host, (host + 1) % num_players)
    }

    /// Creates a turn state with an explicit current seat.
    #[instrument]
    pub fn with_current(
        num_players: usize,
        host: usize,
        current: usize,
    ) -> Result<Self, RoundError> {
        if num_players == 0 {
            return Err(RoundError::InvalidPlayerCount(num_players));
        }
        for seat in [host, current] {
            if seat >= num_players {
                return Err(RoundError::InvalidSeat(seat));
            }
        }
        Ok(Self {
            num_players,
            current,
            host,
            guessed_this_sub_round: BTreeSet::new(),
        })
    }

    /// Marks non-host seats as having already guessed this interval.
    pub fn with_guessed(mut self, seats: impl IntoIterator<Item = usize>) -> Self {
        let (host, n) = (self.host, self.num_players);
        self.guessed_this_sub_round
            .extend(seats.into_iter().filter(|&s| s != host && s < n));
        self
    }

    /// Number of seats at the table.
    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// Seat whose turn it is.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Seat holding the secret.
    pub fn host(&self) -> usize {
        self.host
    }

    /// Non-host seats that have guessed since the interval last changed.
    pub fn guessed_this_sub_round(&self) -> &BTreeSet<usize> {
        &self.guessed_this_sub_round
    }

    /// Seats other than the host.
    pub fn non_host_count(&self) -> usize {
        self.num_players.saturating_sub(1)
    }

    /// True once every non-host seat has guessed the current interval.
    pub fn all_non_hosts_guessed(&self) -> bool {
        self.guessed_this_sub_round.len() >= self.non_host_count()
    }

    /// True when the host is on the move because nobody else is left.
    pub fn is_forced_host_turn(&self) -> bool {
        self.num_players > 1 && self.current == self.host && self.all_non_hosts_guessed()
    }

    /// Phase of an unfinished round.
    pub fn phase(&self) -> TurnPhase {
        if self.is_forced_host_turn() {
            TurnPhase::HostForced
        } else {
            TurnPhase::Normal(self.current)
        }
    }

    /// Seats clockwise from the host (0 is the host itself).
    pub fn position_from_host(&self, seat: usize) -> usize {
        (seat + self.num_players - self.host % self.num_players) % self.num_players
    }

    /// Clockwise steps from `from` to `to`; a full lap when they coincide.
    pub fn steps_between(&self, from: usize, to: usize) -> usize {
        match (to + self.num_players - from) % self.num_players {
            0 => self.num_players,
            steps => steps,
        }
    }

    /// True if `seat` is passed strictly inside the clockwise walk `from -> to`.
    pub fn lies_between(&self, seat: usize, from: usize, to: usize) -> bool {
        let offset = (seat + self.num_players - from) % self.num_players;
        offset > 0 && offset < self.steps_between(from, to)
    }

    /// Notes that the current seat has tried the current interval.
    pub(crate) fn mark_current_guessed(&mut self) {
        if self.current != self.host {
            self.guessed_this_sub_round.insert(self.current);
        }
    }

    /// The interval changed: everyone gets a fresh shot at it.
    pub(crate) fn clear_sub_round(&mut self) {
        self.guessed_this_sub_round.clear();
    }

    /// Moves to the next seat, skipping the host unless the host is forced.
    #[instrument(skip(self), fields(current = self.current, host = self.host))]
    pub(crate) fn advance(&mut self) -> TurnPhase {
        if self.num_players <= 1 {
            self.current = self.host;
            return self.phase();
        }

        let candidate = (self.current + 1) % self.num_players;
        if candidate != self.host {
            self.current = candidate;
        } else if self.all_non_hosts_guessed() {
            debug!(host = self.host, "Every other seat has guessed, host is forced");
            self.current = self.host;
        } else {
            self.current = (self.host + 1) % self.num_players;
            debug!(next = self.current, "Skipping host");
        }
        self.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_left_of_host() {
        let turn = TurnState::new(4, 3).unwrap();
        assert_eq!(turn.current(), 0);
        assert_eq!(turn.phase(), TurnPhase::Normal(0));
    }

    #[test]
    fn test_rejects_unseated_host() {
        assert_eq!(TurnState::new(3, 3), Err(RoundError::InvalidSeat(3)));
        assert_eq!(TurnState::new(0, 0), Err(RoundError::InvalidPlayerCount(0)));
    }

    #[test]
    fn test_host_skipped_until_lap_complete() {
        // Host 0, seats 1 and 2 playing; only seat 2 has guessed.
        let mut turn = TurnState::with_current(3, 0, 2).unwrap().with_guessed([2]);
        assert_eq!(turn.advance(), TurnPhase::Normal(1));
    }

    #[test]
    fn test_host_forced_after_full_lap() {
        let mut turn = TurnState::with_current(3, 0, 2).unwrap().with_guessed([1, 2]);
        assert_eq!(turn.advance(), TurnPhase::HostForced);
        assert_eq!(turn.current(), 0);
        assert!(turn.is_forced_host_turn());
    }

    #[test]
    fn test_mark_ignores_host() {
        let mut turn = TurnState::with_current(3, 1, 1).unwrap();
        turn.mark_current_guessed();
        assert!(turn.guessed_this_sub_round().is_empty());
    }

    #[test]
    fn test_single_seat_stays_on_host() {
        let mut turn = TurnState::new(1, 0).unwrap();
        turn.advance();
        assert_eq!(turn.current(), 0);
    }

    #[test]
    fn test_position_from_host_wraps() {
        let turn = TurnState::new(5, 3).unwrap();
        assert_eq!(turn.position_from_host(3), 0);
        assert_eq!(turn.position_from_host(4), 1);
        assert_eq!(turn.position_from_host(0), 2);
        assert_eq!(turn.position_from_host(2), 4);
    }

    #[test]
    fn test_lies_between_is_circular() {
        let turn = TurnState::new(6, 0).unwrap();
        assert!(turn.lies_between(0, 4, 2));
        assert!(turn.lies_between(5, 4, 2));
        assert!(!turn.lies_between(3, 4, 2));
        assert!(!turn.lies_between(2, 4, 2));
        assert!(turn.lies_between(2, 1, 3));
        // A full lap passes every other seat.
        assert!(turn.lies_between(0, 1, 1));
        assert!(!turn.lies_between(1, 1, 1));
    }
}
