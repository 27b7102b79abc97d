//! Game session: the active round, rollover, reset, and observers.

use crate::action::{HostIntent, RoundError, Verdict};
use crate::round::{AppliedFeedback, FeedbackOutcome, HostChoiceOutcome, Round, RoundResult};
use crate::snapshot::{GameSnapshot, GuessRecord};
use crate::strategy::Advice;
use crate::types::{MAX_PLAYERS, MIN_PLAYERS};
use tracing::{debug, info, instrument};

/// Receives plain values after every transition.
///
/// Every method defaults to a no-op, so observers implement only what they
/// care about. Observers cannot fail the game.
pub trait GameObserver {
    /// Called with the state after every transition.
    fn on_snapshot(&mut self, _snapshot: &GameSnapshot) {}

    /// Called once per resolved guess.
    fn on_guess(&mut self, _record: &GuessRecord) {}

    /// Called when a round gets a loser.
    fn on_round_end(&mut self, _result: &RoundResult) {}
}

/// A party of players across any number of rounds.
pub struct Game {
    num_players: usize,
    round: Round,
    observers: Vec<Box<dyn GameObserver>>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("num_players", &self.num_players)
            .field("round", &self.round)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Game {
    /// Starts round 1 with seat 0 hosting.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::InvalidPlayerCount` outside 2 to 10 players.
    #[instrument]
    pub fn new(num_players: usize) -> Result<Self, RoundError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(RoundError::InvalidPlayerCount(num_players));
        }
        let round = Round::new(1, num_players, 0)?;
        info!(num_players, "Game started");
        Ok(Self {
            num_players,
            round,
            observers: Vec::new(),
        })
    }

    /// Registers an observer (builder form).
    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    /// Registers an observer.
    pub fn add_observer(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Seats at the table.
    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// The active round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Current state as plain values.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.round)
    }

    /// Advice for whoever is on the move.
    ///
    /// # Errors
    ///
    /// See [`Round::advice`].
    pub fn advice(&self) -> Result<Advice, RoundError> {
        self.round.advice()
    }

    /// Submits a guess for the current seat.
    ///
    /// # Errors
    ///
    /// See [`Round::submit_guess`]. Nothing changes on error.
    pub fn submit_guess(&mut self, guess: i32) -> Result<(), RoundError> {
        self.round.submit_guess(guess)?;
        self.emit_snapshot();
        Ok(())
    }

    /// Takes back a pending guess.
    pub fn withdraw_guess(&mut self) -> Option<i32> {
        let withdrawn = self.round.withdraw_guess();
        if withdrawn.is_some() {
            self.emit_snapshot();
        }
        withdrawn
    }

    /// Applies the host's verdict to the pending guess.
    ///
    /// # Errors
    ///
    /// See [`Round::apply_verdict`].
    pub fn apply_verdict(&mut self, verdict: Verdict) -> Result<AppliedFeedback, RoundError> {
        let applied = self.round.apply_verdict(verdict)?;
        self.emit_feedback(&applied);
        Ok(applied)
    }

    /// Resolves the host's intent on a forced turn.
    ///
    /// # Errors
    ///
    /// See [`Round::declare_host_intent`].
    pub fn declare_host_intent(
        &mut self,
        intent: HostIntent,
    ) -> Result<HostChoiceOutcome, RoundError> {
        let outcome = self.round.declare_host_intent(intent)?;
        match &outcome {
            HostChoiceOutcome::Submitted(_) => self.emit_snapshot(),
            HostChoiceOutcome::Caught(applied) => self.emit_feedback(applied),
        }
        Ok(outcome)
    }

    /// Opens the next round with the previous loser hosting.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::RoundInProgress` if nobody has lost yet.
    #[instrument(skip(self), fields(round = self.round.number()))]
    pub fn start_next_round(&mut self) -> Result<(), RoundError> {
        self.round = self.round.next()?;
        self.emit_snapshot();
        Ok(())
    }

    /// Back to round 1 with seat 0 hosting. Observers stay registered.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), RoundError> {
        self.round = Round::new(1, self.num_players, 0)?;
        info!("Game reset");
        self.emit_snapshot();
        Ok(())
    }

    fn emit_feedback(&mut self, applied: &AppliedFeedback) {
        for observer in &mut self.observers {
            observer.on_guess(&applied.record);
        }
        if let FeedbackOutcome::RoundOver(result) = &applied.outcome {
            for observer in &mut self.observers {
                observer.on_round_end(result);
            }
        }
        self.emit_snapshot();
    }

    fn emit_snapshot(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = GameSnapshot::capture(&self.round);
        debug!(observers = self.observers.len(), "Emitting snapshot");
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counts {
        snapshots: usize,
        guesses: usize,
        round_ends: usize,
    }

    struct Counting(Rc<RefCell<Counts>>);

    impl GameObserver for Counting {
        fn on_snapshot(&mut self, _snapshot: &GameSnapshot) {
            self.0.borrow_mut().snapshots += 1;
        }

        fn on_guess(&mut self, _record: &GuessRecord) {
            self.0.borrow_mut().guesses += 1;
        }

        fn on_round_end(&mut self, _result: &RoundResult) {
            self.0.borrow_mut().round_ends += 1;
        }
    }

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(Game::new(1).unwrap_err(), RoundError::InvalidPlayerCount(1));
        assert_eq!(Game::new(11).unwrap_err(), RoundError::InvalidPlayerCount(11));
        assert!(Game::new(2).is_ok());
        assert!(Game::new(10).is_ok());
    }

    #[test]
    fn test_observers_see_every_transition() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut game = Game::new(3).unwrap().with_observer(Counting(Rc::clone(&counts)));

        game.submit_guess(50).unwrap();
        game.apply_verdict(Verdict::Lower).unwrap();
        game.submit_guess(20).unwrap();
        game.apply_verdict(Verdict::Correct).unwrap();
        game.start_next_round().unwrap();

        let counts = counts.borrow();
        assert_eq!(counts.guesses, 2);
        assert_eq!(counts.round_ends, 1);
        assert_eq!(counts.snapshots, 5);
    }

    #[test]
    fn test_rejected_guess_emits_nothing() {
        let counts = Rc::new(RefCell::new(Counts::default()));
        let mut game = Game::new(2).unwrap().with_observer(Counting(Rc::clone(&counts)));
        assert!(game.submit_guess(1).is_err());
        assert_eq!(counts.borrow().snapshots, 0);
    }

    #[test]
    fn test_reset_restores_first_round() {
        let mut game = Game::new(4).unwrap();
        game.submit_guess(30).unwrap();
        game.apply_verdict(Verdict::Correct).unwrap();
        game.start_next_round().unwrap();
        assert_eq!(game.round().turn().host(), 1);

        game.reset().unwrap();
        assert_eq!(game.round().number(), 1);
        assert_eq!(game.round().turn().host(), 0);
        assert_eq!(game.round().turn().current(), 1);
        assert!(game.round().range().log().is_empty());
    }
}
