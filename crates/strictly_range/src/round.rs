//! Round controller: guesses in, verdicts applied, turns advanced.
//!
//! A guess is submitted first and held as pending until the host's verdict
//! arrives. Applying the verdict consumes the pending guess, so the same
//! verdict can never be applied twice.

use crate::action::{HostIntent, RoundError, Verdict};
use crate::contracts::{Contract, GuessContract, VerdictContract};
use crate::host_choice::HostForcedChoiceResolver;
use crate::snapshot::GuessRecord;
use crate::strategy::{Advice, StrategyAdvisor};
use crate::turn::{TurnPhase, TurnState};
use crate::types::{GuessLogEntry, RangeState};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number (1-based).
    pub round: u32,
    /// Seat that lost and hosts the next round.
    pub loser: usize,
    /// The number that ended the round.
    pub losing_guess: i32,
    /// True if the host declared "exact" on a forced turn.
    pub declared_exact: bool,
}

/// Where the round stands after a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackOutcome {
    /// Play continues with the given phase.
    Continue(TurnPhase),
    /// Somebody lost.
    RoundOver(RoundResult),
}

/// A resolved guess: what the persistence layer logs, and what happens next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFeedback {
    /// Context of the guess as it was made.
    pub record: GuessRecord,
    /// The round after the verdict.
    pub outcome: FeedbackOutcome,
}

/// Result of a host intent on a forced turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostChoiceOutcome {
    /// The host revealed a number; it now waits for a verdict like any guess.
    Submitted(i32),
    /// The host declared "exact" and lost.
    Caught(AppliedFeedback),
}

/// One round: the interval, the log, and the seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    number: u32,
    range: RangeState,
    turn: TurnState,
    pending: Option<i32>,
    result: Option<RoundResult>,
}

impl Round {
    /// Opens a round on `(1, 100)` with the seat after the host to move.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is empty or the host is not seated.
    #[instrument]
    pub fn new(number: u32, num_players: usize, host: usize) -> Result<Self, RoundError> {
        let turn = TurnState::new(num_players, host)?;
        info!(round = number, host, first = turn.current(), "Round opened");
        Ok(Self::from_parts(number, RangeState::new(), turn))
    }

    /// Resumes a round from an existing interval and seating.
    pub fn from_parts(number: u32, range: RangeState, turn: TurnState) -> Self {
        Self {
            number,
            range,
            turn,
            pending: None,
            result: None,
        }
    }

    /// Round number (1-based).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// The interval and log.
    pub fn range(&self) -> &RangeState {
        &self.range
    }

    /// The seats.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Guess waiting for the host's verdict.
    pub fn pending(&self) -> Option<i32> {
        self.pending
    }

    /// How the round ended, once it has.
    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// True once somebody has lost.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Whose move it is.
    pub fn phase(&self) -> TurnPhase {
        if self.is_over() {
            TurnPhase::RoundOver
        } else {
            self.turn.phase()
        }
    }

    /// Advice for whoever is on the move.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::RoundOver` after the round ends and
    /// `RoundError::NoValidGuess` if nothing can be guessed.
    pub fn advice(&self) -> Result<Advice, RoundError> {
        if self.is_over() {
            return Err(RoundError::RoundOver);
        }
        StrategyAdvisor::advise(&self.range, &self.turn)
    }

    /// Submits a guess for the current seat.
    ///
    /// # Errors
    ///
    /// Rejects the guess without changing anything if it is not admissible,
    /// another guess is pending, or the round is over.
    #[instrument(skip(self), fields(round = self.number, seat = self.turn.current()))]
    pub fn submit_guess(&mut self, guess: i32) -> Result<(), RoundError> {
        if let Err(err) = GuessContract::pre(self, &guess) {
            warn!(%err, "Guess rejected");
            return Err(err);
        }
        #[cfg(debug_assertions)]
        let before = self.clone();

        self.pending = Some(guess);

        #[cfg(debug_assertions)]
        GuessContract::post(&before, self)?;
        debug!("Guess waiting for verdict");
        Ok(())
    }

    /// Takes back a pending guess before the host answers.
    pub fn withdraw_guess(&mut self) -> Option<i32> {
        self.pending.take()
    }

    /// Applies the host's verdict to the pending guess.
    ///
    /// `Lower` and `Higher` move the matching bound to the guess and give
    /// every seat a fresh shot; `Correct` ends the round with the current
    /// seat as loser.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NoPendingGuess` if nothing was submitted and
    /// `RoundError::RoundOver` after the round ends.
    #[instrument(skip(self), fields(round = self.number, seat = self.turn.current()))]
    pub fn apply_verdict(&mut self, verdict: Verdict) -> Result<AppliedFeedback, RoundError> {
        VerdictContract::pre(self, &verdict)?;
        let guess = self.pending.take().ok_or(RoundError::NoPendingGuess)?;
        self.resolve(guess, verdict, false)
    }

    /// Resolves the host's intent on a forced turn.
    ///
    /// `Higher` and `Lower` pick a number and submit it as the pending guess;
    /// the host then answers it with a verdict like any other guess.
    /// `Exact` ends the round with the host as loser, whatever the number.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::NotHostForcedTurn` outside a forced host turn and
    /// `RoundError::NoValidGuess` if nothing can be guessed.
    #[instrument(skip(self), fields(round = self.number, host = self.turn.host()))]
    pub fn declare_host_intent(
        &mut self,
        intent: HostIntent,
    ) -> Result<HostChoiceOutcome, RoundError> {
        if self.is_over() {
            return Err(RoundError::RoundOver);
        }
        if !self.turn.is_forced_host_turn() {
            return Err(RoundError::NotHostForcedTurn);
        }
        if let Some(pending) = self.pending {
            return Err(RoundError::GuessPending(pending));
        }

        let pick = HostForcedChoiceResolver::resolve(&self.range, intent)?;
        match intent {
            HostIntent::Higher | HostIntent::Lower => {
                self.submit_guess(pick)?;
                Ok(HostChoiceOutcome::Submitted(pick))
            }
            HostIntent::Exact => {
                info!(pick, "Host declared exact");
                self.resolve(pick, Verdict::Correct, true)
                    .map(HostChoiceOutcome::Caught)
            }
        }
    }

    /// Opens the following round with the loser as host.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::RoundInProgress` if nobody has lost yet.
    pub fn next(&self) -> Result<Round, RoundError> {
        let result = self.result.ok_or(RoundError::RoundInProgress)?;
        Round::new(self.number + 1, self.turn.num_players(), result.loser)
    }

    /// Context for the persistence layer, captured before the verdict lands.
    fn guess_record(&self, guess: i32, verdict: Verdict) -> GuessRecord {
        let (low, high) = (self.range.low(), self.range.high());
        let range_size = self.range.slots();
        GuessRecord {
            player: self.turn.current(),
            round: self.number,
            turn_in_round: self.range.log().len() + 1,
            low,
            high,
            range_size,
            position_from_host: self.turn.position_from_host(self.turn.current()),
            players_count: self.turn.num_players(),
            is_forced_turn: self.turn.is_forced_host_turn(),
            prior_guesses: self.range.log().iter().map(|entry| entry.guess).collect(),
            guess,
            verdict,
            relative_position_in_range: (range_size > 0)
                .then(|| f64::from(guess - low) / f64::from(high - low)),
        }
    }

    fn resolve(
        &mut self,
        guess: i32,
        verdict: Verdict,
        declared_exact: bool,
    ) -> Result<AppliedFeedback, RoundError> {
        #[cfg(debug_assertions)]
        let before = self.clone();

        let record = self.guess_record(guess, verdict);
        let seat = self.turn.current();
        let (previous_low, previous_high) = (self.range.low(), self.range.high());

        match verdict {
            Verdict::Lower => {
                self.range.lower_high_to(guess);
                self.turn.clear_sub_round();
            }
            Verdict::Higher => {
                self.range.raise_low_to(guess);
                self.turn.clear_sub_round();
            }
            Verdict::Correct => {}
        }

        self.range.record(GuessLogEntry {
            player: seat,
            guess,
            previous_low,
            previous_high,
            new_low: self.range.low(),
            new_high: self.range.high(),
            was_correct: verdict.ends_round(),
        });

        let outcome = if verdict.ends_round() {
            let result = RoundResult {
                round: self.number,
                loser: seat,
                losing_guess: guess,
                declared_exact,
            };
            info!(round = self.number, loser = seat, guess, declared_exact, "Round over");
            self.result = Some(result);
            FeedbackOutcome::RoundOver(result)
        } else {
            self.turn.mark_current_guessed();
            let phase = self.turn.advance();
            debug!(
                low = self.range.low(),
                high = self.range.high(),
                next = self.turn.current(),
                "Range narrowed"
            );
            FeedbackOutcome::Continue(phase)
        };

        #[cfg(debug_assertions)]
        VerdictContract::post(&before, self)?;

        Ok(AppliedFeedback { record, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_without_guess_rejected() {
        let mut round = Round::new(1, 3, 0).unwrap();
        assert_eq!(
            round.apply_verdict(Verdict::Lower),
            Err(RoundError::NoPendingGuess)
        );
    }

    #[test]
    fn test_second_submit_rejected_while_pending() {
        let mut round = Round::new(1, 3, 0).unwrap();
        round.submit_guess(50).unwrap();
        assert_eq!(round.submit_guess(40), Err(RoundError::GuessPending(50)));
        assert_eq!(round.withdraw_guess(), Some(50));
        assert!(round.submit_guess(40).is_ok());
    }

    #[test]
    fn test_invalid_guess_leaves_round_untouched() {
        let mut round = Round::new(1, 3, 0).unwrap();
        let before = round.clone();
        assert!(matches!(
            round.submit_guess(100),
            Err(RoundError::InvalidGuess(_))
        ));
        assert_eq!(round, before);
    }

    #[test]
    fn test_higher_raises_low() {
        let mut round = Round::new(1, 3, 0).unwrap();
        round.submit_guess(30).unwrap();
        let applied = round.apply_verdict(Verdict::Higher).unwrap();
        assert_eq!(round.range().low(), 30);
        assert!(round.range().excluded().contains(&30));
        assert_eq!(applied.outcome, FeedbackOutcome::Continue(TurnPhase::Normal(2)));
        assert_eq!(applied.record.low, 1);
        assert_eq!(applied.record.high, 100);
        assert_eq!(applied.record.range_size, 98);
    }

    #[test]
    fn test_verdict_applies_once() {
        let mut round = Round::new(1, 3, 0).unwrap();
        round.submit_guess(30).unwrap();
        round.apply_verdict(Verdict::Higher).unwrap();
        assert_eq!(
            round.apply_verdict(Verdict::Higher),
            Err(RoundError::NoPendingGuess)
        );
        assert_eq!(round.range().log().len(), 1);
    }

    #[test]
    fn test_correct_ends_round() {
        let mut round = Round::new(1, 3, 0).unwrap();
        round.submit_guess(42).unwrap();
        let applied = round.apply_verdict(Verdict::Correct).unwrap();
        let FeedbackOutcome::RoundOver(result) = applied.outcome else {
            panic!("expected round over");
        };
        assert_eq!(result.loser, 1);
        assert!(!result.declared_exact);
        assert_eq!(round.phase(), TurnPhase::RoundOver);
        assert!(round.range().log()[0].was_correct);
        assert_eq!(round.submit_guess(10), Err(RoundError::RoundOver));
        assert_eq!(round.advice(), Err(RoundError::RoundOver));
    }

    #[test]
    fn test_host_intent_outside_forced_turn() {
        let mut round = Round::new(1, 3, 0).unwrap();
        assert_eq!(
            round.declare_host_intent(HostIntent::Exact),
            Err(RoundError::NotHostForcedTurn)
        );
    }

    #[test]
    fn test_record_relative_position() {
        let mut round = Round::new(1, 3, 0).unwrap();
        round.submit_guess(50).unwrap();
        let applied = round.apply_verdict(Verdict::Lower).unwrap();
        assert_eq!(applied.record.range_size, 98);
        assert_eq!(applied.record.relative_position_in_range, Some(49.0 / 99.0));
    }

    #[test]
    fn test_record_without_slots_has_no_relative_position() {
        let range = RangeState::narrowed(41, 42).unwrap();
        let round = Round::from_parts(1, range, TurnState::new(3, 0).unwrap());
        let record = round.guess_record(41, Verdict::Correct);
        assert_eq!(record.range_size, 0);
        assert_eq!(record.relative_position_in_range, None);
    }

    #[test]
    fn test_next_requires_loser() {
        let round = Round::new(1, 3, 0).unwrap();
        assert_eq!(round.next(), Err(RoundError::RoundInProgress));
    }
}
