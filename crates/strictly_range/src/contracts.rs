//! Contract-based validation for round transitions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::{RoundError, Verdict};
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::round::Round;
use crate::validator::AdmissibleGuess;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), RoundError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), RoundError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: nobody has lost yet.
pub struct RoundOpen;

impl RoundOpen {
    /// Fails with `RoundError::RoundOver` once the round has a loser.
    pub fn check(round: &Round) -> Result<(), RoundError> {
        if round.is_over() {
            Err(RoundError::RoundOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: no guess is waiting for a verdict.
pub struct NothingPending;

impl NothingPending {
    /// Fails with `RoundError::GuessPending` if a guess is outstanding.
    pub fn check(round: &Round) -> Result<(), RoundError> {
        match round.pending() {
            Some(guess) => Err(RoundError::GuessPending(guess)),
            None => Ok(()),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Guess Contract
// ─────────────────────────────────────────────────────────────

/// Contract for submitting a guess.
///
/// Preconditions:
/// - Round is open
/// - No guess pending
/// - The guess is admissible
///
/// Postconditions:
/// - Interval and log untouched
pub struct GuessContract;

impl Contract<Round, i32> for GuessContract {
    #[instrument(skip(round))]
    fn pre(round: &Round, guess: &i32) -> Result<(), RoundError> {
        RoundOpen::check(round)?;
        NothingPending::check(round)?;
        AdmissibleGuess::check(round.range(), *guess)?;
        Ok(())
    }

    fn post(before: &Round, after: &Round) -> Result<(), RoundError> {
        if before.range() != after.range() {
            return Err(RoundError::InvariantViolation(
                "Submitting a guess changed the range".to_string(),
            ));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Verdict Contract
// ─────────────────────────────────────────────────────────────

/// Contract for applying a verdict.
///
/// Preconditions:
/// - Round is open
/// - A guess is pending
///
/// Postconditions:
/// - Exactly one log entry added
/// - Exclusions only grow
/// - Round invariants hold
pub struct VerdictContract;

impl Contract<Round, Verdict> for VerdictContract {
    #[instrument(skip(round))]
    fn pre(round: &Round, _verdict: &Verdict) -> Result<(), RoundError> {
        RoundOpen::check(round)?;
        if round.pending().is_none() {
            return Err(RoundError::NoPendingGuess);
        }
        Ok(())
    }

    fn post(before: &Round, after: &Round) -> Result<(), RoundError> {
        let mut problems = Vec::new();

        if after.range().log().len() != before.range().log().len() + 1 {
            problems.push("Log must grow by exactly one entry".to_string());
        }
        if !before
            .range()
            .excluded()
            .is_subset(after.range().excluded())
        {
            problems.push("Excluded boundaries shrank".to_string());
        }
        if let Err(violations) = RoundInvariants::check_all(after) {
            problems.extend(violations.into_iter().map(|v| v.description));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(RoundError::InvariantViolation(format!(
                "Postcondition failed: {}",
                problems.join("; ")
            )))
        }
    }
}
