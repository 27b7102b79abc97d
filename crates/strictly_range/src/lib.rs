//! Strictly Range - pure logic for the narrowing-range party game
//!
//! One player (the host) picks a secret between 1 and 100. The others take
//! turns guessing; the host answers lower, higher, or correct, and the
//! interval shrinks. Whoever hits the secret loses and hosts the next round.
//!
//! # Architecture
//!
//! - **Range**: interval bounds, spent boundaries, and the guess log
//! - **Turns**: seat rotation with host skip and forced host turns
//! - **Strategy**: defensive, trap, and aggressive recommendations
//! - **Host choice**: resolving higher / lower / exact on a forced turn
//! - **Round**: guess, verdict, advance, and rollover under contracts
//! - **Game**: the session around rounds, with observers for telemetry
//!
//! # Example
//!
//! ```
//! use strictly_range::{Game, Verdict};
//!
//! # fn example() -> Result<(), strictly_range::RoundError> {
//! let mut game = Game::new(3)?;
//! let advice = game.advice()?;
//! game.submit_guess(advice.recommendation().guess())?;
//! game.apply_verdict(Verdict::Lower)?;
//! assert_eq!(game.round().range().high(), 50);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod game;
mod host_choice;
mod invariants;
mod round;
mod snapshot;
mod strategy;
mod turn;
mod types;
mod validator;

// Crate-level exports - Actions and errors
pub use action::{GuessError, HostIntent, RoundError, Verdict};

// Crate-level exports - Range and turns
pub use turn::{TurnPhase, TurnState};
pub use types::{CEILING, FLOOR, GuessLogEntry, MAX_PLAYERS, MIN_PLAYERS, RangeState};
pub use validator::AdmissibleGuess;

// Crate-level exports - Strategy
pub use host_choice::HostForcedChoiceResolver;
pub use strategy::{
    Advice, DEFENSIVE_MAX_SLOTS, Recommendation, Strategy, StrategyAdvisor, TRAP_MAX_SLOTS,
    TrapCandidate, TrapPlan, nearest_valid_to,
};

// Crate-level exports - Rounds and sessions
pub use game::{Game, GameObserver};
pub use round::{AppliedFeedback, FeedbackOutcome, HostChoiceOutcome, Round, RoundResult};
pub use snapshot::{GameSnapshot, GuessRecord};

// Crate-level exports - Verification
pub use contracts::{Contract, GuessContract, NothingPending, RoundOpen, VerdictContract};
pub use invariants::{
    BoundsExcludedInvariant, HostTurnInvariant, Invariant, InvariantSet, InvariantViolation,
    LogChainInvariant, RoundInvariants,
};
