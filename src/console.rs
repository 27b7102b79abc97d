//! Line-oriented console for running a game at the table.
//!
//! One person types for everyone: guesses as numbers, the host's answers as
//! `lower`/`higher`/`correct`, and the host's own move on a forced turn as
//! `higher`/`lower`/`exact`.

use derive_more::Display;
use std::io::{self, BufRead, Write};
use strictly_range::{
    Advice, FeedbackOutcome, Game, HostChoiceOutcome, HostIntent, RoundError, RoundResult,
    TurnPhase, Verdict,
};
use tracing::{debug, instrument, warn};

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Submit a guess for the player on the move.
    Guess(i32),
    /// The host's answer to the pending guess.
    Verdict(Verdict),
    /// The host's own move on a forced turn.
    Intent(HostIntent),
    /// Withdraw the pending guess.
    Clear,
    /// Print this round's guesses.
    History,
    /// Start the next round after a loss.
    Next,
    /// Start over from round 1.
    Reset,
    /// List the commands.
    Help,
    /// Leave.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CommandError {
    /// Nothing typed.
    #[display("Type a number or a command (help lists them)")]
    Empty,
    /// Unrecognised input.
    #[display("Unknown command: {}", _0)]
    Unknown(String),
    /// `exact` outside a forced host turn.
    #[display("Only the host can declare exact, and only on a forced turn")]
    ExactNotForced,
}

impl std::error::Error for CommandError {}

/// Parses one line. `host_choosing` is true on a forced host turn with no
/// guess pending, where `higher` and `lower` are the host's intent rather
/// than a verdict.
#[instrument]
pub fn parse_command(line: &str, host_choosing: bool) -> Result<Command, CommandError> {
    let token = line.trim();
    if token.is_empty() {
        return Err(CommandError::Empty);
    }
    if let Ok(n) = token.parse::<i32>() {
        return Ok(Command::Guess(n));
    }

    let lowered = token.to_ascii_lowercase();
    let command = match lowered.as_str() {
        "clear" => Command::Clear,
        "history" => Command::History,
        "next" => Command::Next,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ if host_choosing => match lowered.as_str() {
            "h" => Command::Intent(HostIntent::Higher),
            "l" => Command::Intent(HostIntent::Lower),
            "e" => Command::Intent(HostIntent::Exact),
            other => other
                .parse::<HostIntent>()
                .map(Command::Intent)
                .map_err(|_| CommandError::Unknown(token.to_string()))?,
        },
        "exact" | "e" => return Err(CommandError::ExactNotForced),
        other => other
            .parse::<Verdict>()
            .map(Command::Verdict)
            .map_err(|_| CommandError::Unknown(token.to_string()))?,
    };
    Ok(command)
}

const HELP: &str = "\
Commands:
  <number>                 guess for the player on the move
  lower | higher | correct the host's answer (also l, h, c)
  higher | lower | exact   the host's own move on a forced turn
  clear                    take back the pending guess
  history                  show this round's guesses, latest first
  next                     start the next round after a loss
  reset                    start over from round 1
  quit                     leave";

/// Whether the loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drives a [`Game`] from any line reader to any writer.
pub struct ConsoleSession<R, W> {
    game: Game,
    input: R,
    output: W,
    show_advice: bool,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    /// Creates a session with advice shown.
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
            show_advice: true,
        }
    }

    /// Shows or hides the advisor's recommendation.
    pub fn with_advice(mut self, show_advice: bool) -> Self {
        self.show_advice = show_advice;
        self
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The writer, for inspecting output.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the reader or writer. Game errors are
    /// printed and play continues.
    #[instrument(skip(self), fields(players = self.game.num_players()))]
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Guess the number between 1 and 100. Hit the secret and you lose.")?;
        writeln!(self.output, "Type help for commands.")?;
        let mut line = String::new();
        loop {
            self.render_status()?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }

            let round = self.game.round();
            let host_choosing = round.phase() == TurnPhase::HostForced && round.pending().is_none();
            match parse_command(&line, host_choosing) {
                Ok(command) => {
                    if self.execute(command)? == Flow::Quit {
                        break;
                    }
                }
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
        writeln!(self.output, "Thanks for playing.")?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<Flow> {
        debug!(?command, "Executing");
        match command {
            Command::Guess(n) => match self.game.submit_guess(n) {
                Ok(()) => writeln!(
                    self.output,
                    "Player {} guesses {}. Host: lower, higher or correct?",
                    self.game.round().turn().current() + 1,
                    n
                )?,
                Err(err) => self.report(&err)?,
            },
            Command::Verdict(verdict) => match self.game.apply_verdict(verdict) {
                Ok(applied) => self.announce(applied.outcome)?,
                Err(err) => self.report(&err)?,
            },
            Command::Intent(intent) => self.host_move(intent)?,
            Command::Clear => match self.game.withdraw_guess() {
                Some(n) => writeln!(self.output, "Withdrew {}.", n)?,
                None => writeln!(self.output, "No guess to clear.")?,
            },
            Command::History => self.history()?,
            Command::Next => match self.game.start_next_round() {
                Ok(()) => writeln!(self.output, "Round {} begins.", self.game.round().number())?,
                Err(err) => self.report(&err)?,
            },
            Command::Reset => match self.game.reset() {
                Ok(()) => writeln!(self.output, "Game reset.")?,
                Err(err) => self.report(&err)?,
            },
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn host_move(&mut self, intent: HostIntent) -> io::Result<()> {
        let outcome = match self.game.declare_host_intent(intent) {
            Ok(outcome) => outcome,
            Err(err) => return self.report(&err),
        };
        match outcome {
            HostChoiceOutcome::Submitted(n) => writeln!(
                self.output,
                "Host guesses {}. Host: lower, higher or correct?",
                n
            ),
            HostChoiceOutcome::Caught(applied) => self.announce(applied.outcome),
        }
    }

    fn announce(&mut self, outcome: FeedbackOutcome) -> io::Result<()> {
        match outcome {
            FeedbackOutcome::Continue(_) => {
                let range = self.game.round().range();
                match range.log().last() {
                    Some(entry) => writeln!(self.output, "{}", entry),
                    None => Ok(()),
                }
            }
            FeedbackOutcome::RoundOver(result) => self.announce_loser(&result),
        }
    }

    fn announce_loser(&mut self, result: &RoundResult) -> io::Result<()> {
        if result.declared_exact {
            writeln!(
                self.output,
                "The host was cornered and declared exact on {}. Player {} loses!",
                result.losing_guess,
                result.loser + 1
            )?;
        } else {
            writeln!(
                self.output,
                "Correct! {} was the secret. Player {} loses!",
                result.losing_guess,
                result.loser + 1
            )?;
        }
        writeln!(
            self.output,
            "Player {} hosts the next round. Type next to continue.",
            result.loser + 1
        )
    }

    fn history(&mut self) -> io::Result<()> {
        let log = self.game.round().range().log();
        if log.is_empty() {
            return writeln!(self.output, "No guesses yet this round.");
        }
        for entry in log.iter().rev() {
            writeln!(self.output, "{}", entry)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &RoundError) -> io::Result<()> {
        warn!(%err, "Command rejected");
        writeln!(self.output, "{}", err)
    }

    fn render_status(&mut self) -> io::Result<()> {
        let round = self.game.round();
        let turn = round.turn();
        let range = round.range();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Round {} | Host: Player {} | Range: {}-{}",
            round.number(),
            turn.host() + 1,
            range.low(),
            range.high()
        )?;

        if let Some(result) = round.result() {
            return writeln!(
                self.output,
                "Round over. Player {} lost. Type next or reset.",
                result.loser + 1
            );
        }
        if let Some(pending) = round.pending() {
            return writeln!(
                self.output,
                "Pending guess {}. Host: lower, higher or correct?",
                pending
            );
        }

        if turn.is_forced_host_turn() {
            writeln!(
                self.output,
                "Everyone has guessed. Player {} (host) must choose: higher, lower or exact.",
                turn.current() + 1
            )?;
        } else {
            writeln!(self.output, "Player {}'s turn.", turn.current() + 1)?;
        }

        if self.show_advice {
            match round.advice() {
                Ok(Advice::Guess(rec)) => writeln!(
                    self.output,
                    "Advice: {} ({})",
                    rec.label(),
                    rec.explanation()
                )?,
                Ok(Advice::HostChoice(rec)) => writeln!(
                    self.output,
                    "Advice: {} is closest to your secret's likely spot. {}",
                    rec.guess(),
                    rec.explanation()
                )?,
                Err(err) => writeln!(self.output, "No advice: {}", err)?,
            }
        }
        Ok(())
    }
}
