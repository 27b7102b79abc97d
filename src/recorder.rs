//! Telemetry recorders: game observers that persist or log every event.
//!
//! Recorders never fail the game. Write errors are logged and dropped.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use strictly_range::{GameObserver, GameSnapshot, GuessRecord, RoundResult};
use tracing::{debug, info, instrument, warn};

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A guess was resolved.
    Guess(GuessRecord),
    /// A round got its loser.
    RoundEnd(RoundResult),
}

/// One line of the telemetry file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct RecordedEvent {
    /// When the event was written.
    timestamp: DateTime<Utc>,
    /// Recorder session that wrote it.
    session_id: String,
    /// The event itself.
    #[serde(flatten)]
    event: TelemetryEvent,
}

/// Appends one JSON object per event to a file.
#[derive(Debug)]
pub struct JsonLinesRecorder {
    path: PathBuf,
    session_id: String,
    writer: BufWriter<File>,
}

impl JsonLinesRecorder {
    /// Opens `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError` if the file cannot be opened.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn create(path: impl AsRef<Path>) -> Result<Self, RecorderError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| RecorderError::new(format!("Failed to open {}: {}", path.display(), e)))?;
        let session_id = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
        info!(%session_id, "Recording telemetry");
        Ok(Self {
            path,
            session_id,
            writer: BufWriter::new(file),
        })
    }

    /// Replaces the generated session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// File being written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Id stamped on every line from this recorder.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn append(&mut self, event: TelemetryEvent) {
        let line = RecordedEvent::new(Utc::now(), self.session_id.clone(), event);
        if let Err(e) = self.write_line(&line) {
            warn!(error = %e, path = %self.path.display(), "Dropping telemetry event");
        }
    }

    fn write_line(&mut self, line: &RecordedEvent) -> Result<(), RecorderError> {
        let json = serde_json::to_string(line)
            .map_err(|e| RecorderError::new(format!("Failed to encode event: {}", e)))?;
        writeln!(self.writer, "{}", json)
            .and_then(|()| self.writer.flush())
            .map_err(|e| RecorderError::new(format!("Failed to write event: {}", e)))?;
        debug!("Telemetry event written");
        Ok(())
    }
}

impl GameObserver for JsonLinesRecorder {
    fn on_guess(&mut self, record: &GuessRecord) {
        self.append(TelemetryEvent::Guess(record.clone()));
    }

    fn on_round_end(&mut self, result: &RoundResult) {
        self.append(TelemetryEvent::RoundEnd(*result));
    }
}

/// Emits every event as structured tracing fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecorder;

impl GameObserver for TracingRecorder {
    fn on_snapshot(&mut self, snapshot: &GameSnapshot) {
        debug!(
            round = snapshot.round(),
            current = snapshot.current_player(),
            host = snapshot.host_player(),
            low = snapshot.low(),
            high = snapshot.high(),
            forced = snapshot.is_forced_host_turn(),
            recommended = ?snapshot.recommended_guess(),
            "Snapshot"
        );
    }

    fn on_guess(&mut self, record: &GuessRecord) {
        info!(
            round = record.round,
            player = record.player,
            turn = record.turn_in_round,
            guess = record.guess,
            verdict = %record.verdict,
            low = record.low,
            high = record.high,
            range_size = record.range_size,
            position_from_host = record.position_from_host,
            forced = record.is_forced_turn,
            "Guess resolved"
        );
    }

    fn on_round_end(&mut self, result: &RoundResult) {
        info!(
            round = result.round,
            loser = result.loser,
            losing_guess = result.losing_guess,
            declared_exact = result.declared_exact,
            "Round ended"
        );
    }
}

/// Telemetry error.
#[derive(Debug, Clone, Display, Error)]
#[display("Recorder error: {} at {}:{}", message, file, line)]
pub struct RecorderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RecorderError {
    /// Creates a new recorder error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
