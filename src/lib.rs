//! Strictly Party - console host for the narrowing-range guessing game
//!
//! Wraps the `strictly_range` game logic with everything needed to run it
//! at a real table.
//!
//! # Architecture
//!
//! - **Config**: TOML party settings with command-line overrides
//! - **Console**: line-oriented play over any reader and writer
//! - **Recorders**: JSON-lines and tracing telemetry observers
//! - **Advise**: one-shot recommendations for an arbitrary position

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod advise;
mod config;
mod console;
mod recorder;

// Crate-level exports - Configuration
pub use config::{CONFIG_ENV_VAR, ConfigError, PartyConfig, resolve_path};

// Crate-level exports - Console
pub use console::{Command, CommandError, ConsoleSession, parse_command};

// Crate-level exports - Telemetry
pub use recorder::{
    JsonLinesRecorder, RecordedEvent, RecorderError, TelemetryEvent, TracingRecorder,
};

// Crate-level exports - Advice
pub use advise::{AdviceReport, Position};
