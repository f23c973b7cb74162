//! # App Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in BillSplit CLI                          │
//! │                                                                         │
//! │  Command Function → Result<T, AppError>                                 │
//! │         │                                                               │
//! │         ├── bill file missing?  ── std::io::Error ──────┐              │
//! │         ├── bill file garbled?  ── serde_json::Error ───┤              │
//! │         ├── bad config?         ── ConfigError ─────────┼─► AppError   │
//! │         ├── unknown payee?      ── CoreError ───────────┘      │       │
//! │         │                                                      ▼       │
//! │         └── Success                                 main: anyhow → exit 1
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use billsplit_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced to the terminal user.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bill file could not be read.
    #[error("Cannot read bill file {path}: {source}")]
    ReadBill {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bill file is not valid bill JSON.
    #[error("Invalid bill file {path}: {source}")]
    ParseBill {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be serialized.
    #[error("Cannot serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Business rule violation from billsplit-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The bill has nobody on it to settle with.
    #[error("Bill has no participants")]
    EmptyBill,
}

/// Convenience alias for command results.
pub type AppResult<T> = Result<T, AppError>;
