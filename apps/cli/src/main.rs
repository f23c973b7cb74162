//! # BillSplit Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         billsplit (binary)                              │
//! │                                                                         │
//! │  main.rs ────► calls billsplit_cli::run()                               │
//! │  lib.rs ─────► logging, arguments, config, command dispatch             │
//! │  commands/ ──► split, settle, export, demo                              │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                          billsplit-core                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors bubble up as `anyhow::Error`; the process exits with status 1 and
//! the message on stderr.

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    billsplit_cli::run()
}
