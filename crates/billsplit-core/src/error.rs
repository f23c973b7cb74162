//! # Error Types
//!
//! Domain-specific error types for billsplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  billsplit-core errors (this file)                                     │
//! │  ├── CoreError        - Session / settlement failures                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  └── AppError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that the split calculator itself has no error type at all: every
//! degenerate bill resolves to zero contributions. Errors only arise when a
//! caller tries to *mutate* a session with bad input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Session and settlement errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Participant id is not part of the session.
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    /// Item id is not part of the session.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// An item was added before anyone joined the bill.
    ///
    /// ## When This Occurs
    /// ```text
    /// add_item(owners: [])      ← "Everyone" selected
    ///      │
    ///      ▼
    /// participants.is_empty()
    ///      │
    ///      ▼
    /// NoParticipants            ← UI shows "Add at least one friend first"
    /// ```
    #[error("Add at least one participant first")]
    NoParticipants,

    /// The requested payee is not a participant.
    #[error("Payee not found: {0}")]
    PayeeNotFound(String),

    /// Rejected input; the message names the offending field.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejected participant or item input.
///
/// Checked before a session mutation, so the lists never hold a blank name
/// or a zero price.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Blank name or title.
    #[error("{field} is required")]
    Required { field: String },

    /// Name or title over the character limit.
    #[error("{field} is longer than {max} characters")]
    TooLong { field: String, max: usize },

    /// Tax/tip percentage or a list size outside its bounds.
    #[error("{field} must be from {min} to {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Zero or negative price.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Malformed payment handle.
    #[error("{field} is not valid: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of a session or settlement operation.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
