//! # billsplit-core: Pure Bill-Splitting Logic
//!
//! This crate is the **heart** of BillSplit. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BillSplit Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front ends (browser UI, `billsplit` CLI)           │   │
//! │  │    Participants ──► Items ──► Summary ──► Pay / Export          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Bill { participants, items }          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ billsplit-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌────────────────┐  │   │
//! │  │   │  types   │ │  split   │ │  session   │ │  settlement    │  │   │
//! │  │   │  money   │ │ calculate│ │ add/remove │ │  UPI requests  │  │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └────────────────┘  │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐                     │   │
//! │  │   │ currency │ │  export  │ │ validation │                     │   │
//! │  │   └──────────┘ └──────────┘ └────────────┘                     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Participant, Item, Percentage, Bill)
//! - [`money`] - Full-precision decimal Money
//! - [`split`] - The split calculator
//! - [`session`] - Add/remove operations on a bill
//! - [`settlement`] - Payee selection and payment requests
//! - [`currency`] - Display formatting
//! - [`export`] - Plain-text summary
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same bill in, same split out
//! 2. **No I/O**: the caller owns files, clocks and terminals
//! 3. **Round Once**: amounts keep full precision until they are displayed
//! 4. **Never Fail on Math**: odd input degrades to zero, not to an error
//!
//! ## Example Usage
//!
//! ```rust
//! use billsplit_core::session::BillSession;
//! use billsplit_core::currency::CurrencyFormat;
//!
//! let session = BillSession::demo();
//! let splits = session.splits();
//!
//! let inr = CurrencyFormat::default();
//! assert_eq!(inr.format(splits.total_for("p2")), "₹236.25");
//! assert_eq!(inr.format(splits.grand_total), "₹690.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod export;
pub mod money;
pub mod session;
pub mod settlement;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use split::{calculate_splits, ParticipantSplit, ShareLine, SplitResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum participants on one bill.
pub const MAX_PARTICIPANTS: usize = 50;

/// Maximum items on one bill.
pub const MAX_ITEMS: usize = 200;

/// Maximum characters in a participant name.
pub const MAX_NAME_LEN: usize = 50;

/// Maximum characters in an item title.
pub const MAX_ITEM_TITLE_LEN: usize = 100;

/// Upper bound for tax and tip percentages entered through a session.
pub const MAX_PERCENTAGE: i64 = 100;
