//! # Validation Module
//!
//! Input validation for bill session mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (form)                                             │
//! │  └── Immediate feedback ("Name is required")                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: BillSession (Rust)                                           │
//! │  └── THIS MODULE: rejects bad input before it enters the lists         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: calculate_splits                                             │
//! │  └── No validation at all: degrades anything odd to zero               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use billsplit_core::validation::{validate_participant_name, validate_payment_handle};
//!
//! assert!(validate_participant_name("Alice").is_ok());
//! assert!(validate_payment_handle("alice@okaxis").is_ok());
//! assert!(validate_payment_handle("alice").is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Percentage;
use crate::{MAX_ITEM_TITLE_LEN, MAX_NAME_LEN, MAX_PERCENTAGE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_label(value: &str, field: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a participant's display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 50 characters
pub fn validate_participant_name(name: &str) -> ValidationResult<()> {
    validate_label(name, "name", MAX_NAME_LEN)
}

/// Validates an item title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 100 characters
pub fn validate_item_title(title: &str) -> ValidationResult<()> {
    validate_label(title, "item name", MAX_ITEM_TITLE_LEN)
}

/// Validates a UPI payment handle (`user@provider`).
///
/// ## Rules
/// - Exactly one `@` with text on both sides
/// - No whitespace
/// - Otherwise only letters, digits, `.`, `_` and `-`, so the handle can go
///   into a `upi://` link as is
///
/// ## Example
/// ```rust
/// use billsplit_core::validation::validate_payment_handle;
///
/// assert!(validate_payment_handle("bob@okicici").is_ok());
/// assert!(validate_payment_handle("@okicici").is_err());
/// assert!(validate_payment_handle("bob smith@okicici").is_err());
/// ```
pub fn validate_payment_handle(handle: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "upi".to_string(),
        reason: reason.to_string(),
    };

    if handle.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (user, provider) = match handle.split_once('@') {
        Some((user, provider))
            if !user.is_empty() && !provider.is_empty() && !provider.contains('@') =>
        {
            (user, provider)
        }
        _ => return Err(invalid("expected the form name@provider")),
    };

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    if !user.chars().all(allowed) || !provider.chars().all(allowed) {
        return Err(invalid("only letters, digits, '.', '_' and '-' are allowed"));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item price.
///
/// ## Rules
/// - Must be strictly positive; free items are not worth splitting
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Items: Add Item                                                        │
/// │                                                                         │
/// │  User enters price: 0                                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_price(0) ← THIS FUNCTION                                      │
/// │       │                                                                 │
/// │       ├── price <= 0? → Error: "price must be positive"                 │
/// │       │                                                                 │
/// │       └── OK → Item added                                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax or tip percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
pub fn validate_percentage(field: &str, pct: Percentage) -> ValidationResult<()> {
    if pct.value() < Decimal::ZERO || pct.value() > Decimal::from(MAX_PERCENTAGE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PERCENTAGE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_participant_name() {
        assert!(validate_participant_name("Alice").is_ok());
        assert!(validate_participant_name("  Bob ").is_ok());

        assert!(validate_participant_name("").is_err());
        assert!(validate_participant_name("   ").is_err());
        assert!(validate_participant_name(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_name_counts_chars_not_bytes() {
        // 50 Devanagari characters are well over 50 bytes
        assert!(validate_participant_name(&"अ".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_item_title() {
        assert!(validate_item_title("Pizza Margherita").is_ok());
        let err = validate_item_title("").unwrap_err();
        assert_eq!(err.to_string(), "item name is required");
        assert!(validate_item_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_payment_handle() {
        assert!(validate_payment_handle("alice@upi").is_ok());
        assert!(validate_payment_handle("bob.99@okicici").is_ok());

        assert!(validate_payment_handle("alice").is_err());
        assert!(validate_payment_handle("alice@").is_err());
        assert!(validate_payment_handle("@upi").is_err());
        assert!(validate_payment_handle("a@b@c").is_err());
        assert!(validate_payment_handle("a b@upi").is_err());
        assert!(validate_payment_handle("x@y&am=1").is_err());
        assert!(validate_payment_handle("x?pn=Eve@upi").is_err());
        assert!(validate_payment_handle("first_last-1@ok.bank").is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_major(450)).is_ok());
        assert!(validate_price("0.01".parse().unwrap()).is_ok());

        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_major(-1)).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage("tax", Percentage::zero()).is_ok());
        assert!(validate_percentage("tax", Percentage::from_whole(18)).is_ok());
        assert!(validate_percentage("tip", Percentage::from_whole(100)).is_ok());

        assert!(validate_percentage("tip", Percentage::from_whole(101)).is_err());
        assert!(validate_percentage("tax", Percentage::new(Decimal::from(-1))).is_err());
    }
}
