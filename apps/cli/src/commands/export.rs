//! # Export Command
//!
//! Thin wrapper over `billsplit_core::export`; the timestamp comes from the
//! caller.

use billsplit_core::currency::CurrencyFormat;
use billsplit_core::export::render_summary;
use billsplit_core::{calculate_splits, Bill};
use chrono::NaiveDateTime;

/// Renders the shareable text summary of a bill.
pub fn export(bill: &Bill, format: &CurrencyFormat, generated_at: NaiveDateTime) -> String {
    let result = calculate_splits(&bill.items, &bill.participants);
    render_summary(&bill.items, &bill.participants, &result, format, generated_at)
}
