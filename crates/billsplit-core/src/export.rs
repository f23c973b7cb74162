//! # Text Export
//!
//! Plain-text bill summary, suitable for pasting into a chat.
//!
//! ```text
//! BILL SPLIT SUMMARY
//! ------------------
//! Date: 16/10/2026, 20:15:00
//!
//! ITEMS:
//! - Pizza Margherita: ₹450.00 (Shared by: Alice, Bob, Charlie)
//! - Garlic Bread: ₹150.00 (Shared by: Bob, Charlie)
//!
//! ------------------
//! TOTAL BILL: ₹630.00
//! ------------------
//!
//! SPLIT BREAKDOWN:
//! Alice: ₹157.50
//! ```
//!
//! The timestamp is passed in so rendering stays a pure function.

use std::fmt;

use chrono::NaiveDateTime;

use crate::currency::CurrencyFormat;
use crate::split::SplitResult;
use crate::types::{Item, Participant};

const RULE: &str = "------------------";

/// Format of the `Date:` line.
pub const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A bill summary ready to be written anywhere `Display` goes.
#[derive(Debug, Clone, Copy)]
pub struct BillSummary<'a> {
    pub items: &'a [Item],
    pub participants: &'a [Participant],
    pub result: &'a SplitResult,
    pub format: &'a CurrencyFormat,
    pub generated_at: NaiveDateTime,
}

impl BillSummary<'_> {
    /// Names of the item's owners, skipping ids that are not participants.
    fn owner_names(&self, item: &Item) -> Vec<&str> {
        item.owner_ids
            .iter()
            .filter_map(|id| self.participants.iter().find(|p| &p.id == id))
            .map(|p| p.name.as_str())
            .collect()
    }
}

impl fmt::Display for BillSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BILL SPLIT SUMMARY")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Date: {}", self.generated_at.format(DATE_FORMAT))?;
        writeln!(f)?;

        writeln!(f, "ITEMS:")?;
        for item in self.items {
            writeln!(
                f,
                "- {}: {} (Shared by: {})",
                item.title,
                self.format.format(item.price),
                self.owner_names(item).join(", ")
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "TOTAL BILL: {}", self.format.format(self.result.grand_total))?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;

        writeln!(f, "SPLIT BREAKDOWN:")?;
        for p in self.participants {
            writeln!(f, "{}: {}", p.name, self.format.format(self.result.total_for(&p.id)))?;
        }

        Ok(())
    }
}

/// Renders the bill summary.
///
/// Item prices are shown as entered (before tax and tip); the total and the
/// per-person lines come from `result`. Owner ids that are not participants
/// are left out of the "Shared by" list.
pub fn render_summary(
    items: &[Item],
    participants: &[Participant],
    result: &SplitResult,
    format: &CurrencyFormat,
    generated_at: NaiveDateTime,
) -> String {
    BillSummary {
        items,
        participants,
        result,
        format,
        generated_at,
    }
    .to_string()
}
