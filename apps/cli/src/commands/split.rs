//! # Split Command
//!
//! ```text
//! Alice: ₹217.50
//!   - Pizza Margherita: ₹157.50
//!   - Diet Coke: ₹60.00
//! Bob: ₹236.25
//!   ...
//!
//! Grand total: ₹690.00
//! ```

use billsplit_core::currency::CurrencyFormat;
use billsplit_core::{calculate_splits, Bill};

use crate::error::AppResult;

/// Computes the split and renders it as text, or as the raw result JSON.
pub fn split(bill: &Bill, format: &CurrencyFormat, json: bool) -> AppResult<String> {
    let result = calculate_splits(&bill.items, &bill.participants);

    if json {
        let mut out = serde_json::to_string_pretty(&result)?;
        out.push('\n');
        return Ok(out);
    }

    let mut lines = Vec::new();
    for p in &bill.participants {
        lines.push(format!("{}: {}", p.name, format.format(result.total_for(&p.id))));
        lines.extend(
            result
                .breakdown_for(&p.id)
                .iter()
                .map(|line| format!("  - {}: {}", line.item_name, format.format(line.amount))),
        );
    }
    if !bill.participants.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!("Grand total: {}", format.format(result.grand_total)));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use billsplit_core::session::BillSession;
    use billsplit_core::{Money, SplitResult};

    #[test]
    fn test_split_text() {
        let bill = BillSession::demo().into_bill();
        let out = split(&bill, &CurrencyFormat::default(), false).unwrap();

        assert!(out.starts_with(
            "Alice: ₹217.50\n  - Pizza Margherita: ₹157.50\n  - Diet Coke: ₹60.00\nBob: ₹236.25\n"
        ));
        assert!(out.contains("Charlie: ₹236.25\n"));
        assert!(out.ends_with("\nGrand total: ₹690.00\n"));
    }

    #[test]
    fn test_split_json() {
        let bill = BillSession::demo().into_bill();
        let out = split(&bill, &CurrencyFormat::default(), true).unwrap();

        let result: SplitResult = serde_json::from_str(&out).unwrap();
        assert_eq!(result.grand_total, Money::from_major(690));
        assert_eq!(result.total_for("p1"), "217.5".parse().unwrap());
    }

    #[test]
    fn test_split_empty_bill() {
        let out = split(&Bill::default(), &CurrencyFormat::default(), false).unwrap();
        assert_eq!(out, "Grand total: ₹0.00\n");
    }
}
