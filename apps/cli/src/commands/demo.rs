//! # Demo Command
//!
//! Prints the sample dinner bill, a starting point for a real bill file:
//!
//! ```text
//! billsplit demo > dinner.json
//! ```

use billsplit_core::session::BillSession;

use crate::error::AppResult;

/// Serializes the demo bill as pretty JSON.
pub fn demo() -> AppResult<String> {
    let mut out = serde_json::to_string_pretty(BillSession::demo().bill())?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use billsplit_core::Bill;

    #[test]
    fn test_demo_reloads() {
        let bill: Bill = serde_json::from_str(&demo().unwrap()).unwrap();
        assert_eq!(bill, BillSession::demo().into_bill());
    }

    #[test]
    fn test_demo_uses_wire_names() {
        let out = demo().unwrap();
        assert!(out.contains("\"ownerIds\""));
        assert!(out.contains("\"taxPct\""));
    }
}
