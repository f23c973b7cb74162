//! # Currency Formatting
//!
//! Turns full-precision [`Money`] into what a person reads.
//!
//! Rounding happens here and nowhere else: every total is accumulated at
//! full precision and rounded once, at display time.
//!
//! ```text
//! Money(33.333333333333333333333333333)
//!      │
//!      ▼  round half away from zero, 2 places
//! 33.33
//!      │
//!      ▼  group digits + symbol
//! ₹33.33          ₹1,23,456.50 (Indian)     ₹123,456.50 (Western)
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// How the integer part of an amount is grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// Lakh/crore grouping: 1,23,45,678
    #[default]
    Indian,
    /// Thousands grouping: 12,345,678
    Western,
}

/// Display settings for monetary amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// ISO 4217 code, used in payment URIs.
    pub code: String,
    /// Prefix for display.
    pub symbol: String,
    /// Fractional digits shown.
    pub decimals: u32,
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    /// Indian rupees: `₹1,23,456.50`.
    fn default() -> Self {
        CurrencyFormat {
            code: "INR".to_string(),
            symbol: "₹".to_string(),
            decimals: 2,
            grouping: DigitGrouping::Indian,
        }
    }
}

impl CurrencyFormat {
    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::currency::CurrencyFormat;
    ///
    /// let inr = CurrencyFormat::default();
    /// assert_eq!(inr.format("157.5".parse().unwrap()), "₹157.50");
    /// assert_eq!(inr.format("123456.5".parse().unwrap()), "₹1,23,456.50");
    /// assert_eq!(inr.format("-78.755".parse().unwrap()), "-₹78.76");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let fixed = amount.to_fixed(self.decimals);
        let (negative, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, fixed.as_str()),
        };
        let (whole, frac) = match unsigned.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (unsigned, None),
        };

        let mut out = String::with_capacity(fixed.len() + 8);
        // "-0.00" after rounding a tiny negative is just zero
        if negative && unsigned.chars().any(|c| c != '0' && c != '.') {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_digits(whole, self.grouping));
        if let Some(frac) = frac {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

fn group_digits(digits: &str, grouping: DigitGrouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let group = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::Western => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}
