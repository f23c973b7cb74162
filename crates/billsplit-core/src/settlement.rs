//! # Settlement
//!
//! Who paid, who owes them, and the UPI payment requests to collect it.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SplitResult ──► resolve_payee ──► settle ──► Settlement                │
//! │                                                 ├── payee collects X    │
//! │                                                 └── debts               │
//! │                                                      ├── Bob  ₹236.25   │
//! │                                                      │   └── upi://pay… │
//! │                                                      └── ...            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering a request as a scannable image is left to the front end; this
//! module stops at the URI string.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::split::SplitResult;
use crate::types::Participant;
use crate::validation::validate_payment_handle;

/// Note attached to every payment request unless configured otherwise.
pub const DEFAULT_PAYMENT_NOTE: &str = "BillSplit Share";

// =============================================================================
// Payee Selection
// =============================================================================

/// Picks who paid the bill.
///
/// ## Rules
/// 1. Keep `current` if it is still a participant
/// 2. Otherwise the first participant with a payment handle
/// 3. Otherwise the first participant
/// 4. `None` when nobody is on the bill
///
/// ## Example
/// ```rust
/// use billsplit_core::settlement::resolve_payee;
/// use billsplit_core::types::Participant;
///
/// let people = vec![
///     Participant::with_id("p1", "Alice", None),
///     Participant::with_id("p2", "Bob", Some("bob@okicici")),
/// ];
/// assert_eq!(resolve_payee(&people, None).map(|p| p.id.as_str()), Some("p2"));
/// assert_eq!(resolve_payee(&people, Some("p1")).map(|p| p.id.as_str()), Some("p1"));
/// assert_eq!(resolve_payee(&people, Some("gone")).map(|p| p.id.as_str()), Some("p2"));
/// ```
pub fn resolve_payee<'a>(
    participants: &'a [Participant],
    current: Option<&str>,
) -> Option<&'a Participant> {
    if let Some(found) = current.and_then(|id| participants.iter().find(|p| p.id == id)) {
        return Some(found);
    }

    participants
        .iter()
        .find(|p| p.payment_handle().is_some())
        .or_else(|| participants.first())
}

// =============================================================================
// Payment Request
// =============================================================================

/// A UPI "pay" intent for one debtor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Receiver's UPI address (`pa`).
    pub payee_handle: String,
    /// Receiver's display name (`pn`).
    pub payee_name: String,
    /// Amount to pay (`am`), rounded to 2 places when rendered.
    pub amount: Money,
    /// ISO 4217 currency (`cu`).
    pub currency: String,
    /// Transaction note (`tn`).
    pub note: String,
}

impl PaymentRequest {
    /// Renders the `upi://pay` URI.
    ///
    /// ## Example
    /// ```rust
    /// use billsplit_core::settlement::PaymentRequest;
    ///
    /// let request = PaymentRequest {
    ///     payee_handle: "alice@upi".into(),
    ///     payee_name: "Alice K".into(),
    ///     amount: "236.25".parse().unwrap(),
    ///     currency: "INR".into(),
    ///     note: "BillSplit Share".into(),
    /// };
    /// assert_eq!(
    ///     request.to_uri(),
    ///     "upi://pay?pa=alice@upi&pn=Alice%20K&am=236.25&cu=INR&tn=BillSplit%20Share"
    /// );
    /// ```
    pub fn to_uri(&self) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu={}&tn={}",
            urlencoding::encode(&self.payee_handle).replace("%40", "@"),
            urlencoding::encode(&self.payee_name),
            self.amount.to_fixed(2),
            self.currency,
            urlencoding::encode(&self.note),
        )
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// Rules applied when building a [`Settlement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOptions {
    /// ISO 4217 code placed in payment requests.
    pub currency: String,
    pub note: String,
    /// Shares below this are not worth chasing.
    pub min_payable: Money,
}

impl Default for SettlementOptions {
    fn default() -> Self {
        SettlementOptions {
            currency: "INR".to_string(),
            note: DEFAULT_PAYMENT_NOTE.to_string(),
            min_payable: Money::new(Decimal::new(1, 2)),
        }
    }
}

/// One participant's debt to the payee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub participant_id: String,
    pub participant_name: String,
    pub amount: Money,
    /// Absent when the payee has no payment handle.
    pub payment_request: Option<PaymentRequest>,
}

/// Who collects, and from whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub payee_id: String,
    pub payee_name: String,
    /// `grand_total − payee's own share`
    pub collects: Money,
    /// In participant order.
    pub debts: Vec<Debt>,
}

impl Settlement {
    /// Whether any debt carries a payment request.
    pub fn has_payment_requests(&self) -> bool {
        self.debts.iter().any(|debt| debt.payment_request.is_some())
    }
}

/// Builds the settlement for `payee_id`.
///
/// ## Rules
/// - The payee never owes themselves
/// - Debtors whose share is below `min_payable` are left out
/// - A payment request is attached only when the payee has a handle and the
///   amount is strictly above `min_payable`
pub fn settle(
    result: &SplitResult,
    participants: &[Participant],
    payee_id: &str,
    options: &SettlementOptions,
) -> CoreResult<Settlement> {
    let payee = participants
        .iter()
        .find(|p| p.id == payee_id)
        .ok_or_else(|| CoreError::PayeeNotFound(payee_id.to_string()))?;

    // Bill files are not validated on load
    let handle = payee.payment_handle().filter(|handle| {
        let valid = validate_payment_handle(handle).is_ok();
        if !valid {
            warn!(payee_id = %payee.id, %handle, "Payee handle is malformed, ignoring it");
        }
        valid
    });
    if handle.is_none() {
        warn!(payee_id = %payee.id, "Payee has no payment handle, no payment requests");
    }

    let debts = participants
        .iter()
        .filter(|p| p.id != payee.id)
        .filter_map(|p| {
            let amount = result.total_for(&p.id);
            if amount < options.min_payable {
                return None;
            }

            let payment_request = handle
                .filter(|_| amount > options.min_payable)
                .map(|handle| PaymentRequest {
                    payee_handle: handle.to_string(),
                    payee_name: payee.name.clone(),
                    amount,
                    currency: options.currency.clone(),
                    note: options.note.clone(),
                });

            Some(Debt {
                participant_id: p.id.clone(),
                participant_name: p.name.clone(),
                amount,
                payment_request,
            })
        })
        .collect();

    Ok(Settlement {
        payee_id: payee.id.clone(),
        payee_name: payee.name.clone(),
        collects: result.grand_total - result.total_for(&payee.id),
        debts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BillSession;
    use crate::split::calculate_splits;
    use crate::types::Item;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolve_payee_fallbacks() {
        let no_handles = vec![
            Participant::with_id("p1", "Alice", None),
            Participant::with_id("p2", "Bob", Some(" ")),
        ];
        assert_eq!(resolve_payee(&no_handles, None).unwrap().id, "p1");
        assert!(resolve_payee(&[], Some("p1")).is_none());
    }

    #[test]
    fn test_settle_demo() {
        let session = BillSession::demo();
        let result = session.splits();

        let settlement =
            settle(&result, session.participants(), "p1", &SettlementOptions::default()).unwrap();

        assert_eq!(settlement.payee_name, "Alice");
        assert_eq!(settlement.collects, m("472.5"));
        assert_eq!(settlement.debts.len(), 2);

        let bob = &settlement.debts[0];
        assert_eq!(bob.participant_id, "p2");
        assert_eq!(bob.amount, m("236.25"));
        let request = bob.payment_request.as_ref().unwrap();
        assert_eq!(
            request.to_uri(),
            "upi://pay?pa=alice@upi&pn=Alice&am=236.25&cu=INR&tn=BillSplit%20Share"
        );
    }

    #[test]
    fn test_payee_without_handle_gets_no_requests() {
        let session = BillSession::demo();
        let result = session.splits();

        let settlement =
            settle(&result, session.participants(), "p3", &SettlementOptions::default()).unwrap();

        assert_eq!(settlement.debts.len(), 2);
        assert!(!settlement.has_payment_requests());
        assert_eq!(settlement.collects, m("453.75"));
    }

    #[test]
    fn test_negligible_shares_skipped() {
        let mut session = BillSession::demo();
        let dana = session.add_participant("Dana", None).unwrap();
        let result = session.splits();

        let settlement =
            settle(&result, session.participants(), "p1", &SettlementOptions::default()).unwrap();

        assert!(settlement.debts.iter().all(|d| d.participant_id != dana));
    }

    fn two_person_bill(bob_owes: &str) -> (Vec<Participant>, SplitResult) {
        let people = vec![
            Participant::with_id("p1", "Alice", Some("alice@upi")),
            Participant::with_id("p2", "Bob", None),
        ];
        let items = vec![Item::new("Mint", m(bob_owes), vec!["p2".to_string()])];
        let result = calculate_splits(&items, &people);
        (people, result)
    }

    #[test]
    fn test_debt_at_minimum_listed_without_request() {
        let (people, result) = two_person_bill("0.01");
        let settlement = settle(&result, &people, "p1", &SettlementOptions::default()).unwrap();

        assert_eq!(settlement.debts.len(), 1);
        assert_eq!(settlement.debts[0].amount, m("0.01"));
        assert!(settlement.debts[0].payment_request.is_none());
    }

    #[test]
    fn test_debt_above_minimum_gets_request() {
        let (people, result) = two_person_bill("0.02");
        let settlement = settle(&result, &people, "p1", &SettlementOptions::default()).unwrap();

        assert_eq!(settlement.debts.len(), 1);
        let request = settlement.debts[0].payment_request.as_ref().unwrap();
        assert_eq!(request.amount, m("0.02"));
    }

    #[test]
    fn test_debt_below_minimum_dropped() {
        let (people, result) = two_person_bill("0.009");
        let settlement = settle(&result, &people, "p1", &SettlementOptions::default()).unwrap();
        assert!(settlement.debts.is_empty());
    }

    #[test]
    fn test_malformed_payee_handle_ignored() {
        let mut people = BillSession::demo().into_bill().participants;
        people[0].upi = Some("x@y&am=1".to_string());
        let result = BillSession::demo().splits();

        let settlement = settle(&result, &people, "p1", &SettlementOptions::default()).unwrap();

        assert_eq!(settlement.debts.len(), 2);
        assert!(!settlement.has_payment_requests());
    }

    #[test]
    fn test_uri_encodes_handle() {
        let request = PaymentRequest {
            payee_handle: "x@y&am=1".to_string(),
            payee_name: "X".to_string(),
            amount: Money::from_major(5),
            currency: "INR".to_string(),
            note: DEFAULT_PAYMENT_NOTE.to_string(),
        };
        assert_eq!(
            request.to_uri(),
            "upi://pay?pa=x@y%26am%3D1&pn=X&am=5.00&cu=INR&tn=BillSplit%20Share"
        );
    }

    #[test]
    fn test_unknown_payee() {
        let session = BillSession::demo();
        let err = settle(
            &session.splits(),
            session.participants(),
            "nobody",
            &SettlementOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::PayeeNotFound(_)));
    }

    #[test]
    fn test_uri_rounds_amount() {
        let request = PaymentRequest {
            payee_handle: "bob@okicici".to_string(),
            payee_name: "Bob & Co".to_string(),
            amount: Money::from_major(100).split(3),
            currency: "INR".to_string(),
            note: DEFAULT_PAYMENT_NOTE.to_string(),
        };
        assert_eq!(
            request.to_uri(),
            "upi://pay?pa=bob@okicici&pn=Bob%20%26%20Co&am=33.33&cu=INR&tn=BillSplit%20Share"
        );
    }
}
