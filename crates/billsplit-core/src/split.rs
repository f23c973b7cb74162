//! # Split Calculator
//!
//! Allocates every item's cost, plus proportional tax and tip, across the
//! people who consumed it, and aggregates per-participant totals.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for item in items:                                                     │
//! │      price      = max(item.price, 0)                                    │
//! │      consumers  = item.owner_ids            (NOT filtered)              │
//! │      if consumers is empty → skip                                       │
//! │                                                                         │
//! │      base       = price / len(consumers)                                │
//! │      tax        = base × tax%                                           │
//! │      tip        = base × tip%                                           │
//! │      share      = base + tax + tip                                      │
//! │                                                                         │
//! │      for id in consumers:                                               │
//! │          known participant?  → credit share, record line, grand += share│
//! │          unknown id?         → nothing (but it diluted `base` above)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Worked Example
//! ```text
//! Pizza ₹450, owners [p1, p2, p3], tax 5%
//!   base  = 450 / 3   = 150.00
//!   tax   = 150 × 5%  =   7.50
//!   share =             157.50   → each of p1, p2, p3
//!   grand total       = 472.50
//! ```
//!
//! ## Stale Owner Ids
//! An owner id that no longer matches a participant still counts in the
//! denominator. Removing a participant through [`crate::session::BillSession`]
//! prunes their id everywhere, so this only shows up for hand-edited bills.
//!
//! ## Overflow
//! An item whose share, or whose credits to the grand total, would exceed
//! `Decimal::MAX` contributes nothing and is logged at `warn`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Item, Participant};

// =============================================================================
// Result Types
// =============================================================================

/// One participant's share of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShareLine {
    pub item_id: String,
    pub item_name: String,
    /// `base + tax + tip`
    pub amount: Money,
    pub base: Money,
    pub tax: Money,
    pub tip: Money,
}

/// Everything one participant owes, item by item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParticipantSplit {
    pub total: Money,
    /// In item order.
    pub breakdown: Vec<ShareLine>,
}

/// Output of [`calculate_splits`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    /// Keyed by participant id; every current participant has an entry.
    pub participant_splits: HashMap<String, ParticipantSplit>,
    pub grand_total: Money,
}

impl SplitResult {
    /// Returns a participant's total, or zero for an unknown id.
    pub fn total_for(&self, participant_id: &str) -> Money {
        self.participant_splits
            .get(participant_id)
            .map(|split| split.total)
            .unwrap_or_default()
    }

    /// Returns a participant's item breakdown, or an empty slice.
    pub fn breakdown_for(&self, participant_id: &str) -> &[ShareLine] {
        self.participant_splits
            .get(participant_id)
            .map(|split| split.breakdown.as_slice())
            .unwrap_or_default()
    }

    /// Sum of every participant's total.
    ///
    /// Always equal to `grand_total`; both are accumulated from the same
    /// per-consumer shares.
    pub fn sum_of_totals(&self) -> Money {
        self.participant_splits.values().map(|split| split.total).sum()
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes each participant's share of the bill.
///
/// Pure and deterministic: no I/O, no hidden state, never fails. Degenerate
/// input (no items, no participants, ownerless items, garbage prices)
/// resolves to zero contributions.
///
/// ## Example
/// ```rust
/// use billsplit_core::money::Money;
/// use billsplit_core::split::calculate_splits;
/// use billsplit_core::types::{Item, Participant, Percentage};
///
/// let people = vec![
///     Participant::with_id("p1", "Alice", None),
///     Participant::with_id("p2", "Bob", None),
/// ];
/// let bread = Item::new("Garlic Bread", Money::from_major(150), vec!["p1".into(), "p2".into()])
///     .with_tax(Percentage::from_whole(5));
///
/// let result = calculate_splits(&[bread], &people);
/// assert_eq!(result.total_for("p1"), "78.75".parse().unwrap());
/// assert_eq!(result.grand_total, "157.5".parse().unwrap());
/// ```
pub fn calculate_splits(items: &[Item], participants: &[Participant]) -> SplitResult {
    let mut participant_splits: HashMap<String, ParticipantSplit> = participants
        .iter()
        .map(|p| (p.id.clone(), ParticipantSplit::default()))
        .collect();

    let mut grand_total = Money::zero();

    for item in items {
        let price = item.price.non_negative();
        let consumers = &item.owner_ids;

        if consumers.is_empty() {
            debug!(item_id = %item.id, "Item has no owners, skipping");
            continue;
        }

        // Denominator deliberately includes ids that are not participants
        let base = price.split(consumers.len());
        let Some((tax, tip, share)) = consumer_share(base, item) else {
            warn!(item_id = %item.id, "Item share overflows, skipping");
            continue;
        };

        // Every participant total is bounded by the grand total
        let credited = consumers
            .iter()
            .filter(|id| participant_splits.contains_key(*id))
            .count();
        let fits = share
            .checked_times(credited)
            .and_then(|sum| grand_total.checked_add(sum))
            .is_some();
        if !fits {
            warn!(item_id = %item.id, "Grand total overflows, skipping item");
            continue;
        }

        for consumer_id in consumers {
            let Some(split) = participant_splits.get_mut(consumer_id) else {
                debug!(item_id = %item.id, %consumer_id, "Owner is not a participant");
                continue;
            };

            split.total += share;
            split.breakdown.push(ShareLine {
                item_id: item.id.clone(),
                item_name: item.title.clone(),
                amount: share,
                base,
                tax,
                tip,
            });
            grand_total += share;
        }
    }

    debug!(
        items = items.len(),
        participants = participants.len(),
        %grand_total,
        "Calculated splits"
    );

    SplitResult {
        participant_splits,
        grand_total,
    }
}

/// Tax, tip and `base + tax + tip` for one consumer.
fn consumer_share(base: Money, item: &Item) -> Option<(Money, Money, Money)> {
    let tax = base.checked_percent(item.tax_pct)?;
    let tip = base.checked_percent(item.tip_pct)?;
    let share = base.checked_add(tax)?.checked_add(tip)?;
    Some((tax, tip, share))
}

// =============================================================================
// Unit Tests
// =============================================================================
