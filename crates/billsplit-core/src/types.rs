//! # Domain Types
//!
//! Core domain types used throughout BillSplit.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Participant    │   │      Item       │   │   Percentage    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──┤  owner_ids      │   │  5 = 5%         │       │
//! │  │  name           │   │  title, price   │   │  tax_pct        │       │
//! │  │  upi (optional) │   │  tax / tip  ────┼──►│  tip_pct        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are camelCase on the wire (`ownerIds`, `taxPct`, `tipPct`) so
//! bills exported by the browser front end deserialize unchanged. Numeric
//! fields are lenient: see [`crate::money`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::{coerce_decimal, Money};

/// Generates a fresh opaque identifier for a participant or item.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage where `5` means 5%.
///
/// Fractional rates are allowed (`12.5` for 12.5% service charge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, TS)]
#[ts(export)]
pub struct Percentage(#[ts(type = "string")] Decimal);

impl Percentage {
    /// Creates a percentage from a decimal value (5.5 = 5.5%).
    #[inline]
    pub const fn new(pct: Decimal) -> Self {
        Percentage(pct)
    }

    /// Creates a percentage from a whole number (5 = 5%).
    #[inline]
    pub fn from_whole(pct: u32) -> Self {
        Percentage(Decimal::from(pct))
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(Decimal::ZERO)
    }

    /// Returns the percentage value as entered (5 for 5%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the multiplier (5% → 0.05).
    ///
    /// Negative rates are treated as zero.
    pub fn fraction(&self) -> Decimal {
        if self.0.is_sign_negative() {
            Decimal::ZERO
        } else {
            self.0 / Decimal::ONE_HUNDRED
        }
    }
}

impl<'de> Deserialize<'de> for Percentage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Percentage(coerce_decimal(&value)))
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Participant
// =============================================================================

/// A person sharing the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Participant {
    /// Opaque identifier, stable for the session.
    pub id: String,

    /// Display name.
    pub name: String,

    /// UPI payment handle (`alice@okbank`). Empty means this person cannot
    /// receive payment requests.
    #[serde(default)]
    pub upi: Option<String>,
}

impl Participant {
    /// Creates a participant with a freshly generated id.
    pub fn new(name: impl Into<String>, upi: Option<String>) -> Self {
        Participant {
            id: new_id(),
            name: name.into(),
            upi,
        }
    }

    /// Creates a participant with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>, upi: Option<&str>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
            upi: upi.map(str::to_string),
        }
    }

    /// Returns the payment handle if one is set and non-blank.
    pub fn payment_handle(&self) -> Option<&str> {
        self.upi
            .as_deref()
            .map(str::trim)
            .filter(|handle| !handle.is_empty())
    }
}

// =============================================================================
// Item
// =============================================================================

/// A single priced line on the bill.
///
/// ## Owner Semantics
/// `owner_ids` lists who consumed the item. Ids are not checked against the
/// participant list here; the calculator decides what an unknown id means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,

    /// Display label. Older bills call this `name`.
    #[serde(default, alias = "name")]
    pub title: String,

    /// Pre-tax, pre-tip cost of the whole item.
    #[serde(default)]
    pub price: Money,

    /// Participants sharing this item.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub owner_ids: Vec<String>,

    /// Tax applied on each consumer's base share.
    #[serde(default)]
    pub tax_pct: Percentage,

    /// Tip applied on each consumer's base share.
    #[serde(default)]
    pub tip_pct: Percentage,
}

impl Item {
    /// Creates an untaxed item with a freshly generated id.
    pub fn new(title: impl Into<String>, price: Money, owner_ids: Vec<String>) -> Self {
        Item {
            id: new_id(),
            title: title.into(),
            price,
            owner_ids,
            tax_pct: Percentage::zero(),
            tip_pct: Percentage::zero(),
        }
    }

    /// Sets the tax rate.
    pub fn with_tax(mut self, tax_pct: Percentage) -> Self {
        self.tax_pct = tax_pct;
        self
    }

    /// Sets the tip rate.
    pub fn with_tip(mut self, tip_pct: Percentage) -> Self {
        self.tip_pct = tip_pct;
        self
    }

    /// Checks whether `participant_id` is listed as a consumer.
    pub fn is_owned_by(&self, participant_id: &str) -> bool {
        self.owner_ids.iter().any(|id| id == participant_id)
    }
}

/// `ownerIds: null` is treated like a missing list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Bill
// =============================================================================

/// A complete bill: everything the calculator needs.
///
/// This is also the on-disk format read by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bill {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub items: Vec<Item>,
}

// =============================================================================
// Unit Tests
// =============================================================================
