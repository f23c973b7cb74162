//! # Bill Session
//!
//! Caller-owned participant and item lists for one bill.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  User Action              Method                  State Change          │
//! │  ───────────              ──────                  ────────────          │
//! │                                                                         │
//! │  Add Friend ─────────────► add_participant() ───► participants.push    │
//! │                                                                         │
//! │  Remove Friend ──────────► remove_participant() ► participants.remove  │
//! │                                                   + prune owner_ids    │
//! │                                                                         │
//! │  Add Item ───────────────► add_item() ──────────► items.push           │
//! │                            (no owners = everyone)                       │
//! │                                                                         │
//! │  Remove Item ────────────► remove_item() ───────► items.remove         │
//! │                                                                         │
//! │  Any render ─────────────► splits() ────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session holds no derived data: splits are recomputed from scratch on
//! every call, so they can never go stale.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::split::{calculate_splits, SplitResult};
use crate::types::{new_id, Bill, Item, Participant, Percentage};
use crate::validation::{
    validate_item_title, validate_participant_name, validate_payment_handle,
    validate_percentage, validate_price,
};
use crate::{MAX_ITEMS, MAX_PARTICIPANTS};

/// Input for [`BillSession::add_item`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub title: String,
    pub price: Money,
    /// Empty means "split between everyone".
    #[serde(default)]
    pub owner_ids: Vec<String>,
    #[serde(default)]
    pub tax_pct: Percentage,
    #[serde(default)]
    pub tip_pct: Percentage,
}

/// One bill being split.
///
/// ## Invariants
/// - Every id in any item's `owner_ids` is a current participant, as long
///   as all mutations go through this type
/// - Owner lists contain no duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSession {
    bill: Bill,
}

impl BillSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing bill (e.g. one loaded from disk).
    ///
    /// The bill is taken as-is; stale owner ids are left alone so the
    /// calculator sees exactly what was saved.
    pub fn from_bill(bill: Bill) -> Self {
        BillSession { bill }
    }

    /// The demo bill: three friends, pizza, garlic bread and a coke.
    pub fn demo() -> Self {
        let participants = vec![
            Participant::with_id("p1", "Alice", Some("alice@upi")),
            Participant::with_id("p2", "Bob", Some("bob@okicici")),
            Participant::with_id("p3", "Charlie", Some("")),
        ];

        let owners = |ids: &[&str]| -> Vec<String> { ids.iter().map(|id| id.to_string()).collect() };
        let items = vec![
            Item {
                id: "i1".to_string(),
                title: "Pizza Margherita".to_string(),
                price: Money::from_major(450),
                owner_ids: owners(&["p1", "p2", "p3"]),
                tax_pct: Percentage::from_whole(5),
                tip_pct: Percentage::zero(),
            },
            Item {
                id: "i2".to_string(),
                title: "Garlic Bread".to_string(),
                price: Money::from_major(150),
                owner_ids: owners(&["p2", "p3"]),
                tax_pct: Percentage::from_whole(5),
                tip_pct: Percentage::zero(),
            },
            Item {
                id: "i3".to_string(),
                title: "Diet Coke".to_string(),
                price: Money::from_major(60),
                owner_ids: owners(&["p1"]),
                tax_pct: Percentage::zero(),
                tip_pct: Percentage::zero(),
            },
        ];

        BillSession {
            bill: Bill {
                participants,
                items,
            },
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.bill.participants
    }

    pub fn items(&self) -> &[Item] {
        &self.bill.items
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    pub fn into_bill(self) -> Bill {
        self.bill
    }

    /// Looks up a participant by id.
    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.bill.participants.iter().find(|p| p.id == id)
    }

    /// Adds a participant and returns their new id.
    ///
    /// Name and handle are trimmed; a blank handle is stored as `None`.
    pub fn add_participant(&mut self, name: &str, upi: Option<&str>) -> CoreResult<String> {
        validate_participant_name(name)?;

        let upi = upi.map(str::trim).filter(|handle| !handle.is_empty());
        if let Some(handle) = upi {
            validate_payment_handle(handle)?;
        }

        if self.bill.participants.len() >= MAX_PARTICIPANTS {
            return Err(ValidationError::OutOfRange {
                field: "participants".to_string(),
                min: 0,
                max: MAX_PARTICIPANTS as i64,
            }
            .into());
        }

        let participant = Participant::new(name.trim(), upi.map(str::to_string));
        let id = participant.id.clone();
        debug!(participant_id = %id, name = %participant.name, "Participant added");
        self.bill.participants.push(participant);
        Ok(id)
    }

    /// Removes a participant and prunes their id from every item.
    ///
    /// Items they shared are re-split among the remaining owners on the next
    /// calculation. An item left with no owners stays on the bill but
    /// contributes nothing.
    pub fn remove_participant(&mut self, id: &str) -> CoreResult<Participant> {
        let index = self
            .bill
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::ParticipantNotFound(id.to_string()))?;

        let removed = self.bill.participants.remove(index);

        for item in &mut self.bill.items {
            item.owner_ids.retain(|owner| owner != id);
        }

        debug!(participant_id = %id, "Participant removed and pruned from items");
        Ok(removed)
    }

    /// Adds an item and returns its new id.
    ///
    /// ## Behavior
    /// - No owners selected: the item is shared by everyone currently on
    ///   the bill
    /// - Duplicate owner ids are collapsed, first occurrence wins
    /// - Owner ids must belong to current participants
    pub fn add_item(&mut self, new_item: NewItem) -> CoreResult<String> {
        validate_item_title(&new_item.title)?;
        validate_price(new_item.price)?;
        validate_percentage("tax", new_item.tax_pct)?;
        validate_percentage("tip", new_item.tip_pct)?;

        if self.bill.items.len() >= MAX_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "items".to_string(),
                min: 0,
                max: MAX_ITEMS as i64,
            }
            .into());
        }

        let owner_ids = if new_item.owner_ids.is_empty() {
            self.bill
                .participants
                .iter()
                .map(|p| p.id.clone())
                .collect()
        } else {
            let mut owners: Vec<String> = Vec::with_capacity(new_item.owner_ids.len());
            for id in new_item.owner_ids {
                if self.participant(&id).is_none() {
                    return Err(CoreError::ParticipantNotFound(id));
                }
                if !owners.contains(&id) {
                    owners.push(id);
                }
            }
            owners
        };

        if owner_ids.is_empty() {
            return Err(CoreError::NoParticipants);
        }

        let item = Item {
            id: new_id(),
            title: new_item.title.trim().to_string(),
            price: new_item.price,
            owner_ids,
            tax_pct: new_item.tax_pct,
            tip_pct: new_item.tip_pct,
        };
        let id = item.id.clone();
        debug!(item_id = %id, title = %item.title, owners = item.owner_ids.len(), "Item added");
        self.bill.items.push(item);
        Ok(id)
    }

    /// Removes an item by id.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<Item> {
        let index = self
            .bill
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::ItemNotFound(id.to_string()))?;

        debug!(item_id = %id, "Item removed");
        Ok(self.bill.items.remove(index))
    }

    /// Computes the current split.
    pub fn splits(&self) -> SplitResult {
        calculate_splits(&self.bill.items, &self.bill.participants)
    }

    /// Checks whether an item is shared by every current participant.
    ///
    /// Front ends show "Everyone" instead of listing names in that case.
    pub fn is_shared_by_everyone(&self, item: &Item) -> bool {
        !self.bill.participants.is_empty()
            && item.owner_ids.len() == self.bill.participants.len()
            && self.bill.participants.iter().all(|p| item.is_owned_by(&p.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn new_item(title: &str, price: &str, owners: &[&str]) -> NewItem {
        NewItem {
            title: title.to_string(),
            price: m(price),
            owner_ids: owners.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_participant_trims_and_validates() {
        let mut session = BillSession::new();

        let id = session.add_participant("  Alice ", Some(" alice@upi ")).unwrap();
        let alice = session.participant(&id).unwrap();
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.payment_handle(), Some("alice@upi"));

        let id = session.add_participant("Bob", Some("   ")).unwrap();
        assert_eq!(session.participant(&id).unwrap().upi, None);

        assert!(matches!(
            session.add_participant("", None),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            session.add_participant("Eve", Some("not-a-handle")),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(session.participants().len(), 2);
    }

    #[test]
    fn test_add_item_defaults_to_everyone() {
        let mut session = BillSession::new();
        let a = session.add_participant("Alice", None).unwrap();
        let b = session.add_participant("Bob", None).unwrap();

        let id = session.add_item(new_item("Pizza", "300", &[])).unwrap();

        let item = session.items().iter().find(|i| i.id == id).unwrap();
        assert_eq!(item.owner_ids, vec![a.clone(), b.clone()]);
        assert!(session.is_shared_by_everyone(item));

        let splits = session.splits();
        assert_eq!(splits.total_for(&a), m("150"));
        assert_eq!(splits.total_for(&b), m("150"));
    }

    #[test]
    fn test_add_item_without_participants() {
        let mut session = BillSession::new();
        let err = session.add_item(new_item("Pizza", "300", &[])).unwrap_err();
        assert!(matches!(err, CoreError::NoParticipants));
        assert!(session.items().is_empty());
    }

    #[test]
    fn test_add_item_rejects_bad_input() {
        let mut session = BillSession::new();
        session.add_participant("Alice", None).unwrap();

        assert!(session.add_item(new_item("", "10", &[])).is_err());
        assert!(session.add_item(new_item("Free water", "0", &[])).is_err());
        assert!(matches!(
            session.add_item(new_item("Tea", "10", &["nobody"])),
            Err(CoreError::ParticipantNotFound(_))
        ));

        let mut overtipped = new_item("Cake", "10", &[]);
        overtipped.tip_pct = Percentage::from_whole(150);
        assert!(session.add_item(overtipped).is_err());

        assert!(session.items().is_empty());
    }

    #[test]
    fn test_add_item_dedupes_owners() {
        let mut session = BillSession::new();
        let a = session.add_participant("Alice", None).unwrap();
        let b = session.add_participant("Bob", None).unwrap();

        let id = session
            .add_item(new_item("Fries", "90", &[a.as_str(), b.as_str(), a.as_str()]))
            .unwrap();

        let item = session.items().iter().find(|i| i.id == id).unwrap();
        assert_eq!(item.owner_ids, vec![a.clone(), b]);
        assert_eq!(session.splits().total_for(&a), m("45"));
    }

    #[test]
    fn test_remove_participant_prunes_owners() {
        let mut session = BillSession::demo();
        assert_eq!(session.splits().total_for("p2"), m("236.25"));

        let removed = session.remove_participant("p3").unwrap();
        assert_eq!(removed.name, "Charlie");

        for item in session.items() {
            assert!(!item.is_owned_by("p3"));
        }

        // Pizza now split two ways, bread goes entirely to Bob
        let splits = session.splits();
        assert_eq!(splits.total_for("p1"), m("296.25"));
        assert_eq!(splits.total_for("p2"), m("393.75"));
        assert_eq!(splits.grand_total, splits.sum_of_totals());
    }

    #[test]
    fn test_remove_last_owner_leaves_item_inert() {
        let mut session = BillSession::demo();
        session.remove_participant("p1").unwrap();

        let coke = session.items().iter().find(|i| i.id == "i3").unwrap();
        assert!(coke.owner_ids.is_empty());
        assert_eq!(session.items().len(), 3);
        assert_eq!(session.splits().grand_total, m("630"));
    }

    #[test]
    fn test_remove_unknown() {
        let mut session = BillSession::demo();
        assert!(matches!(
            session.remove_participant("zz"),
            Err(CoreError::ParticipantNotFound(_))
        ));
        assert!(matches!(
            session.remove_item("zz"),
            Err(CoreError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_remove_item() {
        let mut session = BillSession::demo();
        let removed = session.remove_item("i1").unwrap();
        assert_eq!(removed.title, "Pizza Margherita");
        assert_eq!(session.splits().grand_total, m("217.5"));
    }

    #[test]
    fn test_demo_totals() {
        let splits = BillSession::demo().splits();
        assert_eq!(splits.total_for("p1"), m("217.5"));
        assert_eq!(splits.total_for("p2"), m("236.25"));
        assert_eq!(splits.total_for("p3"), m("236.25"));
        assert_eq!(splits.grand_total, m("690"));
    }
}
