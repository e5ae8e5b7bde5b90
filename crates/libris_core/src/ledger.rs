//! Append-only lending ledger.
//!
//! Each record moves through:
//!
//! ```text
//!  [no record] --borrow--> Active --return--> Returned
//!      Active --extend--> Active (due date pushed forward)
//!      Active --(today > due)--> Overdue (derived, never stored)
//! ```
//!
//! The ledger flips item availability through the [`IndexManager`] it is
//! handed, so an item is unavailable exactly while an active record
//! references it.

use crate::clock::shift_days;
use crate::config::OverduePolicy;
use crate::index::IndexManager;
use crate::model::LendingRecord;
use chrono::NaiveDate;
use tracing::debug;

/// Ordered history of every loan.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<LendingRecord>,
    policy: OverduePolicy,
}

impl Ledger {
    /// Creates an empty ledger using `policy` for overdue checks.
    pub fn new(policy: OverduePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Rebuilds a ledger from previously saved records, keeping their order.
    pub fn from_records(records: Vec<LendingRecord>, policy: OverduePolicy) -> Self {
        Self { records, policy }
    }

    /// Returns the overdue policy.
    pub const fn policy(&self) -> OverduePolicy {
        self.policy
    }

    /// Lends an item to an actor for `days` days starting `today`.
    ///
    /// Fails unless the item exists and is available and the actor exists.
    /// Negative `days` are accepted and produce a record that is already past
    /// due. A due date outside the calendar range fails the borrow.
    pub fn borrow(
        &mut self,
        index: &mut IndexManager,
        item_id: &str,
        actor_id: &str,
        days: i64,
        today: NaiveDate,
    ) -> bool {
        let available = index.item(item_id).is_some_and(|item| item.is_available());
        if !available || !index.contains_actor(actor_id) {
            debug!(item = item_id, actor = actor_id, "borrow refused");
            return false;
        }
        let Some(due) = shift_days(today, days) else {
            debug!(item = item_id, days, "due date out of range");
            return false;
        };

        self.records
            .push(LendingRecord::new(item_id, actor_id, today, due));
        index.set_available(item_id, false);
        debug!(item = item_id, actor = actor_id, %due, "item borrowed");
        true
    }

    /// Closes the oldest active record for this item and actor.
    ///
    /// Returns `false` if there is none.
    pub fn return_item(
        &mut self,
        index: &mut IndexManager,
        item_id: &str,
        actor_id: &str,
        today: NaiveDate,
    ) -> bool {
        let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.is_active() && r.matches(item_id, actor_id))
        else {
            return false;
        };

        record.mark_returned(today);
        index.set_available(item_id, true);
        debug!(item = item_id, actor = actor_id, "item returned");
        true
    }

    /// Pushes back the due date of the first record for this item and actor,
    /// whether or not it has been returned.
    ///
    /// Returns `false` if no record matches or the new date is out of range.
    pub fn extend(&mut self, item_id: &str, actor_id: &str, extra_days: i64) -> bool {
        let Some(record) = self
            .records
            .iter_mut()
            .find(|r| r.matches(item_id, actor_id))
        else {
            return false;
        };
        let Some(due) = shift_days(record.due(), extra_days) else {
            return false;
        };

        record.set_due(due);
        debug!(item = item_id, actor = actor_id, %due, "loan extended");
        true
    }

    /// Applies the configured [`OverduePolicy`] to `record`.
    pub fn is_overdue(&self, record: &LendingRecord, today: NaiveDate) -> bool {
        match self.policy {
            OverduePolicy::DueDateOnly => record.is_past_due(today),
            OverduePolicy::ActiveOnly => record.is_active() && record.is_past_due(today),
        }
    }

    /// Returns `true` if an active record references the item.
    pub fn has_active(&self, item_id: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.is_active() && r.item_id() == item_id)
    }

    /// Iterates over records in insertion order without copying.
    pub fn iter(&self) -> impl Iterator<Item = &LendingRecord> {
        self.records.iter()
    }

    /// Returns a copy of every record.
    pub fn all(&self) -> Vec<LendingRecord> {
        self.records.clone()
    }

    /// Returns copies of the records for one actor.
    pub fn by_actor(&self, actor_id: &str) -> Vec<LendingRecord> {
        self.collect(|r| r.actor_id() == actor_id)
    }

    /// Returns copies of the records for one item.
    pub fn by_item(&self, item_id: &str) -> Vec<LendingRecord> {
        self.collect(|r| r.item_id() == item_id)
    }

    /// Returns copies of the records that are overdue as of `today`.
    pub fn overdue(&self, today: NaiveDate) -> Vec<LendingRecord> {
        self.collect(|r| self.is_overdue(r, today))
    }

    /// Returns copies of the records not yet returned.
    pub fn active(&self) -> Vec<LendingRecord> {
        self.collect(LendingRecord::is_active)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has ever been borrowed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn collect<F>(&self, predicate: F) -> Vec<LendingRecord>
    where
        F: Fn(&LendingRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}
