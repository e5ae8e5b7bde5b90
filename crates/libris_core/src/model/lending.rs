//! Lending records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Lifecycle state of a record at a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendingState {
    /// Not yet returned, due date not passed.
    Active,
    /// Not yet returned and past the due date.
    Overdue,
    /// Returned.
    Returned,
}

/// One borrow/return transaction.
///
/// The logical key is `(item_id, actor_id, start)`; equality and hashing use
/// that key only. Records are created by the ledger and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LendingRecord {
    item_id: String,
    actor_id: String,
    start: NaiveDate,
    due: NaiveDate,
    returned: Option<NaiveDate>,
}

impl LendingRecord {
    pub(crate) fn new(
        item_id: impl Into<String>,
        actor_id: impl Into<String>,
        start: NaiveDate,
        due: NaiveDate,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            actor_id: actor_id.into(),
            start,
            due,
            returned: None,
        }
    }

    /// Returns the borrowed item's identifier.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Returns the borrower's identifier.
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    /// Returns the date the loan started.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the due date.
    pub const fn due(&self) -> NaiveDate {
        self.due
    }

    /// Returns the return date, if any.
    pub const fn returned(&self) -> Option<NaiveDate> {
        self.returned
    }

    /// Returns `true` while the item has not been returned.
    pub const fn is_active(&self) -> bool {
        self.returned.is_none()
    }

    /// Returns `true` once the item has been returned.
    pub const fn is_returned(&self) -> bool {
        self.returned.is_some()
    }

    /// Returns `true` when `today` is strictly after the due date.
    ///
    /// The return date is not consulted.
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        today > self.due
    }

    /// Classifies the record as of `today`.
    pub fn state(&self, today: NaiveDate) -> LendingState {
        if self.is_returned() {
            LendingState::Returned
        } else if self.is_past_due(today) {
            LendingState::Overdue
        } else {
            LendingState::Active
        }
    }

    /// Returns `true` when the record belongs to this item and actor.
    pub fn matches(&self, item_id: &str, actor_id: &str) -> bool {
        self.item_id == item_id && self.actor_id == actor_id
    }

    pub(crate) fn mark_returned(&mut self, date: NaiveDate) {
        self.returned = Some(date);
    }

    pub(crate) fn set_due(&mut self, due: NaiveDate) {
        self.due = due;
    }

    fn key(&self) -> (&str, &str, NaiveDate) {
        (&self.item_id, &self.actor_id, self.start)
    }
}

impl PartialEq for LendingRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for LendingRecord {}

impl Hash for LendingRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for LendingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} from {} due {}",
            self.item_id, self.actor_id, self.start, self.due
        )?;
        if let Some(returned) = self.returned {
            write!(f, " returned {returned}")?;
        }
        Ok(())
    }
}
