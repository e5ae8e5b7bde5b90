//! Library statistics.
//!
//! Two kinds of numbers live here:
//! - derived reports computed from the catalog and ledger (leaderboards,
//!   category counts, actors with overdue loans)
//! - activity counters bumped by the [`Library`](crate::Library) as it works
//!
//! # Usage
//!
//! ```rust,ignore
//! let top = library.most_popular_items(3);
//! for entry in &top {
//!     println!("{}: {}", entry.id, entry.count);
//! }
//!
//! let activity = library.activity();
//! println!("Borrows: {}", activity.borrows);
//! ```

use crate::index::IndexManager;
use crate::ledger::Ledger;
use crate::model::{Actor, Category, LendingRecord};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// Item or actor identifier.
    pub id: String,
    /// Number of lending records counted for it.
    pub count: usize,
}

impl Ranking {
    /// Creates a row.
    pub fn new(id: impl Into<String>, count: usize) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }
}

/// Tallies records by `key`, highest count first.
///
/// Ties keep the order in which keys were first seen. At most `limit` rows are
/// returned; a larger limit is not an error.
pub fn leaderboard<'a, I, F>(records: I, key: F, limit: usize) -> Vec<Ranking>
where
    I: IntoIterator<Item = &'a LendingRecord>,
    F: Fn(&'a LendingRecord) -> &'a str,
{
    let mut rows: Vec<Ranking> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let id = key(record);
        match positions.get(id) {
            Some(&pos) => rows[pos].count += 1,
            None => {
                positions.insert(id, rows.len());
                rows.push(Ranking::new(id, 1));
            }
        }
    }

    // `sort_by` is stable, so equal counts stay in first-seen order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(limit);
    rows
}

/// Most-borrowed items.
pub fn most_popular_items(ledger: &Ledger, limit: usize) -> Vec<Ranking> {
    leaderboard(ledger.iter(), LendingRecord::item_id, limit)
}

/// Actors with the most lending records.
pub fn most_active_actors(ledger: &Ledger, limit: usize) -> Vec<Ranking> {
    leaderboard(ledger.iter(), LendingRecord::actor_id, limit)
}

/// Item count per populated category.
pub fn category_counts(index: &IndexManager) -> BTreeMap<Category, usize> {
    index.category_sizes()
}

/// Actors holding at least one overdue record, each listed once in the order
/// first seen. Actors no longer registered are left out.
pub fn actors_with_overdue(ledger: &Ledger, index: &IndexManager, today: NaiveDate) -> Vec<Actor> {
    let mut seen = HashSet::new();
    ledger
        .iter()
        .filter(|record| ledger.is_overdue(record, today))
        .filter(|record| seen.insert(record.actor_id()))
        .filter_map(|record| index.actor(record.actor_id()))
        .collect()
}

/// Activity counters for one library instance.
///
/// Counters start at zero and only grow; they are not persisted in snapshots.
#[derive(Debug, Default)]
pub struct ActivityStats {
    borrows: u64,
    rejected_borrows: u64,
    returns: u64,
    extensions: u64,
    items_imported: u64,
    lines_skipped: u64,
}

impl ActivityStats {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_borrow(&mut self, accepted: bool) {
        if accepted {
            self.borrows += 1;
        } else {
            self.rejected_borrows += 1;
        }
    }

    pub(crate) fn record_return(&mut self) {
        self.returns += 1;
    }

    pub(crate) fn record_extension(&mut self) {
        self.extensions += 1;
    }

    pub(crate) fn record_import(&mut self, imported: usize, skipped: usize) {
        self.items_imported += imported as u64;
        self.lines_skipped += skipped as u64;
    }

    /// Returns a copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            borrows: self.borrows,
            rejected_borrows: self.rejected_borrows,
            returns: self.returns,
            extensions: self.extensions,
            items_imported: self.items_imported,
            lines_skipped: self.lines_skipped,
        }
    }
}

/// A point-in-time copy of [`ActivityStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Successful borrows.
    pub borrows: u64,
    /// Borrows refused (missing item or actor, item on loan).
    pub rejected_borrows: u64,
    /// Successful returns.
    pub returns: u64,
    /// Successful extensions.
    pub extensions: u64,
    /// Items added by CSV import.
    pub items_imported: u64,
    /// CSV lines skipped as malformed or duplicate.
    pub lines_skipped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverduePolicy;
    use crate::model::{Item, Tier};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(item: &str, actor: &str, day: u32) -> LendingRecord {
        LendingRecord::new(item, actor, date(2024, 1, day), date(2024, 1, day + 7))
    }

    #[test]
    fn leaderboard_orders_by_count_then_first_seen() {
        let records = vec![
            record("B", "R1", 1),
            record("A", "R1", 2),
            record("A", "R2", 3),
            record("C", "R2", 4),
            record("A", "R1", 5),
        ];

        let rows = leaderboard(&records, LendingRecord::item_id, 10);
        assert_eq!(
            rows,
            vec![Ranking::new("A", 3), Ranking::new("B", 1), Ranking::new("C", 1)]
        );

        let rows = leaderboard(&records, LendingRecord::actor_id, 1);
        assert_eq!(rows, vec![Ranking::new("R1", 3)]);
    }

    #[test]
    fn leaderboard_handles_zero_limit_and_empty_input() {
        let records = vec![record("A", "R1", 1)];
        assert!(leaderboard(&records, LendingRecord::item_id, 0).is_empty());
        let empty: Vec<LendingRecord> = Vec::new();
        assert!(leaderboard(&empty, LendingRecord::item_id, 5).is_empty());
    }

    #[test]
    fn overdue_actors_are_deduplicated() {
        let mut index = IndexManager::new();
        for id in ["111", "222", "333"] {
            index.add_item(Item::new(id, "t", 2000, Category::Science));
        }
        index.add_actor(Actor::new("R1", "Ivan", "i@mail.ru", Tier::Student));
        index.add_actor(Actor::new("R2", "Maria", "m@mail.ru", Tier::Student));

        let today = date(2024, 2, 1);
        let mut ledger = Ledger::new(OverduePolicy::DueDateOnly);
        ledger.borrow(&mut index, "111", "R1", -2, today);
        ledger.borrow(&mut index, "222", "R1", -3, today);
        ledger.borrow(&mut index, "333", "R2", 5, today);

        let actors = actors_with_overdue(&ledger, &index, today);
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].id(), "R1");
    }

    #[test]
    fn activity_counters() {
        let mut stats = ActivityStats::new();
        stats.record_borrow(true);
        stats.record_borrow(true);
        stats.record_borrow(false);
        stats.record_return();
        stats.record_extension();
        stats.record_import(3, 2);

        let snap = stats.snapshot();
        assert_eq!(snap.borrows, 2);
        assert_eq!(snap.rejected_borrows, 1);
        assert_eq!(snap.returns, 1);
        assert_eq!(snap.extensions, 1);
        assert_eq!(snap.items_imported, 3);
        assert_eq!(snap.lines_skipped, 2);
    }
}
