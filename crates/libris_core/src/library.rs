//! The library facade.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::LibraryResult;
use crate::index::IndexManager;
use crate::ledger::Ledger;
use crate::model::{Actor, Category, Item, LendingRecord};
use crate::persistence::snapshot::{self, Snapshot, SnapshotMetadata};
use crate::persistence::tabular;
use crate::persistence::{ImportMode, ImportReport};
use crate::query::{sort_items, Cursor, ItemOrder};
use crate::stats::{self, ActivityStats, Ranking, StatsSnapshot};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// An in-memory catalog, reader registry and lending ledger.
///
/// `Library` is the only way to change state. Item and actor changes go to
/// the [`IndexManager`], loans go to the [`Ledger`], and every read hands back
/// owned copies. Expected failures such as duplicate identifiers, unknown
/// records or items already on loan are reported as `false`, `None` or an
/// empty result.
///
/// # Example
///
/// ```rust,ignore
/// use libris_core::{Actor, Category, Item, Library, Tier};
///
/// let mut library = Library::new();
/// library.add_item(Item::new("111", "War and Peace", 1869, Category::Fiction));
/// library.add_actor(Actor::new("R1", "Ivan", "ivan@mail.ru", Tier::Student));
///
/// assert!(library.borrow("111", "R1", 14));
/// assert!(!library.item("111").unwrap().is_available());
/// assert!(library.return_item("111", "R1"));
/// ```
#[derive(Debug)]
pub struct Library {
    config: Config,
    clock: Box<dyn Clock>,
    index: IndexManager,
    ledger: Ledger,
    activity: ActivityStats,
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Creates an empty library with default configuration and the system clock.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty library with `config` and the system clock.
    pub fn with_config(config: Config) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Creates an empty library with `config` and a custom clock.
    pub fn with_clock(config: Config, clock: impl Clock + 'static) -> Self {
        let ledger = Ledger::new(config.overdue_policy);
        Self {
            config,
            clock: Box::new(clock),
            index: IndexManager::new(),
            ledger,
            activity: ActivityStats::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the clock's current date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // === Items ===

    /// Adds an item. Returns `false` if the identifier is already taken.
    ///
    /// An item re-added while an active record still references its
    /// identifier comes back unavailable.
    pub fn add_item(&mut self, item: Item) -> bool {
        let id = item.id().to_string();
        if !self.index.add_item(item) {
            return false;
        }
        self.sync_availability(&id);
        true
    }

    /// Removes an item and prunes it from every index.
    ///
    /// Returns `false` if the item does not exist, or if it is on loan while
    /// [`Config::guard_active_loans`] is set.
    pub fn remove_item(&mut self, id: &str) -> bool {
        if self.config.guard_active_loans && self.ledger.has_active(id) {
            debug!(item = id, "refusing to remove item on loan");
            return false;
        }
        self.index.remove_item(id)
    }

    /// Returns a copy of an item.
    pub fn item(&self, id: &str) -> Option<Item> {
        self.index.item(id)
    }

    /// Returns copies of the items in a category.
    pub fn items_by_category(&self, category: Category) -> Vec<Item> {
        self.index.items_by_category(category)
    }

    /// Returns copies of the items a contributor worked on.
    pub fn items_by_contributor(&self, contributor: &str) -> Vec<Item> {
        self.index.items_by_contributor(contributor)
    }

    /// Returns copies of every item.
    pub fn all_items(&self) -> Vec<Item> {
        self.index.all_items()
    }

    /// Returns copies of the items not on loan.
    pub fn available_items(&self) -> Vec<Item> {
        self.index.available_items()
    }

    /// Case-insensitive title search.
    pub fn search_by_title(&self, fragment: &str) -> Vec<Item> {
        self.index.search_by_title(fragment)
    }

    /// Returns every item sorted by `order`.
    pub fn sorted_items(&self, order: ItemOrder) -> Vec<Item> {
        let mut items = self.index.all_items();
        sort_items(&mut items, order);
        items
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.index.item_count()
    }

    // === Actors ===

    /// Registers an actor. Returns `false` if the identifier is already taken.
    pub fn add_actor(&mut self, actor: Actor) -> bool {
        self.index.add_actor(actor)
    }

    /// Removes an actor. Their lending records stay in the ledger.
    pub fn remove_actor(&mut self, id: &str) -> bool {
        self.index.remove_actor(id)
    }

    /// Returns a copy of an actor.
    pub fn actor(&self, id: &str) -> Option<Actor> {
        self.index.actor(id)
    }

    /// Returns copies of every actor.
    pub fn all_actors(&self) -> Vec<Actor> {
        self.index.all_actors()
    }

    /// Returns the number of actors.
    pub fn actor_count(&self) -> usize {
        self.index.actor_count()
    }

    // === Lending ===

    /// Lends an item for `days` days (negative values give an overdue loan).
    pub fn borrow(&mut self, item_id: &str, actor_id: &str, days: i64) -> bool {
        let today = self.clock.today();
        let accepted = self
            .ledger
            .borrow(&mut self.index, item_id, actor_id, days, today);
        self.activity.record_borrow(accepted);
        accepted
    }

    /// Lends an item for [`Config::default_loan_days`].
    pub fn borrow_default(&mut self, item_id: &str, actor_id: &str) -> bool {
        self.borrow(item_id, actor_id, self.config.default_loan_days)
    }

    /// Returns an item. Resolves the oldest active loan for this pair.
    pub fn return_item(&mut self, item_id: &str, actor_id: &str) -> bool {
        let today = self.clock.today();
        let returned = self
            .ledger
            .return_item(&mut self.index, item_id, actor_id, today);
        if returned {
            self.activity.record_return();
        }
        returned
    }

    /// Pushes back the due date of the first loan for this pair.
    pub fn extend(&mut self, item_id: &str, actor_id: &str, extra_days: i64) -> bool {
        let extended = self.ledger.extend(item_id, actor_id, extra_days);
        if extended {
            self.activity.record_extension();
        }
        extended
    }

    /// Applies the configured overdue policy as of today.
    pub fn is_overdue(&self, record: &LendingRecord) -> bool {
        self.ledger.is_overdue(record, self.clock.today())
    }

    /// Returns every lending record.
    pub fn all_borrowings(&self) -> Vec<LendingRecord> {
        self.ledger.all()
    }

    /// Returns one actor's lending records.
    pub fn borrowings_by_actor(&self, actor_id: &str) -> Vec<LendingRecord> {
        self.ledger.by_actor(actor_id)
    }

    /// Returns one item's lending records.
    pub fn borrowings_by_item(&self, item_id: &str) -> Vec<LendingRecord> {
        self.ledger.by_item(item_id)
    }

    /// Returns the overdue lending records.
    pub fn overdue_borrowings(&self) -> Vec<LendingRecord> {
        self.ledger.overdue(self.clock.today())
    }

    /// Returns the lending records not yet returned.
    pub fn active_borrowings(&self) -> Vec<LendingRecord> {
        self.ledger.active()
    }

    // === Cursors ===

    /// Items of `category` published in `year`.
    pub fn items_by_category_and_year(&self, category: Category, year: i32) -> Cursor<Item> {
        Cursor::new(
            self.index
                .iter_items()
                .filter(|item| item.category() == category && item.year() == year)
                .cloned()
                .collect(),
        )
    }

    /// Items with at least `min` contributors.
    pub fn items_with_min_contributors(&self, min: usize) -> Cursor<Item> {
        Cursor::new(
            self.index
                .iter_items()
                .filter(|item| item.contributors().len() >= min)
                .cloned()
                .collect(),
        )
    }

    /// Lending records that are both active and past due.
    pub fn overdue_cursor(&self) -> Cursor<LendingRecord> {
        let today = self.clock.today();
        Cursor::new(
            self.ledger
                .iter()
                .filter(|record| record.is_active() && record.is_past_due(today))
                .cloned()
                .collect(),
        )
    }

    // === Statistics ===

    /// Item count per populated category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        stats::category_counts(&self.index)
    }

    /// Most-borrowed items, at most `limit` rows.
    pub fn most_popular_items(&self, limit: usize) -> Vec<Ranking> {
        stats::most_popular_items(&self.ledger, limit)
    }

    /// Actors with the most loans, at most `limit` rows.
    pub fn most_active_actors(&self, limit: usize) -> Vec<Ranking> {
        stats::most_active_actors(&self.ledger, limit)
    }

    /// Actors with at least one overdue loan, each once.
    pub fn actors_with_overdue(&self) -> Vec<Actor> {
        stats::actors_with_overdue(&self.ledger, &self.index, self.clock.today())
    }

    /// Returns this instance's activity counters.
    pub fn activity(&self) -> StatsSnapshot {
        self.activity.snapshot()
    }

    // === Snapshots ===

    /// Copies the full state into a [`Snapshot`].
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.index.all_items(),
            actors: self.index.all_actors(),
            lendings: self.ledger.all(),
        }
    }

    /// Rebuilds a library from a snapshot.
    ///
    /// Indices are rebuilt from the items, and availability is recomputed
    /// from the active records so the two always agree.
    pub fn from_snapshot(snapshot: Snapshot, config: Config, clock: impl Clock + 'static) -> Self {
        let mut library = Self::with_clock(config, clock);

        for item in snapshot.items {
            let id = item.id().to_string();
            if !library.index.add_item(item) {
                warn!(item = %id, "duplicate item in snapshot ignored");
            }
        }
        for actor in snapshot.actors {
            let id = actor.id().to_string();
            if !library.index.add_actor(actor) {
                warn!(actor = %id, "duplicate actor in snapshot ignored");
            }
        }
        library.ledger = Ledger::from_records(snapshot.lendings, library.config.overdue_policy);

        let on_loan: HashSet<String> = library
            .ledger
            .iter()
            .filter(|record| record.is_active())
            .map(|record| record.item_id().to_string())
            .collect();
        let ids: Vec<String> = library.index.iter_items().map(|item| item.id().to_string()).collect();
        for id in ids {
            let available = !on_loan.contains(&id);
            library.index.set_available(&id, available);
        }
        library
    }

    /// Writes the full state to `path`.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> LibraryResult<SnapshotMetadata> {
        snapshot::write(path.as_ref(), &self.to_snapshot())
    }

    /// Loads a library saved with [`save_snapshot`](Self::save_snapshot).
    ///
    /// Returns `None` if the file is missing, unreadable or corrupt, so
    /// callers can treat all of those as "start fresh".
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        Self::load_with(path, Config::default(), SystemClock)
    }

    /// Like [`load`](Self::load) with an explicit configuration and clock.
    pub fn load_with(
        path: impl AsRef<Path>,
        config: Config,
        clock: impl Clock + 'static,
    ) -> Option<Self> {
        let path = path.as_ref();
        match snapshot::read(path) {
            Ok(snapshot) => {
                info!(path = %path.display(), "snapshot loaded");
                Some(Self::from_snapshot(snapshot, config, clock))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "snapshot not loaded");
                None
            }
        }
    }

    // === CSV ===

    /// Writes the catalog to `path` as delimited text. Returns the item count.
    pub fn export_csv(&self, path: impl AsRef<Path>, delimiter: &str) -> LibraryResult<usize> {
        let file = fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        let written = self.export_items(&mut writer, delimiter)?;
        info!(path = %path.as_ref().display(), items = written, "catalog exported");
        Ok(written)
    }

    /// Writes the catalog to any writer.
    pub fn export_items<W: Write>(&self, writer: &mut W, delimiter: &str) -> LibraryResult<usize> {
        tabular::write_items(writer, self.index.iter_items(), delimiter)
    }

    /// Reads a catalog file written by [`export_csv`](Self::export_csv).
    pub fn import_csv(
        &mut self,
        path: impl AsRef<Path>,
        delimiter: &str,
        mode: ImportMode,
    ) -> LibraryResult<ImportReport> {
        let file = fs::File::open(path.as_ref())?;
        let report = self.import_items(BufReader::new(file), delimiter, mode)?;
        info!(
            path = %path.as_ref().display(),
            imported = report.imported,
            skipped = report.skipped(),
            "catalog imported"
        );
        Ok(report)
    }

    /// Reads catalog lines from any buffered reader.
    ///
    /// Malformed lines and, in append mode, identifiers already present are
    /// skipped and reported. Availability is taken from the ledger, not from
    /// the file.
    pub fn import_items<R: BufRead>(
        &mut self,
        reader: R,
        delimiter: &str,
        mode: ImportMode,
    ) -> LibraryResult<ImportReport> {
        let parsed = tabular::read_items(reader, delimiter)?;

        if mode == ImportMode::Replace {
            self.index.clear_items();
        }

        let mut report = ImportReport::default();
        for skipped in &parsed.skipped {
            warn!(line = skipped.line, error = %skipped.error, "skipping catalog line");
        }
        report.malformed = parsed.skipped;

        for item in parsed.items {
            let id = item.id().to_string();
            if self.index.add_item(item) {
                self.sync_availability(&id);
                report.imported += 1;
            } else {
                debug!(item = %id, "skipping duplicate catalog line");
                report.duplicates.push(id);
            }
        }

        self.activity.record_import(report.imported, report.skipped());
        Ok(report)
    }

    /// Derives an item's availability from the ledger.
    fn sync_availability(&mut self, id: &str) {
        let available = !self.ledger.has_active(id);
        self.index.set_available(id, available);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::OverduePolicy;
    use crate::model::Tier;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn library_at(clock: &ManualClock, config: Config) -> Library {
        let mut library = Library::with_clock(config, clock.clone());
        library.add_item(
            Item::new("111", "War and Peace", 1869, Category::Romance).with_contributor("Tolstoy"),
        );
        library.add_item(
            Item::new("222", "Crime and Punishment", 1866, Category::Romance)
                .with_contributors(["Dostoevsky", "Tolstoy"]),
        );
        library.add_item(
            Item::new("333", "The Philosopher's Stone", 1997, Category::Fantasy)
                .with_contributor("Rowling"),
        );
        library.add_actor(Actor::new("R1", "Ivan", "ivan@mail.ru", Tier::Student));
        library.add_actor(Actor::new("R2", "Maria", "maria@mail.ru", Tier::Student));
        library
    }

    fn sample() -> (Library, ManualClock) {
        let clock = ManualClock::new(date(2024, 6, 1));
        (library_at(&clock, Config::default()), clock)
    }

    #[test]
    fn borrow_and_return_round_trip() {
        let (mut library, clock) = sample();

        assert!(library.borrow("111", "R1", 7));
        assert!(!library.item("111").unwrap().is_available());
        assert!(!library.borrow("111", "R2", 7));

        clock.advance(3);
        assert!(library.return_item("111", "R1"));
        assert!(library.item("111").unwrap().is_available());
        assert_eq!(
            library.all_borrowings()[0].returned(),
            Some(date(2024, 6, 4))
        );

        let activity = library.activity();
        assert_eq!(activity.borrows, 1);
        assert_eq!(activity.rejected_borrows, 1);
        assert_eq!(activity.returns, 1);
    }

    #[test]
    fn negative_days_are_immediately_overdue() {
        let (mut library, _) = sample();
        library.borrow("111", "R1", -2);

        let record = &library.all_borrowings()[0];
        assert!(library.is_overdue(record));
        assert_eq!(library.overdue_borrowings().len(), 1);
    }

    #[test]
    fn overdue_follows_the_clock() {
        let (mut library, clock) = sample();
        library.borrow_default("111", "R1");
        assert!(library.overdue_borrowings().is_empty());

        clock.advance(14);
        assert!(library.overdue_borrowings().is_empty());
        clock.advance(1);
        assert_eq!(library.overdue_borrowings().len(), 1);
    }

    #[test]
    fn returned_late_record_stays_overdue_by_default() {
        let (mut library, _) = sample();
        library.borrow("111", "R1", -2);
        library.return_item("111", "R1");

        assert_eq!(library.overdue_borrowings().len(), 1);
        assert_eq!(library.actors_with_overdue().len(), 1);
        // The cursor only lists loans still out.
        assert_eq!(library.overdue_cursor().count(), 0);
    }

    #[test]
    fn active_only_policy_ignores_returned_records() {
        let clock = ManualClock::new(date(2024, 6, 1));
        let mut library = library_at(
            &clock,
            Config::new().overdue_policy(OverduePolicy::ActiveOnly),
        );
        library.borrow("111", "R1", -2);
        library.return_item("111", "R1");

        assert!(library.overdue_borrowings().is_empty());
        assert!(library.actors_with_overdue().is_empty());
    }

    #[test]
    fn remove_item_on_loan_is_guarded() {
        let (mut library, _) = sample();
        library.borrow("111", "R1", 7);

        assert!(!library.remove_item("111"));
        assert!(library.item("111").is_some());

        library.return_item("111", "R1");
        assert!(library.remove_item("111"));
        assert_eq!(library.items_by_contributor("Tolstoy").len(), 1);
    }

    #[test]
    fn remove_item_on_loan_when_unguarded() {
        let clock = ManualClock::new(date(2024, 6, 1));
        let mut library = library_at(&clock, Config::new().guard_active_loans(false));
        library.borrow("111", "R1", 7);

        assert!(library.remove_item("111"));
        assert!(library.item("111").is_none());
        assert_eq!(library.active_borrowings().len(), 1);
    }

    #[test]
    fn extend_counts_activity() {
        let (mut library, _) = sample();
        library.borrow("111", "R1", 7);

        assert!(library.extend("111", "R1", 2));
        assert!(!library.extend("111", "R2", 2));
        assert_eq!(library.all_borrowings()[0].due(), date(2024, 6, 10));
        assert_eq!(library.activity().extensions, 1);
    }

    #[test]
    fn leaderboards() {
        let (mut library, _) = sample();
        for _ in 0..3 {
            library.borrow("111", "R1", 7);
            library.return_item("111", "R1");
        }
        library.borrow("222", "R2", 7);

        assert_eq!(
            library.most_popular_items(2),
            vec![Ranking::new("111", 3), Ranking::new("222", 1)]
        );
        assert_eq!(
            library.most_active_actors(10),
            vec![Ranking::new("R1", 3), Ranking::new("R2", 1)]
        );
    }

    #[test]
    fn cursors_are_snapshots() {
        let (mut library, _) = sample();
        let mut cursor = library.items_with_min_contributors(2);

        library.add_item(
            Item::new("444", "Three Authors", 2022, Category::Science)
                .with_contributors(["A", "B", "C"]),
        );

        assert_eq!(cursor.next().map(|item| item.id().to_string()), Some("222".into()));
        assert!(cursor.next().is_none());
        assert_eq!(library.items_with_min_contributors(2).count(), 2);
    }

    #[test]
    fn category_and_year_cursor() {
        let (library, _) = sample();
        let found: Vec<Item> = library
            .items_by_category_and_year(Category::Romance, 1866)
            .collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "222");
        assert!(library
            .items_by_category_and_year(Category::Science, 1866)
            .next()
            .is_none());
    }

    #[test]
    fn sorted_items_by_year() {
        let (library, _) = sample();
        let ids: Vec<String> = library
            .sorted_items(ItemOrder::YearDesc)
            .iter()
            .map(|item| item.id().to_string())
            .collect();
        assert_eq!(ids, vec!["333", "111", "222"]);
    }

    #[test]
    fn snapshot_restores_state_and_indices() {
        let (mut library, clock) = sample();
        library.borrow("111", "R1", 7);
        library.borrow("222", "R2", 7);
        library.return_item("222", "R2");

        let restored = Library::from_snapshot(library.to_snapshot(), Config::default(), clock);

        assert_eq!(restored.item_count(), 3);
        assert_eq!(restored.actor_count(), 2);
        assert_eq!(restored.all_borrowings().len(), 2);
        assert!(!restored.item("111").unwrap().is_available());
        assert!(restored.item("222").unwrap().is_available());
        assert_eq!(restored.items_by_contributor("Tolstoy").len(), 2);
        assert_eq!(restored.category_counts()[&Category::Romance], 2);
    }

    #[test]
    fn import_derives_availability_from_ledger() {
        let (mut library, _) = sample();
        library.borrow("111", "R1", 7);
        let text = format!(
            "{}\n111;War and Peace;Tolstoy;ROMANCE;1869;0;true\nNEW;Fresh;Someone;SCIENCE;2024;10;false\n",
            tabular::ITEM_CSV_HEADER
        );

        let report = library
            .import_items(text.as_bytes(), ";", ImportMode::Replace)
            .unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(library.item_count(), 2);
        assert!(!library.item("111").unwrap().is_available());
        assert!(library.item("NEW").unwrap().is_available());
    }

    #[test]
    fn readded_item_on_loan_stays_unavailable() {
        let (mut library, _) = sample();
        library.borrow("111", "R1", 7);
        let text = format!(
            "{}\n333;The Philosopher's Stone;Rowling;FANTASY;1997;0;true\n",
            tabular::ITEM_CSV_HEADER
        );
        library
            .import_items(text.as_bytes(), ";", ImportMode::Replace)
            .unwrap();
        assert!(library.item("111").is_none());

        assert!(library.add_item(Item::new("111", "War and Peace", 1869, Category::Romance)));
        assert!(!library.item("111").unwrap().is_available());
        assert!(!library.borrow("111", "R2", 7));
        assert_eq!(library.active_borrowings().len(), 1);

        assert!(library.return_item("111", "R1"));
        assert!(library.item("111").unwrap().is_available());
    }

    #[test]
    fn duplicate_actor_in_snapshot_keeps_first() {
        let (library, clock) = sample();
        let mut snapshot = library.to_snapshot();
        snapshot
            .actors
            .push(Actor::new("R1", "Impostor", "x@mail.ru", Tier::Vip));

        let restored = Library::from_snapshot(snapshot, Config::default(), clock);
        assert_eq!(restored.actor_count(), 2);
        assert_eq!(restored.actor("R1").unwrap().name(), "Ivan");
    }

    #[test]
    fn append_import_skips_duplicates() {
        let (mut library, _) = sample();
        let text = format!(
            "{}\n111;Impostor;X;SCIENCE;2000;1;true\nNEW;Fresh;Someone;SCIENCE;2024;10;true\n",
            tabular::ITEM_CSV_HEADER
        );

        let report = library
            .import_items(text.as_bytes(), ";", ImportMode::Append)
            .unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(report.duplicates, vec!["111".to_string()]);
        assert_eq!(library.item("111").unwrap().title(), "War and Peace");
        assert_eq!(library.item_count(), 4);
        assert_eq!(library.activity().lines_skipped, 1);
    }
}
