//! Test fixtures and library helpers.
//!
//! Provides libraries driven by a [`ManualClock`] and backed by a temporary
//! directory for snapshot and CSV files.

use chrono::NaiveDate;
use libris_core::{Actor, Category, Config, Item, Library, ManualClock, Tier};
use std::path::PathBuf;
use tempfile::TempDir;

/// Default date fixture libraries start on.
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date")
}

/// A test library with a controllable clock and automatic cleanup.
pub struct TestLibrary {
    /// The library instance.
    pub library: Library,
    /// Shared handle to the library's clock.
    pub clock: ManualClock,
    /// Scratch directory for files (kept alive to prevent cleanup).
    temp_dir: TempDir,
}

impl TestLibrary {
    /// Creates an empty library with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty library with `config`.
    pub fn with_config(config: Config) -> Self {
        let clock = ManualClock::new(fixture_date());
        Self {
            library: Library::with_clock(config, clock.clone()),
            clock,
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Returns a path inside the scratch directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Loads `name` from the scratch directory with this fixture's clock.
    pub fn reload(&self, name: &str) -> Option<Library> {
        Library::load_with(self.path(name), Config::default(), self.clock.clone())
    }
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestLibrary {
    type Target = Library;

    fn deref(&self) -> &Self::Target {
        &self.library
    }
}

impl std::ops::DerefMut for TestLibrary {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.library
    }
}

/// Runs a test with a temporary library.
///
/// # Example
///
/// ```rust,ignore
/// use libris_testkit::with_temp_library;
///
/// with_temp_library(|lib| {
///     assert_eq!(lib.item_count(), 0);
/// });
/// ```
pub fn with_temp_library<F, R>(f: F) -> R
where
    F: FnOnce(&mut TestLibrary) -> R,
{
    let mut test_lib = TestLibrary::new();
    f(&mut test_lib)
}

/// Items used across scenarios.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new("111", "War and Peace", 1869, Category::Romance)
            .with_contributor("Leo Tolstoy")
            .with_extent(1225),
        Item::new("222", "Crime and Punishment", 1866, Category::Romance)
            .with_contributor("Fyodor Dostoevsky")
            .with_extent(671),
        Item::new("333", "Harry Potter and the Philosopher's Stone", 1997, Category::Fantasy)
            .with_contributor("J. K. Rowling")
            .with_extent(223),
        Item::new("444", "Collected Essays", 2022, Category::NonFiction)
            .with_contributors(["Ivanov", "Petrov", "Sidorov"])
            .with_extent(320),
        Item::new("555", "A Brief History of Time", 1988, Category::Science)
            .with_contributor("Stephen Hawking")
            .with_extent(256),
    ]
}

/// Actors used across scenarios.
pub fn sample_actors() -> Vec<Actor> {
    vec![
        Actor::new("R1", "Ivan Petrov", "ivan@mail.ru", Tier::Student),
        Actor::new("R2", "Maria Sidorova", "maria@mail.ru", Tier::Teacher),
        Actor::new("R3", "Alexei Smirnov", "alexei@mail.ru", Tier::Vip),
    ]
}

/// Scenario helpers.
pub mod scenarios {
    use super::*;

    /// A library holding [`sample_items`] and [`sample_actors`].
    pub fn populated_library() -> TestLibrary {
        let mut test_lib = TestLibrary::new();
        for item in sample_items() {
            test_lib.add_item(item);
        }
        for actor in sample_actors() {
            test_lib.add_actor(actor);
        }
        test_lib
    }

    /// A populated library with some history:
    /// - `111` borrowed three times by `R1` and returned
    /// - `222` on loan to `R2`
    /// - `333` on loan to `R3` and already overdue
    pub fn busy_library() -> TestLibrary {
        let mut test_lib = populated_library();
        for _ in 0..3 {
            test_lib.borrow("111", "R1", 7);
            test_lib.return_item("111", "R1");
        }
        test_lib.borrow("222", "R2", 14);
        test_lib.borrow("333", "R3", -2);
        test_lib
    }
}
