//! # Libris Core
//!
//! In-memory catalog, reader registry and lending ledger.
//!
//! This crate provides:
//! - Entity model for items, actors and lending records
//! - Primary maps with category and contributor indices
//! - An append-only lending ledger with borrow, return and extend
//! - Item orders and snapshot cursors
//! - Leaderboards and activity counters
//! - Checksummed snapshots and delimited-text catalog files
//!
//! ## Invariants
//!
//! - An item is unavailable exactly while an active lending record references it
//! - The category index partitions the stored items
//! - Contributor buckets hold exactly the items naming that contributor, and
//!   empty buckets are pruned
//!
//! ## Example
//!
//! ```rust
//! use libris_core::{Actor, Category, Item, Library, Tier};
//!
//! let mut library = Library::new();
//! library.add_item(Item::new("111", "War and Peace", 1869, Category::Romance));
//! library.add_actor(Actor::new("R1", "Ivan", "ivan@mail.ru", Tier::Student));
//!
//! assert!(library.borrow("111", "R1", 7));
//! assert!(!library.item("111").unwrap().is_available());
//! assert!(library.return_item("111", "R1"));
//! assert_eq!(library.most_popular_items(1)[0].id, "111");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod error;
mod index;
mod ledger;
mod library;
mod model;
pub mod persistence;
mod query;
mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, OverduePolicy};
pub use error::{LibraryError, LibraryResult};
pub use index::{BucketIndex, IndexManager};
pub use ledger::Ledger;
pub use library::Library;
pub use model::{Actor, Category, Item, LendingRecord, LendingState, Tier, UnknownCategory};
pub use persistence::{ImportMode, ImportReport, Snapshot, SnapshotMetadata};
pub use query::{
    by_availability, by_category_then_title, by_title, by_year_desc, sort_items, Cursor,
    ItemOrder,
};
pub use stats::{ActivityStats, Ranking, StatsSnapshot};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
