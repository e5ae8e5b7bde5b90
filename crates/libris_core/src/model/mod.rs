//! Entity model: items, actors and lending records.

mod actor;
mod item;
mod lending;

pub use actor::{Actor, Tier};
pub use item::{Category, Item, UnknownCategory};
pub use lending::{LendingRecord, LendingState};
