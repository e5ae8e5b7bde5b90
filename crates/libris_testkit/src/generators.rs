//! Property-based test generators using proptest.
//!
//! Identifiers are drawn from small pools so that generated operations
//! collide often: duplicate adds, borrows of items already on loan and
//! returns of loans that never existed all show up within a few cases.

use libris_core::{Actor, Category, Item, Tier};
use proptest::prelude::*;

/// Strategy for categories.
pub fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// Strategy for actor tiers.
pub fn tier_strategy() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::Student),
        Just(Tier::Teacher),
        Just(Tier::Regular),
        Just(Tier::Vip),
    ]
}

/// Strategy for item identifiers from a pool of eight.
pub fn item_id_strategy() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|n| format!("ITEM-{}", n))
}

/// Strategy for actor identifiers from a pool of four.
pub fn actor_id_strategy() -> impl Strategy<Value = String> {
    (0u8..4).prop_map(|n| format!("R{}", n))
}

/// Strategy for contributor names from a pool of five.
pub fn contributor_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Tolstoy", "Dostoevsky", "Chekhov", "Pushkin", "Gogol"])
        .prop_map(String::from)
}

/// Strategy for titles that survive a CSV round trip with `;`.
pub fn title_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 ']{0,24}").expect("Invalid regex")
}

/// Strategy for items.
pub fn item_strategy() -> impl Strategy<Value = Item> {
    (
        item_id_strategy(),
        title_strategy(),
        prop::collection::vec(contributor_strategy(), 0..4),
        category_strategy(),
        1450i32..2030,
        0u32..2000,
    )
        .prop_map(|(id, title, contributors, category, year, extent)| {
            Item::new(id, title, year, category)
                .with_contributors(contributors)
                .with_extent(extent)
        })
}

/// Strategy for actors.
pub fn actor_strategy() -> impl Strategy<Value = Actor> {
    (actor_id_strategy(), "[A-Z][a-z]{2,10}", tier_strategy()).prop_map(|(id, name, tier)| {
        let contact = format!("{}@mail.ru", name.to_lowercase());
        Actor::new(id, name, contact, tier)
    })
}

/// One step applied to a library by property tests.
#[derive(Debug, Clone)]
pub enum LibraryOperation {
    /// Add an item
    AddItem(Item),
    /// Remove an item
    RemoveItem {
        /// Item ID
        id: String,
    },
    /// Register an actor
    AddActor(Actor),
    /// Remove an actor
    RemoveActor {
        /// Actor ID
        id: String,
    },
    /// Borrow an item
    Borrow {
        /// Item ID
        item_id: String,
        /// Actor ID
        actor_id: String,
        /// Loan length, may be negative
        days: i64,
    },
    /// Return an item
    Return {
        /// Item ID
        item_id: String,
        /// Actor ID
        actor_id: String,
    },
    /// Extend a loan
    Extend {
        /// Item ID
        item_id: String,
        /// Actor ID
        actor_id: String,
        /// Extra days
        days: i64,
    },
    /// Replace the catalog through a CSV import
    ReplaceCatalog {
        /// Items written to the imported file
        items: Vec<Item>,
    },
    /// Move the clock forward
    AdvanceClock {
        /// Days to advance
        days: i64,
    },
}

/// Strategy for generating library operations.
pub fn library_operation_strategy() -> impl Strategy<Value = LibraryOperation> {
    prop_oneof![
        4 => item_strategy().prop_map(LibraryOperation::AddItem),
        1 => item_id_strategy().prop_map(|id| LibraryOperation::RemoveItem { id }),
        2 => actor_strategy().prop_map(LibraryOperation::AddActor),
        1 => actor_id_strategy().prop_map(|id| LibraryOperation::RemoveActor { id }),
        4 => (item_id_strategy(), actor_id_strategy(), -5i64..30)
            .prop_map(|(item_id, actor_id, days)| LibraryOperation::Borrow { item_id, actor_id, days }),
        3 => (item_id_strategy(), actor_id_strategy())
            .prop_map(|(item_id, actor_id)| LibraryOperation::Return { item_id, actor_id }),
        1 => (item_id_strategy(), actor_id_strategy(), 0i64..14)
            .prop_map(|(item_id, actor_id, days)| LibraryOperation::Extend { item_id, actor_id, days }),
        1 => prop::collection::vec(item_strategy(), 0..4)
            .prop_map(|items| LibraryOperation::ReplaceCatalog { items }),
        1 => (0i64..20).prop_map(|days| LibraryOperation::AdvanceClock { days }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<LibraryOperation>> {
    prop::collection::vec(library_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_items_are_available(item in item_strategy()) {
            prop_assert!(item.is_available());
            prop_assert!(item.id().starts_with("ITEM-"));
            prop_assert!(item.contributors().len() <= 3);
        }

        #[test]
        fn generated_titles_avoid_delimiter(title in title_strategy()) {
            prop_assert!(!title.contains(';'));
        }

        #[test]
        fn generated_actor_contact_matches_name(actor in actor_strategy()) {
            prop_assert!(actor.contact().starts_with(&actor.name().to_lowercase()));
        }
    }
}
