//! Primary maps and secondary indices for items and actors.

use crate::index::bucket::BucketIndex;
use crate::model::{Actor, Category, Item};
use std::collections::BTreeMap;
use tracing::debug;

/// Owns the item and actor maps and keeps the category and contributor
/// indices in step with them.
///
/// All item mutation goes through [`add_item`](Self::add_item),
/// [`remove_item`](Self::remove_item), [`clear_items`](Self::clear_items) and
/// the crate-private availability flip. Readers always get owned copies, so
/// nothing outside this type can reach into a bucket.
#[derive(Debug, Clone, Default)]
pub struct IndexManager {
    /// Primary item map, keyed by catalog identifier.
    items: BTreeMap<String, Item>,
    /// Primary actor map, keyed by actor identifier.
    actors: BTreeMap<String, Actor>,
    /// Category to item identifiers.
    by_category: BucketIndex<Category>,
    /// Contributor to item identifiers.
    by_contributor: BucketIndex<String>,
}

impl IndexManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    // === Items ===

    /// Adds an item and files it in both indices.
    ///
    /// Returns `false` and changes nothing if the identifier is taken.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.items.contains_key(item.id()) {
            debug!(item = item.id(), "rejecting duplicate item");
            return false;
        }

        self.by_category.insert(item.category(), item.id());
        for contributor in item.contributors() {
            self.by_contributor.insert(contributor.clone(), item.id());
        }
        self.items.insert(item.id().to_string(), item);
        true
    }

    /// Removes an item from the primary map and every bucket that lists it.
    ///
    /// Returns `false` if no such item exists.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let Some(removed) = self.items.remove(id) else {
            return false;
        };

        self.by_category.remove(&removed.category(), id);
        for contributor in removed.contributors() {
            self.by_contributor.remove(contributor, id);
        }
        true
    }

    /// Removes every item and empties both indices.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.by_category.clear();
        self.by_contributor.clear();
    }

    /// Returns a copy of the item with this identifier.
    pub fn item(&self, id: &str) -> Option<Item> {
        self.items.get(id).cloned()
    }

    /// Returns `true` if the identifier is in the catalog.
    pub fn contains_item(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Returns copies of the items in `category`.
    pub fn items_by_category(&self, category: Category) -> Vec<Item> {
        self.resolve(self.by_category.lookup(&category))
    }

    /// Returns copies of the items `contributor` worked on.
    pub fn items_by_contributor(&self, contributor: &str) -> Vec<Item> {
        self.resolve(self.by_contributor.lookup(&contributor.to_string()))
    }

    /// Returns copies of every item, in identifier order.
    pub fn all_items(&self) -> Vec<Item> {
        self.items.values().cloned().collect()
    }

    /// Returns copies of the items that can currently be borrowed.
    pub fn available_items(&self) -> Vec<Item> {
        self.items
            .values()
            .filter(|item| item.is_available())
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over titles.
    pub fn search_by_title(&self, fragment: &str) -> Vec<Item> {
        let needle = fragment.to_lowercase();
        self.items
            .values()
            .filter(|item| item.title().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Iterates over stored items without copying them.
    pub fn iter_items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the populated categories with their item counts.
    pub fn category_sizes(&self) -> BTreeMap<Category, usize> {
        self.by_category
            .bucket_sizes()
            .map(|(category, n)| (*category, n))
            .collect()
    }

    /// Returns the number of items in one category.
    pub fn category_len(&self, category: Category) -> usize {
        self.by_category.bucket_len(&category)
    }

    /// Returns `true` if any item lists `contributor`.
    pub fn has_contributor(&self, contributor: &str) -> bool {
        self.by_contributor.contains(&contributor.to_string())
    }

    pub(crate) fn set_available(&mut self, id: &str, available: bool) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.set_available(available);
                true
            }
            None => false,
        }
    }

    fn resolve(&self, ids: Vec<String>) -> Vec<Item> {
        ids.iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect()
    }

    // === Actors ===

    /// Registers an actor. Returns `false` if the identifier is taken.
    pub fn add_actor(&mut self, actor: Actor) -> bool {
        if self.actors.contains_key(actor.id()) {
            return false;
        }
        self.actors.insert(actor.id().to_string(), actor);
        true
    }

    /// Removes an actor. Returns `false` if absent.
    pub fn remove_actor(&mut self, id: &str) -> bool {
        self.actors.remove(id).is_some()
    }

    /// Returns a copy of the actor with this identifier.
    pub fn actor(&self, id: &str) -> Option<Actor> {
        self.actors.get(id).cloned()
    }

    /// Returns `true` if the actor is registered.
    pub fn contains_actor(&self, id: &str) -> bool {
        self.actors.contains_key(id)
    }

    /// Returns copies of every actor, in identifier order.
    pub fn all_actors(&self) -> Vec<Actor> {
        self.actors.values().cloned().collect()
    }

    /// Returns the number of actors.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }
}
