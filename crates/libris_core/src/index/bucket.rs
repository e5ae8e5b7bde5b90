//! Secondary index buckets.

use std::collections::{BTreeMap, BTreeSet};

/// Maps a key to the set of item identifiers filed under it.
///
/// Buckets are created on first insert and dropped as soon as they become
/// empty, so `contains` and `len` only ever see populated keys.
///
/// # Example
///
/// ```rust,ignore
/// let mut index: BucketIndex<String> = BucketIndex::new();
///
/// index.insert("Tolstoy".to_string(), "111");
/// assert_eq!(index.lookup(&"Tolstoy".to_string()), vec!["111".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct BucketIndex<K: Ord + Clone> {
    /// Key to item identifiers mapping.
    entries: BTreeMap<K, BTreeSet<String>>,
    /// Total key/identifier pair count.
    count: usize,
}

impl<K: Ord + Clone> BucketIndex<K> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            count: 0,
        }
    }

    /// Rebuilds the index from a set of key/identifier pairs.
    pub fn rebuild<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, String)>,
    {
        self.clear();
        for (key, item_id) in entries {
            self.insert(key, item_id);
        }
    }

    /// Files `item_id` under `key`. Returns `false` if it was already there.
    pub fn insert(&mut self, key: K, item_id: impl Into<String>) -> bool {
        let inserted = self.entries.entry(key).or_default().insert(item_id.into());
        if inserted {
            self.count += 1;
        }
        inserted
    }

    /// Removes `item_id` from the bucket under `key`, dropping the bucket if
    /// it becomes empty.
    pub fn remove(&mut self, key: &K, item_id: &str) -> bool {
        if let Some(set) = self.entries.get_mut(key) {
            if set.remove(item_id) {
                self.count -= 1;
                if set.is_empty() {
                    self.entries.remove(key);
                }
                return true;
            }
        }
        false
    }

    /// Returns the identifiers filed under `key`, in identifier order.
    pub fn lookup(&self, key: &K) -> Vec<String> {
        match self.entries.get(key) {
            Some(set) => set.iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Returns `true` if `key` has a populated bucket.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of identifiers under `key`.
    pub fn bucket_len(&self, key: &K) -> usize {
        self.entries.get(key).map_or(0, BTreeSet::len)
    }

    /// Returns every populated key with its bucket size, in key order.
    pub fn bucket_sizes(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(key, set)| (key, set.len()))
    }

    /// Returns the number of key/identifier pairs.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the index holds nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Clears the index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.count = 0;
    }
}

impl<K: Ord + Clone> Default for BucketIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut index = BucketIndex::new();
        assert!(index.insert("key1".to_string(), "111"));

        assert_eq!(index.lookup(&"key1".to_string()), vec!["111".to_string()]);
    }

    #[test]
    fn lookup_missing() {
        let index: BucketIndex<String> = BucketIndex::new();
        assert!(index.lookup(&"missing".to_string()).is_empty());
    }

    #[test]
    fn duplicate_insert_is_ignored() {
        let mut index = BucketIndex::new();
        assert!(index.insert(1, "a"));
        assert!(!index.insert(1, "a"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remove_one_of_many() {
        let mut index = BucketIndex::new();
        index.insert("key".to_string(), "a");
        index.insert("key".to_string(), "b");

        assert!(index.remove(&"key".to_string(), "a"));

        assert_eq!(index.lookup(&"key".to_string()), vec!["b".to_string()]);
        assert_eq!(index.bucket_len(&"key".to_string()), 1);
    }

    #[test]
    fn empty_buckets_are_pruned() {
        let mut index = BucketIndex::new();
        index.insert("key".to_string(), "a");
        assert!(index.contains(&"key".to_string()));

        assert!(index.remove(&"key".to_string(), "a"));
        assert!(!index.contains(&"key".to_string()));
        assert!(!index.remove(&"key".to_string(), "a"));
        assert!(index.is_empty());
    }

    #[test]
    fn rebuild_replaces_contents() {
        let mut index = BucketIndex::new();
        index.insert("old".to_string(), "x");

        index.rebuild(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("b".to_string(), "3".to_string()),
        ]);

        assert_eq!(index.len(), 3);
        assert!(!index.contains(&"old".to_string()));
        let sizes: Vec<_> = index.bucket_sizes().map(|(k, n)| (k.clone(), n)).collect();
        assert_eq!(sizes, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }
}
