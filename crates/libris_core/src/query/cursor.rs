//! Snapshot cursors.

use crate::error::{LibraryError, LibraryResult};

/// A forward-only cursor over a snapshot taken when it was created.
///
/// Later changes to the library are not visible through an existing cursor.
/// The cursor is finite, can be [`rewind`](Self::rewind)-ed to start over, and
/// cannot remove anything: [`remove`](Self::remove) always fails.
///
/// # Example
///
/// ```rust,ignore
/// let mut cursor = library.items_by_category_and_year(Category::Fantasy, 2020);
/// while cursor.has_next() {
///     let item = cursor.next().unwrap();
///     println!("{item}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    /// Snapshot being walked.
    entries: Vec<T>,
    /// Index of the next entry to hand out.
    position: usize,
}

impl<T: Clone> Cursor<T> {
    /// Wraps an owned snapshot.
    pub fn new(entries: Vec<T>) -> Self {
        Self {
            entries,
            position: 0,
        }
    }

    /// Returns `true` if another entry is available.
    pub fn has_next(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Returns the next entry without advancing.
    pub fn peek(&self) -> Option<&T> {
        self.entries.get(self.position)
    }

    /// Starts again from the first entry of the same snapshot.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Returns the total number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursors are read-only; this always returns
    /// [`LibraryError::UnsupportedOperation`].
    pub fn remove(&mut self) -> LibraryResult<()> {
        Err(LibraryError::unsupported("remove through a cursor"))
    }
}

impl<T: Clone> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let entry = self.entries.get(self.position)?.clone();
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> std::iter::FusedIterator for Cursor<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_snapshot_once() {
        let mut cursor = Cursor::new(vec![1, 2, 3]);

        assert!(cursor.has_next());
        assert_eq!(cursor.peek(), Some(&1));
        assert_eq!(cursor.next(), Some(1));
        assert_eq!(cursor.len(), 3);
        assert_eq!(cursor.by_ref().collect::<Vec<_>>(), vec![2, 3]);
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn rewind_restarts() {
        let mut cursor = Cursor::new(vec!["a", "b"]);
        cursor.next();
        cursor.next();

        cursor.rewind();
        assert_eq!(cursor.collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn empty_cursor_yields_nothing() {
        let mut cursor: Cursor<u8> = Cursor::new(Vec::new());
        assert!(cursor.is_empty());
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn remove_is_unsupported() {
        let mut cursor = Cursor::new(vec![1]);
        cursor.next();

        let err = cursor.remove().unwrap_err();
        assert!(matches!(err, LibraryError::UnsupportedOperation { .. }));
        assert_eq!(cursor.len(), 1);
    }
}
