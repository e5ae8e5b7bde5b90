//! Persistence: whole-library snapshots and catalog CSV files.

pub mod snapshot;
pub mod tabular;

pub use snapshot::{Snapshot, SnapshotMetadata, SNAPSHOT_VERSION};
pub use tabular::{LineError, ParsedCatalog, SkippedLine, CONTRIBUTOR_SEPARATOR, ITEM_CSV_HEADER};

/// Whether an import adds to the catalog or replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Keep existing items; lines whose identifier is already present are skipped.
    Append,
    /// Remove every item first.
    Replace,
}

/// Result of a catalog import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Items added.
    pub imported: usize,
    /// Lines rejected as malformed.
    pub malformed: Vec<SkippedLine>,
    /// Identifiers skipped because they were already in the catalog.
    pub duplicates: Vec<String>,
}

impl ImportReport {
    /// Total number of data lines that did not produce an item.
    pub fn skipped(&self) -> usize {
        self.malformed.len() + self.duplicates.len()
    }
}
