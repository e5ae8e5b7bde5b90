//! Import command implementation.

use libris_core::{ImportMode, Library};
use std::path::Path;
use tracing::info;

/// Imports `csv_path` into the snapshot at `snapshot_path`.
///
/// A missing snapshot is created. An existing snapshot that cannot be read is
/// reported and left untouched.
pub fn run(
    snapshot_path: &Path,
    csv_path: &Path,
    delimiter: Option<&str>,
    replace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Importing {:?} into {:?}", csv_path, snapshot_path);

    let mut library = if snapshot_path.exists() {
        super::open(snapshot_path)?
    } else {
        info!("No snapshot at {:?}, starting a new one", snapshot_path);
        Library::new()
    };
    let mode = if replace {
        ImportMode::Replace
    } else {
        ImportMode::Append
    };

    let delimiter = delimiter.unwrap_or(&library.config().csv_delimiter).to_string();
    let report = library.import_csv(csv_path, &delimiter, mode)?;
    let metadata = library.save_snapshot(snapshot_path)?;

    println!("✓ Catalog imported");
    println!("  Imported:   {}", report.imported);
    println!("  Malformed:  {}", report.malformed.len());
    println!("  Duplicates: {}", report.duplicates.len());
    println!("  Items now:  {}", library.item_count());
    println!("  Snapshot:   {:?} ({} bytes)", snapshot_path, metadata.size);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CATALOG: &str = "id;title;contributors;category;year;extent;available\n\
                           1;One;A;FICTION;2001;10;true\n\
                           2;Two;A,B;SCIENCE;2002;20;true\n\
                           3;Broken;A;SCIENCE;later;20;true\n";

    #[test]
    fn creates_snapshot_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("library.lbrs");
        let csv = dir.path().join("catalog.csv");
        fs::write(&csv, CATALOG).unwrap();

        run(&snapshot, &csv, None, false).unwrap();

        let library = Library::load(&snapshot).unwrap();
        assert_eq!(library.item_count(), 2);
        assert_eq!(library.items_by_contributor("B").len(), 1);
    }

    #[test]
    fn corrupt_snapshot_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("library.lbrs");
        let csv = dir.path().join("catalog.csv");
        let garbage = b"LBRS this is not a valid snapshot body nor a valid digest".to_vec();
        fs::write(&snapshot, &garbage).unwrap();
        fs::write(&csv, CATALOG).unwrap();

        assert!(run(&snapshot, &csv, None, false).is_err());
        assert_eq!(fs::read(&snapshot).unwrap(), garbage);
    }

    #[test]
    fn append_then_replace() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("library.lbrs");
        let csv = dir.path().join("catalog.csv");
        let other = dir.path().join("other.csv");
        fs::write(&csv, CATALOG).unwrap();
        fs::write(
            &other,
            "id;title;contributors;category;year;extent;available\n9;Nine;C;HISTORY;1999;90;true\n",
        )
        .unwrap();

        run(&snapshot, &csv, None, false).unwrap();
        run(&snapshot, &other, None, false).unwrap();
        assert_eq!(Library::load(&snapshot).unwrap().item_count(), 3);

        run(&snapshot, &other, Some(";"), true).unwrap();
        assert_eq!(Library::load(&snapshot).unwrap().item_count(), 1);
    }
}
