//! Export command implementation.

use std::path::Path;
use tracing::info;

/// Writes the catalog of the snapshot at `snapshot_path` to `csv_path`.
pub fn run(
    snapshot_path: &Path,
    csv_path: &Path,
    delimiter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Exporting catalog from {:?}", snapshot_path);

    let library = super::open(snapshot_path)?;
    let delimiter = delimiter.unwrap_or(&library.config().csv_delimiter);
    let written = library.export_csv(csv_path, delimiter)?;

    println!("✓ Catalog exported");
    println!("  Path:  {:?}", csv_path);
    println!("  Items: {}", written);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::{Category, Item, Library};
    use std::fs;

    #[test]
    fn exports_saved_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("library.lbrs");
        let csv = dir.path().join("catalog.csv");

        let mut library = Library::new();
        library.add_item(Item::new("111", "War and Peace", 1869, Category::Romance));
        library.save_snapshot(&snapshot).unwrap();

        run(&snapshot, &csv, None).unwrap();

        let text = fs::read_to_string(&csv).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("111;War and Peace;;ROMANCE;1869;0;true"));
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &dir.path().join("absent.lbrs"),
            &dir.path().join("out.csv"),
            Some(";"),
        );
        assert!(result.is_err());
    }
}
