//! Inspect command implementation.

use libris_core::persistence::snapshot;
use libris_core::{Config, Library, SystemClock};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Snapshot inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Snapshot path.
    pub path: String,
    /// Snapshot format version.
    pub version: u16,
    /// File size in bytes.
    pub file_size: usize,
    /// CBOR body size in bytes.
    pub body_size: usize,
    /// Number of items.
    pub item_count: usize,
    /// Number of items not on loan.
    pub available_count: usize,
    /// Number of actors.
    pub actor_count: usize,
    /// Number of lending records.
    pub lending_count: usize,
    /// Number of lending records not yet returned.
    pub active_count: usize,
    /// Number of overdue lending records.
    pub overdue_count: usize,
    /// Item count per populated category.
    pub categories: Vec<CategoryCount>,
}

/// Item count for a single category.
#[derive(Debug, Serialize)]
pub struct CategoryCount {
    /// Category name.
    pub category: String,
    /// Number of items.
    pub count: usize,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let result = inspect(path)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Reads the snapshot at `path` and gathers its figures.
pub fn inspect(path: &Path) -> Result<InspectResult, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No snapshot found at {:?}", path).into());
    }

    let data = fs::read(path)?;
    let metadata = snapshot::read_metadata(&data)?;
    let library = Library::from_snapshot(snapshot::decode(&data)?, Config::default(), SystemClock);

    Ok(InspectResult {
        path: path.display().to_string(),
        version: metadata.version,
        file_size: metadata.size,
        body_size: metadata.body_size,
        item_count: library.item_count(),
        available_count: library.available_items().len(),
        actor_count: library.actor_count(),
        lending_count: library.all_borrowings().len(),
        active_count: library.active_borrowings().len(),
        overdue_count: library.overdue_borrowings().len(),
        categories: library
            .category_counts()
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect(),
    })
}

fn print_text_output(result: &InspectResult) {
    println!("Libris Snapshot Inspection");
    println!("==========================");
    println!();
    println!("Path: {}", result.path);
    println!();
    println!("Format:");
    println!("  Version:    {}", result.version);
    println!("  File size:  {} bytes", format_size(result.file_size as u64));
    println!("  Body size:  {} bytes", format_size(result.body_size as u64));
    println!();
    println!("Catalog:");
    println!("  Items:      {}", result.item_count);
    println!("  Available:  {}", result.available_count);
    println!("  Actors:     {}", result.actor_count);
    println!();
    println!("Ledger:");
    println!("  Records:    {}", result.lending_count);
    println!("  Active:     {}", result.active_count);
    println!("  Overdue:    {}", result.overdue_count);

    if !result.categories.is_empty() {
        println!();
        println!("Categories:");
        for entry in &result.categories {
            println!("  {:<12} {}", entry.category, entry.count);
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::{Actor, Category, Item, Tier};

    #[test]
    fn inspect_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.lbrs");

        let mut library = Library::new();
        library.add_item(Item::new("111", "War and Peace", 1869, Category::Romance));
        library.add_item(Item::new("222", "Dune", 1965, Category::Fantasy));
        library.add_actor(Actor::new("R1", "Ivan", "ivan@mail.ru", Tier::Student));
        library.borrow("111", "R1", -1);
        library.save_snapshot(&path).unwrap();

        let result = inspect(&path).unwrap();
        assert_eq!(result.item_count, 2);
        assert_eq!(result.available_count, 1);
        assert_eq!(result.actor_count, 1);
        assert_eq!(result.lending_count, 1);
        assert_eq!(result.active_count, 1);
        assert_eq!(result.overdue_count, 1);
        assert_eq!(result.categories.len(), 2);
        assert_eq!(result.categories[0].category, "FANTASY");
    }

    #[test]
    fn inspect_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.lbrs");
        fs::write(&path, b"not a snapshot at all, just some bytes that are long enough").unwrap();
        assert!(inspect(&path).is_err());
    }

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(512), "512");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}
