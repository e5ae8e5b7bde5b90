//! Report command implementation.

use libris_core::Ranking;
use std::path::Path;

/// Prints leaderboards, category counts and actors with overdue loans.
pub fn run(path: &Path, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let library = super::open(path)?;

    println!("Libris Report");
    println!("=============");
    println!();
    print_rankings("Most borrowed items:", &library.most_popular_items(limit));
    println!();
    print_rankings("Most active actors:", &library.most_active_actors(limit));
    println!();

    println!("Items per category:");
    for (category, count) in library.category_counts() {
        println!("  {:<12} {}", category, count);
    }
    println!();

    let overdue = library.actors_with_overdue();
    println!("Actors with overdue loans: {}", overdue.len());
    for actor in &overdue {
        println!("  {} ({}, {})", actor.name(), actor.id(), actor.contact());
    }

    Ok(())
}

fn print_rankings(title: &str, rows: &[Ranking]) {
    println!("{}", title);
    if rows.is_empty() {
        println!("  (none)");
    }
    for (position, row) in rows.iter().enumerate() {
        println!("  {}. {} ({})", position + 1, row.id, row.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_requires_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&dir.path().join("absent.lbrs"), 3).is_err());
    }

    #[test]
    fn report_runs_on_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.lbrs");
        libris_core::Library::new().save_snapshot(&path).unwrap();
        run(&path, 3).unwrap();
    }
}
