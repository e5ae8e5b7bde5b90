//! Cross-module integration helpers.
//!
//! [`check_invariants`] verifies, through the public API alone, that the
//! catalog, its indices and the ledger agree with each other.
//! [`apply_operation`] replays generated operations against a library.

use crate::generators::LibraryOperation;
use libris_core::persistence::tabular;
use libris_core::{Category, ImportMode, Library, ManualClock};
use std::collections::{BTreeSet, HashSet};

/// Checks the cross-index and availability invariants.
///
/// Returns a description of the first violation found.
pub fn check_invariants(library: &Library) -> Result<(), String> {
    let items = library.all_items();
    let ids: BTreeSet<&str> = items.iter().map(|item| item.id()).collect();

    let on_loan: HashSet<String> = library
        .active_borrowings()
        .into_iter()
        .map(|record| record.item_id().to_string())
        .collect();
    for item in &items {
        if item.is_available() == on_loan.contains(item.id()) {
            return Err(format!(
                "item {} available={} but on_loan={}",
                item.id(),
                item.is_available(),
                on_loan.contains(item.id())
            ));
        }
    }

    let mut partitioned = BTreeSet::new();
    for category in Category::ALL {
        for item in library.items_by_category(category) {
            if item.category() != category {
                return Err(format!("item {} filed under {}", item.id(), category));
            }
            if !partitioned.insert(item.id().to_string()) {
                return Err(format!("item {} filed twice", item.id()));
            }
        }
    }
    let partitioned: BTreeSet<&str> = partitioned.iter().map(String::as_str).collect();
    if partitioned != ids {
        return Err("category index does not cover the catalog".to_string());
    }

    let counts = library.category_counts();
    if counts.values().any(|&count| count == 0) {
        return Err("empty category bucket reported".to_string());
    }
    if counts.values().sum::<usize>() != items.len() {
        return Err("category counts do not sum to item count".to_string());
    }

    let contributors: BTreeSet<&str> = items
        .iter()
        .flat_map(|item| item.contributors().iter().map(String::as_str))
        .collect();
    for name in contributors {
        let indexed: BTreeSet<String> = library
            .items_by_contributor(name)
            .into_iter()
            .map(|item| item.id().to_string())
            .collect();
        let expected: BTreeSet<String> = items
            .iter()
            .filter(|item| item.contributors().contains(name))
            .map(|item| item.id().to_string())
            .collect();
        if indexed != expected {
            return Err(format!("contributor bucket {} is stale", name));
        }
    }

    Ok(())
}

/// Applies one generated operation.
pub fn apply_operation(library: &mut Library, clock: &ManualClock, op: &LibraryOperation) {
    match op {
        LibraryOperation::AddItem(item) => {
            library.add_item(item.clone());
        }
        LibraryOperation::RemoveItem { id } => {
            library.remove_item(id);
        }
        LibraryOperation::AddActor(actor) => {
            library.add_actor(actor.clone());
        }
        LibraryOperation::RemoveActor { id } => {
            library.remove_actor(id);
        }
        LibraryOperation::Borrow {
            item_id,
            actor_id,
            days,
        } => {
            library.borrow(item_id, actor_id, *days);
        }
        LibraryOperation::Return { item_id, actor_id } => {
            library.return_item(item_id, actor_id);
        }
        LibraryOperation::Extend {
            item_id,
            actor_id,
            days,
        } => {
            library.extend(item_id, actor_id, *days);
        }
        LibraryOperation::ReplaceCatalog { items } => {
            let mut file = Vec::new();
            tabular::write_items(&mut file, items, ";").expect("Failed to write catalog");
            library
                .import_items(file.as_slice(), ";", ImportMode::Replace)
                .expect("Failed to import catalog");
        }
        LibraryOperation::AdvanceClock { days } => {
            clock.advance(*days);
        }
    }
}
