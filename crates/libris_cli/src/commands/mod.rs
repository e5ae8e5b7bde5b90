//! CLI command implementations.

pub mod export;
pub mod import;
pub mod inspect;
pub mod report;

use libris_core::persistence::snapshot;
use libris_core::{Config, Library, SystemClock};
use std::path::Path;

/// Opens the library stored at `path`.
///
/// Unlike `Library::load`, a missing or corrupt file is reported as an error
/// so the user sees why.
pub fn open(path: &Path) -> Result<Library, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No snapshot found at {:?}", path).into());
    }
    let snapshot = snapshot::read(path)?;
    Ok(Library::from_snapshot(snapshot, Config::default(), SystemClock))
}
