//! Full-state snapshots.
//!
//! ## Snapshot Format
//!
//! ```text
//! | magic "LBRS" (4) | version (2, LE) | CBOR body (n) | SHA-256 of everything before it (32) |
//! ```
//!
//! The body is a CBOR map with one tagged section per record kind:
//! `items`, `actors` and `lendings`. Indices are not stored; they are rebuilt
//! from the items on load.

use crate::error::{LibraryError, LibraryResult};
use crate::model::{Actor, Item, LendingRecord};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Magic bytes for snapshot files.
const SNAPSHOT_MAGIC: [u8; 4] = *b"LBRS";
/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;
/// Header size (magic + version).
const HEADER_SIZE: usize = 4 + 2;
/// Footer size (SHA-256 digest).
const DIGEST_SIZE: usize = 32;

/// Everything a library needs to come back to life.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Catalog items.
    pub items: Vec<Item>,
    /// Registered actors.
    pub actors: Vec<Actor>,
    /// Ledger records in insertion order.
    pub lendings: Vec<LendingRecord>,
}

/// Header facts about an encoded snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMetadata {
    /// Format version.
    pub version: u16,
    /// Size of the whole encoded snapshot in bytes.
    pub size: usize,
    /// Size of the CBOR body in bytes.
    pub body_size: usize,
}

/// Encodes a snapshot into its framed byte form.
pub fn encode(snapshot: &Snapshot) -> LibraryResult<Vec<u8>> {
    let mut data = Vec::with_capacity(HEADER_SIZE + DIGEST_SIZE);
    data.extend_from_slice(&SNAPSHOT_MAGIC);
    data.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    ciborium::into_writer(snapshot, &mut data).map_err(|e| LibraryError::encode(e.to_string()))?;

    let digest = Sha256::digest(&data);
    data.extend_from_slice(&digest);
    Ok(data)
}

/// Reads the header without decoding the body or checking the digest.
pub fn read_metadata(data: &[u8]) -> LibraryResult<SnapshotMetadata> {
    if data.len() < HEADER_SIZE + DIGEST_SIZE {
        return Err(LibraryError::invalid_format("snapshot data too small"));
    }
    if data[0..4] != SNAPSHOT_MAGIC {
        return Err(LibraryError::invalid_format("invalid snapshot magic"));
    }

    let version = u16::from_le_bytes([data[4], data[5]]);
    if version != SNAPSHOT_VERSION {
        return Err(LibraryError::invalid_format(format!(
            "unsupported snapshot version: {}",
            version
        )));
    }

    Ok(SnapshotMetadata {
        version,
        size: data.len(),
        body_size: data.len() - HEADER_SIZE - DIGEST_SIZE,
    })
}

/// Verifies and decodes a framed snapshot.
pub fn decode(data: &[u8]) -> LibraryResult<Snapshot> {
    read_metadata(data)?;

    let digest_offset = data.len() - DIGEST_SIZE;
    let stored = &data[digest_offset..];
    let computed = Sha256::digest(&data[..digest_offset]);
    if stored != computed.as_slice() {
        return Err(LibraryError::ChecksumMismatch {
            expected: hex(stored),
            actual: hex(&computed),
        });
    }

    ciborium::from_reader(&data[HEADER_SIZE..digest_offset])
        .map_err(|e| LibraryError::decode(e.to_string()))
}

/// Encodes `snapshot` and writes it to `path`, replacing any existing file.
pub fn write(path: &Path, snapshot: &Snapshot) -> LibraryResult<SnapshotMetadata> {
    let data = encode(snapshot)?;

    let mut file = fs::File::create(path)?;
    file.write_all(&data)?;
    file.sync_all()?;

    info!(
        path = %path.display(),
        items = snapshot.items.len(),
        actors = snapshot.actors.len(),
        lendings = snapshot.lendings.len(),
        "snapshot written"
    );
    read_metadata(&data)
}

/// Reads and decodes the snapshot at `path`.
pub fn read(path: &Path) -> LibraryResult<Snapshot> {
    let data = fs::read(path)?;
    decode(&data)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
