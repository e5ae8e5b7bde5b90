//! Index management.
//!
//! The [`IndexManager`] owns the primary item and actor maps together with
//! two secondary indices built from [`BucketIndex`]:
//! - category → items (partitions the catalog)
//! - contributor → items

mod bucket;
mod manager;

pub use bucket::BucketIndex;
pub use manager::IndexManager;
