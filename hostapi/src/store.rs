//! Backing-store abstraction for the TierKV layer.
//!
//! `VersionedStore` is the interface this layer consumes from the
//! prefix-ordered, undo-capable substrate underneath it. How the store
//! achieves durability, versioning, or compaction is its own concern;
//! this layer only needs point reads/writes plus ordered navigation
//! within a bounding byte prefix.
//!
//! Implementations:
//! - `MemStore` (this crate) — in-memory BTreeMap
//! - a persistent backend supplied by the embedding node

use crate::error::KvError;

/// One key-value entry, fully-qualified key included.
pub type Entry = (Vec<u8>, Vec<u8>);

/// Prefix-ordered key-value substrate.
///
/// All keys are fully-qualified namespace keys (see `nskey`). Methods take
/// `&self`; interior mutability is the implementor's concern so one store
/// can be shared by the views and cursors of a session.
///
/// Navigation methods are bounded by `range`: only keys starting with that
/// prefix are visible to them. Keys with a common prefix are contiguous in
/// lexicographic order, which is what makes the bound cheap to enforce.
pub trait VersionedStore: Send + Sync {
    /// Get the value for a key. `Ok(None)` if absent.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KvError>;

    /// Write a key-value pair.
    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), KvError>;

    /// Delete a key. Not an error if the key is absent.
    fn erase(&self, key: &[u8]) -> Result<(), KvError>;

    /// Check if a key exists.
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn contains(&self, key: &[u8]) -> Result<bool, KvError> {
        Ok(self.get(key)?.is_some())
    }

    /// First entry with key >= `from` within `range`.
    fn lower_bound(&self, range: &[u8], from: &[u8]) -> Result<Option<Entry>, KvError>;

    /// First entry with key strictly greater than `key` within `range`.
    fn next_after(&self, range: &[u8], key: &[u8]) -> Result<Option<Entry>, KvError>;

    /// Last entry with key strictly less than `key` within `range`.
    fn prev_before(&self, range: &[u8], key: &[u8]) -> Result<Option<Entry>, KvError>;

    /// Last entry within `range`.
    fn last_in_range(&self, range: &[u8]) -> Result<Option<Entry>, KvError>;
}
