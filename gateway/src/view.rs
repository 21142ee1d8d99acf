//! Tiered view over the versioned store.
//!
//! One `TierView` exists per (tier, session) pair. It pins the namespace
//! prefix for its tier, enforces write ownership and size limits, and
//! keeps the transient read buffer that `kv_get_data` reads from.

use std::sync::Arc;

use tierkv_hostapi::{nskey, KvError, KvLimits, Tier, VersionedStore};

/// Copy a window of `src` starting at `offset` into `dest`.
///
/// Returns the true total length of `src` regardless of how much was
/// copied, so callers can detect truncation and re-request with a larger
/// destination. An offset at or past the end copies nothing.
pub(crate) fn copy_window(src: &[u8], offset: u32, dest: &mut [u8]) -> u32 {
    let total = src.len() as u32;
    if offset < total {
        let start = offset as usize;
        let n = dest.len().min(src.len() - start);
        dest[..n].copy_from_slice(&src[start..start + n]);
    }
    total
}

/// One tier's window onto the store for a single execution session.
///
/// Writes go through to the backing store immediately; the store's own
/// versioning scheme is what makes them undoable.
pub struct TierView {
    store: Arc<dyn VersionedStore>,
    tier: Tier,
    receiver: u64,
    limits: KvLimits,
    /// Most recent `get` result. Any write on this view clears it, so a
    /// later `read_buffer` can never return data for a superseded lookup.
    read_buffer: Option<Vec<u8>>,
}

impl TierView {
    pub fn new(
        store: Arc<dyn VersionedStore>,
        tier: Tier,
        receiver: u64,
        limits: KvLimits,
    ) -> Self {
        Self {
            store,
            tier,
            receiver,
            limits,
            read_buffer: None,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub(crate) fn store(&self) -> &Arc<dyn VersionedStore> {
        &self.store
    }

    /// Look up `key` under the contract's namespace.
    ///
    /// On a hit the value is retained in the transient read buffer and its
    /// length returned; on a miss the buffer is cleared.
    pub fn get(&mut self, contract: u64, key: &[u8]) -> Result<Option<u32>, KvError> {
        let full = nskey::namespace_key(self.tier, contract, key);
        self.read_buffer = self.store.get(&full)?;
        Ok(self.read_buffer.as_ref().map(|v| v.len() as u32))
    }

    /// Copy a window of the transient read buffer into `dest`; returns the
    /// buffer's total length. With no buffered value the length is 0.
    pub fn read_buffer(&self, offset: u32, dest: &mut [u8]) -> u32 {
        copy_window(self.read_buffer.as_deref().unwrap_or(&[]), offset, dest)
    }

    /// Write `key` → `value` under the contract's namespace.
    pub fn set(&mut self, contract: u64, key: &[u8], value: &[u8]) -> Result<(), KvError> {
        self.check_owner(contract)?;
        if key.len() > self.limits.max_key_size as usize {
            return Err(KvError::KeyTooLarge);
        }
        if value.len() > self.limits.max_value_size as usize {
            return Err(KvError::ValueTooLarge);
        }
        self.read_buffer = None;
        let full = nskey::namespace_key(self.tier, contract, key);
        self.store.set(&full, value)
    }

    /// Delete `key` from the contract's namespace. Absent keys are fine.
    ///
    /// Only ownership is checked: a key no write could ever have created
    /// is simply absent, and erasing an absent key succeeds.
    pub fn erase(&mut self, contract: u64, key: &[u8]) -> Result<(), KvError> {
        self.check_owner(contract)?;
        self.read_buffer = None;
        let full = nskey::namespace_key(self.tier, contract, key);
        self.store.erase(&full)
    }

    pub(crate) fn clear_read_buffer(&mut self) {
        self.read_buffer = None;
    }

    fn check_owner(&self, contract: u64) -> Result<(), KvError> {
        if contract != self.receiver {
            return Err(KvError::AccessDenied);
        }
        Ok(())
    }
}
