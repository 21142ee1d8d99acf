//! The call gateway — sole entry surface exposed to the sandbox.
//!
//! Every operation takes raw `(ptr, len)` buffer arguments plus small
//! integers, mirroring the host-call ABI. Each call:
//! 1. Validates every buffer argument against the caller's memory
//! 2. Resolves the tier selector or cursor token
//! 3. Performs the operation on the view or cursor
//! 4. Returns a typed result; the embedder maps `KvError` to its abort
//!    convention via [`KvError::code`]
//!
//! Iterator status codes are `0` (ok), `-1` (erased), `-2` (end); error
//! codes are `<= -3` and never overlap them. No failure here is ever
//! process-fatal.

use std::sync::Arc;

use tierkv_hostapi::{KvError, KvLimits, VersionedStore};

use crate::memory;
use crate::session::Session;

/// Sandbox-facing call surface over one session.
pub struct KvGateway {
    session: Session,
}

impl KvGateway {
    /// Create a gateway for `receiver` over a shared backing store.
    pub fn new(store: Arc<dyn VersionedStore>, receiver: u64, limits: KvLimits) -> Self {
        Self {
            session: Session::new(store, receiver, limits),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Reset the session for reuse. Fails while cursors remain open.
    pub fn reset(&mut self) -> Result<(), KvError> {
        self.session.reset()
    }

    // ── Point operations ──

    /// Delete a key from the contract's namespace.
    pub fn kv_erase(
        &mut self,
        mem: &[u8],
        db: u64,
        contract: u64,
        key_ptr: u32,
        key_len: u32,
    ) -> Result<(), KvError> {
        let key = memory::read_bytes(mem, key_ptr, key_len)?;
        self.session.view_mut(db)?.erase(contract, &key)
    }

    /// Write a key-value pair into the contract's namespace.
    pub fn kv_set(
        &mut self,
        mem: &[u8],
        db: u64,
        contract: u64,
        key_ptr: u32,
        key_len: u32,
        val_ptr: u32,
        val_len: u32,
    ) -> Result<(), KvError> {
        let key = memory::read_bytes(mem, key_ptr, key_len)?;
        let value = memory::read_bytes(mem, val_ptr, val_len)?;
        self.session.view_mut(db)?.set(contract, &key, &value)
    }

    /// Look up a key. Writes the value's length (0 on a miss) to
    /// `size_ptr` and returns the present flag. A hit stages the value in
    /// the view's transient read buffer for `kv_get_data`.
    pub fn kv_get(
        &mut self,
        mem: &mut [u8],
        db: u64,
        contract: u64,
        key_ptr: u32,
        key_len: u32,
        size_ptr: u32,
    ) -> Result<bool, KvError> {
        let key = memory::read_bytes(mem, key_ptr, key_len)?;
        memory::validate_range(mem.len(), size_ptr, 4)?;

        let found = self.session.view_mut(db)?.get(contract, &key)?;
        memory::write_u32(mem, size_ptr, found.unwrap_or(0))?;
        Ok(found.is_some())
    }

    /// Copy a window of the transient read buffer into caller memory.
    /// Returns the buffer's true total length.
    pub fn kv_get_data(
        &self,
        mem: &mut [u8],
        db: u64,
        offset: u32,
        dest_ptr: u32,
        dest_len: u32,
    ) -> Result<u32, KvError> {
        let view = self.session.view(db)?;
        let dest = memory::slice_mut(mem, dest_ptr, dest_len)?;
        Ok(view.read_buffer(offset, dest))
    }

    // ── Cursor lifecycle ──

    /// Open a cursor over `contract`'s key space restricted to the given
    /// sub-range prefix. Returns its token (never 0).
    pub fn kv_it_create(
        &mut self,
        mem: &[u8],
        db: u64,
        contract: u64,
        prefix_ptr: u32,
        prefix_len: u32,
    ) -> Result<u32, KvError> {
        let prefix = memory::read_bytes(mem, prefix_ptr, prefix_len)?;
        self.session.create_cursor(db, contract, &prefix)
    }

    /// Close a cursor and recycle its token.
    pub fn kv_it_destroy(&mut self, itr: u32) -> Result<(), KvError> {
        self.session.handles_mut().destroy(itr)
    }

    // ── Cursor observation ──

    /// Current status code of a cursor.
    pub fn kv_it_status(&self, itr: u32) -> Result<i32, KvError> {
        Ok(self.session.handles().get(itr)?.status()?.as_i32())
    }

    /// Three-way comparison of two cursors over the same range.
    pub fn kv_it_compare(&self, itr_a: u32, itr_b: u32) -> Result<i32, KvError> {
        let a = self.session.handles().get(itr_a)?;
        let b = self.session.handles().get(itr_b)?;
        a.compare(b)
    }

    /// Three-way comparison of a cursor's current key against `key`.
    pub fn kv_it_key_compare(
        &self,
        mem: &[u8],
        itr: u32,
        key_ptr: u32,
        key_len: u32,
    ) -> Result<i32, KvError> {
        let key = memory::read_bytes(mem, key_ptr, key_len)?;
        self.session.handles().get(itr)?.compare_key(&key)
    }

    // ── Cursor movement ──

    /// Reposition past the last key. Always returns the end status.
    pub fn kv_it_move_to_end(&mut self, itr: u32) -> Result<i32, KvError> {
        Ok(self.session.handles_mut().get_mut(itr)?.move_to_end().as_i32())
    }

    /// Step forward one key; returns the resulting status.
    pub fn kv_it_next(&mut self, itr: u32) -> Result<i32, KvError> {
        Ok(self.session.handles_mut().get_mut(itr)?.advance()?.as_i32())
    }

    /// Step backward one key; returns the resulting status.
    pub fn kv_it_prev(&mut self, itr: u32) -> Result<i32, KvError> {
        Ok(self.session.handles_mut().get_mut(itr)?.retreat()?.as_i32())
    }

    /// Reposition to the first key >= `key` within the cursor's range.
    pub fn kv_it_lower_bound(
        &mut self,
        mem: &[u8],
        itr: u32,
        key_ptr: u32,
        key_len: u32,
    ) -> Result<i32, KvError> {
        let key = memory::read_bytes(mem, key_ptr, key_len)?;
        Ok(self
            .session
            .handles_mut()
            .get_mut(itr)?
            .seek_lower_bound(&key)?
            .as_i32())
    }

    // ── Cursor reads ──

    /// Copy a window of the current key into caller memory; the key's
    /// total length goes to `size_ptr`. Returns the applied status.
    pub fn kv_it_key(
        &self,
        mem: &mut [u8],
        itr: u32,
        offset: u32,
        dest_ptr: u32,
        dest_len: u32,
        size_ptr: u32,
    ) -> Result<i32, KvError> {
        memory::validate_range(mem.len(), size_ptr, 4)?;
        let cursor = self.session.handles().get(itr)?;
        let dest = memory::slice_mut(mem, dest_ptr, dest_len)?;
        let (status, total) = cursor.read_key(offset, dest)?;
        memory::write_u32(mem, size_ptr, total)?;
        Ok(status.as_i32())
    }

    /// Copy a window of the current value into caller memory; the value's
    /// total length goes to `size_ptr`. Returns the applied status.
    pub fn kv_it_value(
        &self,
        mem: &mut [u8],
        itr: u32,
        offset: u32,
        dest_ptr: u32,
        dest_len: u32,
        size_ptr: u32,
    ) -> Result<i32, KvError> {
        memory::validate_range(mem.len(), size_ptr, 4)?;
        let cursor = self.session.handles().get(itr)?;
        let dest = memory::slice_mut(mem, dest_ptr, dest_len)?;
        let (status, total) = cursor.read_value(offset, dest)?;
        memory::write_u32(mem, size_ptr, total)?;
        Ok(status.as_i32())
    }
}
