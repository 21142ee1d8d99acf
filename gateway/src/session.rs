//! Per-execution session state.
//!
//! One `Session` exists per contract-execution context and is exclusively
//! owned by it: the receiver identity, one tiered view per storage class,
//! and the handle table. Strictly single-threaded; the sandbox's calling
//! convention guarantees calls arrive serially.

use std::sync::Arc;

use tierkv_hostapi::{KvError, KvLimits, Tier, VersionedStore};

use crate::cursor::Cursor;
use crate::handles::HandleTable;
use crate::view::TierView;

/// Session state for one execution context.
pub struct Session {
    receiver: u64,
    ram: TierView,
    disk: TierView,
    handles: HandleTable,
}

impl Session {
    /// Create a session for `receiver` over a shared backing store.
    pub fn new(store: Arc<dyn VersionedStore>, receiver: u64, limits: KvLimits) -> Self {
        Self {
            receiver,
            ram: TierView::new(store.clone(), Tier::Ram, receiver, limits),
            disk: TierView::new(store, Tier::Disk, receiver, limits),
            handles: HandleTable::new(limits.max_iterators),
        }
    }

    pub fn receiver(&self) -> u64 {
        self.receiver
    }

    /// Resolve an ABI database selector to its tiered view.
    pub fn view(&self, selector: u64) -> Result<&TierView, KvError> {
        match Tier::from_selector(selector)? {
            Tier::Ram => Ok(&self.ram),
            Tier::Disk => Ok(&self.disk),
        }
    }

    /// Mutable variant of [`view`](Self::view).
    pub fn view_mut(&mut self, selector: u64) -> Result<&mut TierView, KvError> {
        match Tier::from_selector(selector)? {
            Tier::Ram => Ok(&mut self.ram),
            Tier::Disk => Ok(&mut self.disk),
        }
    }

    pub fn handles(&self) -> &HandleTable {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut HandleTable {
        &mut self.handles
    }

    /// Open a cursor over `contract`'s key space in the selected tier,
    /// restricted to `prefix`. Returns the cursor's token.
    pub fn create_cursor(
        &mut self,
        selector: u64,
        contract: u64,
        prefix: &[u8],
    ) -> Result<u32, KvError> {
        let view = self.view(selector)?;
        let cursor = Cursor::new(view.store().clone(), view.tier(), contract, prefix);
        self.handles.create(cursor)
    }

    /// Return the session to its quiescent initial condition for reuse.
    ///
    /// Fails with `IteratorsStillLive` while any cursor remains open.
    pub fn reset(&mut self) -> Result<(), KvError> {
        self.handles.reset()?;
        self.ram.clear_read_buffer();
        self.disk.clear_read_buffer();
        tracing::debug!(receiver = self.receiver, "session reset");
        Ok(())
    }
}
