//! Handle table mapping small integer tokens to live cursors.
//!
//! Slot 0 is permanently reserved: token 0 is never handed out, so a zero
//! token from the guest is always invalid. Destroyed slots are recycled
//! lowest-first. Slot occupancy is the live-cursor count, so the iterator
//! budget needs no separate counter.

use std::collections::BTreeSet;

use tierkv_hostapi::KvError;

use crate::cursor::Cursor;

/// Per-session table of cursor-owning slots.
///
/// Invariant: the slot sequence partitions exactly into the reserved
/// slot 0, live cursors, and destroyed-recyclable slots tracked in `free`.
pub struct HandleTable {
    slots: Vec<Option<Cursor>>,
    free: BTreeSet<u32>,
    max_iterators: u32,
}

impl HandleTable {
    pub fn new(max_iterators: u32) -> Self {
        Self {
            slots: vec![None], // reserved sentinel slot
            free: BTreeSet::new(),
            max_iterators,
        }
    }

    /// Number of currently live cursors.
    pub fn live(&self) -> u32 {
        (self.slots.len() - 1 - self.free.len()) as u32
    }

    /// Place `cursor` into a slot and return its token.
    ///
    /// Recycles the lowest destroyed index if one exists, else appends.
    /// Token 0 is never returned.
    pub fn create(&mut self, cursor: Cursor) -> Result<u32, KvError> {
        if self.live() >= self.max_iterators {
            return Err(KvError::IteratorBudgetExceeded);
        }
        let token = match self.free.pop_first() {
            Some(token) => {
                self.slots[token as usize] = Some(cursor);
                token
            }
            None => {
                // Guards the token width in case the budget is set absurdly.
                if self.slots.len() > u32::MAX as usize {
                    return Err(KvError::IteratorBudgetExceeded);
                }
                let token = self.slots.len() as u32;
                self.slots.push(Some(cursor));
                token
            }
        };
        tracing::trace!(token, live = self.live(), "cursor created");
        Ok(token)
    }

    /// Drop the cursor behind `token` and mark its slot recyclable.
    pub fn destroy(&mut self, token: u32) -> Result<(), KvError> {
        let slot = self.slot_mut(token)?;
        *slot = None;
        self.free.insert(token);
        tracing::trace!(token, live = self.live(), "cursor destroyed");
        Ok(())
    }

    pub fn get(&self, token: u32) -> Result<&Cursor, KvError> {
        self.slots
            .get(token as usize)
            .filter(|_| token != 0)
            .and_then(|slot| slot.as_ref())
            .ok_or(KvError::InvalidHandle)
    }

    pub fn get_mut(&mut self, token: u32) -> Result<&mut Cursor, KvError> {
        self.slot_mut(token)?.as_mut().ok_or(KvError::InvalidHandle)
    }

    /// Truncate back to the reserved slot. Fails while cursors are live.
    pub fn reset(&mut self) -> Result<(), KvError> {
        if self.live() != 0 {
            return Err(KvError::IteratorsStillLive);
        }
        self.slots.truncate(1);
        self.free.clear();
        Ok(())
    }

    fn slot_mut(&mut self, token: u32) -> Result<&mut Option<Cursor>, KvError> {
        if token == 0 {
            return Err(KvError::InvalidHandle);
        }
        match self.slots.get_mut(token as usize) {
            Some(slot) if slot.is_some() => Ok(slot),
            _ => Err(KvError::InvalidHandle),
        }
    }
}
