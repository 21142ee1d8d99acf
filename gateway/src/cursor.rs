//! Live traversal position within one tier's contract key range.
//!
//! A cursor's position is either `End` or a fully-qualified key inside its
//! restricted range. When the positioned key is deleted by an intervening
//! write, the cursor becomes `Erased` — a first-class, observable state
//! rather than an error, so a traversal interleaved with writes can detect
//! exactly when its position vanished. `Erased` blocks stepping and
//! comparison until the cursor is repositioned with `seek_lower_bound` or
//! `move_to_end`.

use std::cmp::Ordering;
use std::sync::Arc;

use tierkv_hostapi::{nskey, KvError, Tier, VersionedStore};

use crate::view::copy_window;

/// Cursor status as surfaced to the sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CursorStatus {
    /// Positioned at a key-value pair.
    Ok = 0,
    /// The key-value pair the cursor was positioned at has been erased.
    Erased = -1,
    /// Positioned beyond the last key of the restricted range.
    End = -2,
}

impl CursorStatus {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// A single open traversal over one (tier, contract, sub-range) key space.
pub struct Cursor {
    store: Arc<dyn VersionedStore>,
    tier: Tier,
    contract: u64,
    /// Bounding prefix of the traversal: contract prefix + sub-range bytes.
    range: Vec<u8>,
    /// Fully-qualified key currently positioned at; `None` is end.
    position: Option<Vec<u8>>,
}

impl Cursor {
    /// Create a cursor restricted to `prefix` within the contract's key
    /// space. New cursors start at end.
    pub fn new(
        store: Arc<dyn VersionedStore>,
        tier: Tier,
        contract: u64,
        prefix: &[u8],
    ) -> Self {
        let mut range = nskey::contract_prefix(tier, contract);
        range.extend_from_slice(prefix);
        Self {
            store,
            tier,
            contract,
            range,
            position: None,
        }
    }

    /// Current status: `End`, `Erased`, or `Ok`.
    pub fn status(&self) -> Result<CursorStatus, KvError> {
        match &self.position {
            None => Ok(CursorStatus::End),
            Some(key) => {
                if self.store.contains(key)? {
                    Ok(CursorStatus::Ok)
                } else {
                    Ok(CursorStatus::Erased)
                }
            }
        }
    }

    /// Total order against another cursor over the same (tier, contract)
    /// range. End sorts after every key.
    pub fn compare(&self, other: &Cursor) -> Result<i32, KvError> {
        if self.tier != other.tier || self.contract != other.contract {
            return Err(KvError::IncompatibleCursors);
        }
        self.ensure_not_erased()?;
        other.ensure_not_erased()?;
        let ordering = match (&self.position, &other.position) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        };
        Ok(ordering_code(ordering))
    }

    /// Compare the cursor's current contract-local key against `key`.
    /// A cursor at end compares greater than any key.
    pub fn compare_key(&self, key: &[u8]) -> Result<i32, KvError> {
        self.ensure_not_erased()?;
        let ordering = match &self.position {
            None => Ordering::Greater,
            Some(full) => full[nskey::CONTRACT_PREFIX_LEN..].cmp(key),
        };
        Ok(ordering_code(ordering))
    }

    /// Reposition past the last key. Always succeeds, clears `Erased`.
    pub fn move_to_end(&mut self) -> CursorStatus {
        self.position = None;
        CursorStatus::End
    }

    /// Step to the next key in order. From end, wraps to the first key of
    /// the range (the substrate's bidirectional-iterator behavior).
    pub fn advance(&mut self) -> Result<CursorStatus, KvError> {
        self.ensure_not_erased()?;
        let next = match &self.position {
            None => self.store.lower_bound(&self.range, &self.range)?,
            Some(key) => self.store.next_after(&self.range, key)?,
        };
        self.position = next.map(|(k, _)| k);
        self.status()
    }

    /// Step to the previous key in order. From end, lands on the last key
    /// of the range; stepping back past the first key yields end.
    pub fn retreat(&mut self) -> Result<CursorStatus, KvError> {
        self.ensure_not_erased()?;
        let prev = match &self.position {
            None => self.store.last_in_range(&self.range)?,
            Some(key) => self.store.prev_before(&self.range, key)?,
        };
        self.position = prev.map(|(k, _)| k);
        self.status()
    }

    /// Reposition to the first key >= `key` within the restricted range,
    /// or end if none. Always succeeds, clears `Erased`.
    pub fn seek_lower_bound(&mut self, key: &[u8]) -> Result<CursorStatus, KvError> {
        let from = nskey::namespace_key(self.tier, self.contract, key);
        let found = self.store.lower_bound(&self.range, &from)?;
        self.position = found.map(|(k, _)| k);
        self.status()
    }

    /// Copy a window of the current contract-local key into `dest`.
    /// Returns the applied status and the key's total length (0 at end).
    pub fn read_key(&self, offset: u32, dest: &mut [u8]) -> Result<(CursorStatus, u32), KvError> {
        match self.current()? {
            Some((key, _)) => Ok((CursorStatus::Ok, copy_window(&key, offset, dest))),
            None => Ok((CursorStatus::End, 0)),
        }
    }

    /// Copy a window of the current value into `dest`. Returns the applied
    /// status and the value's total length (0 at end).
    pub fn read_value(&self, offset: u32, dest: &mut [u8]) -> Result<(CursorStatus, u32), KvError> {
        match self.current()? {
            Some((_, value)) => Ok((CursorStatus::Ok, copy_window(&value, offset, dest))),
            None => Ok((CursorStatus::End, 0)),
        }
    }

    /// Current (contract-local key, value) pair, `None` at end.
    /// Fails with `StaleCursor` if the positioned key was erased.
    fn current(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>, KvError> {
        match &self.position {
            None => Ok(None),
            Some(full) => match self.store.get(full)? {
                Some(value) => {
                    Ok(Some((full[nskey::CONTRACT_PREFIX_LEN..].to_vec(), value)))
                }
                None => Err(KvError::StaleCursor),
            },
        }
    }

    fn ensure_not_erased(&self) -> Result<(), KvError> {
        if let Some(key) = &self.position {
            if !self.store.contains(key)? {
                return Err(KvError::StaleCursor);
            }
        }
        Ok(())
    }
}

fn ordering_code(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
