//! Namespace-key byte layout.
//!
//! Every piece of live contract data lives under one fully-qualified key:
//!
//! ```text
//! [CONTRACT_KV_PREFIX][tier id, u64 BE][contract id, u64 BE][contract key bytes]
//! ```
//!
//! Integers are appended big-endian so lexicographic order over the full
//! key equals numeric order over its components. Cursor comparison and
//! lower-bound seeking rely on this; the layout must not be reordered.

use crate::error::KvError;

/// Reserved top-level prefix for undo/version bookkeeping.
///
/// This layer never writes under it, but defines it so live data can never
/// collide with the versioning subsystem sharing the store.
pub const UNDO_STACK_PREFIX: u8 = 0x40;

/// Reserved top-level prefix for live contract key-value data.
pub const CONTRACT_KV_PREFIX: u8 = 0x41;

/// Length of the fixed portion preceding the contract-supplied key bytes:
/// one prefix byte plus two big-endian u64 identifiers.
pub const CONTRACT_PREFIX_LEN: usize = 1 + 8 + 8;

/// Storage class a contract's key-value data lives in.
///
/// The tier set is closed; the gateway resolves the ABI's u64 database
/// selector to one of these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Memory-class storage.
    Ram,
    /// Disk-class storage.
    Disk,
}

impl Tier {
    /// Resolve an ABI database selector. Anything other than the two known
    /// selectors fails with `UnknownDatabase`.
    pub fn from_selector(selector: u64) -> Result<Self, KvError> {
        match selector {
            0 => Ok(Self::Ram),
            1 => Ok(Self::Disk),
            _ => Err(KvError::UnknownDatabase),
        }
    }

    /// The ABI selector for this tier.
    pub fn selector(self) -> u64 {
        match self {
            Self::Ram => 0,
            Self::Disk => 1,
        }
    }
}

/// Append a u64 big-endian, preserving lexicographic = numeric ordering.
pub fn append_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Prefix bounding all data for one tier.
pub fn tier_prefix(tier: Tier) -> Vec<u8> {
    let mut prefix = vec![CONTRACT_KV_PREFIX];
    append_u64(&mut prefix, tier.selector());
    prefix
}

/// Prefix bounding all data for one (tier, contract) pair.
pub fn contract_prefix(tier: Tier, contract: u64) -> Vec<u8> {
    let mut prefix = tier_prefix(tier);
    append_u64(&mut prefix, contract);
    prefix
}

/// Fully-qualified namespace key for a contract-supplied key.
pub fn namespace_key(tier: Tier, contract: u64, key: &[u8]) -> Vec<u8> {
    let mut full = contract_prefix(tier, contract);
    full.extend_from_slice(key);
    full
}
