//! Shared test helpers for integration tests.
//!
//! Provides gateway factories, a fake guest memory, and staging helpers
//! that place argument bytes into guest memory the way a real sandbox
//! caller would.

#![allow(dead_code)]

use std::sync::Arc;

use tierkv_gateway::KvGateway;
use tierkv_hostapi::{KvLimits, MemStore};

/// ABI selector for the memory-class tier.
pub const RAM: u64 = 0;
/// ABI selector for the disk-class tier.
pub const DISK: u64 = 1;

/// Receiver contract for all tests.
pub const ALICE: u64 = 0xA11CE;
/// A foreign contract that must never be able to write.
pub const BOB: u64 = 0xB0B;

// Guest memory staging regions. Keys go at KEY_AT, values at VAL_AT,
// read destinations at DEST_AT, and 4-byte out-params at SIZE_AT.
pub const KEY_AT: u32 = 0;
pub const VAL_AT: u32 = 256;
pub const DEST_AT: u32 = 1024;
pub const SIZE_AT: u32 = 2048;

/// Install the test log subscriber (idempotent).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A gateway for ALICE over a fresh in-memory store with default limits.
pub fn gateway() -> KvGateway {
    init_tracing();
    KvGateway::new(Arc::new(MemStore::new()), ALICE, KvLimits::default())
}

/// Same, with caller-chosen limits.
pub fn gateway_with_limits(limits: KvLimits) -> KvGateway {
    init_tracing();
    KvGateway::new(Arc::new(MemStore::new()), ALICE, limits)
}

/// A zeroed fake guest memory.
pub fn guest_mem() -> Vec<u8> {
    vec![0u8; 4096]
}

/// Copy `bytes` into guest memory at `at`; returns the `(ptr, len)` pair
/// a guest would pass.
pub fn stage(mem: &mut [u8], at: u32, bytes: &[u8]) -> (u32, u32) {
    let start = at as usize;
    mem[start..start + bytes.len()].copy_from_slice(bytes);
    (at, bytes.len() as u32)
}

/// Read the u32 out-param written at `at`.
pub fn read_size(mem: &[u8], at: u32) -> u32 {
    let start = at as usize;
    u32::from_le_bytes(mem[start..start + 4].try_into().unwrap())
}

/// Stage and perform a `kv_set` as `contract`.
pub fn set(
    gw: &mut KvGateway,
    mem: &mut [u8],
    db: u64,
    contract: u64,
    key: &[u8],
    value: &[u8],
) -> Result<(), tierkv_hostapi::KvError> {
    let (kp, kl) = stage(mem, KEY_AT, key);
    let (vp, vl) = stage(mem, VAL_AT, value);
    gw.kv_set(mem, db, contract, kp, kl, vp, vl)
}

/// `kv_get` + a full `kv_get_data` readout. `None` when the key is absent.
pub fn get_value(
    gw: &mut KvGateway,
    mem: &mut [u8],
    db: u64,
    contract: u64,
    key: &[u8],
) -> Option<Vec<u8>> {
    let (kp, kl) = stage(mem, KEY_AT, key);
    let found = gw.kv_get(mem, db, contract, kp, kl, SIZE_AT).unwrap();
    if !found {
        return None;
    }
    let total = read_size(mem, SIZE_AT);
    let copied = gw.kv_get_data(mem, db, 0, DEST_AT, total).unwrap();
    assert_eq!(copied, total);
    let start = DEST_AT as usize;
    Some(mem[start..start + total as usize].to_vec())
}

/// Full readout of a cursor's current key.
pub fn it_key(gw: &KvGateway, mem: &mut [u8], itr: u32) -> (i32, Vec<u8>) {
    let status = gw.kv_it_key(mem, itr, 0, DEST_AT, 256, SIZE_AT).unwrap();
    let total = read_size(mem, SIZE_AT) as usize;
    let start = DEST_AT as usize;
    (status, mem[start..start + total].to_vec())
}

/// Full readout of a cursor's current value.
pub fn it_value(gw: &KvGateway, mem: &mut [u8], itr: u32) -> (i32, Vec<u8>) {
    let status = gw.kv_it_value(mem, itr, 0, DEST_AT, 256, SIZE_AT).unwrap();
    let total = read_size(mem, SIZE_AT) as usize;
    let start = DEST_AT as usize;
    (status, mem[start..start + total].to_vec())
}
