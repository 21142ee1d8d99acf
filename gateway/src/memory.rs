//! Bounds-checked access to the caller's addressable memory.
//!
//! The gateway receives raw `(ptr, len)` pairs from the sandbox. Every
//! range is validated here, once, before any data is touched; downstream
//! components only ever see plain slices. Out-of-range arguments fail
//! with `OutOfBoundsBuffer`.

use tierkv_hostapi::KvError;

/// Validate that the range `[ptr, ptr+len)` lies within `mem_len` bytes.
pub fn validate_range(mem_len: usize, ptr: u32, len: u32) -> Result<(), KvError> {
    let end = (ptr as usize)
        .checked_add(len as usize)
        .ok_or(KvError::OutOfBoundsBuffer)?;
    if end > mem_len {
        return Err(KvError::OutOfBoundsBuffer);
    }
    Ok(())
}

/// Read `len` bytes from caller memory at `ptr`.
pub fn read_bytes(mem: &[u8], ptr: u32, len: u32) -> Result<Vec<u8>, KvError> {
    validate_range(mem.len(), ptr, len)?;
    let start = ptr as usize;
    Ok(mem[start..start + len as usize].to_vec())
}

/// Borrow `len` bytes of caller memory at `ptr` mutably, for use as a
/// copy destination.
pub fn slice_mut(mem: &mut [u8], ptr: u32, len: u32) -> Result<&mut [u8], KvError> {
    validate_range(mem.len(), ptr, len)?;
    let start = ptr as usize;
    Ok(&mut mem[start..start + len as usize])
}

/// Write a u32 value (little-endian) to caller memory at `ptr`.
pub fn write_u32(mem: &mut [u8], ptr: u32, value: u32) -> Result<(), KvError> {
    let dest = slice_mut(mem, ptr, 4)?;
    dest.copy_from_slice(&value.to_le_bytes());
    Ok(())
}
