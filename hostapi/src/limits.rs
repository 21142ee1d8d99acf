//! Per-session resource limits for the TierKV layer.
//!
//! `KvLimits` is fixed at session construction. Violating calls fail with
//! a typed error; nothing is silently truncated except the explicit
//! offset/length read windows.

/// Size and iterator budgets for one execution session.
///
/// Both tier views of a session share one `KvLimits`. The guest cannot
/// exceed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KvLimits {
    /// Maximum length of a contract-supplied key in bytes.
    pub max_key_size: u32,
    /// Maximum length of a value in bytes.
    pub max_value_size: u32,
    /// Maximum number of concurrently live cursors.
    pub max_iterators: u32,
}

impl Default for KvLimits {
    fn default() -> Self {
        Self {
            max_key_size: 1024,
            max_value_size: 256 * 1024, // large enough to hold most contracts
            max_iterators: 1024,
        }
    }
}
