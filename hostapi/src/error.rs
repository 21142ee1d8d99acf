//! Error taxonomy for the TierKV layer.
//!
//! Every failure here is call-local: it aborts the current sandbox call and
//! nothing else. Session state stays consistent and the host process keeps
//! running.
//!
//! The sandbox ABI reserves `0`, `-1`, and `-2` for iterator status codes
//! (ok / erased / end), so error codes start at `-3`.

/// Call-local error returned by every TierKV operation.
///
/// The gateway surfaces these to the sandbox through [`code`](KvError::code);
/// within the host they propagate as ordinary `Result` errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KvError {
    /// Write attempted by a contract other than the view's receiver.
    #[error("contract may not write to this key space")]
    AccessDenied,

    /// Key exceeds `max_key_size`.
    #[error("key too large")]
    KeyTooLarge,

    /// Value exceeds `max_value_size`.
    #[error("value too large")]
    ValueTooLarge,

    /// Cursor creation would exceed `max_iterators`.
    #[error("too many iterators")]
    IteratorBudgetExceeded,

    /// Token is the reserved sentinel, out of range, or not live.
    #[error("bad key-value iterator handle")]
    InvalidHandle,

    /// Comparison across cursors from different views or contract ranges.
    #[error("incompatible key-value iterators")]
    IncompatibleCursors,

    /// Traversal or comparison attempted on an erased cursor.
    #[error("iterator to erased element")]
    StaleCursor,

    /// Tier selector not recognized.
    #[error("bad key-value database id")]
    UnknownDatabase,

    /// A raw buffer argument is not fully within the caller's memory.
    #[error("buffer outside caller memory")]
    OutOfBoundsBuffer,

    /// Session reset attempted while cursors remain open.
    #[error("iterators are still alive")]
    IteratorsStillLive,

    /// The backing store reported a failure.
    #[error("store error: {0}")]
    Store(String),
}

impl KvError {
    /// The `i32` code surfaced to the sandbox for this error.
    ///
    /// Codes are all `<= -3`, disjoint from the iterator status codes
    /// `0` / `-1` / `-2`.
    pub fn code(&self) -> i32 {
        match self {
            Self::AccessDenied => -3,
            Self::KeyTooLarge => -4,
            Self::ValueTooLarge => -5,
            Self::IteratorBudgetExceeded => -6,
            Self::InvalidHandle => -7,
            Self::IncompatibleCursors => -8,
            Self::StaleCursor => -9,
            Self::UnknownDatabase => -10,
            Self::OutOfBoundsBuffer => -11,
            Self::IteratorsStillLive => -12,
            Self::Store(_) => -13,
        }
    }

    /// Create a store-failure error from any displayable cause.
    pub fn store(cause: impl std::fmt::Display) -> Self {
        Self::Store(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_below_status_range() {
        let errors = [
            KvError::AccessDenied,
            KvError::KeyTooLarge,
            KvError::ValueTooLarge,
            KvError::IteratorBudgetExceeded,
            KvError::InvalidHandle,
            KvError::IncompatibleCursors,
            KvError::StaleCursor,
            KvError::UnknownDatabase,
            KvError::OutOfBoundsBuffer,
            KvError::IteratorsStillLive,
            KvError::Store("disk full".into()),
        ];
        for err in &errors {
            assert!(err.code() <= -3, "{err} must not collide with status codes");
        }
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            KvError::AccessDenied.code(),
            KvError::KeyTooLarge.code(),
            KvError::ValueTooLarge.code(),
            KvError::IteratorBudgetExceeded.code(),
            KvError::InvalidHandle.code(),
            KvError::IncompatibleCursors.code(),
            KvError::StaleCursor.code(),
            KvError::UnknownDatabase.code(),
            KvError::OutOfBoundsBuffer.code(),
            KvError::IteratorsStillLive.code(),
            KvError::Store(String::new()).code(),
        ];
        let mut unique = codes.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_display() {
        let s = format!("{}", KvError::StaleCursor);
        assert!(s.contains("erased"));

        let s = format!("{}", KvError::store("backend unavailable"));
        assert!(s.contains("backend unavailable"));
    }
}
