//! In-memory versioned-store implementation.
//!
//! `MemStore` implements `VersionedStore` with a `BTreeMap` behind a
//! `parking_lot::RwLock`. BTreeMap gives the lexicographic key order the
//! navigation methods rely on; the lock lets one store be shared as
//! `Arc<dyn VersionedStore>` across a session's views and cursors.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use crate::error::KvError;
use crate::store::{Entry, VersionedStore};

/// In-memory store backed by a `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemStore {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

/// Smallest byte string strictly greater than every key starting with
/// `prefix`, or `None` when no such bound exists (all-0xFF prefix).
fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    loop {
        match end.last_mut() {
            Some(last) if *last < 0xFF => {
                *last += 1;
                return Some(end);
            }
            Some(_) => {
                end.pop();
            }
            None => return None,
        }
    }
}

impl MemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries in the store.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn scan(
        &self,
        range: &[u8],
        start: Bound<&[u8]>,
        end: Bound<&[u8]>,
        backward: bool,
    ) -> Option<Entry> {
        let data = self.data.read();
        let mut iter = data.range::<[u8], _>((start, end));
        let found = if backward { iter.next_back() } else { iter.next() };
        found
            .filter(|(k, _)| k.starts_with(range))
            .map(|(k, v)| (k.clone(), v.clone()))
    }
}

impl VersionedStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KvError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), KvError> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn erase(&self, key: &[u8]) -> Result<(), KvError> {
        self.data.write().remove(key);
        Ok(())
    }

    fn contains(&self, key: &[u8]) -> Result<bool, KvError> {
        Ok(self.data.read().contains_key(key))
    }

    fn lower_bound(&self, range: &[u8], from: &[u8]) -> Result<Option<Entry>, KvError> {
        // Keys below the range prefix can never match; clamp the start up.
        let start = if from < range { range } else { from };
        let end = prefix_end(range);
        let end_bound = match &end {
            Some(e) => Bound::Excluded(e.as_slice()),
            None => Bound::Unbounded,
        };
        Ok(self.scan(range, Bound::Included(start), end_bound, false))
    }

    fn next_after(&self, range: &[u8], key: &[u8]) -> Result<Option<Entry>, KvError> {
        let end = prefix_end(range);
        let end_bound = match &end {
            Some(e) => Bound::Excluded(e.as_slice()),
            None => Bound::Unbounded,
        };
        Ok(self.scan(range, Bound::Excluded(key), end_bound, false))
    }

    fn prev_before(&self, range: &[u8], key: &[u8]) -> Result<Option<Entry>, KvError> {
        Ok(self.scan(range, Bound::Included(range), Bound::Excluded(key), true))
    }

    fn last_in_range(&self, range: &[u8]) -> Result<Option<Entry>, KvError> {
        let end = prefix_end(range);
        let end_bound = match &end {
            Some(e) => Bound::Excluded(e.as_slice()),
            None => Bound::Unbounded,
        };
        Ok(self.scan(range, Bound::Included(range), end_bound, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&[u8], &[u8])]) -> MemStore {
        let store = MemStore::new();
        for (k, v) in entries {
            store.set(k, v).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_store() {
        let store = MemStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(b"missing").unwrap(), None);
        assert!(!store.contains(b"missing").unwrap());
    }

    #[test]
    fn test_set_get_erase() {
        let store = MemStore::new();
        store.set(b"key1", b"value1").unwrap();
        assert_eq!(store.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert!(store.contains(b"key1").unwrap());

        store.set(b"key1", b"value2").unwrap();
        assert_eq!(store.get(b"key1").unwrap(), Some(b"value2".to_vec()));
        assert_eq!(store.len(), 1);

        store.erase(b"key1").unwrap();
        assert_eq!(store.get(b"key1").unwrap(), None);
        assert!(store.is_empty());

        // Erasing an absent key is fine.
        store.erase(b"key1").unwrap();
    }

    #[test]
    fn test_prefix_end() {
        assert_eq!(prefix_end(b"ab"), Some(b"ac".to_vec()));
        assert_eq!(prefix_end(&[0x41, 0xFF]), Some(vec![0x42]));
        assert_eq!(prefix_end(&[0xFF, 0xFF]), None);
        assert_eq!(prefix_end(b""), None);
    }

    #[test]
    fn test_lower_bound_within_range() {
        let store = store_with(&[
            (b"p/a", b"1"),
            (b"p/c", b"2"),
            (b"q/a", b"3"),
        ]);
        let (k, v) = store.lower_bound(b"p/", b"p/b").unwrap().unwrap();
        assert_eq!(k, b"p/c");
        assert_eq!(v, b"2");

        // Exact hit.
        let (k, _) = store.lower_bound(b"p/", b"p/a").unwrap().unwrap();
        assert_eq!(k, b"p/a");

        // Past the last key in range: the neighbour range never leaks in.
        assert_eq!(store.lower_bound(b"p/", b"p/d").unwrap(), None);

        // A `from` below the range clamps up to the range start.
        let (k, _) = store.lower_bound(b"p/", b"a").unwrap().unwrap();
        assert_eq!(k, b"p/a");
    }

    #[test]
    fn test_next_and_prev() {
        let store = store_with(&[(b"p/a", b"1"), (b"p/b", b"2"), (b"p/c", b"3")]);

        let (k, _) = store.next_after(b"p/", b"p/a").unwrap().unwrap();
        assert_eq!(k, b"p/b");
        assert_eq!(store.next_after(b"p/", b"p/c").unwrap(), None);

        let (k, _) = store.prev_before(b"p/", b"p/c").unwrap().unwrap();
        assert_eq!(k, b"p/b");
        assert_eq!(store.prev_before(b"p/", b"p/a").unwrap(), None);
    }

    #[test]
    fn test_last_in_range() {
        let store = store_with(&[(b"p/a", b"1"), (b"p/z", b"2"), (b"q/a", b"3")]);
        let (k, _) = store.last_in_range(b"p/").unwrap().unwrap();
        assert_eq!(k, b"p/z");
        assert_eq!(store.last_in_range(b"r/").unwrap(), None);
    }

    #[test]
    fn test_range_with_0xff_prefix() {
        let store = store_with(&[(&[0xFF, 0x01], b"1"), (&[0xFF, 0x02], b"2")]);
        let (k, _) = store.last_in_range(&[0xFF]).unwrap().unwrap();
        assert_eq!(k, vec![0xFF, 0x02]);
        let (k, _) = store.lower_bound(&[0xFF], &[0xFF]).unwrap().unwrap();
        assert_eq!(k, vec![0xFF, 0x01]);
    }
}
