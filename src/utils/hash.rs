//! Content hashing utilities.
//!
//! Snapshots of drafts and dimension values are keyed by an xxh3 hash of
//! their canonical JSON form. Filter maps are `BTreeMap`s and selections are
//! sorted before hashing, so the canonical form does not depend on the order
//! in which a user added entries.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

/// Compute a content hash for arbitrary bytes
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Hash the canonical JSON serialization of a value.
///
/// Returns `None` when the value cannot be serialized (e.g. a map with
/// non-string keys); callers then fall back to structural comparison.
pub fn value_hash<T: Serialize + ?Sized>(value: &T) -> Option<u64> {
    serde_json::to_vec(value).ok().map(|bytes| content_hash(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_content_hash() {
        let data = b"hello world";
        let hash = content_hash(data);
        assert_ne!(hash, 0);
        assert_eq!(hash, content_hash(data));
        assert_ne!(hash, content_hash(b"hello world!"));
    }

    #[test]
    fn test_value_hash_ignores_insertion_order() {
        let mut a = BTreeMap::new();
        a.insert("virgin", false);
        a.insert("recycled", true);

        let mut b = BTreeMap::new();
        b.insert("recycled", true);
        b.insert("virgin", false);

        assert_eq!(value_hash(&a), value_hash(&b));
        assert!(value_hash(&a).is_some());
    }
}
