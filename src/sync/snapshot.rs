//! Value snapshots compared by content hash, then structurally.

use crate::utils::value_hash;
use serde::Serialize;

/// A recorded value plus the xxh3 hash of its canonical serialization.
///
/// The hash is a fast negative check only; equality is always confirmed on
/// the typed value, so a hash collision can never mask a change.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    hash: Option<u64>,
    value: T,
}

impl<T: Serialize + PartialEq> Snapshot<T> {
    pub fn new(value: T) -> Self {
        Self {
            hash: value_hash(&value),
            value,
        }
    }

    /// Whether `candidate` has the same content as the recorded value.
    pub fn matches(&self, candidate: &T) -> bool {
        if let (Some(recorded), Some(hash)) = (self.hash, value_hash(candidate)) {
            if recorded != hash {
                return false;
            }
        }
        self.value == *candidate
    }

    pub const fn value(&self) -> &T {
        &self.value
    }

    pub const fn hash(&self) -> Option<u64> {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_same_content() {
        let snap = Snapshot::new(vec!["DE".to_string(), "FR".to_string()]);
        assert!(snap.matches(&vec!["DE".to_string(), "FR".to_string()]));
        assert!(!snap.matches(&vec!["DE".to_string()]));
        assert!(snap.hash().is_some());
    }
}
