//! Double-array trie over byte-level keys (§4.2).
//!
//! Wraps the `yada` crate (a byte-keyed double array, as used by `lindera`'s
//! dictionary builders) behind this module's own, narrower contract, rather
//! than depending on `yada` types anywhere else in the crate. The reference
//! implementation's own trie (`crawdad`) indexes by `char`, not by byte, and
//! so cannot satisfy the byte-level common-prefix contract this spec requires
//! (see DESIGN.md).

use yada::builder::DoubleArrayBuilder;
use yada::DoubleArray;

use crate::errors::{FormatError, NoriError, Result};

/// A built, immutable double-array trie over byte-string keys.
pub struct Trie {
    da: DoubleArray<Vec<u8>>,
}

/// One match returned by [`Trie::common_prefix_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    /// Length, in bytes, of the matched key.
    pub length: usize,
    /// Value stored for the matched key.
    pub value: u32,
}

impl Trie {
    /// Builds a trie from a sorted, unique sequence of `(key, value)` pairs.
    ///
    /// Callers must pre-sort `entries` by key (bytewise); this is not
    /// re-validated here since the compiler already performs this sort as
    /// part of grouping surfaces into `MorphemeList`s (§4.3 step 4).
    pub fn build<K: AsRef<[u8]>>(entries: &[(K, u32)]) -> Result<Self> {
        let keyset: Vec<(&[u8], u32)> = entries.iter().map(|(k, v)| (k.as_ref(), *v)).collect();
        let bytes = DoubleArrayBuilder::build(&keyset).ok_or_else(|| {
            NoriError::invariant("double-array trie construction failed: malformed keyset")
        })?;
        let trie = Self {
            da: DoubleArray::new(bytes),
        };
        if let Some((sample_key, sample_value)) = entries.first() {
            match trie.exact_match(sample_key.as_ref()) {
                Some(v) if v == *sample_value => {}
                _ => return Err(FormatError::TrieIntegrity.into()),
            }
        }
        Ok(trie)
    }

    /// Loads a trie from a previously built, raw double-array byte blob.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            da: DoubleArray::new(bytes),
        }
    }

    /// Returns the raw byte blob backing this trie, for serialization.
    pub fn as_bytes(&self) -> &[u8] {
        self.da.0.as_ref()
    }

    /// Exact-match lookup: returns the stored value for `key`, or `None`.
    pub fn exact_match(&self, key: &[u8]) -> Option<u32> {
        self.da.exact_match_search(key)
    }

    /// Enumerates every key that is a prefix of `input`, in increasing
    /// length order, as `(length_in_bytes, value)` pairs.
    pub fn common_prefix_search(&self, input: &[u8]) -> Vec<PrefixMatch> {
        self.da
            .common_prefix_search(input)
            .map(|(value, length)| PrefixMatch { length, value })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_after_build() {
        let entries = vec![("a".to_string(), 0u32), ("ab".to_string(), 1), ("abc".to_string(), 2)];
        let trie = Trie::build(&entries).unwrap();
        assert_eq!(trie.exact_match(b"a"), Some(0));
        assert_eq!(trie.exact_match(b"ab"), Some(1));
        assert_eq!(trie.exact_match(b"abc"), Some(2));
        assert_eq!(trie.exact_match(b"abcd"), None);
        assert_eq!(trie.exact_match(b"z"), None);
    }

    #[test]
    fn common_prefix_search_visits_all_prefixes_in_length_order() {
        let entries = vec![("a".to_string(), 0u32), ("ab".to_string(), 1), ("abc".to_string(), 2)];
        let trie = Trie::build(&entries).unwrap();
        let matches = trie.common_prefix_search(b"abcd");
        assert_eq!(
            matches,
            vec![
                PrefixMatch { length: 1, value: 0 },
                PrefixMatch { length: 2, value: 1 },
                PrefixMatch { length: 3, value: 2 },
            ]
        );
    }

    #[test]
    fn round_trips_through_bytes() {
        let entries = vec![("가".to_string(), 7u32)];
        let trie = Trie::build(&entries).unwrap();
        let bytes = trie.as_bytes().to_vec();
        let reloaded = Trie::from_bytes(bytes);
        assert_eq!(reloaded.exact_match("가".as_bytes()), Some(7));
    }
}
