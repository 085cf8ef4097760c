//! Core containers and algorithms shared by the block tree and the document.
//!
//! - [`BlockMap`] - Ordered keyed collection of shared children
//! - [`find_ranges`] - Contiguous-run detection over a slice
//! - [`CharacterMetadata`] and [`InlineStyle`] - Per-character formatting

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;

pub mod character;
pub mod ranges;

pub use character::{CharacterMetadata, InlineStyle};
pub use ranges::{collect_ranges, find_ranges};

/// Anything that can live in a [`BlockMap`] exposes the key it is stored under.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Ordered mapping from unique keys to shared children.
///
/// Iteration follows insertion order. Lookups go through a key index, so
/// `get`, `position` and sibling lookups are O(log n). The collection is
/// immutable: every "modification" returns a new map whose untouched
/// children are the same `Arc`s as before.
#[derive(Debug)]
pub struct BlockMap<T> {
    inner: Arc<Entries<T>>,
}

#[derive(Debug)]
struct Entries<T> {
    elements: Vec<Arc<T>>,
    index: BTreeMap<String, usize>,
}

impl<T> Clone for BlockMap<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for BlockMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockMap<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Entries {
                elements: Vec::new(),
                index: BTreeMap::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.elements.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Arc<T>> {
        self.inner
            .index
            .get(key)
            .and_then(|idx| self.inner.elements.get(*idx))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.index.contains_key(key)
    }

    /// Insertion-order position of `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.inner.index.get(key).copied()
    }

    pub fn get_index(&self, index: usize) -> Option<&Arc<T>> {
        self.inner.elements.get(index)
    }

    pub fn first(&self) -> Option<&Arc<T>> {
        self.inner.elements.first()
    }

    pub fn last(&self) -> Option<&Arc<T>> {
        self.inner.elements.last()
    }

    /// The entry stored right after `key`, if `key` is present and not last.
    pub fn after(&self, key: &str) -> Option<&Arc<T>> {
        let idx = self.position(key)?;
        self.inner.elements.get(idx + 1)
    }

    /// The entry stored right before `key`, if `key` is present and not first.
    pub fn before(&self, key: &str) -> Option<&Arc<T>> {
        let idx = self.position(key)?;
        idx.checked_sub(1)
            .and_then(|prev| self.inner.elements.get(prev))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<T>> {
        self.inner.elements.iter()
    }

    /// Same entries, last to first. Only the iteration order is reversed.
    pub fn reversed(&self) -> std::iter::Rev<std::slice::Iter<'_, Arc<T>>> {
        self.inner.elements.iter().rev()
    }

    pub fn to_vec(&self) -> Vec<Arc<T>> {
        self.inner.elements.clone()
    }

    /// True when both maps are the very same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Keyed> BlockMap<T> {
    /// Builds a map from already-keyed children, keeping their order.
    ///
    /// A repeated key keeps the position of its first occurrence and the
    /// value of its last one.
    pub fn from_blocks<I: IntoIterator<Item = T>>(blocks: I) -> Self {
        Self::from_shared(blocks.into_iter().map(Arc::new))
    }

    /// Same as [`BlockMap::from_blocks`] for children that are already shared.
    pub fn from_shared<I: IntoIterator<Item = Arc<T>>>(blocks: I) -> Self {
        let mut elements: Vec<Arc<T>> = Vec::new();
        let mut index = BTreeMap::new();
        for block in blocks {
            let existing = index.get(block.key()).copied();
            match existing {
                Some(existing) => elements[existing] = block,
                None => {
                    index.insert(block.key().to_string(), elements.len());
                    elements.push(block);
                }
            }
        }
        Self {
            inner: Arc::new(Entries { elements, index }),
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.inner.elements.iter().map(|elem| elem.key())
    }

    /// Returns a map where `block` replaces the entry with the same key, or
    /// is appended when the key is new. All other children are shared.
    pub fn set(&self, block: impl Into<Arc<T>>) -> Self {
        let block = block.into();
        let mut elements = self.inner.elements.clone();
        let mut index = self.inner.index.clone();
        let existing = index.get(block.key()).copied();
        match existing {
            Some(existing) => elements[existing] = block,
            None => {
                index.insert(block.key().to_string(), elements.len());
                elements.push(block);
            }
        }
        Self {
            inner: Arc::new(Entries { elements, index }),
        }
    }

    /// Returns a map where the entry stored under `key` is swapped for
    /// `block` at the same position, or `None` when `key` is absent.
    ///
    /// If `block` carries a different key the index is rebuilt, with the
    /// usual first-position, last-value rule for collisions.
    pub fn replace(&self, key: &str, block: impl Into<Arc<T>>) -> Option<Self> {
        let block = block.into();
        let position = self.position(key)?;
        let mut elements = self.inner.elements.clone();
        if block.key() != key {
            elements[position] = block;
            return Some(Self::from_shared(elements));
        }
        elements[position] = block;
        Some(Self {
            inner: Arc::new(Entries {
                elements,
                index: self.inner.index.clone(),
            }),
        })
    }

    /// Returns a map without `key`. Missing keys yield a clone of `self`.
    pub fn remove(&self, key: &str) -> Self {
        let Some(removed) = self.position(key) else {
            return self.clone();
        };
        let elements: Vec<Arc<T>> = self
            .inner
            .elements
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != removed)
            .map(|(_, elem)| Arc::clone(elem))
            .collect();
        let index = elements
            .iter()
            .enumerate()
            .map(|(idx, elem)| (elem.key().to_string(), idx))
            .collect();
        Self {
            inner: Arc::new(Entries { elements, index }),
        }
    }
}

impl<T: PartialEq> PartialEq for BlockMap<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.inner.elements == other.inner.elements
    }
}

impl<T: Eq> Eq for BlockMap<T> {}

impl<'a, T> IntoIterator for &'a BlockMap<T> {
    type Item = &'a Arc<T>;
    type IntoIter = std::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Keyed> FromIterator<T> for BlockMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_blocks(iter)
    }
}

impl<T: Serialize> Serialize for BlockMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for elem in self.iter() {
            seq.serialize_element(elem.as_ref())?;
        }
        seq.end()
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for BlockMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(Self::from_blocks(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Entry {
        key: &'static str,
        value: u32,
    }

    impl Keyed for Entry {
        fn key(&self) -> &str {
            self.key
        }
    }

    fn entry(key: &'static str, value: u32) -> Entry {
        Entry { key, value }
    }

    #[test]
    fn test_duplicate_keys_keep_first_position_and_last_value() {
        let map: BlockMap<Entry> =
            BlockMap::from_blocks(vec![entry("a", 1), entry("b", 2), entry("a", 3)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a").map(|e| e.value), Some(3));
    }

    #[test]
    fn test_set_shares_untouched_children() {
        let map: BlockMap<Entry> = BlockMap::from_blocks(vec![entry("a", 1), entry("b", 2)]);
        let updated = map.set(entry("b", 20));
        assert!(Arc::ptr_eq(&map.inner.elements[0], &updated.inner.elements[0]));
        assert_eq!(updated.get("b").map(|e| e.value), Some(20));
        assert_eq!(map.get("b").map(|e| e.value), Some(2));

        let appended = updated.set(entry("c", 3));
        assert_eq!(appended.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_reindexes() {
        let map: BlockMap<Entry> =
            BlockMap::from_blocks(vec![entry("a", 1), entry("b", 2), entry("c", 3)]);
        let removed = map.remove("a");
        assert_eq!(removed.position("c"), Some(1));
        assert!(removed.get("a").is_none());
        assert!(map.remove("zzz").ptr_eq(&map));
    }
}
