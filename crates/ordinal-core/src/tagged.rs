//! Bitmask-ordered container keyed by single-bit type tags
//!
//! [`TaggedVec`] stores at most 32 items. Membership lives in one `u32` and
//! the items sit in a dense `Vec` ordered by ascending tag bit, so the slot
//! of any tag is computed with [`bit_index`] instead of being stored.

use std::fmt;

use crate::bits::{self, bit_index, Tags};

/// Dense storage for up to 32 items, one per single-bit tag.
///
/// Invariants, held after every operation:
/// - `mask.count_ones() == items.len()`
/// - the item at index `i` belongs to the `(i + 1)`-th lowest set bit of `mask`
///
/// Tags must have exactly one bit set. Passing anything else is a caller
/// bug; it is caught by `debug_assert!` and is unspecified in release builds.
#[derive(Clone)]
pub struct TaggedVec<T> {
    mask: u32,
    items: Vec<T>,
}

impl<T> TaggedVec<T> {
    pub const fn new() -> Self {
        Self {
            mask: 0,
            items: Vec::new(),
        }
    }

    /// Create an empty container with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mask: 0,
            items: Vec::with_capacity(capacity.min(bits::MAX_TAGS)),
        }
    }

    /// Union of all tags currently stored.
    #[inline]
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Number of items stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item is stored under `tag`.
    #[inline]
    pub fn contains(&self, tag: u32) -> bool {
        self.mask & tag != 0
    }

    /// Whether at least one of the tags in `query` is stored.
    ///
    /// This is an intersection test: a query of `A | B` matches a container
    /// holding only `A`.
    #[inline]
    pub fn has_any(&self, query: u32) -> bool {
        self.mask & query != 0
    }

    /// Zero-based slot of `tag`, if stored.
    #[inline]
    fn slot(&self, tag: u32) -> Option<usize> {
        if self.mask & tag == 0 {
            return None;
        }
        Some(bit_index(self.mask, tag) as usize - 1)
    }

    /// Store `item` under `tag`.
    ///
    /// Returns `None` when the item was stored. If `tag` is already present
    /// the container is left untouched and the rejected item is handed back.
    pub fn insert(&mut self, tag: u32, item: T) -> Option<T> {
        debug_assert!(bits::is_type_tag(tag), "tag {tag:#b} must have exactly one bit set");
        if self.mask & tag != 0 {
            return Some(item);
        }

        // The ordinal is only meaningful once the tag is part of the mask.
        self.mask |= tag;
        let slot = bit_index(self.mask, tag) as usize - 1;
        self.items.insert(slot, item);
        None
    }

    /// Get the item stored under `tag`.
    pub fn get(&self, tag: u32) -> Option<&T> {
        self.slot(tag).map(|slot| &self.items[slot])
    }

    /// Get a mutable reference to the item stored under `tag`.
    pub fn get_mut(&mut self, tag: u32) -> Option<&mut T> {
        self.slot(tag).map(|slot| &mut self.items[slot])
    }

    /// Remove and return the item stored under `tag`.
    pub fn remove(&mut self, tag: u32) -> Option<T> {
        let slot = self.slot(tag)?;
        self.mask &= !tag;
        Some(self.items.remove(slot))
    }

    /// Items in ascending tag order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable items in ascending tag order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// `(tag, item)` pairs in ascending tag order.
    pub fn iter_tagged(&self) -> std::iter::Zip<Tags, std::slice::Iter<'_, T>> {
        bits::tags(self.mask).zip(self.items.iter())
    }

    /// The stored tags in ascending order.
    pub fn tags(&self) -> Tags {
        bits::tags(self.mask)
    }

    /// The dense backing array.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Empty the container, yielding every item in ascending tag order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.mask = 0;
        self.items.drain(..)
    }
}

impl<T> Default for TaggedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for TaggedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter_tagged()).finish()
    }
}

impl<'a, T> IntoIterator for &'a TaggedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
