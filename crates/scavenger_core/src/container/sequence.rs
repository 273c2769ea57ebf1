//! # Segment List
//!
//! A resizable, indexable sequence over contiguous storage whose point
//! is the zero-copy segment view: callers borrow slices of the live
//! range directly instead of copying out.

use std::mem;
use std::ops::{Index, IndexMut};

use crate::error::{MemoryError, MemoryResult};
use crate::growth::{grow_capacity, MAX_CAPACITY, MIN_CAPACITY};

/// A growable sequence over a contiguous boxed slice.
///
/// `storage[0..len)` holds live elements; the rest is reusable scratch.
/// Growth relocates storage with a 1.5x strategy and never shrinks.
/// Indexing out of the live range fails fast (panics); range removals
/// with bad arguments surface [`MemoryError::OutOfRange`] instead.
///
/// # Thread Safety
///
/// Single owner only. Segment views borrow the storage, so the borrow
/// checker rules out use across a mutation.
pub struct SegmentList<T> {
    /// Backing storage; `len..capacity` is scratch.
    storage: Box<[T]>,
    /// Number of live elements.
    len: usize,
}

impl<T: Default> SegmentList<T> {
    /// Creates an empty list at the minimum capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty list with at least `capacity` slots
    /// (floored at the minimum capacity).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Self::alloc(capacity.clamp(MIN_CAPACITY, MAX_CAPACITY)),
            len: 0,
        }
    }

    fn alloc(capacity: usize) -> Box<[T]> {
        (0..capacity).map(|_| T::default()).collect()
    }

    /// Number of live elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the list holds no live elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total allocated slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// The last live element, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).map(|index| &self.storage[index])
    }

    /// Checked access into the live range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.storage.get(index)
        } else {
            None
        }
    }

    /// Checked mutable access into the live range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            self.storage.get_mut(index)
        } else {
            None
        }
    }

    /// Appends an element at the end.
    pub fn push(&mut self, item: T) {
        self.insert(self.len, item);
    }

    /// Inserts `item` at `index`, shifting the tail right by one.
    ///
    /// When full, relocates to `1.5x * (len + 1)` capacity by copying
    /// the left part `[0, index)` and right part `[index, len)` around a
    /// one-slot gap; otherwise shifts in place.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        assert!(
            index <= self.len,
            "insert index {index} out of bounds (len {})",
            self.len
        );
        if self.len >= self.capacity() {
            let mut next = Self::alloc(grow_capacity(self.len + 1));
            for i in 0..index {
                next[i] = mem::take(&mut self.storage[i]);
            }
            for i in index..self.len {
                next[i + 1] = mem::take(&mut self.storage[i]);
            }
            self.storage = next;
        } else if index < self.len {
            for i in (index..self.len).rev() {
                self.storage.swap(i, i + 1);
            }
        }
        self.storage[index] = item;
        self.len += 1;
    }

    /// Appends a whole range with a single growth and a single bulk copy.
    pub fn add_range(&mut self, items: &[T])
    where
        T: Clone,
    {
        self.insert_range(self.len, items);
    }

    /// Inserts a whole range at `index` with a single growth and a
    /// single bulk copy.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_range(&mut self, index: usize, items: &[T])
    where
        T: Clone,
    {
        assert!(
            index <= self.len,
            "insert index {index} out of bounds (len {})",
            self.len
        );
        if items.is_empty() {
            return;
        }
        self.open_gap(index, items.len());
        self.storage[index..index + items.len()].clone_from_slice(items);
        self.len += items.len();
    }

    /// Opens `count` scratch slots at `index`, growing if needed.
    fn open_gap(&mut self, index: usize, count: usize) {
        if self.len + count >= self.capacity() {
            let mut next = Self::alloc(grow_capacity(self.len + count));
            for i in 0..index {
                next[i] = mem::take(&mut self.storage[i]);
            }
            for i in index..self.len {
                next[i + count] = mem::take(&mut self.storage[i]);
            }
            self.storage = next;
        } else if index < self.len {
            for i in (index..self.len).rev() {
                self.storage.swap(i, i + count);
            }
        }
    }

    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfRange`] if `index` is outside the live range.
    pub fn remove_at(&mut self, index: usize) -> MemoryResult<()> {
        self.remove_range(index, 1)
    }

    /// Removes `count` elements starting at `index`, shifting the tail
    /// left and resetting the vacated trailing slots so dropped elements
    /// release their resources.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfRange`] if `count` is zero, `index` is outside
    /// the live range, or the range overruns it.
    pub fn remove_range(&mut self, index: usize, count: usize) -> MemoryResult<()> {
        if count == 0 || index >= self.len || index + count > self.len {
            return Err(MemoryError::OutOfRange {
                index,
                count,
                len: self.len,
            });
        }
        self.close_gap(index, count);
        Ok(())
    }

    /// Shifts the tail left over `[index, index + count)` and clears the
    /// vacated trailing slots. Bounds already validated.
    fn close_gap(&mut self, index: usize, count: usize) {
        for i in index + count..self.len {
            self.storage.swap(i - count, i);
        }
        for slot in &mut self.storage[self.len - count..self.len] {
            *slot = T::default();
        }
        self.len -= count;
    }

    /// Takes the element at `index` out, removing it from the list.
    pub fn pop(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let item = mem::take(&mut self.storage[index]);
        self.close_gap(index, 1);
        Some(item)
    }

    /// Takes the last element out.
    pub fn pop_last(&mut self) -> Option<T> {
        self.len.checked_sub(1).and_then(|index| self.pop(index))
    }

    /// Grows capacity to exactly `capacity`. Shrink requests are a
    /// no-op: capacity only ever increases.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity <= self.capacity() || capacity > MAX_CAPACITY {
            return;
        }
        let mut next = Self::alloc(capacity);
        for i in 0..self.len {
            next[i] = mem::take(&mut self.storage[i]);
        }
        self.storage = next;
    }

    /// Ensures room for at least `minimum` elements, growing by the
    /// shared strategy when short.
    pub fn ensure_capacity(&mut self, minimum: usize) {
        if self.capacity() < minimum {
            self.set_capacity(grow_capacity(minimum));
        }
    }

    /// Resets all live slots to default and empties the list. Capacity
    /// is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.storage[..self.len] {
            *slot = T::default();
        }
        self.len = 0;
    }

    /// Reverses the live range in place.
    pub fn reverse(&mut self) {
        self.storage[..self.len].reverse();
    }
}

impl<T> SegmentList<T> {
    /// Zero-copy view of the whole live range.
    ///
    /// The borrow is invalidated by the next mutating call, which the
    /// borrow checker enforces.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.storage[..self.len]
    }

    /// Zero-copy view of `count` live elements starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + count` overruns the live range.
    #[must_use]
    pub fn as_segment(&self, offset: usize, count: usize) -> &[T] {
        assert!(
            offset + count <= self.len,
            "segment {offset}..{} out of bounds (len {})",
            offset + count,
            self.len
        );
        &self.storage[offset..offset + count]
    }

    /// Iterates over the live range.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.storage[..self.len].iter()
    }
}

impl<T: Default> Default for SegmentList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for SegmentList<T> {
    type Output = T;

    /// Fail-fast access: out-of-range indices panic.
    fn index(&self, index: usize) -> &T {
        assert!(index < self.len, "index {index} out of bounds (len {})", self.len);
        &self.storage[index]
    }
}

impl<T> IndexMut<usize> for SegmentList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        assert!(index < self.len, "index {index} out of bounds (len {})", self.len);
        &mut self.storage[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_remove_in_reverse_restores_empty() {
        let mut list: SegmentList<u32> = SegmentList::new();
        for i in 0..100 {
            list.push(i);
        }
        assert_eq!(list.len(), 100);

        for i in (0..100).rev() {
            list.remove_at(i).unwrap();
        }
        assert_eq!(list.len(), 0);
        assert!(list.as_slice().is_empty());
    }

    #[test]
    fn test_insert_in_middle_shifts_tail() {
        let mut list: SegmentList<u32> = SegmentList::new();
        list.add_range(&[1, 2, 4, 5]);
        list.insert(2, 3);
        assert_eq!(list.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_insert_grows_past_capacity() {
        let mut list: SegmentList<u32> = SegmentList::with_capacity(4);
        for i in 0..50 {
            list.insert(0, i);
        }
        assert_eq!(list.len(), 50);
        assert!(list.capacity() >= 50);
        assert_eq!(list[0], 49);
        assert_eq!(list[49], 0);
    }

    #[test]
    fn test_insert_range_then_segment_round_trips() {
        let mut list: SegmentList<u8> = SegmentList::new();
        list.add_range(&[1, 2, 9, 10]);
        list.insert_range(2, &[3, 4, 5, 6, 7, 8]);
        assert_eq!(list.as_segment(0, list.len()), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(list.as_segment(2, 6), &[3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_remove_range_shifts_and_clears() {
        let mut list: SegmentList<u32> = SegmentList::new();
        list.add_range(&[1, 2, 3, 4, 5]);
        list.remove_range(1, 3).unwrap();
        assert_eq!(list.as_slice(), &[1, 5]);
    }

    #[test]
    fn test_remove_range_rejects_bad_arguments() {
        let mut list: SegmentList<u32> = SegmentList::new();
        list.add_range(&[1, 2, 3]);

        assert!(matches!(
            list.remove_range(0, 0),
            Err(MemoryError::OutOfRange { .. })
        ));
        assert!(matches!(
            list.remove_range(3, 1),
            Err(MemoryError::OutOfRange { .. })
        ));
        assert!(matches!(
            list.remove_range(1, 3),
            Err(MemoryError::OutOfRange { .. })
        ));
        // Untouched after every rejection
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_pop_takes_and_removes() {
        let mut list: SegmentList<String> = SegmentList::new();
        list.push("a".to_owned());
        list.push("b".to_owned());
        list.push("c".to_owned());

        assert_eq!(list.pop(1).unwrap(), "b");
        assert_eq!(list.pop_last().unwrap(), "c");
        assert_eq!(list.as_slice(), &["a".to_owned()]);
        assert!(list.pop(5).is_none());
    }

    #[test]
    fn test_capacity_only_grows() {
        let mut list: SegmentList<u32> = SegmentList::with_capacity(16);
        list.add_range(&[1, 2, 3]);

        list.set_capacity(8); // shrink request: no-op
        assert_eq!(list.capacity(), 16);

        list.set_capacity(32);
        assert_eq!(list.capacity(), 32);
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_clear_and_reverse() {
        let mut list: SegmentList<u32> = SegmentList::new();
        list.add_range(&[1, 2, 3]);
        list.reverse();
        assert_eq!(list.as_slice(), &[3, 2, 1]);

        list.clear();
        assert!(list.is_empty());
        assert!(list.last().is_none());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_live_range_fails_fast() {
        let mut list: SegmentList<u32> = SegmentList::with_capacity(8);
        list.push(1);
        let _ = list[1]; // inside capacity, outside the live range
    }
}
