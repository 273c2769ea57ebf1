//! # Array Pool
//!
//! Pools arrays bucketed by their exact allocated length. Rents ask for
//! "at least N elements" and are served from the smallest sufficient
//! bucket; returns are stamped so an age-based sweep can evict arrays
//! unused since before a cutoff.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::clock::{Clock, MonotonicClock, Tick};
use crate::error::MemoryResult;
use crate::growth::round_up_bucket;
use crate::pool::config::{ArrayPoolConfig, ReusePolicy};

/// One cached array and the moment it was returned.
struct Entry<T> {
    array: Box<[T]>,
    returned_at: Tick,
}

/// A size-bucketed array pool.
///
/// Buckets are keyed by exact allocated length (always a power of two
/// when filled through [`ArrayPool::rent`]) and ordered, so the smallest
/// sufficient bucket is found by a monotonic scan. Within a bucket the
/// most-recently-returned array is reused first.
///
/// An array lives either in the pool or with exactly one caller, never
/// both: renting removes it, returning inserts it.
///
/// # Thread Safety
///
/// NOT thread-safe. Single owner, or external serialization.
///
/// # Example
///
/// ```rust,ignore
/// let pool: ArrayPool<u8> = ArrayPool::new();
/// let buf = pool.rent(100)?;      // at least 100 elements (128 here)
/// pool.return_array(buf);         // cached for the next rent
/// ```
pub struct ArrayPool<T, C: Clock = MonotonicClock> {
    /// Size-keyed free lists, ordered ascending.
    buckets: RefCell<BTreeMap<usize, Vec<Entry<T>>>>,
    config: ArrayPoolConfig,
    clock: C,
}

impl<T: Default> ArrayPool<T> {
    /// Creates a pool with default settings and a monotonic clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ArrayPoolConfig::default())
    }

    /// Creates a pool with the given settings and a monotonic clock.
    #[must_use]
    pub fn with_config(config: ArrayPoolConfig) -> Self {
        Self::with_parts(config, MonotonicClock::new())
    }
}

impl<T: Default> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default, C: Clock> ArrayPool<T, C> {
    /// Creates a pool with the given settings and clock. Sweep cutoffs
    /// must come from the same clock.
    #[must_use]
    pub fn with_parts(config: ArrayPoolConfig, clock: C) -> Self {
        Self {
            buckets: RefCell::new(BTreeMap::new()),
            config,
            clock,
        }
    }

    /// Rents an array of at least `minimum` elements.
    ///
    /// The request is rounded up to the nearest power-of-two bucket
    /// size. Buckets are scanned ascending from the first one the reuse
    /// policy allows; the most-recently-returned entry of the first
    /// non-empty bucket is taken. On a miss a fresh array of exactly the
    /// rounded size is allocated (under the default policy a fresh
    /// array's own bucket is therefore never matched by an equal-sized
    /// rent, only by smaller ones).
    ///
    /// # Errors
    ///
    /// [`MemoryError::CapacityExceeded`](crate::MemoryError::CapacityExceeded)
    /// when `minimum` rounds above the largest supported bucket.
    pub fn rent(&self, minimum: usize) -> MemoryResult<Box<[T]>> {
        let rounded = round_up_bucket(minimum)?;
        let first_key = match self.config.reuse {
            ReusePolicy::LargerOnly => rounded + 1,
            ReusePolicy::SameOrLarger => rounded,
        };
        {
            let mut buckets = self.buckets.borrow_mut();
            for (_, entries) in buckets.range_mut(first_key..) {
                if let Some(entry) = entries.pop() {
                    return Ok(entry.array);
                }
            }
        }
        tracing::trace!(minimum, rounded, "array pool miss, allocating fresh");
        Ok((0..rounded).map(|_| T::default()).collect())
    }

    /// Rents like [`ArrayPool::rent`] but wraps the array as a bounded
    /// view of exactly `minimum` elements starting at offset zero.
    ///
    /// # Errors
    ///
    /// Same as [`ArrayPool::rent`].
    pub fn rent_view(&self, minimum: usize) -> MemoryResult<ArrayView<T>> {
        Ok(ArrayView::new(self.rent(minimum)?, 0, minimum))
    }

    /// Rents an array coupled to a guard that returns it to this pool
    /// when the guard's scope ends, on every exit path.
    ///
    /// # Errors
    ///
    /// Same as [`ArrayPool::rent`].
    pub fn rent_scoped(&self, minimum: usize) -> MemoryResult<RentedArray<'_, T, C>> {
        let array = self.rent(minimum)?;
        let len = array.len();
        Ok(RentedArray {
            pool: self,
            array,
            len,
        })
    }

    /// Like [`ArrayPool::rent_scoped`] but the guard exposes exactly
    /// `minimum` elements.
    ///
    /// # Errors
    ///
    /// Same as [`ArrayPool::rent`].
    pub fn rent_view_scoped(&self, minimum: usize) -> MemoryResult<RentedArray<'_, T, C>> {
        Ok(RentedArray {
            pool: self,
            array: self.rent(minimum)?,
            len: minimum,
        })
    }

    /// Returns an array to the pool, stamped with the current tick, into
    /// the bucket keyed by its exact length (created if absent).
    ///
    /// When a configured cap (total or per-length) is already met the
    /// array is dropped instead of stored.
    pub fn return_array(&self, array: Box<[T]>) {
        let mut buckets = self.buckets.borrow_mut();
        if self.config.max_cached_arrays > 0 {
            let total: usize = buckets.values().map(Vec::len).sum();
            if total >= self.config.max_cached_arrays {
                tracing::trace!(len = array.len(), "pool at capacity, dropping returned array");
                return;
            }
        }
        let entries = buckets.entry(array.len()).or_default();
        if self.config.max_cached_per_length > 0
            && entries.len() >= self.config.max_cached_per_length
        {
            tracing::trace!(len = array.len(), "bucket at capacity, dropping returned array");
            return;
        }
        entries.push(Entry {
            array,
            returned_at: self.clock.now(),
        });
    }

    /// Returns a view's backing array to the pool.
    pub fn return_view(&self, view: ArrayView<T>) {
        self.return_array(view.into_inner());
    }

    /// Discards every cached array unconditionally.
    pub fn trim(&self) {
        self.buckets.borrow_mut().clear();
    }

    /// Removes exactly the entries returned before `cutoff`. Buckets
    /// left empty are removed; surviving lists release excess backing
    /// storage.
    pub fn trim_older_than(&self, cutoff: Tick) {
        let mut swept = 0usize;
        self.buckets.borrow_mut().retain(|_, entries| {
            let before = entries.len();
            entries.retain(|entry| entry.returned_at >= cutoff);
            swept += before - entries.len();
            if entries.is_empty() {
                return false;
            }
            if entries.len() < before {
                entries.shrink_to_fit();
            }
            true
        });
        if swept > 0 {
            tracing::debug!(swept, "array pool age sweep");
        }
    }

    /// The clock this pool stamps returns with. Sweep cutoffs must be
    /// produced by this clock.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Total arrays currently cached across all buckets.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.buckets.borrow().values().map(Vec::len).sum()
    }

    /// Number of non-removed buckets (including emptied ones).
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.borrow().len()
    }
}

/// A bounded window over a rented array: `(array, offset, len)`.
///
/// Derefs to the windowed slice while retaining ownership of the whole
/// allocation, so it can travel back to the pool intact.
pub struct ArrayView<T> {
    array: Box<[T]>,
    offset: usize,
    len: usize,
}

impl<T> ArrayView<T> {
    /// Wraps `array` with a window of `len` elements at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the window overruns the array.
    #[must_use]
    pub fn new(array: Box<[T]>, offset: usize, len: usize) -> Self {
        assert!(
            offset + len <= array.len(),
            "view {offset}..{} out of bounds (array len {})",
            offset + len,
            array.len()
        );
        Self { array, offset, len }
    }

    /// Window start inside the backing array.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Window length.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the window is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The windowed elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.array[self.offset..self.offset + self.len]
    }

    /// The windowed elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.array[self.offset..self.offset + self.len]
    }

    /// Unwraps the whole backing array.
    #[must_use]
    pub fn into_inner(self) -> Box<[T]> {
        self.array
    }
}

impl<T> Deref for ArrayView<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for ArrayView<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// Guard for a scoped rent: derefs to the rented elements and returns
/// the array to its pool when dropped, on every exit path including
/// early returns and error propagation.
pub struct RentedArray<'pool, T: Default, C: Clock = MonotonicClock> {
    pool: &'pool ArrayPool<T, C>,
    array: Box<[T]>,
    len: usize,
}

impl<T: Default, C: Clock> RentedArray<'_, T, C> {
    /// Detaches the array from the guard; it will NOT be returned to
    /// the pool.
    #[must_use]
    pub fn into_inner(mut self) -> Box<[T]> {
        mem::take(&mut self.array)
    }
}

impl<T: Default, C: Clock> Deref for RentedArray<'_, T, C> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.array[..self.len]
    }
}

impl<T: Default, C: Clock> DerefMut for RentedArray<'_, T, C> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.array[..self.len]
    }
}

impl<T: Default, C: Clock> Drop for RentedArray<'_, T, C> {
    fn drop(&mut self) {
        let array = mem::take(&mut self.array);
        // Empty means the array was detached via into_inner
        if !array.is_empty() {
            self.pool.return_array(array);
        }
    }
}
