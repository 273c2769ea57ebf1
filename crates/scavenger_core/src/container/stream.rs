//! # Byte Stream
//!
//! A resizable, seekable byte buffer with an explicit "compact unread
//! data" operation and an optional capacity ceiling. Built for ring-like
//! streaming: write at the cursor, read back, compact the consumed
//! prefix away.

use crate::error::{MemoryError, MemoryResult};
use crate::growth::grow_capacity;

/// Where a seek offset is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekOrigin {
    /// From the start of the valid data.
    Begin,
    /// From the current cursor.
    Current,
    /// Backwards from the end of the valid data.
    End,
}

/// A growable, seekable byte buffer.
///
/// Invariant: `0 <= position <= len <= capacity (<= max_capacity)`.
/// `len` is the high-water mark of valid bytes; `position` is the cursor
/// for the next read or write. Resizing never goes below `len`, so live
/// data is never silently dropped.
///
/// # Thread Safety
///
/// Single owner only; no operation blocks or suspends.
pub struct ByteStream {
    storage: Box<[u8]>,
    /// Cursor for the next read/write.
    position: usize,
    /// High-water mark of valid bytes.
    len: usize,
    /// Optional hard ceiling on capacity.
    max_capacity: Option<usize>,
}

impl ByteStream {
    /// Initial capacity used by [`ByteStream::new`].
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Creates a stream at the default capacity with no ceiling.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a stream with the given initial capacity and no ceiling.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity].into_boxed_slice(),
            position: 0,
            len: 0,
            max_capacity: None,
        }
    }

    /// Creates a stream that will refuse to grow past `max_capacity`.
    #[must_use]
    pub fn with_max_capacity(capacity: usize, max_capacity: usize) -> Self {
        Self {
            storage: vec![0u8; capacity.min(max_capacity)].into_boxed_slice(),
            position: 0,
            len: 0,
            max_capacity: Some(max_capacity),
        }
    }

    /// Total allocated bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Valid bytes (the high-water mark).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the stream holds no valid bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current cursor.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor, clamped to `[0, len]`.
    #[inline]
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.len);
    }

    /// Bytes left to read: `len - position`.
    #[inline]
    #[must_use]
    pub const fn unread(&self) -> usize {
        self.len - self.position
    }

    /// The configured capacity ceiling, if any.
    #[inline]
    #[must_use]
    pub const fn max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    /// Copies up to `count` bytes from the cursor into `dst` at
    /// `offset`, advancing the cursor by the amount copied.
    ///
    /// Returns the number of bytes copied, which is
    /// `min(count, unread)`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::BufferTooSmall`] when `offset + count` overruns
    /// `dst`, checked before any byte moves.
    pub fn read(&mut self, dst: &mut [u8], offset: usize, count: usize) -> MemoryResult<usize> {
        if offset + count > dst.len() {
            return Err(MemoryError::BufferTooSmall {
                needed: offset + count,
                available: dst.len(),
            });
        }
        let count = count.min(self.unread());
        if count > 0 {
            dst[offset..offset + count]
                .copy_from_slice(&self.storage[self.position..self.position + count]);
            self.position += count;
        }
        Ok(count)
    }

    /// Copies `count` bytes from `src` at `offset` in at the cursor,
    /// growing storage by the shared 1.5x strategy (relative to
    /// `position + count`) when the tail is too short. Advances the
    /// cursor and raises the high-water mark.
    ///
    /// # Errors
    ///
    /// [`MemoryError::BufferTooSmall`] when `offset + count` overruns
    /// `src`; [`MemoryError::CapacityExceeded`] when the needed growth
    /// would pass the ceiling. Both are checked before any byte moves.
    pub fn write(&mut self, src: &[u8], offset: usize, count: usize) -> MemoryResult<()> {
        if offset + count > src.len() {
            return Err(MemoryError::BufferTooSmall {
                needed: offset + count,
                available: src.len(),
            });
        }
        if count >= self.capacity() - self.position {
            self.resize(self.grow_target(self.position + count))?;
        }
        self.storage[self.position..self.position + count]
            .copy_from_slice(&src[offset..offset + count]);
        self.position += count;
        self.len = self.len.max(self.position);
        Ok(())
    }

    /// Growth target for `needed` bytes: the 1.5x strategy, clamped to
    /// the ceiling while the data still fits under it. When the data
    /// itself does not fit, the needed size is passed through so
    /// [`ByteStream::resize`] reports the overflow.
    fn grow_target(&self, needed: usize) -> usize {
        let target = grow_capacity(needed).max(needed);
        match self.max_capacity {
            Some(max) if needed <= max => target.min(max),
            Some(_) => needed,
            None => target,
        }
    }

    /// Moves the cursor relative to `origin`, clamping into `[0, len]`.
    /// Returns the new cursor.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> usize {
        let len = i64::try_from(self.len).unwrap_or(i64::MAX);
        let position = i64::try_from(self.position).unwrap_or(i64::MAX);
        let next = match origin {
            SeekOrigin::Begin => offset,
            SeekOrigin::Current => position.saturating_add(offset),
            SeekOrigin::End => len.saturating_sub(offset),
        };
        self.position = usize::try_from(next.clamp(0, len)).unwrap_or(0);
        self.position
    }

    /// Sets the high-water mark, growing storage to exactly `value` if
    /// needed. The cursor is clamped down if it now sits past the end.
    ///
    /// # Errors
    ///
    /// [`MemoryError::CapacityExceeded`] when `value` passes the ceiling.
    pub fn set_len(&mut self, value: usize) -> MemoryResult<()> {
        if value > self.capacity() {
            self.resize(value)?;
        }
        self.len = value;
        self.position = self.position.min(self.len);
        Ok(())
    }

    /// Discards all content: cursor and high-water mark go to zero.
    /// Capacity is kept. This is a content reset, not a flush-to-disk.
    pub fn flush(&mut self) {
        self.position = 0;
        self.len = 0;
    }

    /// Discards the consumed prefix: treats `new_position` as the
    /// boundary of consumed data, moves the unread bytes
    /// `[new_position, len)` down to offset zero (a safe overlapping
    /// copy), and leaves both the cursor and the high-water mark at the
    /// unread byte count.
    pub fn compact_unread(&mut self, new_position: usize) {
        self.position = new_position.min(self.len);
        if self.position == 0 {
            return;
        }
        let unread = self.unread();
        if unread == 0 {
            self.position = 0;
            self.len = 0;
        } else {
            self.storage.copy_within(self.position..self.len, 0);
            self.position = unread;
            self.len = unread;
        }
    }

    /// Bulk-transfers this stream's unread bytes into `destination` at
    /// its cursor, growing it if needed. Advances this cursor past the
    /// transferred bytes and the destination's cursor and high-water
    /// mark accordingly.
    ///
    /// # Errors
    ///
    /// [`MemoryError::CapacityExceeded`] when the destination's ceiling
    /// would be passed; nothing moves in that case.
    pub fn copy_into(&mut self, destination: &mut ByteStream) -> MemoryResult<()> {
        let amount = self.unread();
        if amount == 0 {
            return Ok(());
        }
        let needed = destination.position + amount;
        if needed > destination.capacity() {
            destination.resize(destination.grow_target(needed))?;
        }
        destination.storage[destination.position..needed]
            .copy_from_slice(&self.storage[self.position..self.len]);
        self.position += amount;
        destination.len = destination.len.max(needed);
        destination.position = needed;
        Ok(())
    }

    /// Reallocates storage to exactly `new_capacity`, preserving the
    /// valid bytes.
    ///
    /// # Errors
    ///
    /// [`MemoryError::CapacityExceeded`] when a ceiling is set and
    /// passed; [`MemoryError::DataLoss`] when `new_capacity < len`
    /// (truncate with [`ByteStream::set_len`] first).
    pub fn resize(&mut self, new_capacity: usize) -> MemoryResult<()> {
        if let Some(max) = self.max_capacity {
            if new_capacity > max {
                return Err(MemoryError::CapacityExceeded {
                    requested: new_capacity,
                    max,
                });
            }
        }
        if new_capacity < self.len {
            return Err(MemoryError::DataLoss {
                requested: new_capacity,
                in_use: self.len,
            });
        }
        let mut next = vec![0u8; new_capacity].into_boxed_slice();
        next[..self.len].copy_from_slice(&self.storage[..self.len]);
        self.storage = next;
        Ok(())
    }

    /// Zero-copy view of the valid bytes `[0, len)`.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Zero-copy view of the unread bytes `[position, len)`.
    #[inline]
    #[must_use]
    pub fn unread_bytes(&self) -> &[u8] {
        &self.storage[self.position..self.len]
    }
}

impl Default for ByteStream {
    fn default() -> Self {
        Self::new()
    }
}
