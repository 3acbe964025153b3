use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::align::{MAX_ALIGN, align_up};
use crate::error::{ArenaError, Result};

/// One contiguous buffer plus its bump cursor.
///
/// ```text
///   ┌───────────┬─────┬───────────┬──────────────────────────┐
///   │  block A  │ pad │  block B  │        free space        │
///   └───────────┴─────┴───────────┴──────────────────────────┘
///   ▲                             ▲                          ▲
///   ptr                      ptr + used               ptr + capacity
/// ```
///
/// The buffer is owned exclusively by the page and is never moved or copied:
/// moving a `Page` moves only the bookkeeping, so pointers handed out earlier
/// stay valid.
#[derive(Debug)]
pub(crate) struct Page {
  ptr: NonNull<u8>,
  capacity: usize,
  used: usize,
}

// The buffer is uniquely owned and only mutated through `&mut self`.
unsafe impl Send for Page {}

impl Page {
  /// Reserves an uninitialised buffer of `capacity` bytes aligned to
  /// [`MAX_ALIGN`].
  pub fn new(capacity: usize) -> Result<Self> {
    if capacity == 0 {
      return Err(ArenaError::ZeroCapacity);
    }

    let layout = Self::layout(capacity)?;
    let ptr = unsafe { alloc::alloc(layout) };

    let ptr = NonNull::new(ptr).ok_or(ArenaError::AllocationFailure { size: capacity })?;

    Ok(Self {
      ptr,
      capacity,
      used: 0,
    })
  }

  /// Reserves a page of at least `min_capacity` bytes that is also large
  /// enough for `layout` at any buffer address, and places the first block
  /// in it.
  pub fn with_block(
    min_capacity: usize,
    layout: Layout,
  ) -> Result<(Self, NonNull<u8>)> {
    let needed = layout
      .size()
      .checked_add(layout.align())
      .and_then(|n| align_up(n, layout.align()))
      .ok_or(ArenaError::InvalidLayout {
        size: layout.size(),
        align: layout.align(),
      })?;

    let mut page = Self::new(min_capacity.max(needed))?;

    // Padding is below `align`, so the block ends within `needed`.
    let padding = page.start().wrapping_neg() & (layout.align() - 1);
    page.used = padding + layout.size();
    let ptr = unsafe { page.ptr.add(padding) };

    Ok((page, ptr))
  }

  fn layout(capacity: usize) -> Result<Layout> {
    Layout::from_size_align(capacity, MAX_ALIGN)
      .map_err(|_| ArenaError::AllocationFailure { size: capacity })
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn used(&self) -> usize {
    self.used
  }

  pub fn remaining(&self) -> usize {
    self.capacity - self.used
  }

  fn start(&self) -> usize {
    self.ptr.as_ptr().addr()
  }

  /// Offset of the first `layout.align()`-aligned address at or after the
  /// cursor, if `layout.size()` bytes fit there.
  fn fit(
    &self,
    layout: Layout,
  ) -> Option<usize> {
    let cursor = self.start().checked_add(self.used)?;
    let aligned = align_up(cursor, layout.align())?;
    let offset = self.used + (aligned - cursor);
    let end = offset.checked_add(layout.size())?;

    (end <= self.capacity).then_some(offset)
  }

  /// Bumps the cursor past an aligned block of `layout.size()` bytes and
  /// returns its start, or `None` when the remaining space is too small.
  pub fn bump(
    &mut self,
    layout: Layout,
  ) -> Option<NonNull<u8>> {
    let offset = self.fit(layout)?;
    self.used = offset + layout.size();

    // `offset <= capacity`, so the result stays inside (or one past) the buffer.
    Some(unsafe { self.ptr.add(offset) })
  }

  /// Classifies a `size`-byte block at `addr` against this page: outside the
  /// buffer, inside it but past the cursor, or in use.
  ///
  /// A zero-sized block may sit at the cursor itself, up to one past the
  /// last byte of the buffer.
  pub fn check(
    &self,
    addr: usize,
    size: usize,
  ) -> Result<()> {
    let start = self.start();
    let end = start + self.capacity;

    let past_end = if size == 0 { addr > end } else { addr >= end };
    if addr < start || past_end {
      return Err(ArenaError::OutOfRange { addr, start, end });
    }

    let offset = addr - start;
    if offset.saturating_add(size) > self.used {
      return Err(ArenaError::InvalidPointer {
        addr,
        offset,
        used: self.used,
      });
    }

    Ok(())
  }

  /// Rewinds the cursor. Buffer contents are left as they are.
  pub fn rewind(&mut self) {
    self.used = 0;
  }
}

impl Drop for Page {
  fn drop(&mut self) {
    // Same layout `new` succeeded with.
    let layout = unsafe { Layout::from_size_align_unchecked(self.capacity, MAX_ALIGN) };
    unsafe { alloc::dealloc(self.ptr.as_ptr(), layout) };
  }
}
