use std::alloc::Layout;
use std::{mem, ptr};
use std::ptr::NonNull;

use crate::align::MAX_ALIGN;
use crate::config::ArenaConfig;
use crate::error::{ArenaError, Result};
use crate::page::Page;

/// A growable bump allocator.
///
/// Memory is handed out from the head page by advancing a cursor. When the
/// head is full the arena first tries the page grown before it and otherwise
/// grows a new head at least twice as large. Nothing is freed individually:
/// [`Arena::reset`] rewinds every page at once and dropping the arena releases
/// all of them.
///
/// Destructors of values placed in the arena are never run automatically.
/// Use [`Arena::deallocate`] before resetting if a value needs dropping.
#[derive(Debug, Default)]
pub struct Arena {
  /// Oldest first. The last page is the head.
  pages: Vec<Page>,
}

impl Arena {
  /// Creates an arena whose first page holds `capacity` bytes.
  pub fn new(capacity: usize) -> Result<Self> {
    let page = Page::new(capacity)?;

    Ok(Self { pages: vec![page] })
  }

  pub fn with_config(config: &ArenaConfig) -> Result<Self> {
    Self::new(config.capacity)
  }

  /// An arena without any page. The first allocation grows one sized to fit.
  pub const fn empty() -> Self {
    Self { pages: Vec::new() }
  }

  /// Moves every page out into a new arena, leaving `self` empty.
  pub fn take(&mut self) -> Self {
    mem::take(self)
  }

  /// Capacity of the head page, or 0 for an empty arena.
  pub fn capacity(&self) -> usize {
    self.head().map_or(0, Page::capacity)
  }

  /// Bytes consumed from the head page, padding included.
  pub fn used(&self) -> usize {
    self.head().map_or(0, Page::used)
  }

  pub fn remaining(&self) -> usize {
    self.head().map_or(0, Page::remaining)
  }

  pub fn page_count(&self) -> usize {
    self.pages.len()
  }

  pub fn total_capacity(&self) -> usize {
    self.pages.iter().map(Page::capacity).sum()
  }

  pub fn total_used(&self) -> usize {
    self.pages.iter().map(Page::used).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.pages.is_empty()
  }

  fn head(&self) -> Option<&Page> {
    self.pages.last()
  }

  /// The page the head displaced when it was grown.
  fn chained_mut(&mut self) -> Option<&mut Page> {
    let index = self.pages.len().checked_sub(2)?;
    self.pages.get_mut(index)
  }

  /// Reserves `layout.size()` bytes aligned to `layout.align()`.
  ///
  /// The returned block stays reserved until the next [`Arena::reset`] or
  /// until the arena is dropped; growth never moves it.
  pub fn allocate(
    &mut self,
    layout: Layout,
  ) -> Result<NonNull<u8>> {
    if let Some(ptr) = self.pages.last_mut().and_then(|head| head.bump(layout)) {
      return Ok(ptr);
    }

    if let Some(ptr) = self.chained_mut().and_then(|page| page.bump(layout)) {
      tracing::trace!(
        size = layout.size(),
        align = layout.align(),
        "served from chained page"
      );
      return Ok(ptr);
    }

    self.grow(layout)
  }

  /// [`Arena::allocate`] with an explicit alignment, which must be a power
  /// of two.
  pub fn allocate_aligned(
    &mut self,
    size: usize,
    align: usize,
  ) -> Result<NonNull<u8>> {
    let layout =
      Layout::from_size_align(size, align).map_err(|_| ArenaError::InvalidLayout { size, align })?;
    self.allocate(layout)
  }

  /// [`Arena::allocate`] aligned to [`MAX_ALIGN`].
  pub fn allocate_bytes(
    &mut self,
    size: usize,
  ) -> Result<NonNull<u8>> {
    self.allocate_aligned(size, MAX_ALIGN)
  }

  /// Pushes a new head holding a block for `layout`. The chain is left
  /// untouched if the buffer cannot be obtained.
  fn grow(
    &mut self,
    layout: Layout,
  ) -> Result<NonNull<u8>> {
    let old_capacity = self.capacity();
    let (page, ptr) = Page::with_block(old_capacity.saturating_mul(2), layout)?;

    tracing::debug!(
      old_capacity,
      capacity = page.capacity(),
      size = layout.size(),
      align = layout.align(),
      pages = self.pages.len() + 1,
      "growing arena"
    );

    self.pages.push(page);
    Ok(ptr)
  }

  /// Reserves storage for a `T` and moves `value` into it.
  pub fn alloc_value<T>(
    &mut self,
    value: T,
  ) -> Result<NonNull<T>> {
    self.alloc_with(|| value)
  }

  pub fn alloc_default<T: Default>(&mut self) -> Result<NonNull<T>> {
    self.alloc_with(T::default)
  }

  /// Reserves storage for a `T`, then initialises it with `init`.
  ///
  /// The storage is reserved before `init` runs. If `init` panics the bytes
  /// stay consumed until the next reset.
  pub fn alloc_with<T, F>(
    &mut self,
    init: F,
  ) -> Result<NonNull<T>>
  where
    F: FnOnce() -> T,
  {
    let ptr = self.allocate(Layout::new::<T>())?.cast::<T>();
    unsafe { ptr.write(init()) };
    Ok(ptr)
  }

  /// Like [`Arena::alloc_with`] for a fallible initialiser.
  ///
  /// Arena failures are converted into the initialiser's error type. An
  /// initialiser error is returned as-is and the reserved bytes are not
  /// reclaimed.
  pub fn try_alloc_with<T, E, F>(
    &mut self,
    init: F,
  ) -> std::result::Result<NonNull<T>, E>
  where
    F: FnOnce() -> std::result::Result<T, E>,
    E: From<ArenaError>,
  {
    let ptr = self.allocate(Layout::new::<T>())?.cast::<T>();
    let value = init()?;
    unsafe { ptr.write(value) };
    Ok(ptr)
  }

  /// Checks that a `T` at `ptr` lies within the in-use region of the head
  /// page.
  ///
  /// Only the head page is consulted: a pointer served by an older page is
  /// reported as [`ArenaError::OutOfRange`].
  pub fn check<T>(
    &self,
    ptr: *const T,
  ) -> Result<()> {
    let addr = ptr.addr();
    match self.head() {
      Some(head) => head.check(addr, mem::size_of::<T>()),
      None => Err(ArenaError::OutOfRange {
        addr,
        start: 0,
        end: 0,
      }),
    }
  }

  /// Runs the destructor of the `T` at `ptr` after validating it with
  /// [`Arena::check`]. The bytes are not reclaimed.
  ///
  /// # Safety
  ///
  /// `ptr` must point to a live, initialised `T` allocated from this arena
  /// that is not dropped again nor used afterwards.
  pub unsafe fn deallocate<T>(
    &mut self,
    ptr: NonNull<T>,
  ) -> Result<()> {
    self.check(ptr.as_ptr())?;

    tracing::trace!(addr = ptr.as_ptr().addr(), "dropping arena value");
    unsafe { ptr::drop_in_place(ptr.as_ptr()) };
    Ok(())
  }

  /// Rewinds every page to empty. No memory is released and no destructor
  /// runs; every pointer handed out so far becomes dangling in meaning.
  pub fn reset(&mut self) {
    let rewound = self.total_used();

    for page in &mut self.pages {
      page.rewind();
    }

    tracing::debug!(pages = self.pages.len(), rewound, "arena reset");
  }
}
