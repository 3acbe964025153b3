use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use parena::Arena;

/// Counts live bytes per thread so parallel tests do not disturb each other.
struct CountingAlloc;

thread_local! {
  static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn track(delta: isize) {
  let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

fn live_bytes() -> isize {
  LIVE.with(Cell::get)
}

unsafe impl GlobalAlloc for CountingAlloc {
  unsafe fn alloc(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    let ptr = unsafe { System.alloc(layout) };
    if !ptr.is_null() {
      track(layout.size() as isize);
    }
    ptr
  }

  unsafe fn dealloc(
    &self,
    ptr: *mut u8,
    layout: Layout,
  ) {
    track(-(layout.size() as isize));
    unsafe { System.dealloc(ptr, layout) }
  }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn grow_pages(growths: usize) -> Arena {
  let mut arena = Arena::new(16).unwrap();
  for _ in 0..growths {
    let size = arena.capacity() + 1;
    arena.allocate_bytes(size).unwrap();
  }
  arena
}

#[test]
fn drop_releases_every_page() {
  // Warm up lazily initialised statics before taking the baseline.
  drop(grow_pages(8));

  let baseline = live_bytes();

  let arena = grow_pages(8);
  assert_eq!(arena.page_count(), 9);
  assert!(live_bytes() - baseline >= arena.total_capacity() as isize);

  drop(arena);
  assert_eq!(live_bytes(), baseline);
}

#[test]
fn reset_keeps_pages() {
  let mut arena = grow_pages(4);
  arena.reset();
  let before = live_bytes();

  arena.reset();
  arena.reset();

  assert_eq!(live_bytes(), before);
  assert_eq!(arena.page_count(), 5);
}

#[test]
fn take_moves_pages_without_copying() {
  let mut arena = grow_pages(3);
  let before = live_bytes();

  let moved = arena.take();
  assert_eq!(live_bytes(), before);
  assert!(arena.is_empty());

  drop(arena);
  assert_eq!(live_bytes(), before);

  let released = moved.total_capacity() as isize;
  drop(moved);
  assert!(before - live_bytes() >= released);
}
