use std::alloc::Layout;
use std::ptr::NonNull;

use parena::{Arena, ArenaConfig, MAX_ALIGN};

/// Prints where a block landed and how the head page looks afterwards.
fn print_alloc(
  label: &str,
  layout: Layout,
  addr: NonNull<u8>,
  arena: &Arena,
) {
  println!(
    "[{}] {} bytes (align {}) at {:?}, head used {}/{}, pages = {}",
    label,
    layout.size(),
    layout.align(),
    addr,
    arena.used(),
    arena.capacity(),
    arena.page_count(),
  );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let mut arena = ArenaConfig::default().with_capacity(128).build()?;

  // --------------------------------------------------------------------
  // 1) A u32 and an odd-sized byte run share the first page.
  // --------------------------------------------------------------------
  let first = arena.alloc_value(0xDEADBEEFu32)?;
  print_alloc("1", Layout::new::<u32>(), first.cast(), &arena);
  println!("[1] Value = 0x{:X}", unsafe { first.read() });

  let layout_12_bytes = Layout::array::<u8>(12)?;
  let second = arena.allocate(layout_12_bytes)?;
  unsafe { second.write_bytes(0xAB, layout_12_bytes.size()) };
  print_alloc("2", layout_12_bytes, second, &arena);

  // --------------------------------------------------------------------
  // 2) A u64 after the odd-sized run: observe the padding.
  // --------------------------------------------------------------------
  let third = arena.alloc_value(0x1122334455667788u64)?;
  print_alloc("3", Layout::new::<u64>(), third.cast(), &arena);
  println!(
    "[3] Address = {:#X}, addr % align = {}",
    third.as_ptr() as usize,
    third.as_ptr() as usize % align_of::<u64>()
  );

  // --------------------------------------------------------------------
  // 3) Something larger than what is left: the arena grows a new head.
  // --------------------------------------------------------------------
  let layout_big = Layout::from_size_align(200, MAX_ALIGN)?;
  let big = arena.allocate(layout_big)?;
  print_alloc("4", layout_big, big, &arena);
  println!("[4] Earlier value still intact: 0x{:X}", unsafe { first.read() });

  // --------------------------------------------------------------------
  // 4) Reset rewinds every page; the head hands out its first block again.
  // --------------------------------------------------------------------
  arena.reset();
  let again = arena.allocate_bytes(200)?;
  println!(
    "\n[5] After reset: {:?} == {:?}? {}",
    again,
    big,
    if again == big { "Yes, memory was reused" } else { "No" }
  );

  println!("\n[6] End of example. Dropping the arena releases all {} pages.", arena.page_count());
  Ok(())
}
