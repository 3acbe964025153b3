use std::mem;

/// The platform's maximum natural alignment, used when a caller does not ask
/// for one and for every page buffer.
pub const MAX_ALIGN: usize = mem::align_of::<libc::max_align_t>();

/// Rounds `value` up to the next multiple of a power-of-two alignment.
///
/// With a single argument the alignment defaults to [`MAX_ALIGN`].
///
/// # Examples
///
/// ```rust
/// use parena::{align, MAX_ALIGN};
///
/// assert_eq!(align!(13, 8), 16);
/// assert_eq!(align!(144, 16), 144);
/// assert_eq!(align!(1), MAX_ALIGN);
/// ```
#[macro_export]
macro_rules! align {
  ($value:expr) => {
    $crate::align!($value, $crate::MAX_ALIGN)
  };
  ($value:expr, $align:expr) => {
    ($value + $align - 1) & !($align - 1)
  };
}

/// Checked form of [`align!`]: `None` if rounding up would overflow.
///
/// `align` must be a power of two.
#[inline]
pub fn align_up(
  value: usize,
  align: usize,
) -> Option<usize> {
  debug_assert!(align.is_power_of_two());
  Some(value.checked_add(align - 1)? & !(align - 1))
}
