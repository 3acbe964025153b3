use thiserror::Error;

/// Errors raised by [`Arena`](crate::Arena) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArenaError {
  /// The global allocator refused a page buffer.
  #[error("failed to obtain a {size} byte page buffer")]
  AllocationFailure { size: usize },

  /// Size and alignment do not form a valid layout (alignment not a power of
  /// two, or size overflowing once padded).
  #[error("invalid layout: size {size}, align {align}")]
  InvalidLayout { size: usize, align: usize },

  #[error("arena capacity must be greater than zero")]
  ZeroCapacity,

  /// The pointer lies entirely outside the page's buffer.
  #[error("pointer {addr:#x} is outside the page buffer [{start:#x}, {end:#x})")]
  OutOfRange { addr: usize, start: usize, end: usize },

  /// The pointer lies inside the page's buffer but past its in-use region.
  #[error("pointer {addr:#x} at offset {offset} is beyond the {used} bytes in use")]
  InvalidPointer { addr: usize, offset: usize, used: usize },
}

pub type Result<T> = std::result::Result<T, ArenaError>;
