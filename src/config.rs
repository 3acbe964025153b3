use crate::error::Result;
use crate::Arena;

/// Default capacity of the first page: 4 KiB.
pub const DEFAULT_CAPACITY: usize = 4 * 1024;

/// Configuration for arena creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
  /// Capacity in bytes of the first page. Later pages at least double it.
  pub capacity: usize,
}

impl Default for ArenaConfig {
  fn default() -> Self {
    Self {
      capacity: DEFAULT_CAPACITY,
    }
  }
}

impl ArenaConfig {
  /// Create config with custom first-page capacity.
  pub fn with_capacity(
    mut self,
    capacity: usize,
  ) -> Self {
    self.capacity = capacity;
    self
  }

  /// Build an arena from this configuration.
  pub fn build(&self) -> Result<Arena> {
    Arena::with_config(self)
  }
}
