//! # parena - A Growable Arena Allocator
//!
//! This crate provides a **bump allocator** (also known as an arena allocator)
//! that hands out aligned blocks from pre-reserved pages and reclaims them all
//! at once.
//!
//! ## Overview
//!
//! ```text
//!   Arena with three pages (after two growths):
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │  head (newest, largest)                                              │
//!   │   ┌─────┬─────┬─────┬───────────────────────────────────────────┐    │
//!   │   │ A5  │ A6  │ A7  │                Free Space                 │    │
//!   │   └─────┴─────┴─────┴───────────────────────────────────────────┘    │
//!   │                     ▲                                                │
//!   │                 Bump Pointer                                         │
//!   │                                                                      │
//!   │  chained (tried when the head is full, before growing)               │
//!   │   ┌─────┬─────┬─────┬─────────────────┐                              │
//!   │   │ A2  │ A3  │ A4  │   Free Space    │                              │
//!   │   └─────┴─────┴─────┴─────────────────┘                              │
//!   │                                                                      │
//!   │  oldest                                                              │
//!   │   ┌─────────────────┐                                                │
//!   │   │       A1        │                                                │
//!   │   └─────────────────┘                                                │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   Each allocation "bumps" the pointer forward: O(1).
//!   A full head grows a new page of max(2 × capacity, size + align).
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   parena
//!   ├── align      - Alignment helpers (align!, align_up, MAX_ALIGN)
//!   ├── arena      - Arena implementation
//!   ├── config     - ArenaConfig builder
//!   ├── error      - ArenaError
//!   └── page       - Page buffer and bump cursor (internal)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use parena::Arena;
//!
//! let mut arena = Arena::new(1024)?;
//!
//! let value = arena.alloc_value(42u64)?;
//! let bytes = arena.allocate_aligned(100, 16)?;
//! assert_eq!(unsafe { *value.as_ptr() }, 42);
//! assert_eq!(bytes.as_ptr() as usize % 16, 0);
//!
//! // Everything is reclaimed at once; the same memory is handed out again.
//! arena.reset();
//! assert_eq!(arena.alloc_value(7u64)?, value);
//! # Ok::<(), parena::ArenaError>(())
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded only**: `Arena` is `Send` but not `Sync`
//! - **No individual free**: [`Arena::deallocate`] only runs a destructor
//! - **No automatic drops**: `reset` and `Drop` never run destructors of
//!   values placed in the arena
//! - **No shrinking**: pages are kept until the arena is dropped

pub mod align;
mod arena;
mod config;
mod error;
mod page;

pub use align::MAX_ALIGN;
pub use arena::Arena;
pub use config::{ArenaConfig, DEFAULT_CAPACITY};
pub use error::{ArenaError, Result};
