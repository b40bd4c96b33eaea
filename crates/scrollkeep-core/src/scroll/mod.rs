//! Cursor-preserving scrolling
//!
//! # Layers
//!
//! - `types` - Plain value types shared with hosts (ranges, positions, requests)
//! - `position` - Pure functions for relative position math and clamping
//! - `scroller` - The scroll operations, driving an [`EditorHost`](crate::host::EditorHost)
//!
//! # Usage
//!
//! ```ignore
//! use scrollkeep_core::scroll::{CursorPreservingScroller, Direction, ScrollUnit};
//!
//! let outcome = CursorPreservingScroller::new(&mut host)
//!     .scroll(Direction::Down, ScrollUnit::HalfPage)
//!     .await?;
//! ```

pub mod position;
pub mod scroller;
pub mod types;

pub use scroller::{CursorPreservingScroller, ScrollOutcome, SkipReason};
pub use types::{CursorPosition, Direction, ScrollRequest, ScrollUnit, VisibleRange};
