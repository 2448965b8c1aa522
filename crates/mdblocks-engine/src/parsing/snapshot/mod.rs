//! # Snapshot Testing Support
//!
//! Utilities for testing block recognition via snapshot assertions and
//! invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts finished blocks to a stable `Snap` that renders
//!   as one line per block for `insta` snapshots
//! - **`invariants`**: Runtime checks for layout correctness (blocks stacked in
//!   order without overlap, heights covering the content)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
