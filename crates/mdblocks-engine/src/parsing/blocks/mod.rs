//! # Block Recognition
//!
//! Line-at-a-time block segmentation driven by an ordered registry of kinds.
//!
//! ## Pipeline
//!
//! 1. **Registry** (`registry`): each kind is an immutable [`BlockType`]
//!    descriptor with regex patterns, a per-line transform and a finalize step.
//!    The first kind (in declaration order) whose opener matches a line opens
//!    a block.
//!
//! 2. **Accumulation** (`builder`): a [`BlockBuilder`] keeps at most one open
//!    block, extends it while its continuation patterns match, and closes it
//!    on the first line that does not continue it, on a closing transform, or
//!    when its line limit is reached.
//!
//! 3. **Layout** (`layout`): every closed block is stacked below the previous
//!    one by the [`LayoutTracker`].
//!
//! ## Modules
//!
//! - **`types`**: `BlockKind`, `FinishedBlock`, `Layout`
//! - **`kinds`**: one module per kind, owning its patterns and transforms
//! - **`registry`**: `BlockType` descriptors and the ordered `Registry`
//! - **`builder`**: the `BlockBuilder` state machine
//! - **`layout`**: vertical offset bookkeeping
//!
//! ## Key Invariants
//!
//! - At most one block is open, and its kind never changes
//! - Content lines keep input order
//! - Each block starts at or below the bottom of the previous one
//! - Fenced code is a raw zone: no other kind opens inside it

pub mod builder;
pub mod kinds;
pub mod layout;
pub mod registry;
pub mod types;

pub use builder::BlockBuilder;
pub use layout::LayoutTracker;
pub use registry::{BlockType, Registry, Scratch, Transformed};
pub use types::{BlockKind, BlockTypeId, Finalized, FinishedBlock, Layout};
