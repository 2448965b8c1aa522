//! # mdblocks-engine
//!
//! Incremental markdown block recognition for progressive rendering.
//!
//! Bytes arrive in arbitrary chunks; complete lines are classified against an
//! ordered registry of block kinds (horizontal rule, header, indented code,
//! fenced code, paragraph), grouped into blocks, stacked vertically, and
//! handed to a [`Renderer`] as soon as each block is complete.
//!
//! ```text
//! bytes → LineAssembler → BlockBuilder (Registry) → LayoutTracker → Renderer
//! ```
//!
//! Use [`BlockStream`] for streamed input and [`parse_document`] when the whole
//! document is already in memory.

pub mod error;
pub mod parsing;
pub mod render;
pub mod stream;

pub use error::{RenderError, StreamError};
pub use parsing::{
    blocks::{BlockKind, BlockTypeId, FinishedBlock, Layout, kinds::FenceKind},
    parse_document,
};
pub use render::{Collector, Renderer};
pub use stream::{BlockStream, Fed, Step};
