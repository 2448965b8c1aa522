use serde::Serialize;

use super::kinds::FenceKind;

/// Identifies one entry of the block registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockTypeId {
    HorizontalRule,
    Header,
    IndentedCode,
    FencedCode,
    Paragraph,
}

impl BlockTypeId {
    /// Human-readable name of the block kind.
    pub fn label(self) -> &'static str {
        match self {
            BlockTypeId::HorizontalRule => "horizontal rule",
            BlockTypeId::Header => "header",
            BlockTypeId::IndentedCode => "indented code",
            BlockTypeId::FencedCode => "fenced code",
            BlockTypeId::Paragraph => "paragraph",
        }
    }
}

/// The kind of a finished block, with the facts a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// A thematic break (`---`, `***`, `___`).
    HorizontalRule,
    /// An ATX header.
    Header {
        /// Number of `#` markers (1-5).
        level: u8,
    },
    /// Code indented by at least four columns.
    IndentedCode,
    /// A fenced code block (``` or ~~~).
    FencedCode {
        /// Whether backticks or tildes were used.
        fence: FenceKind,
        /// Info string following the opening fence, if any.
        lang: Option<String>,
    },
    /// A run of non-blank lines that opened no other kind.
    Paragraph,
}

impl BlockKind {
    pub fn id(&self) -> BlockTypeId {
        match self {
            BlockKind::HorizontalRule => BlockTypeId::HorizontalRule,
            BlockKind::Header { .. } => BlockTypeId::Header,
            BlockKind::IndentedCode => BlockTypeId::IndentedCode,
            BlockKind::FencedCode { .. } => BlockTypeId::FencedCode,
            BlockKind::Paragraph => BlockTypeId::Paragraph,
        }
    }

    pub fn label(&self) -> &'static str {
        self.id().label()
    }
}

/// Vertical placement of a finished block, in rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// First row occupied by the block.
    pub top: u32,
    /// Rows occupied, including any border rows.
    pub height: u32,
}

impl Layout {
    /// First row below the block.
    #[must_use]
    pub fn bottom(self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// A completed block, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinishedBlock {
    pub kind: BlockKind,
    /// Normalized content, lines joined with `\n`.
    pub content: String,
    pub layout: Layout,
}

/// The per-kind result of finalizing an open block, before layout is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized {
    pub kind: BlockKind,
    pub content: String,
}
