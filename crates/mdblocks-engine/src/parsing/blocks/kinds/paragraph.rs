use crate::parsing::blocks::{
    registry::{BlockType, Scratch, Transformed},
    types::{BlockKind, BlockTypeId, Finalized},
};

/// Paragraph block type.
///
/// Paragraphs have no delimiters - they are the default block when no other
/// opener matches. A blank line, or a line that opens any other kind, ends one.
pub struct Paragraph;

impl Paragraph {
    pub const PATTERN: &'static str = r"\S";
    pub const CHROME_ROWS: u32 = 2;

    pub fn block_type() -> BlockType {
        BlockType::new(
            BlockTypeId::Paragraph,
            &[Self::PATTERN],
            Self::transform,
            Self::finalize,
        )
        .with_chrome_rows(Self::CHROME_ROWS)
        .interruptible()
    }

    fn transform(line: &str, _scratch: &mut Scratch) -> Transformed {
        Transformed::Store(line.to_string())
    }

    fn finalize(lines: Vec<String>, _scratch: &Scratch) -> Finalized {
        Finalized {
            kind: BlockKind::Paragraph,
            content: lines.join("\n"),
        }
    }
}
