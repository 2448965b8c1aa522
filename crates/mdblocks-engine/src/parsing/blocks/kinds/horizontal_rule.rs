use crate::parsing::blocks::{
    registry::{BlockType, Scratch, Transformed},
    types::{BlockKind, BlockTypeId, Finalized},
};

/// Horizontal rule: three or more `*`, `-` or `_`, optionally space separated,
/// indented by at most three columns.
pub struct HorizontalRule;

impl HorizontalRule {
    pub const PATTERN: &'static str = r"^\s{0,3}(?:(?:\*+\s*){3,}|(?:-+\s*){3,}|(?:_+\s*){3,})$";

    pub fn block_type() -> BlockType {
        BlockType::new(
            BlockTypeId::HorizontalRule,
            &[Self::PATTERN],
            Self::transform,
            Self::finalize,
        )
        .with_line_limit(1)
    }

    fn transform(_line: &str, _scratch: &mut Scratch) -> Transformed {
        Transformed::Store(String::new())
    }

    fn finalize(_lines: Vec<String>, _scratch: &Scratch) -> Finalized {
        Finalized {
            kind: BlockKind::HorizontalRule,
            content: String::new(),
        }
    }
}
