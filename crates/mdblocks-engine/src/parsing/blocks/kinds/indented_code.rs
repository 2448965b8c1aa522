use super::join_trimmed;
use crate::parsing::blocks::{
    registry::{BlockType, Scratch, Transformed},
    types::{BlockKind, BlockTypeId, Finalized},
};

/// Code block indented by at least [`IndentedCode::MARGIN`] columns.
///
/// Blank lines continue the block so code can contain empty lines; blank lines
/// at either end are trimmed when the block closes.
pub struct IndentedCode;

impl IndentedCode {
    pub const MARGIN: usize = 4;
    pub const OPENER: &'static str = r"^\s{4,}\S";
    pub const BLANK: &'static str = r"^\s*$";
    pub const CHROME_ROWS: u32 = 2;

    pub fn block_type() -> BlockType {
        BlockType::new(
            BlockTypeId::IndentedCode,
            &[Self::OPENER, Self::BLANK],
            Self::transform,
            Self::finalize,
        )
        .with_chrome_rows(Self::CHROME_ROWS)
    }

    /// Removes the code margin. Lines are tab-expanded before they get here,
    /// so the margin is always the first four characters.
    pub fn strip_margin(line: &str) -> &str {
        if line.trim().is_empty() {
            return "";
        }
        let cut = line
            .char_indices()
            .nth(Self::MARGIN)
            .map_or(line.len(), |(i, _)| i);
        &line[cut..]
    }

    fn transform(line: &str, _scratch: &mut Scratch) -> Transformed {
        Transformed::Store(Self::strip_margin(line).to_string())
    }

    fn finalize(lines: Vec<String>, _scratch: &Scratch) -> Finalized {
        Finalized {
            kind: BlockKind::IndentedCode,
            content: join_trimmed(&lines),
        }
    }
}
