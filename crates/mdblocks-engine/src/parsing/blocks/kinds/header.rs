use crate::parsing::blocks::{
    registry::{BlockType, Scratch, Transformed},
    types::{BlockKind, BlockTypeId, Finalized},
};

/// ATX header block type: one to five `#` markers followed by whitespace.
pub struct Header;

impl Header {
    pub const MARKER: char = '#';
    pub const OPENER: &'static str = r"^#{1,5}\s+";

    pub fn block_type() -> BlockType {
        BlockType::new(
            BlockTypeId::Header,
            &[Self::OPENER],
            Self::transform,
            Self::finalize,
        )
        .with_line_limit(1)
    }

    /// Splits a header line into its level and title text.
    pub fn parse(line: &str) -> (u8, &str) {
        let title = line.trim_start_matches(Self::MARKER);
        let level = line.len() - title.len();
        (u8::try_from(level).unwrap_or(u8::MAX), title.trim())
    }

    fn transform(line: &str, _scratch: &mut Scratch) -> Transformed {
        Transformed::Store(line.to_string())
    }

    fn finalize(lines: Vec<String>, _scratch: &Scratch) -> Finalized {
        let line = lines.first().map(String::as_str).unwrap_or_default();
        let (level, title) = Self::parse(line);
        Finalized {
            kind: BlockKind::Header { level },
            content: title.to_string(),
        }
    }
}
