use serde::Serialize;

use super::join_trimmed;
use crate::parsing::blocks::{
    registry::{BlockType, Scratch, Transformed},
    types::{BlockKind, BlockTypeId, Finalized},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

impl FenceKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '`' => Some(FenceKind::Backticks),
            '~' => Some(FenceKind::Tildes),
            _ => None,
        }
    }

    pub fn char(self) -> char {
        match self {
            FenceKind::Backticks => '`',
            FenceKind::Tildes => '~',
        }
    }
}

/// State recorded from the opening fence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFence {
    pub kind: FenceKind,
    /// Length of the opening delimiter run.
    pub len: usize,
    pub lang: Option<String>,
}

impl OpenFence {
    /// A closing fence is a leading run of the same character at least as long
    /// as the opening run.
    pub fn closes(&self, line: &str) -> bool {
        let run = line.chars().take_while(|&c| c == self.kind.char()).count();
        run >= self.len
    }
}

/// Fenced code block type with owned delimiter constants.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";
    pub const OPENER: &'static str = r"^(?:`{3,}|~{3,})";
    pub const ANY_LINE: &'static str = r"^.*$";
    pub const CHROME_ROWS: u32 = 2;

    pub fn block_type() -> BlockType {
        BlockType::new(
            BlockTypeId::FencedCode,
            &[Self::OPENER, Self::ANY_LINE],
            Self::transform,
            Self::finalize,
        )
        .with_chrome_rows(Self::CHROME_ROWS)
    }

    /// Parses an opening fence: delimiter character, run length and info string.
    pub fn open(line: &str) -> Option<OpenFence> {
        let kind = FenceKind::from_char(line.chars().next()?)?;
        let len = line.chars().take_while(|&c| c == kind.char()).count();
        if len < Self::BACKTICKS.len() {
            return None;
        }
        let info = line[len * kind.char().len_utf8()..].trim();
        Some(OpenFence {
            kind,
            len,
            lang: (!info.is_empty()).then(|| info.to_string()),
        })
    }

    fn transform(line: &str, scratch: &mut Scratch) -> Transformed {
        match &scratch.fence {
            None => {
                scratch.fence = Self::open(line);
                Transformed::Store(String::new())
            }
            Some(fence) if fence.closes(line) => Transformed::Close,
            Some(_) => Transformed::Store(line.to_string()),
        }
    }

    fn finalize(lines: Vec<String>, scratch: &Scratch) -> Finalized {
        let (fence, lang) = match &scratch.fence {
            Some(open) => (open.kind, open.lang.clone()),
            None => (FenceKind::Backticks, None),
        };
        Finalized {
            kind: BlockKind::FencedCode { fence, lang },
            content: join_trimmed(&lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_backtick_fence() {
        let fence = CodeFence::open("```rust").unwrap();
        assert_eq!(fence.kind, FenceKind::Backticks);
        assert_eq!(fence.len, 3);
        assert_eq!(fence.lang.as_deref(), Some("rust"));
    }

    #[test]
    fn detect_tilde_fence() {
        let fence = CodeFence::open("~~~~~").unwrap();
        assert_eq!(fence.kind, FenceKind::Tildes);
        assert_eq!(fence.len, 5);
        assert_eq!(fence.lang, None);
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::open("hello"), None);
        assert_eq!(CodeFence::open("``not enough"), None);
    }

    #[test]
    fn info_string_is_trimmed() {
        let fence = CodeFence::open("```   js  ").unwrap();
        assert_eq!(fence.lang.as_deref(), Some("js"));
    }

    #[test]
    fn closes_with_equal_or_longer_run() {
        let fence = CodeFence::open("````").unwrap();
        assert!(fence.closes("````"));
        assert!(fence.closes("``````"));
        assert!(!fence.closes("```"));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let backticks = CodeFence::open("```").unwrap();
        assert!(!backticks.closes("~~~"));
        let tildes = CodeFence::open("~~~").unwrap();
        assert!(!tildes.closes("```"));
    }

    #[test]
    fn transform_records_fence_then_stores_verbatim() {
        let mut scratch = Scratch::default();
        assert_eq!(
            CodeFence::transform("```js", &mut scratch),
            Transformed::Store(String::new())
        );
        assert_eq!(
            CodeFence::transform("  let a = 1;", &mut scratch),
            Transformed::Store("  let a = 1;".to_string())
        );
        assert_eq!(CodeFence::transform("```", &mut scratch), Transformed::Close);
    }
}
