use std::sync::OnceLock;

use regex::Regex;

use super::{
    kinds::{CodeFence, Header, HorizontalRule, IndentedCode, OpenFence, Paragraph},
    types::{BlockTypeId, Finalized},
};

/// Outcome of running a kind's per-line transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformed {
    /// Append this normalized content to the open block.
    Store(String),
    /// The line terminates the block; it is consumed but not stored.
    Close,
}

/// Kind-specific working state carried by an open block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scratch {
    /// Set by the fenced code kind when its opening line is seen.
    pub fence: Option<OpenFence>,
}

pub type TransformFn = fn(&str, &mut Scratch) -> Transformed;
pub type FinalizeFn = fn(Vec<String>, &Scratch) -> Finalized;

/// Immutable descriptor for one block kind.
///
/// `patterns[0]` decides whether a line opens a block of this kind. Once a
/// block is open every pattern is a continuation predicate, searched from the
/// last one to the first.
pub struct BlockType {
    pub id: BlockTypeId,
    patterns: Vec<Regex>,
    /// Maximum number of stored lines before the block is closed.
    pub line_limit: Option<usize>,
    /// Border rows the renderer draws around the content.
    pub chrome_rows: u32,
    /// A line opening any kind ahead of this one in the registry ends the block.
    pub interruptible: bool,
    transform: TransformFn,
    finalize: FinalizeFn,
}

impl BlockType {
    /// # Panics
    /// Panics if `patterns` is empty or any pattern fails to compile. Patterns
    /// are compile-time constants of the kind modules.
    pub fn new(
        id: BlockTypeId,
        patterns: &[&str],
        transform: TransformFn,
        finalize: FinalizeFn,
    ) -> Self {
        assert!(!patterns.is_empty(), "{} has no opener", id.label());
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).expect("Invalid block pattern"))
            .collect();
        Self {
            id,
            patterns,
            line_limit: None,
            chrome_rows: 0,
            interruptible: false,
            transform,
            finalize,
        }
    }

    #[must_use]
    pub fn with_line_limit(mut self, limit: usize) -> Self {
        self.line_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_chrome_rows(mut self, rows: u32) -> Self {
        self.chrome_rows = rows;
        self
    }

    #[must_use]
    pub fn interruptible(mut self) -> Self {
        self.interruptible = true;
        self
    }

    pub fn label(&self) -> &'static str {
        self.id.label()
    }

    pub fn opens(&self, line: &str) -> bool {
        self.patterns[0].is_match(line)
    }

    pub fn continues(&self, line: &str) -> bool {
        self.patterns.iter().rev().any(|p| p.is_match(line))
    }

    pub fn transform(&self, line: &str, scratch: &mut Scratch) -> Transformed {
        (self.transform)(line, scratch)
    }

    pub fn finalize(&self, lines: Vec<String>, scratch: &Scratch) -> Finalized {
        (self.finalize)(lines, scratch)
    }
}

impl std::fmt::Debug for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockType")
            .field("id", &self.id)
            .field("patterns", &self.patterns)
            .field("line_limit", &self.line_limit)
            .field("chrome_rows", &self.chrome_rows)
            .field("interruptible", &self.interruptible)
            .finish_non_exhaustive()
    }
}

/// Ordered catalog of block kinds. Earlier entries win when several openers match.
#[derive(Debug)]
pub struct Registry {
    types: Vec<BlockType>,
}

impl Registry {
    pub fn new(types: Vec<BlockType>) -> Self {
        Self { types }
    }

    /// The markdown registry: horizontal rule, header, indented code, fenced
    /// code, then paragraph as the catch-all for any non-blank line.
    pub fn markdown() -> &'static Registry {
        static MARKDOWN: OnceLock<Registry> = OnceLock::new();
        MARKDOWN.get_or_init(|| {
            Registry::new(vec![
                HorizontalRule::block_type(),
                Header::block_type(),
                IndentedCode::block_type(),
                CodeFence::block_type(),
                Paragraph::block_type(),
            ])
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.types.iter()
    }

    pub fn get(&self, id: BlockTypeId) -> Option<&BlockType> {
        self.types.iter().find(|t| t.id == id)
    }

    /// First kind in declaration order whose opener matches `line`.
    pub fn opener_for(&self, line: &str) -> Option<&BlockType> {
        self.types.iter().find(|t| t.opens(line))
    }

    /// Whether `line` opens a kind declared before `open`.
    pub fn preempts(&self, open: &BlockType, line: &str) -> bool {
        self.types
            .iter()
            .take_while(|t| t.id != open.id)
            .any(|t| t.opens(line))
    }
}
