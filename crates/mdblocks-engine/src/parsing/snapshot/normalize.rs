use std::fmt;

use serde::Serialize;

use crate::parsing::blocks::{BlockKind, FinishedBlock};

#[derive(Debug, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub rows: (u32, u32),
    pub text: String,
}

pub fn normalize(blocks: &[FinishedBlock]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| {
            let kind = match &b.kind {
                BlockKind::Header { level } => format!("header h{level}"),
                BlockKind::FencedCode { fence, lang } => {
                    format!("fenced code {fence:?} {}", lang.as_deref().unwrap_or("-"))
                }
                other => other.label().to_string(),
            };
            BlockSnap {
                kind,
                rows: (b.layout.top, b.layout.height),
                text: preview(&b.content, 60),
            }
        })
        .collect();

    Snap { blocks }
}

/// Truncates `s` to at most `max` bytes (on a char boundary) with a "..." suffix.
pub fn preview(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// One line per block: `top+height kind: "text"`.
impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.blocks {
            writeln!(f, "{}+{} {}: {:?}", b.rows.0, b.rows.1, b.kind, b.text)?;
        }
        Ok(())
    }
}
