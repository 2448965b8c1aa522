pub mod code_fence;
pub mod header;
pub mod horizontal_rule;
pub mod indented_code;
pub mod paragraph;

pub use code_fence::{CodeFence, FenceKind, OpenFence};
pub use header::Header;
pub use horizontal_rule::HorizontalRule;
pub use indented_code::IndentedCode;
pub use paragraph::Paragraph;

/// Joins `lines`, dropping blank lines at either end.
pub(crate) fn join_trimmed(lines: &[String]) -> String {
    let is_blank = |l: &String| l.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
