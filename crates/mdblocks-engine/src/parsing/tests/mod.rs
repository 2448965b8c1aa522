//! Document-level tests for block recognition.
//!
//! Uses inline `insta` snapshots of the normalized one-line-per-block dump.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    blocks::{BlockKind, Layout},
    parse_document,
    snapshot::{invariants, normalize},
};

const MIXED: &str = "# Streaming

A paragraph
spanning two lines.

---

```rust
fn main() {}
```

    indented
";

#[test]
fn mixed_document() {
    let blocks = parse_document(MIXED);
    invariants(&blocks);

    insta::assert_snapshot!(normalize(&blocks).to_string(), @r#"
    0+1 header h1: "Streaming"
    1+4 paragraph: "A paragraph\nspanning two lines."
    5+1 horizontal rule: ""
    6+3 fenced code Backticks rust: "fn main() {}"
    9+3 indented code: "indented"
    "#);
}

#[test]
fn fenced_block_records_language() {
    let blocks = parse_document("```js\nlet a = 1;\n```\n");

    insta::assert_debug_snapshot!(blocks[0], @r#"
    FinishedBlock {
        kind: FencedCode {
            fence: Backticks,
            lang: Some(
                "js",
            ),
        },
        content: "let a = 1;",
        layout: Layout {
            top: 0,
            height: 3,
        },
    }
    "#);
}

#[test]
fn header_content_is_title_only() {
    let blocks = parse_document("## Title\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Header { level: 2 });
    assert_eq!(blocks[0].content, "Title");
    assert_eq!(blocks[0].layout, Layout { top: 0, height: 1 });
}

#[rstest]
#[case("---")]
#[case("***")]
#[case("___")]
#[case("* * *")]
#[case("-----------")]
fn horizontal_rules_have_empty_content(#[case] rule: &str) {
    let blocks = parse_document(rule);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::HorizontalRule);
    assert_eq!(blocks[0].content, "");
    assert_eq!(blocks[0].layout.height, 1);
}

#[test]
fn indented_code_preserves_interior_blank_line() {
    let md = "    alpha\n    beta\n\n    gamma\n    delta\n";
    let blocks = parse_document(md);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::IndentedCode);
    assert_eq!(blocks[0].content, "alpha\nbeta\n\ngamma\ndelta");
    assert_eq!(blocks[0].layout.height, 5 + 2);
}

#[test]
fn tabs_count_as_code_indentation() {
    let blocks = parse_document("\tcode\n\t\tnested\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content, "code\n    nested");
}

#[test]
fn paragraph_is_interrupted_by_fence() {
    let blocks = parse_document("intro\n```\nbody\n```\noutro\n");
    invariants(&blocks);
    let labels: Vec<_> = blocks.iter().map(|b| b.kind.label()).collect();
    assert_eq!(labels, vec!["paragraph", "fenced code", "paragraph"]);
}

#[test]
fn longer_fence_needs_longer_close() {
    let blocks = parse_document("````\n```\nstill code\n````\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].content, "```\nstill code");
}

#[test]
fn whitespace_only_lines_produce_no_blocks() {
    assert!(parse_document("   \n\t\n\n").is_empty());
}

#[test]
fn empty_document() {
    assert!(parse_document("").is_empty());
}

#[test]
fn unterminated_last_line_is_kept() {
    let blocks = parse_document("# A\nlast words");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].content, "last words");
}
