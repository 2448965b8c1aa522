// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with some content\nwrapped over two lines.\n\n---\n\n```rust\nfn example() {\n\tprintln!(\"Hello\");\n}\n```\n\n    indented code\n\n    more code\n\n";
    base.repeat(size)
}
