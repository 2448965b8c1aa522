pub mod blocks;
pub mod lines;
pub mod snapshot;

#[cfg(test)]
mod tests;

use blocks::{BlockBuilder, FinishedBlock};
use lines::expand_tabs;

/// Segments a complete document in one pass.
///
/// Produces the same blocks as feeding `text` to a
/// [`BlockStream`](crate::stream::BlockStream) in any chunking and flushing it.
pub fn parse_document(text: &str) -> Vec<FinishedBlock> {
    let mut builder = BlockBuilder::new();
    let mut blocks = Vec::new();

    for line in text.lines() {
        builder.push(&expand_tabs(line));
        while let Some(block) = builder.next_finished() {
            blocks.push(block);
        }
    }

    blocks.extend(builder.finish());
    blocks
}
