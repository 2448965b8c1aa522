use std::collections::VecDeque;

use super::{
    layout::LayoutTracker,
    registry::{BlockType, Registry, Scratch, Transformed},
    types::FinishedBlock,
};

/// The block currently accumulating lines.
#[derive(Debug)]
struct OpenBlock {
    kind: &'static BlockType,
    lines: Vec<String>,
    scratch: Scratch,
}

impl OpenBlock {
    fn is_full(&self) -> bool {
        self.kind
            .line_limit
            .is_some_and(|limit| self.lines.len() >= limit)
    }
}

/// Line-at-a-time state machine that groups lines into blocks.
///
/// At most one block is open. Each pushed line either extends it, closes it,
/// or (once nothing is open) opens a new block of the first registry kind
/// whose opener matches. Closed blocks are placed by the [`LayoutTracker`] and
/// queued until taken with [`BlockBuilder::next_finished`].
pub struct BlockBuilder {
    registry: &'static Registry,
    open: Option<OpenBlock>,
    layout: LayoutTracker,
    out: VecDeque<FinishedBlock>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::with_registry(Registry::markdown())
    }

    pub fn with_registry(registry: &'static Registry) -> Self {
        Self {
            registry,
            open: None,
            layout: LayoutTracker::new(),
            out: VecDeque::new(),
        }
    }

    /// Processes one tab-expanded line without its terminator.
    pub fn push(&mut self, line: &str) {
        let registry = self.registry;

        if let Some(open) = &mut self.open {
            if open.is_full() {
                self.close();
            } else if open.kind.continues(line)
                && !(open.kind.interruptible && registry.preempts(open.kind, line))
            {
                match open.kind.transform(line, &mut open.scratch) {
                    Transformed::Store(content) => {
                        open.lines.push(content);
                        if open.is_full() {
                            self.close();
                        }
                    }
                    Transformed::Close => self.close(),
                }
                return;
            } else {
                self.close();
            }
        }

        self.open_block(line);
    }

    /// Takes the oldest finished block not yet handed out.
    pub fn next_finished(&mut self) -> Option<FinishedBlock> {
        self.out.pop_front()
    }

    /// End of input: closes the open block, if any, and returns it directly.
    pub fn finish(&mut self) -> Option<FinishedBlock> {
        let open = self.open.take()?;
        Some(self.finalize(open))
    }

    /// Drops the open block without finalizing it.
    pub fn discard(&mut self) {
        if let Some(open) = self.open.take() {
            log::debug!(
                "discarding open {} block with {} lines",
                open.kind.label(),
                open.lines.len()
            );
        }
        self.out.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Row where the next finished block will start.
    pub fn offset(&self) -> u32 {
        self.layout.offset()
    }

    fn open_block(&mut self, line: &str) {
        let Some(kind) = self.registry.opener_for(line) else {
            log::trace!("no block opens on {line:?}");
            return;
        };

        let mut scratch = Scratch::default();
        let Transformed::Store(first) = kind.transform(line, &mut scratch) else {
            return;
        };
        log::debug!("opened {} block", kind.label());

        let open = OpenBlock {
            kind,
            lines: vec![first],
            scratch,
        };
        if open.is_full() {
            let block = self.finalize(open);
            self.out.push_back(block);
        } else {
            self.open = Some(open);
        }
    }

    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            let block = self.finalize(open);
            self.out.push_back(block);
        }
    }

    fn finalize(&mut self, open: OpenBlock) -> FinishedBlock {
        let OpenBlock {
            kind,
            lines,
            scratch,
        } = open;
        let done = kind.finalize(lines, &scratch);
        let height = LayoutTracker::height_for(&done.content, kind.chrome_rows);
        let layout = self.layout.place(height);
        log::debug!(
            "closed {} block at row {} ({} rows)",
            kind.label(),
            layout.top,
            layout.height
        );
        FinishedBlock {
            kind: done.kind,
            content: done.content,
            layout,
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}
