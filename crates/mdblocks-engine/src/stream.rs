use std::collections::VecDeque;

use crate::{
    error::StreamError,
    parsing::{
        blocks::{BlockBuilder, FinishedBlock},
        lines::LineAssembler,
    },
    render::{self, Renderer},
};

/// Default number of lines processed before [`BlockStream::feed`] yields
/// between batches.
pub const DEFAULT_BATCH_LINES: usize = 64;

/// What one [`BlockStream::feed`] call consumed and produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fed {
    /// Complete lines processed by the call. Lines left queued by an earlier
    /// call that failed are processed first and counted here too.
    pub lines: usize,
    /// Blocks delivered to the renderer.
    pub blocks: usize,
}

/// Result of one cooperative [`BlockStream::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The budget ran out with lines still queued.
    Yielded { processed: usize },
    /// Every queued line has been processed.
    Drained { processed: usize },
}

impl Step {
    pub fn processed(self) -> usize {
        match self {
            Step::Yielded { processed } | Step::Drained { processed } => processed,
        }
    }
}

/// Incremental markdown block recognition for one input stream.
///
/// Bytes go in through [`feed`](Self::feed) (or [`enqueue`](Self::enqueue)
/// plus [`step`](Self::step) when the host wants to regain control between
/// batches); finished blocks come out through the [`Renderer`]. Lines are
/// processed strictly in arrival order and never concurrently.
///
/// ```
/// use mdblocks_engine::{BlockStream, Collector};
///
/// let mut stream = BlockStream::new(Collector::new());
/// stream.feed(b"# A\n").unwrap();
/// stream.feed(b"\n# B").unwrap();
/// stream.flush().unwrap();
///
/// let tops: Vec<u32> = stream.renderer().blocks.iter().map(|b| b.layout.top).collect();
/// assert_eq!(tops, vec![0, 1]);
/// ```
pub struct BlockStream<R> {
    lines: LineAssembler,
    ready: VecDeque<String>,
    builder: BlockBuilder,
    renderer: R,
    batch_lines: usize,
    delivered: usize,
}

impl<R: Renderer> BlockStream<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            lines: LineAssembler::new(),
            ready: VecDeque::new(),
            builder: BlockBuilder::new(),
            renderer,
            batch_lines: DEFAULT_BATCH_LINES,
            delivered: 0,
        }
    }

    /// Sets how many lines [`feed`](Self::feed) processes per batch.
    #[must_use]
    pub fn with_batch_lines(mut self, batch_lines: usize) -> Self {
        self.batch_lines = batch_lines.max(1);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Row where the next finished block will start.
    pub fn offset(&self) -> u32 {
        self.builder.offset()
    }

    /// Complete lines waiting for [`step`](Self::step).
    pub fn queued(&self) -> usize {
        self.ready.len()
    }

    /// Blocks handed to the renderer so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Reassembles `chunk` into lines and queues them without processing.
    ///
    /// Returns the number of lines queued. A decode error rejects the whole
    /// chunk and leaves the stream unchanged.
    pub fn enqueue(&mut self, chunk: &[u8]) -> Result<usize, StreamError> {
        let lines = self.lines.push(chunk)?;
        let count = lines.len();
        self.ready.extend(lines);
        Ok(count)
    }

    /// Processes at most `budget` queued lines, delivering the blocks they
    /// complete. A zero budget still processes one line.
    pub fn step(&mut self, budget: usize) -> Result<Step, StreamError> {
        self.deliver()?;

        let budget = budget.max(1);
        let mut processed = 0;
        while processed < budget {
            let Some(line) = self.ready.pop_front() else {
                return Ok(Step::Drained { processed });
            };
            self.builder.push(&line);
            processed += 1;
            self.deliver()?;
        }

        if self.ready.is_empty() {
            Ok(Step::Drained { processed })
        } else {
            log::trace!("yielding after {processed} lines, {} queued", self.ready.len());
            Ok(Step::Yielded { processed })
        }
    }

    /// Feeds one chunk and processes every queued line, including any left
    /// behind by an earlier call that stopped on a render error.
    ///
    /// Returns once the queue is empty.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Fed, StreamError> {
        self.enqueue(chunk)?;
        let before = self.delivered;
        let lines = self.drain()?;
        Ok(Fed {
            lines,
            blocks: self.delivered - before,
        })
    }

    /// End of input: processes queued lines and the unterminated tail, then
    /// force-closes the open block.
    ///
    /// Returns the force-closed block, which has already been rendered.
    pub fn flush(&mut self) -> Result<Option<FinishedBlock>, StreamError> {
        if let Some(tail) = self.lines.finish()? {
            self.ready.push_back(tail);
        }
        self.drain()?;

        let Some(block) = self.builder.finish() else {
            log::debug!("flushed stream with no open block");
            return Ok(None);
        };
        log::debug!("flush closed trailing {} block", block.kind.label());
        self.delivered += 1;
        render::dispatch(&mut self.renderer, &block)?;
        Ok(Some(block))
    }

    /// Stops processing at the current line boundary. The open block, queued
    /// lines and any partial line are discarded without being rendered.
    pub fn cancel(&mut self) {
        log::debug!(
            "cancelling stream with {} queued lines and {} pending bytes",
            self.ready.len(),
            self.lines.pending().len()
        );
        self.builder.discard();
        self.ready.clear();
        self.lines.reset();
    }

    fn drain(&mut self) -> Result<usize, StreamError> {
        let mut lines = 0;
        loop {
            match self.step(self.batch_lines)? {
                Step::Yielded { processed } => lines += processed,
                Step::Drained { processed } => return Ok(lines + processed),
            }
        }
    }

    fn deliver(&mut self) -> Result<(), StreamError> {
        while let Some(block) = self.builder.next_finished() {
            self.delivered += 1;
            render::dispatch(&mut self.renderer, &block)?;
        }
        Ok(())
    }
}
