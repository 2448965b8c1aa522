use std::sync::mpsc::{Receiver, TryRecvError};

use mdblocks_engine::{BlockStream, Renderer, StreamError};

use crate::{input::Input, surface::TerminalRenderer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Reading,
    Done,
    Cancelled,
    Failed(String),
}

/// Viewer state: the block stream plus the scroll position over its surface.
pub struct App<R = TerminalRenderer> {
    stream: BlockStream<R>,
    input: Receiver<Input>,
    batch_lines: usize,
    pub scroll: u16,
    pub viewport: u16,
    pub status: Status,
    /// Most recent render failure; the stream keeps going after one.
    pub warning: Option<String>,
}

impl<R: Renderer> App<R> {
    pub fn new(renderer: R, input: Receiver<Input>, batch_lines: usize) -> Self {
        Self {
            stream: BlockStream::new(renderer).with_batch_lines(batch_lines),
            input,
            batch_lines,
            scroll: 0,
            viewport: 0,
            status: Status::Reading,
            warning: None,
        }
    }

    pub fn renderer(&self) -> &R {
        self.stream.renderer()
    }

    /// Does one slice of work: a batch of queued lines, or one input message.
    ///
    /// Returns false when there was nothing to do.
    pub fn pump(&mut self) -> bool {
        if self.status != Status::Reading {
            return false;
        }

        if self.stream.queued() > 0 {
            if let Err(e) = self.stream.step(self.batch_lines) {
                self.stream_error(e);
            }
            return true;
        }

        match self.input.try_recv() {
            Ok(Input::Chunk(bytes)) => {
                if let Err(e) = self.stream.enqueue(&bytes) {
                    self.stream_error(e);
                }
            }
            Ok(Input::Failed(e)) => {
                self.stream.cancel();
                self.status = Status::Failed(format!("read error: {e}"));
            }
            Ok(Input::End) | Err(TryRecvError::Disconnected) => self.finish_input(),
            Err(TryRecvError::Empty) => return false,
        }
        true
    }

    /// Stops an unfinished stream; already drawn blocks stay visible.
    pub fn quit(&mut self) {
        if self.status == Status::Reading {
            self.stream.cancel();
            self.status = Status::Cancelled;
        }
    }

    pub fn page(&self) -> i32 {
        i32::from(self.viewport.max(1))
    }

    /// Flushes the stream. A render failure stops `flush` part way, so it is
    /// called again until the remaining lines and the open block are drawn.
    fn finish_input(&mut self) {
        loop {
            match self.stream.flush() {
                Ok(_) => break,
                Err(e @ StreamError::Render { .. }) => self.stream_error(e),
                Err(e) => {
                    self.stream_error(e);
                    return;
                }
            }
        }
        log::info!("input finished, {} blocks", self.stream.delivered());
        self.status = Status::Done;
    }

    fn stream_error(&mut self, e: StreamError) {
        log::warn!("{e}");
        match e {
            StreamError::Render { .. } => self.warning = Some(e.to_string()),
            StreamError::Decode { .. } => {
                self.stream.cancel();
                self.status = Status::Failed(e.to_string());
            }
        }
    }
}

impl App<TerminalRenderer> {
    pub fn resize(&mut self, width: u16) {
        self.stream.renderer_mut().set_width(width);
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.scroll) + delta;
        self.scroll = target.clamp(0, i32::from(self.max_scroll())) as u16;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn max_scroll(&self) -> u16 {
        self.renderer().height().saturating_sub(self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdblocks_engine::{BlockKind, Layout, RenderError};
    use pretty_assertions::assert_eq;
    use std::sync::mpsc::{Sender, channel};

    fn app(batch_lines: usize) -> (App, Sender<Input>) {
        let (tx, rx) = channel();
        (App::new(TerminalRenderer::new(20, 50), rx, batch_lines), tx)
    }

    fn run<R: Renderer>(app: &mut App<R>) -> usize {
        let mut slices = 0;
        while app.pump() {
            slices += 1;
        }
        slices
    }

    #[test]
    fn blocks_appear_batch_by_batch() {
        let (mut app, tx) = app(1);
        tx.send(Input::Chunk(b"# A\n# B\n# C\n".to_vec())).unwrap();

        assert!(app.pump());
        assert!(app.renderer().blocks().is_empty());
        assert!(app.pump());
        assert_eq!(app.renderer().blocks().len(), 1);

        run(&mut app);
        assert_eq!(app.renderer().blocks().len(), 3);
        assert_eq!(app.status, Status::Reading);
    }

    #[test]
    fn end_of_input_flushes_the_open_block() {
        let (mut app, tx) = app(64);
        tx.send(Input::Chunk(b"trailing paragraph".to_vec())).unwrap();
        tx.send(Input::End).unwrap();
        run(&mut app);

        assert_eq!(app.status, Status::Done);
        assert_eq!(app.renderer().blocks()[0].content, "trailing paragraph");
        assert!(!app.pump());
    }

    #[test]
    fn dropped_reader_counts_as_end() {
        let (mut app, tx) = app(64);
        tx.send(Input::Chunk(b"# Only\n".to_vec())).unwrap();
        drop(tx);
        run(&mut app);
        assert_eq!(app.status, Status::Done);
        assert_eq!(app.renderer().blocks().len(), 1);
    }

    #[test]
    fn quit_cancels_an_unfinished_stream() {
        let (mut app, tx) = app(64);
        tx.send(Input::Chunk(b"```\nnever closed\n".to_vec())).unwrap();
        run(&mut app);
        app.quit();

        tx.send(Input::End).unwrap();
        assert!(!app.pump());
        assert_eq!(app.status, Status::Cancelled);
        assert!(app.renderer().blocks().is_empty());
    }

    #[test]
    fn invalid_utf8_fails_the_stream() {
        let (mut app, tx) = app(64);
        tx.send(Input::Chunk(b"# ok\n\xff\n".to_vec())).unwrap();
        run(&mut app);
        assert!(matches!(app.status, Status::Failed(_)));
    }

    #[test]
    fn scrolling_stays_within_the_surface() {
        let (mut app, tx) = app(64);
        tx.send(Input::Chunk(b"# 1\n# 2\n# 3\n# 4\n# 5\n".to_vec())).unwrap();
        tx.send(Input::End).unwrap();
        run(&mut app);
        app.viewport = 2;

        app.scroll_by(-3);
        assert_eq!(app.scroll, 0);
        app.scroll_by(app.page());
        assert_eq!(app.scroll, 2);
        app.scroll_to_bottom();
        assert_eq!(app.scroll, 3);
        app.scroll_by(10);
        assert_eq!(app.scroll, 3);
        app.scroll_to_top();
        assert_eq!(app.scroll, 0);
    }

    #[derive(Default)]
    struct FailFirst {
        failed: bool,
        seen: Vec<String>,
    }

    impl Renderer for FailFirst {
        type Handle = ();

        fn render(&mut self, _: &BlockKind, content: &str, _: Layout) -> Result<(), RenderError> {
            if !self.failed {
                self.failed = true;
                return Err("surface lost".into());
            }
            self.seen.push(content.to_string());
            Ok(())
        }
    }

    #[test]
    fn render_failure_during_flush_still_draws_the_rest() {
        let (tx, rx) = channel();
        let mut app = App::new(FailFirst::default(), rx, 64);
        tx.send(Input::Chunk(b"para one\n# head".to_vec())).unwrap();
        tx.send(Input::End).unwrap();
        run(&mut app);

        assert_eq!(app.status, Status::Done);
        assert!(app.warning.is_some());
        assert_eq!(app.renderer().seen, vec!["head".to_string()]);
    }
}
