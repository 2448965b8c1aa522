use crate::{
    error::{RenderError, StreamError},
    parsing::blocks::{BlockKind, FinishedBlock, Layout},
};

/// A display backend that turns finished blocks into something visible.
///
/// The handle returned by [`Renderer::render`] belongs to the backend's
/// display surface; the engine drops it as soon as the call returns.
pub trait Renderer {
    type Handle;

    fn render(
        &mut self,
        kind: &BlockKind,
        content: &str,
        layout: Layout,
    ) -> Result<Self::Handle, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Handle = R::Handle;

    fn render(
        &mut self,
        kind: &BlockKind,
        content: &str,
        layout: Layout,
    ) -> Result<Self::Handle, RenderError> {
        (**self).render(kind, content, layout)
    }
}

/// Hands `block` to `renderer` and drops the handle.
pub fn dispatch<R: Renderer + ?Sized>(
    renderer: &mut R,
    block: &FinishedBlock,
) -> Result<(), StreamError> {
    renderer
        .render(&block.kind, &block.content, block.layout)
        .map(drop)
        .map_err(|source| StreamError::Render {
            label: block.kind.label(),
            top: block.layout.top,
            source,
        })
}

/// Renderer that keeps every block it is given.
#[derive(Debug, Default, Clone)]
pub struct Collector {
    pub blocks: Vec<FinishedBlock>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for Collector {
    /// Index of the block in [`Collector::blocks`].
    type Handle = usize;

    fn render(
        &mut self,
        kind: &BlockKind,
        content: &str,
        layout: Layout,
    ) -> Result<usize, RenderError> {
        self.blocks.push(FinishedBlock {
            kind: kind.clone(),
            content: content.to_string(),
            layout,
        });
        Ok(self.blocks.len() - 1)
    }
}
