use std::str::Utf8Error;

/// Error returned by a [`Renderer`](crate::render::Renderer) backend.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Failures scoped to one input stream. The stream stays usable afterwards.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The completed lines of a chunk were not valid UTF-8. The chunk was
    /// rejected and the stream state is as it was before the call.
    #[error("invalid UTF-8 at byte {offset} of the stream")]
    Decode { offset: usize, source: Utf8Error },

    /// The renderer failed on a finished block. The block counts as delivered
    /// and its rows stay reserved.
    #[error("failed to render {label} block at row {top}")]
    Render {
        label: &'static str,
        top: u32,
        source: RenderError,
    },
}
