//! Helio frame graph - pass recording for post-processing chains
//!
//! Effects never talk to wgpu directly while scheduling. They describe each
//! raster pass through the [`PassBuilder`] interface:
//!
//! - declare the viewport, the pass name and its camera-scoped identity
//! - bind named input buffers to material input slots
//! - declare output targets with a pixel format and load behaviour
//! - invoke a subpass of a [`ShadingProgram`] and close the pass
//!
//! [`FrameGraph`] is the recording implementation: it validates the call
//! sequence, then orders passes by their resource dependencies.

mod builder;
mod chain;
mod format;
mod graph;
mod viewport;

pub use builder::{LoadOp, PassBuilder, ShadingProgram, CLEAR_BLACK};
pub use chain::{InsertAnchor, PassChain, PassChainBuilder, PassRegistration};
pub use format::Format;
pub use graph::{FrameGraph, RasterView, RecordedPass, ResourceLifetime};
pub use viewport::{Rect, Viewport};

/// Result type for frame graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while recording or building a frame graph
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Shader error: {0}")]
    Shader(String),

    #[error("Config error: {0}")]
    Config(String),
}
