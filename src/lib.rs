//! Helio Blur - Gaussian blur post-processing for Helio frame graphs
//!
//! Re-exports the frame graph recording layer and the blur pass so hosts can
//! depend on a single crate.

pub use helio_frame_graph as graph;
pub use helio_pass_gaussian_blur as blur;

pub mod prelude {
    pub use crate::graph::{
        Error, Format, FrameGraph, LoadOp, PassBuilder, PassChain, PassRegistration, Rect,
        Result, Viewport,
    };
    pub use crate::blur::{
        BlurConfig, BlurMode, Camera, CameraHandle, CameraRegistry, DebugViewPolicy,
        EffectAsset, GaussianBlurPass, GaussianBlurSettings, HostPolicy, SlotSource,
        StageOutputs,
    };
    pub use glam;
}
