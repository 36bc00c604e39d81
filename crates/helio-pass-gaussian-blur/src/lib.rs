//! Helio render pass: separable Gaussian blur
//!
//! Blurs an upstream stage's auxiliary buffer through a configurable number
//! of horizontal/vertical iterations and publishes the result as the
//! per-camera `GaussianBlurMap` slot.
//!
//! ```ignore
//! let mut chain = PassChain::builder()
//!     .with_pass("ForwardPass", &["ForwardColor", "ForwardDepth"])
//!     .with_pass("BlitScreenPass", &[])
//!     .build()?;
//! chain.insert(helio_pass_gaussian_blur::registration())?;
//!
//! let settings = GaussianBlurSettings::new()
//!     .with_iterations(2)
//!     .with_radius(4.0)
//!     .with_effect(EffectAsset::gaussian_blur());
//!
//! let camera = cameras.register(CameraHandle(0), Rect::FULL, 1920, 1080);
//! blur.render(&camera, &settings, &forward, &policy, &mut graph)?;
//! ```

pub mod camera;
pub mod context;
pub mod effect;
pub mod pass;
pub mod settings;
pub mod stage;

pub use camera::{Camera, CameraHandle, CameraRegistry};
pub use context::PassContext;
pub use effect::{EffectAsset, Material, DEFAULT_INPUT_SLOT};
pub use pass::{BlurPassDesc, DebugViewPolicy, GaussianBlurPass, HostPolicy};
pub use settings::{BlurConfig, BlurMode, BlurParams, GaussianBlurSettings, BLUR_PARAMS, MAX_ITERATIONS};
pub use stage::{SlotSource, StageOutputs};

pub use helio_frame_graph::{Error, Result};

/// Registration descriptor for the host's post-process chain
pub fn registration() -> helio_frame_graph::PassRegistration {
    GaussianBlurPass::registration()
}
