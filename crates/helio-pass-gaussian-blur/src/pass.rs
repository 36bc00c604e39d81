//! Gaussian blur pass scheduling
//!
//! Each blur iteration is a horizontal pass into a per-camera temporary
//! buffer followed by a vertical pass into the per-camera output slot. The
//! next iteration reads that output again, so iterations refine the same
//! image instead of resampling the source.

use crate::camera::Camera;
use crate::context::PassContext;
use crate::effect::Material;
use crate::settings::{BlurMode, GaussianBlurSettings};
use crate::stage::{SlotSource, StageOutputs};
use helio_frame_graph::{Format, InsertAnchor, PassBuilder, PassRegistration, Result, ShadingProgram};

/// Registered pass name
pub const PASS_NAME: &str = "GaussianBlurPass";
/// Base name of the blurred output slot
pub const OUTPUT_NAME: &str = "GaussianBlurMap";
/// Pass the blur is inserted in front of
pub const ANCHOR_PASS: &str = "BlitScreenPass";

pub const BLUR_X: &str = "blur-x";
pub const BLUR_Y: &str = "blur-y";

const HORIZONTAL_SUBPASS: u32 = 0;
const VERTICAL_SUBPASS: u32 = 1;
const BLUR_FORMAT: Format = Format::Rgba8;

/// Host decision on whether post-processing runs this frame
pub trait HostPolicy {
    /// True while a debug view replaces the final image
    fn post_process_suppressed(&self) -> bool;
}

/// Plain flag policy
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugViewPolicy {
    pub debug_view_active: bool,
}

impl HostPolicy for DebugViewPolicy {
    fn post_process_suppressed(&self) -> bool {
        self.debug_view_active
    }
}

/// One raster pass of a blur group, built per camera per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurPassDesc {
    /// Pass kind, `blur-x` or `blur-y`
    pub layout: &'static str,
    /// Camera-scoped pass identity
    pub name: String,
    pub input: String,
    /// Material input slot `input` is bound to
    pub input_slot: String,
    pub output: String,
    pub format: Format,
    /// 0 = horizontal, 1 = vertical
    pub subpass: u32,
}

/// The Gaussian blur post-process pass
#[derive(Debug, Clone)]
pub struct GaussianBlurPass {
    outputs: StageOutputs,
    context: PassContext,
}

impl GaussianBlurPass {
    pub fn new() -> Self {
        Self {
            outputs: StageOutputs::new(PASS_NAME, &[OUTPUT_NAME]),
            context: PassContext::new(),
        }
    }

    /// Descriptor the host uses to place this pass in its chain
    pub fn registration() -> PassRegistration {
        PassRegistration {
            name: PASS_NAME.to_string(),
            outputs: vec![OUTPUT_NAME.to_string()],
            anchor: InsertAnchor::Before(ANCHOR_PASS.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        self.outputs.name()
    }

    /// Whether this pass runs for the frame. Reads state only.
    pub fn check_enable(&self, settings: &GaussianBlurSettings, policy: &dyn HostPolicy) -> bool {
        enabled_material(settings, policy).is_some()
    }

    /// Final blurred output for `camera`
    pub fn output_slot(&self, camera: &Camera) -> String {
        self.outputs.slot_name(camera, 0)
    }

    /// Ping-pong buffer shared by every iteration of one camera
    pub fn temp_slot(&self, camera: &Camera) -> String {
        format!("{}_TMP_{}", OUTPUT_NAME, camera.unique_id())
    }

    /// Passes `render` would emit, in order. Empty without a material.
    pub fn plan(
        &self,
        camera: &Camera,
        settings: &GaussianBlurSettings,
        upstream: &dyn SlotSource,
    ) -> Vec<BlurPassDesc> {
        match settings.material() {
            Some(material) => self.sequence(camera, settings, material, upstream).collect(),
            None => Vec::new(),
        }
    }

    fn sequence(
        &self,
        camera: &Camera,
        settings: &GaussianBlurSettings,
        material: &Material,
        upstream: &dyn SlotSource,
    ) -> PassSequence {
        let remaining = match settings.mode() {
            BlurMode::AuxiliaryOnly => 1,
            BlurMode::Iterative => 2 * settings.iterations() as usize,
        };
        PassSequence {
            mode: settings.mode(),
            camera_id: camera.unique_id(),
            input_slot: material.input_slot().to_string(),
            source: upstream.slot_name(camera, settings.source_slot()),
            temp: self.temp_slot(camera),
            output: self.output_slot(camera),
            index: 0,
            remaining,
        }
    }

    /// Record the blur group for `camera`.
    ///
    /// Does nothing when disabled. Passes are submitted as they are built;
    /// builder faults abort the group and are returned unchanged.
    pub fn render(
        &mut self,
        camera: &Camera,
        settings: &GaussianBlurSettings,
        upstream: &dyn SlotSource,
        policy: &dyn HostPolicy,
        builder: &mut dyn PassBuilder,
    ) -> Result<()> {
        let Some(material) = enabled_material(settings, policy) else {
            log::trace!("Gaussian blur disabled for camera {}", camera.unique_id());
            return Ok(());
        };

        self.context.clear_black();

        let mut emitted = 0usize;
        for desc in self.sequence(camera, settings, material, upstream) {
            self.context.update_pass_viewport(camera, settings.shading_scale());
            self.context.submit(builder, material, &desc)?;
            emitted += 1;
        }

        log::debug!(
            "Gaussian blur: {} passes for camera {} ({:?}) -> {}",
            emitted,
            camera.unique_id(),
            settings.mode(),
            self.output_slot(camera)
        );
        Ok(())
    }
}

fn enabled_material<'s>(settings: &'s GaussianBlurSettings, policy: &dyn HostPolicy) -> Option<&'s Material> {
    if policy.post_process_suppressed() {
        return None;
    }
    settings.material()
}

/// Lazily built pass descriptors of one blur group
struct PassSequence {
    mode: BlurMode,
    camera_id: u32,
    input_slot: String,
    source: String,
    temp: String,
    output: String,
    index: usize,
    remaining: usize,
}

impl Iterator for PassSequence {
    type Item = BlurPassDesc;

    fn next(&mut self) -> Option<BlurPassDesc> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let index = self.index;
        self.index += 1;

        // even passes are horizontal; the first reads the source, later ones re-blur the output
        let (layout, input, output, subpass) = match self.mode {
            BlurMode::AuxiliaryOnly => (BLUR_Y, &self.source, &self.output, VERTICAL_SUBPASS),
            BlurMode::Iterative if index % 2 == 0 => {
                let input = if index == 0 { &self.source } else { &self.output };
                (BLUR_X, input, &self.temp, HORIZONTAL_SUBPASS)
            }
            BlurMode::Iterative => (BLUR_Y, &self.temp, &self.output, VERTICAL_SUBPASS),
        };

        Some(BlurPassDesc {
            layout,
            name: format!("{}{}", layout, self.camera_id),
            input: input.clone(),
            input_slot: self.input_slot.clone(),
            output: output.clone(),
            format: BLUR_FORMAT,
            subpass,
        })
    }
}

impl Default for GaussianBlurPass {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotSource for GaussianBlurPass {
    fn slot_name(&self, camera: &Camera, index: usize) -> String {
        self.outputs.slot_name(camera, index)
    }
}
