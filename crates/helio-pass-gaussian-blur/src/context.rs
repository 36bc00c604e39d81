//! Per-pass recording state shared by every pass of a blur group

use crate::camera::Camera;
use crate::effect::Material;
use crate::pass::BlurPassDesc;
use helio_frame_graph::{LoadOp, PassBuilder, Result, Viewport, CLEAR_BLACK};

/// Viewport and load behaviour applied to the next submitted pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassContext {
    viewport: Viewport,
    load: LoadOp,
}

impl PassContext {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(1, 1),
            load: LoadOp::Load,
        }
    }

    /// Outputs start from opaque black instead of stale contents
    pub fn clear_black(&mut self) -> &mut Self {
        self.load = LoadOp::Clear(CLEAR_BLACK);
        self
    }

    /// Recompute the pixel viewport from the camera
    pub fn update_pass_viewport(&mut self, camera: &Camera, shading_scale: f32) -> &mut Self {
        self.viewport = camera.viewport(shading_scale);
        self
    }

    /// Record one pass and close it before returning
    pub fn submit(&self, builder: &mut dyn PassBuilder, material: &Material, desc: &BlurPassDesc) -> Result<()> {
        builder.set_viewport(self.viewport)?;
        builder.begin_pass(desc.layout, &desc.name)?;
        builder.set_input(&desc.input, &desc.input_slot)?;
        builder.add_output(&desc.output, desc.format, self.load)?;
        builder.blit(material, desc.subpass)?;
        builder.end_pass()
    }
}

impl Default for PassContext {
    fn default() -> Self {
        Self::new()
    }
}
