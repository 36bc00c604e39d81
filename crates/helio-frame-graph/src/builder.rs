//! Pass recording interface implemented by frame-graph backends

use crate::{Format, Result, Viewport};

/// Opaque black used when an effect wants a cleared destination
pub const CLEAR_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// What happens to an output target when a pass begins writing to it
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LoadOp {
    /// Clear to the given linear RGBA color
    Clear([f32; 4]),
    /// Keep existing contents
    Load,
}

/// Compiled shading program bound to a pass
///
/// Implemented by material types; the graph only needs enough to validate a
/// subpass invocation and to label it.
pub trait ShadingProgram {
    /// Name of the underlying effect
    fn program_name(&self) -> &str;

    /// Number of subpasses selectable by index
    fn pass_count(&self) -> u32;

    /// Name of the input slot the program samples from
    fn input_slot(&self) -> &str;
}

/// Imperative pass recording API
///
/// Calls for a single pass must arrive in order:
/// `set_viewport`, `begin_pass`, `set_input`*, `add_output`+, `blit`, `end_pass`.
/// Any call may fail with a frame-level fault; callers propagate it.
pub trait PassBuilder {
    /// Viewport used by the next pass
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Open a raster pass. `layout` names the pass kind, `name` its camera-scoped identity.
    fn begin_pass(&mut self, layout: &str, name: &str) -> Result<()>;

    /// Bind `resource` to the program input slot `slot`
    fn set_input(&mut self, resource: &str, slot: &str) -> Result<()>;

    /// Declare a color target written by the open pass
    fn add_output(&mut self, resource: &str, format: Format, load: LoadOp) -> Result<()>;

    /// Draw a full-screen triangle with subpass `subpass` of `program`
    fn blit(&mut self, program: &dyn ShadingProgram, subpass: u32) -> Result<()>;

    /// Close the open pass
    fn end_pass(&mut self) -> Result<()>;
}
