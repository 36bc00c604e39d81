//! Gaussian blur configuration
//!
//! Setters are write-through: changing the radius or the effect pushes the
//! parameter vector into the bound material before returning.

use crate::effect::{EffectAsset, Material};
use glam::Vec4;
use helio_frame_graph::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Material property receiving the blur parameter vector
pub const BLUR_PARAMS: &str = "blurParams";

/// Upper bound on blur sweeps per camera
pub const MAX_ITERATIONS: u32 = 64;

/// Uniform layout of `blurParams` – must match the WGSL struct (16 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlurParams {
    pub radius: f32,
    pub reserved: [f32; 3],
}

impl BlurParams {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<Vec4> for BlurParams {
    fn from(v: Vec4) -> Self {
        Self {
            radius: v.x,
            reserved: [v.y, v.z, v.w],
        }
    }
}

impl From<BlurParams> for Vec4 {
    fn from(p: BlurParams) -> Self {
        Vec4::new(p.radius, p.reserved[0], p.reserved[1], p.reserved[2])
    }
}

/// Which pass sequence a render call emits
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    /// `iterations` horizontal+vertical sweeps through a ping-pong buffer
    #[default]
    Iterative,
    /// One vertical pass straight from the upstream auxiliary buffer
    AuxiliaryOnly,
}

/// Serializable blur configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    pub iterations: u32,
    pub radius: f32,
    pub mode: BlurMode,
    /// Upstream slot consumed by the first pass
    pub source_slot: usize,
    pub shading_scale: f32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            iterations: 3,
            radius: 1.0,
            mode: BlurMode::Iterative,
            source_slot: 1,
            shading_scale: 1.0,
        }
    }
}

impl BlurConfig {
    pub fn validate(&self) -> Result<()> {
        if self.iterations > MAX_ITERATIONS {
            return Err(Error::Config(format!(
                "iterations must be at most {}, got {}",
                MAX_ITERATIONS, self.iterations
            )));
        }
        if !self.radius.is_finite() {
            return Err(Error::Config(format!("radius must be finite, got {}", self.radius)));
        }
        if !(self.shading_scale.is_finite() && self.shading_scale > 0.0) {
            return Err(Error::Config(format!(
                "shading_scale must be positive, got {}",
                self.shading_scale
            )));
        }
        Ok(())
    }
}

/// Gaussian blur settings
///
/// Owns the material: it exists exactly while an effect is set.
#[derive(Debug, Clone)]
pub struct GaussianBlurSettings {
    iterations: u32,
    params: Vec4,
    mode: BlurMode,
    source_slot: usize,
    shading_scale: f32,
    effect: Option<Arc<EffectAsset>>,
    material: Option<Material>,
}

impl GaussianBlurSettings {
    pub fn new() -> Self {
        Self::from_valid_config(&BlurConfig::default())
    }

    /// Build settings from a config, binding `effect` if given
    pub fn from_config(config: &BlurConfig, effect: Option<Arc<EffectAsset>>) -> Result<Self> {
        config.validate()?;
        let mut settings = Self::from_valid_config(config);
        settings.set_effect(effect);
        Ok(settings)
    }

    fn from_valid_config(config: &BlurConfig) -> Self {
        Self {
            iterations: config.iterations,
            params: Vec4::new(config.radius, 0.0, 0.0, 0.0),
            mode: config.mode,
            source_slot: config.source_slot,
            shading_scale: config.shading_scale,
            effect: None,
            material: None,
        }
    }

    pub fn with_effect(mut self, effect: Arc<EffectAsset>) -> Self {
        self.set_effect(Some(effect));
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.set_iterations(iterations);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.set_radius(radius);
        self
    }

    pub fn with_mode(mut self, mode: BlurMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set or clear the shading effect.
    ///
    /// `Some` creates the material on first use, rebinds it and pushes the
    /// current parameters. `None` releases the material.
    pub fn set_effect(&mut self, effect: Option<Arc<EffectAsset>>) {
        match &effect {
            None => {
                if self.material.take().is_some() {
                    log::debug!("Gaussian blur material released");
                }
            }
            Some(asset) => {
                match &mut self.material {
                    Some(material) => material.reset(asset.clone()),
                    None => self.material = Some(Material::new(asset.clone())),
                }
            }
        }
        self.effect = effect;
        self.update_material();
    }

    pub fn effect(&self) -> Option<&Arc<EffectAsset>> {
        self.effect.as_ref()
    }

    /// Bound material, `None` while the blur is disabled
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.params.x = radius;
        self.update_material();
    }

    pub fn radius(&self) -> f32 {
        self.params.x
    }

    /// `{radius, 0, 0, 0}`; the remaining components are reserved
    pub fn blur_params(&self) -> Vec4 {
        self.params
    }

    pub fn uniform(&self) -> BlurParams {
        self.params.into()
    }

    /// Clamped to [`MAX_ITERATIONS`]
    pub fn set_iterations(&mut self, iterations: u32) {
        if iterations > MAX_ITERATIONS {
            log::warn!("Clamping blur iterations {} to {}", iterations, MAX_ITERATIONS);
        }
        self.iterations = iterations.min(MAX_ITERATIONS);
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn set_mode(&mut self, mode: BlurMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> BlurMode {
        self.mode
    }

    pub fn set_source_slot(&mut self, slot: usize) {
        self.source_slot = slot;
    }

    pub fn source_slot(&self) -> usize {
        self.source_slot
    }

    /// Ignored unless positive and finite
    pub fn set_shading_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.shading_scale = scale;
        } else {
            log::warn!("Ignoring invalid blur shading scale {}", scale);
        }
    }

    pub fn shading_scale(&self) -> f32 {
        self.shading_scale
    }

    /// Snapshot of the current values as a config
    pub fn config(&self) -> BlurConfig {
        BlurConfig {
            iterations: self.iterations,
            radius: self.radius(),
            mode: self.mode,
            source_slot: self.source_slot,
            shading_scale: self.shading_scale,
        }
    }

    fn update_material(&mut self) {
        if let Some(material) = &mut self.material {
            material.set_property(BLUR_PARAMS, self.params);
        }
    }
}

impl Default for GaussianBlurSettings {
    fn default() -> Self {
        Self::new()
    }
}
