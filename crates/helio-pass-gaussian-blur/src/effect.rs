//! Effect assets and the material instances bound to them

use glam::Vec4;
use helio_frame_graph::ShadingProgram;
use std::collections::HashMap;
use std::sync::Arc;

/// Input slot sampled by the blur shader
pub const DEFAULT_INPUT_SLOT: &str = "outputResultMap";

/// Compiled shading effect
///
/// Opaque to the pass: only the subpass list and the sampled input slot are
/// visible. The kernel itself lives in the shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectAsset {
    name: String,
    passes: Vec<String>,
    input_slot: String,
}

impl EffectAsset {
    pub fn new(name: &str, passes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            passes: passes.iter().map(|p| p.to_string()).collect(),
            input_slot: DEFAULT_INPUT_SLOT.to_string(),
        }
    }

    /// Separable blur effect: subpass 0 blurs horizontally, subpass 1 vertically
    pub fn gaussian_blur() -> Arc<Self> {
        Arc::new(Self::new("gaussian-blur", &["blur-x", "blur-y"]))
    }

    pub fn with_input_slot(mut self, slot: &str) -> Self {
        self.input_slot = slot.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn passes(&self) -> &[String] {
        &self.passes
    }

    pub fn pass_count(&self) -> u32 {
        self.passes.len() as u32
    }

    pub fn input_slot(&self) -> &str {
        &self.input_slot
    }
}

/// Material instance bound to an [`EffectAsset`]
///
/// Every property write bumps [`revision`](Self::revision); the renderer
/// re-uploads the uniform block when it sees a new revision.
#[derive(Debug, Clone)]
pub struct Material {
    effect: Arc<EffectAsset>,
    properties: HashMap<String, Vec4>,
    revision: u64,
}

impl Material {
    pub fn new(effect: Arc<EffectAsset>) -> Self {
        Self {
            effect,
            properties: HashMap::new(),
            revision: 0,
        }
    }

    /// Rebind to `effect`, dropping every property set against the old one
    pub fn reset(&mut self, effect: Arc<EffectAsset>) {
        log::debug!("Material rebound to effect '{}'", effect.name());
        self.effect = effect;
        self.properties.clear();
        self.revision += 1;
    }

    pub fn effect(&self) -> &Arc<EffectAsset> {
        &self.effect
    }

    pub fn set_property(&mut self, name: &str, value: Vec4) {
        log::trace!("{}.{} = {:?}", self.effect.name(), name, value);
        self.properties.insert(name.to_string(), value);
        self.revision += 1;
    }

    pub fn property(&self, name: &str) -> Option<Vec4> {
        self.properties.get(name).copied()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl ShadingProgram for Material {
    fn program_name(&self) -> &str {
        self.effect.name()
    }

    fn pass_count(&self) -> u32 {
        self.effect.pass_count()
    }

    fn input_slot(&self) -> &str {
        self.effect.input_slot()
    }
}
