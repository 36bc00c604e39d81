//! Named output slots of render stages

use crate::camera::Camera;
use helio_frame_graph::PassRegistration;

/// A stage whose outputs later stages can look up by index
pub trait SlotSource {
    /// Per-camera resource name of output `index`
    fn slot_name(&self, camera: &Camera, index: usize) -> String;
}

/// Output naming for a registered stage: `{output}_{cameraId}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutputs {
    name: String,
    outputs: Vec<String>,
}

impl StageOutputs {
    pub fn new(name: &str, outputs: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            outputs: outputs.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn from_registration(registration: &PassRegistration) -> Self {
        Self {
            name: registration.name.clone(),
            outputs: registration.outputs.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output(&self, index: usize) -> Option<&str> {
        self.outputs.get(index).map(String::as_str)
    }
}

impl SlotSource for StageOutputs {
    fn slot_name(&self, camera: &Camera, index: usize) -> String {
        match self.output(index) {
            Some(output) => format!("{}_{}", output, camera.unique_id()),
            // undeclared slot: still unique per stage, index and camera
            None => format!("{}Slot{}_{}", self.name, index, camera.unique_id()),
        }
    }
}
