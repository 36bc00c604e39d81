//! Camera identity for per-camera resource naming

use helio_frame_graph::{Rect, Viewport};
use std::collections::HashMap;

/// Host-side handle of a scene camera
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct CameraHandle(pub u64);

/// Camera as seen by post-process passes for one frame
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    handle: CameraHandle,
    unique_id: u32,
    /// Normalized viewport within the window
    rect: Rect,
    window_width: u32,
    window_height: u32,
}

impl Camera {
    pub fn handle(&self) -> CameraHandle {
        self.handle
    }

    /// Suffix appended to every per-camera pass and resource name
    pub fn unique_id(&self) -> u32 {
        self.unique_id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Pixel viewport at the given shading scale
    pub fn viewport(&self, shading_scale: f32) -> Viewport {
        Viewport::from_rect(self.rect, self.window_width, self.window_height, shading_scale)
    }
}

/// Assigns each camera handle a stable unique id.
///
/// Ids are never reused, so a camera created after another was dropped
/// cannot pick up its resource names.
#[derive(Debug, Default)]
pub struct CameraRegistry {
    ids: HashMap<CameraHandle, u32>,
    next_id: u32,
}

impl CameraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `handle` for this frame, assigning an id on first sight
    pub fn register(&mut self, handle: CameraHandle, rect: Rect, window_width: u32, window_height: u32) -> Camera {
        let next_id = &mut self.next_id;
        let unique_id = *self.ids.entry(handle).or_insert_with(|| {
            let id = *next_id;
            *next_id += 1;
            log::debug!("Camera {:?} assigned unique id {}", handle, id);
            id
        });

        Camera {
            handle,
            unique_id,
            rect,
            window_width,
            window_height,
        }
    }

    pub fn unique_id(&self, handle: CameraHandle) -> Option<u32> {
        self.ids.get(&handle).copied()
    }

    /// Drop a destroyed camera; its id stays retired
    pub fn forget(&mut self, handle: CameraHandle) -> Option<u32> {
        self.ids.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_per_handle() {
        let mut registry = CameraRegistry::new();
        let main = registry.register(CameraHandle(10), Rect::FULL, 800, 600);
        let again = registry.register(CameraHandle(10), Rect::FULL, 1024, 768);
        assert_eq!(main.unique_id(), again.unique_id());
        assert_eq!(again.window_size(), (1024, 768));
    }

    #[test]
    fn distinct_handles_get_distinct_ids() {
        let mut registry = CameraRegistry::new();
        let a = registry.register(CameraHandle(1), Rect::FULL, 800, 600);
        let b = registry.register(CameraHandle(2), Rect::FULL, 800, 600);
        assert_ne!(a.unique_id(), b.unique_id());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn forgotten_ids_are_not_reused() {
        let mut registry = CameraRegistry::new();
        let a = registry.register(CameraHandle(1), Rect::FULL, 800, 600);
        assert_eq!(registry.forget(CameraHandle(1)), Some(a.unique_id()));
        let b = registry.register(CameraHandle(2), Rect::FULL, 800, 600);
        assert_ne!(a.unique_id(), b.unique_id());
        assert!(registry.unique_id(CameraHandle(1)).is_none());
    }

    #[test]
    fn viewport_follows_rect() {
        let mut registry = CameraRegistry::new();
        let cam = registry.register(CameraHandle(1), Rect::new(0.0, 0.5, 1.0, 0.5), 800, 600);
        assert_eq!(cam.viewport(1.0), Viewport::with_offset(0, 300, 800, 300));
    }
}
