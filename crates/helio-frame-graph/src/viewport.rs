/// Normalized camera viewport rectangle, each component in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const FULL: Rect = Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Pixel-space viewport set on the pipeline before a pass is recorded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    pub fn with_offset(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Resolve a normalized rect against a window size scaled by `shading_scale`.
    ///
    /// Extents are floored so a scaled target never exceeds the window.
    pub fn from_rect(rect: Rect, window_width: u32, window_height: u32, shading_scale: f32) -> Self {
        let w = window_width as f32 * shading_scale;
        let h = window_height as f32 * shading_scale;
        Self::with_offset(
            (rect.x * w).floor() as u32,
            (rect.y * h).floor() as u32,
            (rect.width * w).floor() as u32,
            (rect.height * h).floor() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rect_covers_window() {
        let vp = Viewport::from_rect(Rect::FULL, 1920, 1080, 1.0);
        assert_eq!(vp, Viewport::new(1920, 1080));
    }

    #[test]
    fn split_screen_right_half_at_half_scale() {
        let vp = Viewport::from_rect(Rect::new(0.5, 0.0, 0.5, 1.0), 1280, 720, 0.5);
        assert_eq!((vp.x, vp.y, vp.width, vp.height), (320, 0, 320, 360));
    }
}
