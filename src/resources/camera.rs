//! Shared 2D camera state.
//!
//! Updated by the camera system and read by the render boundary. The camera
//! position is the world point shown at the centre of the viewport.

use serde::{Deserialize, Serialize};

use crate::tuning;

/// Optional clamp per edge. `None` leaves that edge open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraBounds {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl CameraBounds {
    /// Bounds with all four edges set.
    pub fn rect(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            top: Some(top),
            bottom: Some(bottom),
        }
    }
}

/// Screen shake offset and remaining duration in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    pub x: f32,
    pub y: f32,
    pub duration: f32,
}

/// Camera position, zoom, follow target, bounds and shake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
    /// Last point the camera was asked to follow.
    pub target: Option<(f32, f32)>,
    pub bounds: Option<CameraBounds>,
    pub shake: ScreenShake,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            target: None,
            bounds: None,
            shake: ScreenShake::default(),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Set zoom, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(tuning::camera::MIN_ZOOM, tuning::camera::MAX_ZOOM);
    }

    pub fn set_bounds(&mut self, bounds: Option<CameraBounds>) {
        self.bounds = bounds;
    }

    /// Start a shake lasting `duration_ms`. The offset is produced by the
    /// camera system on its next tick.
    pub fn start_shake(&mut self, duration_ms: f32) {
        self.shake.duration = duration_ms;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.duration > 0.0
    }

    /// Clamp the position into the configured bounds, edge by edge.
    pub fn apply_bounds(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        if let Some(left) = bounds.left {
            self.x = self.x.max(left);
        }
        if let Some(right) = bounds.right {
            self.x = self.x.min(right);
        }
        if let Some(top) = bounds.top {
            self.y = self.y.max(top);
        }
        if let Some(bottom) = bounds.bottom {
            self.y = self.y.min(bottom);
        }
    }

    /// Convert a screen point to world coordinates for a viewport of the
    /// given size, accounting for position and zoom (shake excluded).
    pub fn screen_to_world(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport_w: f32,
        viewport_h: f32,
    ) -> (f32, f32) {
        (
            (screen_x - viewport_w / 2.0) / self.zoom + self.x,
            (screen_y - viewport_h / 2.0) / self.zoom + self.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_is_clamped() {
        let mut cam = CameraState::new();
        cam.set_zoom(10.0);
        assert_eq!(cam.zoom, 5.0);
        cam.set_zoom(0.0);
        assert_eq!(cam.zoom, 0.1);
        cam.set_zoom(2.0);
        assert_eq!(cam.zoom, 2.0);
    }

    #[test]
    fn test_apply_bounds_per_edge() {
        let mut cam = CameraState::new();
        cam.set_position(-500.0, 900.0);
        cam.set_bounds(Some(CameraBounds {
            left: Some(-100.0),
            bottom: Some(200.0),
            ..Default::default()
        }));
        cam.apply_bounds();
        assert_eq!(cam.x, -100.0);
        assert_eq!(cam.y, 200.0);

        cam.set_position(10_000.0, -10_000.0);
        cam.apply_bounds();
        assert_eq!(cam.x, 10_000.0);
        assert_eq!(cam.y, -10_000.0);
    }

    #[test]
    fn test_screen_to_world_centre_maps_to_camera() {
        let mut cam = CameraState::new();
        cam.set_position(40.0, -20.0);
        assert_eq!(cam.screen_to_world(400.0, 300.0, 800.0, 600.0), (40.0, -20.0));
        cam.set_zoom(2.0);
        assert_eq!(cam.screen_to_world(500.0, 300.0, 800.0, 600.0), (90.0, -20.0));
    }

    #[test]
    fn test_start_shake() {
        let mut cam = CameraState::new();
        assert!(!cam.is_shaking());
        cam.start_shake(300.0);
        assert!(cam.is_shaking());
        assert_eq!(cam.shake.duration, 300.0);
    }
}
