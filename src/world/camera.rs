// camera.rs - Visible extents at a given depth
//
// The page camera sits on +z looking down -z. A bowl at depth `z` lives on
// the plane `z = -depth`, so its distance from the camera is
// `camera.distance + depth`.

use serde::{Deserialize, Serialize};

/// Full visible width and height of a plane, in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Camera position on the z axis
    pub distance: f32,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { distance: 10.0, fov_deg: 20.0 }
    }
}

impl Camera {
    /// Extent of the plane `depth` units behind the origin
    #[inline]
    pub fn viewport_at(&self, depth: f32, aspect: f32) -> Extent {
        let d = self.distance + depth;
        let height = 2.0 * d * (self.fov_deg.to_radians() * 0.5).tan();
        Extent { width: height * aspect, height }
    }

    /// Far clipping plane for a scene `depth` units deep
    #[inline]
    pub fn far(&self, depth: f32) -> f32 {
        depth + 15.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_grows_linearly_with_depth() {
        let cam = Camera::default();
        let near = cam.viewport_at(0.0, 1.0);
        let far = cam.viewport_at(10.0, 1.0);
        assert!((far.height - 2.0 * near.height).abs() < 1e-4);
    }

    #[test]
    fn width_follows_aspect() {
        let cam = Camera::default();
        let e = cam.viewport_at(30.0, 16.0 / 9.0);
        assert!((e.width / e.height - 16.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn height_at_camera_distance() {
        let cam = Camera { distance: 10.0, fov_deg: 90.0 };
        let e = cam.viewport_at(0.0, 1.0);
        // tan(45°) = 1
        assert!((e.height - 20.0).abs() < 1e-4);
    }
}
