//! Perspective projection for the orbit scene.

use glam::Vec3;

/// Default distance from the eye to the projection plane.
pub const DEFAULT_CENTER_Z: f32 = 1000.0;

/// Screen position and scale of a projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Projection {
    /// A point is drawable when its scale is finite and positive; anything
    /// else sits at or behind the eye.
    pub fn is_visible(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite() && self.scale > 0.0
    }
}

/// Maps scene-space points to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub center_z: f32,
    pub width: f32,
    pub height: f32,
}

impl Projector {
    pub fn new(center_z: f32, width: f32, height: f32) -> Self {
        Self {
            center_z,
            width,
            height,
        }
    }

    /// Rotate `point` around X, then around Y, and apply perspective.
    ///
    /// The rotation order matters: swapping it changes the orientation under
    /// combined rotation.
    pub fn project(&self, point: Vec3, rotate_x: f32, rotate_y: f32, zoom: f32) -> Projection {
        let (sin_x, cos_x) = rotate_x.sin_cos();
        let y = point.y * cos_x - point.z * sin_x;
        let z = point.y * sin_x + point.z * cos_x;

        let (sin_y, cos_y) = rotate_y.sin_cos();
        let x = point.x * cos_y - z * sin_y;
        let z = point.x * sin_y + z * cos_y;

        let scale = self.center_z / (self.center_z + z) * zoom;
        Projection {
            x: self.width / 2.0 + x * scale,
            y: self.height / 2.0 + y * scale,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn projector() -> Projector {
        Projector::new(1000.0, 800.0, 600.0)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_no_rotation_is_plain_perspective() {
        let p = projector().project(Vec3::new(100.0, -50.0, 250.0), 0.0, 0.0, 1.0);
        let scale = 1000.0 / 1250.0;
        assert!(approx(p.scale, scale));
        assert!(approx(p.x, 400.0 + 100.0 * scale));
        assert!(approx(p.y, 300.0 - 50.0 * scale));
    }

    #[test]
    fn test_zoom_multiplies_scale() {
        let p = projector().project(Vec3::new(10.0, 0.0, 0.0), 0.0, 0.0, 2.0);
        assert!(approx(p.scale, 2.0));
        assert!(approx(p.x, 420.0));
    }

    #[test]
    fn test_origin_maps_to_center() {
        let p = projector().project(Vec3::ZERO, 0.7, -1.3, 1.0);
        assert!(approx(p.x, 400.0));
        assert!(approx(p.y, 300.0));
        assert!(approx(p.scale, 1.0));
    }

    #[test]
    fn test_rotation_x_applied_before_y() {
        // (0, 100, 0): a quarter turn around X moves it onto +z, then a
        // quarter turn around Y carries that onto -x.
        let p = projector().project(Vec3::new(0.0, 100.0, 0.0), FRAC_PI_2, FRAC_PI_2, 1.0);
        assert!(approx(p.scale, 1.0));
        assert!(approx(p.x, 400.0 - 100.0));
        assert!(approx(p.y, 300.0));

        // Y first, then X, would land on (400, 300) at scale 1000 / 1100.
        assert!(!approx(p.x, 400.0));
        assert!(!approx(p.scale, 1000.0 / 1100.0));
    }

    #[test]
    fn test_deterministic() {
        let point = Vec3::new(-321.0, 45.5, 600.0);
        let a = projector().project(point, 0.3, 0.9, 1.4);
        let b = projector().project(point, 0.3, 0.9, 1.4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_point_at_eye_is_not_visible() {
        let p = projector().project(Vec3::new(0.0, 0.0, -1000.0), 0.0, 0.0, 1.0);
        assert!(!p.is_visible());
        let behind = projector().project(Vec3::new(0.0, 0.0, -1500.0), 0.0, 0.0, 1.0);
        assert!(!behind.is_visible());
        let front = projector().project(Vec3::new(0.0, 0.0, 500.0), 0.0, 0.0, 1.0);
        assert!(front.is_visible());
    }
}
