//! Drawing surface abstraction.
//!
//! Entities paint through [`Canvas`], which mirrors an immediate-mode 2D
//! context: a transform and alpha that can be saved and restored, plus a
//! handful of fill operations. Coordinates passed to the fill operations are
//! local to the current transform.

use glam::{Affine2, Vec2};
use tinsel_core::Rgb;

use crate::assets::Bitmap;

/// Immediate-mode drawing surface.
pub trait Canvas {
    /// Push the current transform and alpha.
    fn save(&mut self);
    /// Pop the transform and alpha pushed by the matching [`Canvas::save`].
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    /// Set the opacity applied to subsequent fills (0.0-1.0).
    fn set_alpha(&mut self, alpha: f32);
    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb);
    /// Draw a bitmap stretched over the rectangle at `(x, y)`.
    fn draw_image(&mut self, bitmap: &Bitmap, x: f32, y: f32, width: f32, height: f32);
    /// Draw one line of text horizontally centred on `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb);
}

/// Transform and alpha in effect for a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub transform: Affine2,
    pub alpha: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            alpha: 1.0,
        }
    }
}

/// Save/restore stack shared by canvas implementations.
///
/// An unmatched `restore` leaves the state untouched.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> DrawState {
        self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.current.transform = self.current.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    pub fn rotate(&mut self, angle: f32) {
        self.current.transform = self.current.transform * Affine2::from_angle(angle);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current.transform = self.current.transform * Affine2::from_scale(Vec2::new(sx, sy));
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.current.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Map a local point to surface coordinates.
    pub fn to_surface(&self, point: Vec2) -> Vec2 {
        self.current.transform.transform_point2(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl StateStack {
        fn depth(&self) -> usize {
            self.saved.len()
        }
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_translate_then_scale() {
        let mut stack = StateStack::default();
        stack.translate(100.0, 50.0);
        stack.scale(2.0, 2.0);
        assert!(approx(stack.to_surface(Vec2::new(10.0, 5.0)), Vec2::new(120.0, 60.0)));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut stack = StateStack::default();
        stack.rotate(std::f32::consts::FRAC_PI_2);
        assert!(approx(stack.to_surface(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_restore_undoes_transform_and_alpha() {
        let mut stack = StateStack::default();
        stack.save();
        stack.translate(5.0, 5.0);
        stack.set_alpha(0.4);
        assert_eq!(stack.depth(), 1);
        stack.restore();
        assert_eq!(stack.current(), DrawState::default());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_unmatched_restore_is_ignored() {
        let mut stack = StateStack::default();
        stack.translate(3.0, 0.0);
        stack.restore();
        assert!(approx(stack.to_surface(Vec2::ZERO), Vec2::new(3.0, 0.0)));
    }

    #[test]
    fn test_alpha_clamped() {
        let mut stack = StateStack::default();
        stack.set_alpha(1.7);
        assert_eq!(stack.current().alpha, 1.0);
        stack.set_alpha(-0.2);
        assert_eq!(stack.current().alpha, 0.0);
    }
}
