//! Twinkling background stars.

use glam::Vec2;
use rand::rngs::StdRng;

use super::{Draw, DrawContext, Viewport, random};
use crate::canvas::Canvas;
use crate::color::STAR_WHITE;
use crate::shapes::ellipse_points;

pub const MIN_OPACITY: f32 = 0.2;
pub const MAX_OPACITY: f32 = 1.0;

/// A fixed point of light whose opacity oscillates between two bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    /// Signed per-frame opacity change; flips at either bound.
    pub twinkle: f32,
}

impl Star {
    pub fn spawn(viewport: Viewport, rng: &mut StdRng) -> Self {
        Self {
            x: random(rng, 0.0, viewport.width),
            y: random(rng, 0.0, viewport.height),
            radius: random(rng, 0.3, 1.5),
            opacity: random(rng, MIN_OPACITY, 0.9),
            twinkle: random(rng, 0.005, 0.01),
        }
    }

    pub fn update(&mut self) {
        self.opacity = (self.opacity + self.twinkle).clamp(MIN_OPACITY, MAX_OPACITY);
        if self.opacity >= MAX_OPACITY || self.opacity <= MIN_OPACITY {
            self.twinkle = -self.twinkle;
        }
    }
}

impl Draw for Star {
    fn draw(&self, canvas: &mut dyn Canvas, _ctx: &DrawContext<'_>) {
        canvas.set_alpha(self.opacity);
        let disc = ellipse_points(Vec2::new(self.x, self.y), self.radius, self.radius, 0.0);
        canvas.fill_polygon(&disc, STAR_WHITE);
    }
}
