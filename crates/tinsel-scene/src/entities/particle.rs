//! Rising decorative particles.

use std::f32::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;
use tinsel_core::Theme;

use super::{Draw, DrawContext, Viewport, parallax, random};
use crate::canvas::Canvas;
use crate::shapes::Shape;

/// Lowest opacity a particle fades to.
pub const MIN_OPACITY: f32 = 0.3;
pub const MAX_OPACITY: f32 = 1.0;

/// Particles are recycled once they rise above this line.
const TOP_EDGE: f32 = -20.0;

/// Angle added each frame.
const SPIN: f32 = 0.01;

/// Which of the theme's two shapes a particle shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleVariant {
    Primary,
    Secondary,
}

/// A small shape rising from the bottom edge, spinning and pulsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub angle: f32,
    pub opacity: f32,
    pub variant: ParticleVariant,
}

impl Particle {
    /// Create a particle just below the viewport with a random opacity.
    pub fn spawn(viewport: Viewport, rng: &mut StdRng) -> Self {
        let mut particle = Self {
            x: 0.0,
            y: 0.0,
            size: 0.0,
            speed: 0.0,
            angle: 0.0,
            opacity: random(rng, MIN_OPACITY, MAX_OPACITY),
            variant: ParticleVariant::Primary,
        };
        particle.reset(viewport, rng);
        particle
    }

    /// Re-randomize position, size, speed, angle and variant.
    fn reset(&mut self, viewport: Viewport, rng: &mut StdRng) {
        self.x = random(rng, 0.0, viewport.width);
        self.y = viewport.height + random(rng, 0.0, 100.0);
        self.size = random(rng, 4.0, 12.0);
        self.speed = random(rng, 1.0, 3.0);
        self.angle = random(rng, 0.0, TAU);
        self.variant = if rng.gen_bool(0.5) {
            ParticleVariant::Primary
        } else {
            ParticleVariant::Secondary
        };
    }

    pub fn update(&mut self, viewport: Viewport, rng: &mut StdRng) {
        self.y -= self.speed;
        self.angle += SPIN;
        if self.y < TOP_EDGE {
            self.reset(viewport, rng);
        }
        self.opacity = (self.angle * 5.0).sin().max(MIN_OPACITY).min(MAX_OPACITY);
    }

    /// Shape drawn for this particle under `theme`.
    pub fn shape(&self, theme: Theme) -> Shape {
        match (theme, self.variant) {
            (Theme::Dark, ParticleVariant::Primary) => Shape::Star,
            (Theme::Dark, ParticleVariant::Secondary) => Shape::Heart,
            (Theme::Light, ParticleVariant::Primary) => Shape::Sun,
            (Theme::Light, ParticleVariant::Secondary) => Shape::Flower,
        }
    }
}

impl Draw for Particle {
    fn draw(&self, canvas: &mut dyn Canvas, ctx: &DrawContext<'_>) {
        let at = parallax(self.x, self.y, self.size, ctx.view);
        canvas.set_alpha(self.opacity);
        canvas.translate(at.x, at.y);
        canvas.rotate(self.angle);
        self.shape(ctx.view.theme).paint(canvas, self.size);
    }
}
