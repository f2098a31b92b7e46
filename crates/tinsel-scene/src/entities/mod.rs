//! Drawable animated entities.
//!
//! Every entity advances once per frame through [`Entity::update`] and paints
//! itself through [`Draw`]. [`Entity::draw`] brackets each paint in
//! `save`/`restore`, so no entity can leak transform or alpha into the next.

mod particle;
mod sprite;
mod star;

use glam::Vec2;
use rand::Rng;
use rand::rngs::StdRng;
use tinsel_core::ViewState;

use crate::assets::AssetStore;
use crate::canvas::Canvas;
use crate::projector::Projector;

pub use particle::{Particle, ParticleVariant};
pub use sprite::{Caption, Photo, Placement};
pub use star::Star;

/// Strength of the cursor parallax used by the drift scene.
pub const PARALLAX: f32 = 0.0025;

/// Visible area in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Everything a draw call may read.
pub struct DrawContext<'a> {
    pub view: &'a ViewState,
    pub projector: Projector,
    pub assets: &'a AssetStore,
}

/// Per-variant painting.
pub trait Draw {
    /// Paint into `canvas`. The caller has already saved the canvas state.
    fn draw(&self, canvas: &mut dyn Canvas, ctx: &DrawContext<'_>);
}

/// A single drawable animated object.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Particle(Particle),
    Photo(Photo),
    Caption(Caption),
    Star(Star),
}

impl Entity {
    /// Advance one frame.
    pub fn update(&mut self, viewport: Viewport, rng: &mut StdRng) {
        match self {
            Entity::Particle(p) => p.update(viewport, rng),
            Entity::Photo(p) => p.update(viewport, rng),
            Entity::Caption(c) => c.update(viewport, rng),
            Entity::Star(s) => s.update(),
        }
    }

    /// Paint the entity inside its own save/restore bracket.
    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &DrawContext<'_>) {
        canvas.save();
        match self {
            Entity::Particle(p) => p.draw(canvas, ctx),
            Entity::Photo(p) => p.draw(canvas, ctx),
            Entity::Caption(c) => c.draw(canvas, ctx),
            Entity::Star(s) => s.draw(canvas, ctx),
        }
        canvas.restore();
    }

    pub fn as_photo(&self) -> Option<&Photo> {
        match self {
            Entity::Photo(p) => Some(p),
            _ => None,
        }
    }
}

/// Uniform sample in `[min, max)`, or `min` when the range is empty.
pub(crate) fn random(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min { rng.gen_range(min..max) } else { min }
}

/// Where the drift scene draws a point of the given size, shifted away from
/// the cursor.
pub fn parallax(x: f32, y: f32, size: f32, view: &ViewState) -> Vec2 {
    let offset = Vec2::new(x - view.cursor_x, y - view.cursor_y) * PARALLAX;
    Vec2::new(x, y) + offset * size * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_parallax_at_cursor_is_identity() {
        let view = ViewState::centered(800.0, 600.0, Default::default());
        assert_eq!(parallax(400.0, 300.0, 12.0, &view), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_parallax_pushes_away_from_cursor() {
        let view = ViewState::centered(800.0, 600.0, Default::default());
        let at = parallax(500.0, 300.0, 10.0, &view);
        // (500 - 400) * 0.0025 * 10 * 10 = 25
        assert!((at.x - 525.0).abs() < 1e-3);
        assert_eq!(at.y, 300.0);
    }

    #[test]
    fn test_random_empty_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(random(&mut rng, 5.0, 0.0), 5.0);
        let v = random(&mut rng, 1.0, 3.0);
        assert!((1.0..3.0).contains(&v));
    }
}
