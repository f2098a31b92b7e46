//! Photo and caption sprites.

use glam::Vec3;
use rand::rngs::StdRng;
use tinsel_core::Rgb;

use super::{Draw, DrawContext, Viewport, parallax, random};
use crate::canvas::Canvas;
use crate::projector::Projection;

/// Vertical distance between caption lines, in scene pixels.
pub const LINE_HEIGHT: f32 = 28.0;

/// Edge length of an orbit photo.
pub const ORBIT_PHOTO_SIZE: f32 = 160.0;

/// Spatial sprites wrap once they fall this far below the viewport.
const FALL_MARGIN: f32 = 300.0;

/// Spatial sprites re-enter at least this far above the viewport.
const REENTRY_OFFSET: f32 = 200.0;

/// Half-width of the band spatial sprites are scattered across on x.
const SPREAD_X: f32 = 750.0;

/// Half-depth of the band spatial sprites are scattered across on z.
const SPREAD_Z: f32 = 800.0;

/// How a photo is positioned on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Screen-space photo shifted by cursor parallax and drawn at `depth` scale.
    Flat { depth: f32 },
    /// Scene-space photo mapped through the projector.
    Spatial,
}

/// A photo with a message revealed when it is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub position: Vec3,
    pub size: f32,
    pub speed: f32,
    /// Slot in the [`AssetStore`](crate::assets::AssetStore).
    pub asset: usize,
    pub message: String,
    pub placement: Placement,
}

impl Photo {
    /// A flat photo placed anywhere on screen, rising slowly.
    pub fn drift(asset: usize, message: String, viewport: Viewport, rng: &mut StdRng) -> Self {
        Self {
            position: Vec3::new(
                random(rng, 0.0, viewport.width),
                random(rng, 0.0, viewport.height),
                0.0,
            ),
            size: random(rng, 140.0, 180.0),
            speed: random(rng, 0.1, 0.15),
            asset,
            message,
            placement: Placement::Flat {
                depth: random(rng, 0.8, 1.2),
            },
        }
    }

    /// A spatial photo scattered through the volume above the viewport.
    pub fn orbit(asset: usize, message: String, viewport: Viewport, rng: &mut StdRng) -> Self {
        Self {
            position: scatter(viewport, rng),
            size: ORBIT_PHOTO_SIZE,
            speed: random(rng, 1.0, 2.0),
            asset,
            message,
            placement: Placement::Spatial,
        }
    }

    pub fn update(&mut self, viewport: Viewport, rng: &mut StdRng) {
        match self.placement {
            Placement::Flat { .. } => {
                self.position.y -= self.speed;
                if self.position.y < -self.size {
                    self.position.y = viewport.height + self.size;
                }
            }
            Placement::Spatial => fall(&mut self.position, self.speed, viewport, rng),
        }
    }

    /// Where the photo's centre is drawn and at what scale, or `None` when it
    /// is behind the eye.
    pub fn screen(&self, ctx: &DrawContext<'_>) -> Option<Projection> {
        match self.placement {
            Placement::Flat { depth } => {
                let at = parallax(self.position.x, self.position.y, self.size, ctx.view);
                Some(Projection {
                    x: at.x,
                    y: at.y,
                    scale: depth,
                })
            }
            Placement::Spatial => {
                let p = ctx.projector.project(
                    self.position,
                    ctx.view.rotate_x,
                    ctx.view.rotate_y,
                    ctx.view.zoom(),
                );
                p.is_visible().then_some(p)
            }
        }
    }

    /// Whether a click at `(x, y)` lands on the drawn photo.
    ///
    /// Photos that have not finished loading are not drawn and cannot be hit.
    pub fn hit(&self, x: f32, y: f32, ctx: &DrawContext<'_>) -> bool {
        if !ctx.assets.is_loaded(self.asset) {
            return false;
        }
        let Some(p) = self.screen(ctx) else {
            return false;
        };
        let (dx, dy) = (p.x - x, p.y - y);
        (dx * dx + dy * dy).sqrt() < self.size * p.scale / 2.0
    }
}

impl Draw for Photo {
    fn draw(&self, canvas: &mut dyn Canvas, ctx: &DrawContext<'_>) {
        let Some(bitmap) = ctx.assets.get(self.asset) else {
            return;
        };
        let Some(p) = self.screen(ctx) else {
            return;
        };
        let half = self.size / 2.0;
        canvas.translate(p.x, p.y);
        canvas.scale(p.scale, p.scale);
        canvas.draw_image(&bitmap, -half, -half, self.size, self.size);
    }
}

/// A few lines of coloured text falling through the volume.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub position: Vec3,
    pub speed: f32,
    pub text: String,
    pub color: Rgb,
}

impl Caption {
    pub fn spawn(text: String, color: Rgb, viewport: Viewport, rng: &mut StdRng) -> Self {
        Self {
            position: scatter(viewport, rng),
            speed: random(rng, 1.0, 2.0),
            text,
            color,
        }
    }

    pub fn update(&mut self, viewport: Viewport, rng: &mut StdRng) {
        fall(&mut self.position, self.speed, viewport, rng);
    }
}

impl Draw for Caption {
    fn draw(&self, canvas: &mut dyn Canvas, ctx: &DrawContext<'_>) {
        let p = ctx.projector.project(
            self.position,
            ctx.view.rotate_x,
            ctx.view.rotate_y,
            ctx.view.zoom(),
        );
        if !p.is_visible() {
            return;
        }
        canvas.translate(p.x, p.y);
        canvas.scale(p.scale, p.scale);
        for (i, line) in self.text.lines().enumerate() {
            canvas.fill_text(line, 0.0, i as f32 * LINE_HEIGHT, self.color);
        }
    }
}

/// Random start point for a spatial sprite.
fn scatter(viewport: Viewport, rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        random(rng, -SPREAD_X, SPREAD_X),
        -random(rng, 0.0, viewport.height),
        random(rng, -SPREAD_Z, SPREAD_Z),
    )
}

/// Move a spatial sprite down, wrapping it back above the viewport.
fn fall(position: &mut Vec3, speed: f32, viewport: Viewport, rng: &mut StdRng) {
    position.y += speed;
    if position.y > viewport.height + FALL_MARGIN {
        position.y = -random(rng, 0.0, viewport.height) - REENTRY_OFFSET;
    }
}
