//! Vector shapes drawn by particles.
//!
//! All shapes are built around the local origin so the caller can translate
//! and rotate the canvas first.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::canvas::Canvas;
use crate::color::{GOLD, ORANGE, PETAL, RED, SADDLE_BROWN};

/// Segments used to flatten a full circle or ellipse.
const ROUND_SEGMENTS: usize = 24;

/// Segments used to flatten one cubic bézier.
const CURVE_SEGMENTS: usize = 16;

const FLOWER_PETALS: usize = 12;

/// Particle decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Star,
    Heart,
    Sun,
    Flower,
}

impl Shape {
    /// Paint the shape with radius `r` at the canvas origin.
    pub fn paint(self, canvas: &mut dyn Canvas, r: f32) {
        match self {
            Shape::Star => canvas.fill_polygon(&star_points(r), GOLD),
            Shape::Heart => canvas.fill_polygon(&heart_points(r), RED),
            Shape::Sun => canvas.fill_polygon(&ellipse_points(Vec2::ZERO, r, r, 0.0), ORANGE),
            Shape::Flower => {
                let petal_length = r * 1.2;
                let petal_width = r * 0.4;
                for i in 0..FLOWER_PETALS {
                    let angle = TAU / FLOWER_PETALS as f32 * i as f32;
                    let center = Vec2::new(angle.cos(), angle.sin()) * r;
                    let petal = ellipse_points(center, petal_width, petal_length, angle);
                    canvas.fill_polygon(&petal, PETAL);
                }
                let core = ellipse_points(Vec2::ZERO, r * 0.6, r * 0.6, 0.0);
                canvas.fill_polygon(&core, SADDLE_BROWN);
            }
        }
    }
}

/// Five-pointed star: outer points at radius `r`, inner points at `r / 2`.
pub fn star_points(r: f32) -> Vec<Vec2> {
    let point = |deg: f32, radius: f32| {
        let rad = deg.to_radians();
        Vec2::new(rad.cos() * radius, -rad.sin() * radius)
    };
    (0..5)
        .flat_map(|i| {
            let step = i as f32 * 72.0;
            [point(18.0 + step, r), point(54.0 + step, r / 2.0)]
        })
        .collect()
}

/// Heart outline made of two cubic béziers meeting at the origin and at
/// `(0, 1.5r)`.
pub fn heart_points(r: f32) -> Vec<Vec2> {
    let top = Vec2::ZERO;
    let tip = Vec2::new(0.0, r * 1.5);
    let mut points = cubic(top, Vec2::new(r, -r), Vec2::new(r * 1.5, r), tip);
    let mut back = cubic(tip, Vec2::new(-r * 1.5, r), Vec2::new(-r, -r), top);
    // Both halves share their end points.
    back.remove(0);
    back.pop();
    points.append(&mut back);
    points
}

/// Ellipse with radii `rx`, `ry`, rotated by `rotation` around `center`.
pub fn ellipse_points(center: Vec2, rx: f32, ry: f32, rotation: f32) -> Vec<Vec2> {
    let turn = Vec2::from_angle(rotation);
    (0..ROUND_SEGMENTS)
        .map(|i| {
            let t = TAU * i as f32 / ROUND_SEGMENTS as f32;
            center + turn.rotate(Vec2::new(rx * t.cos(), ry * t.sin()))
        })
        .collect()
}

/// Flatten a cubic bézier into `CURVE_SEGMENTS + 1` points, both ends included.
fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Vec<Vec2> {
    (0..=CURVE_SEGMENTS)
        .map(|i| {
            let t = i as f32 / CURVE_SEGMENTS as f32;
            let u = 1.0 - t;
            p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
        })
        .collect()
}
