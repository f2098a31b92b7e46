//! Half-block cell rasterizer.
//!
//! [`CellCanvas`] implements [`Canvas`] over a terminal-sized grid. Each cell
//! holds two square-ish pixels stacked vertically, painted with an upper half
//! block (foreground = top pixel, background = bottom pixel). Text lives in a
//! separate glyph layer, one character per cell, and is erased by any later
//! fill that touches the cell.

use std::ops::RangeInclusive;

use glam::Vec2;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use tinsel_core::Rgb;

use crate::assets::Bitmap;
use crate::canvas::{Canvas, StateStack};
use crate::chars::UPPER_HALF;
use crate::color::to_color;

/// Terminal-grid implementation of [`Canvas`].
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: usize,
    rows: usize,
    /// Scene pixels per pixel column.
    pixel_width: f32,
    /// Scene pixels per pixel row (half a cell).
    pixel_height: f32,
    pixels: Vec<Rgb>,
    glyphs: Vec<Option<(char, Rgb)>>,
    state: StateStack,
}

impl CellCanvas {
    /// Create a canvas of `cols` x `rows` cells cleared to `background`.
    ///
    /// `cell_width` and `cell_height` give the size of one cell in scene pixels.
    pub fn new(cols: u16, rows: u16, cell_width: f32, cell_height: f32, background: Rgb) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        Self {
            cols,
            rows,
            pixel_width: cell_width,
            pixel_height: cell_height / 2.0,
            pixels: vec![background; cols * rows * 2],
            glyphs: vec![None; cols * rows],
            state: StateStack::default(),
        }
    }

    /// Colour of the pixel at column `x`, pixel row `y` (two rows per cell).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.cols && y < self.rows * 2).then(|| self.pixels[y * self.cols + x])
    }

    /// Glyph written into cell (`col`, `row`), if any.
    pub fn glyph(&self, col: usize, row: usize) -> Option<(char, Rgb)> {
        if col < self.cols && row < self.rows {
            self.glyphs[row * self.cols + col]
        } else {
            None
        }
    }

    /// Convert the grid into styled lines, one per cell row.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span> = (0..self.cols)
                    .map(|col| {
                        let top = self.pixels[(row * 2) * self.cols + col];
                        let bottom = self.pixels[(row * 2 + 1) * self.cols + col];
                        match self.glyphs[row * self.cols + col] {
                            Some((ch, fg)) => Span::styled(
                                ch.to_string(),
                                Style::new().fg(to_color(fg)).bg(to_color(top.over(bottom, 0.5))),
                            ),
                            None if top == bottom => {
                                Span::styled(" ", Style::new().bg(to_color(top)))
                            }
                            None => Span::styled(
                                UPPER_HALF.to_string(),
                                Style::new().fg(to_color(top)).bg(to_color(bottom)),
                            ),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn pixel_center(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.pixel_width,
            (y as f32 + 0.5) * self.pixel_height,
        )
    }

    /// Pixel containing a scene point.
    fn pixel_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let x = (point.x / self.pixel_width) as usize;
        let y = (point.y / self.pixel_height) as usize;
        (x < self.cols && y < self.rows * 2).then_some((x, y))
    }

    /// Pixels whose centres fall inside the box spanned by `min` and `max`.
    fn pixels_within(
        &self,
        min: Vec2,
        max: Vec2,
    ) -> Option<(RangeInclusive<usize>, RangeInclusive<usize>)> {
        if !min.is_finite() || !max.is_finite() || self.cols == 0 || self.rows == 0 {
            return None;
        }
        let span = |lo: f32, hi: f32, size: f32, count: usize| {
            let start = (lo / size - 0.5).ceil().max(0.0);
            let end = (hi / size - 0.5).floor().min(count as f32 - 1.0);
            (start <= end).then(|| start as usize..=end as usize)
        };
        Some((
            span(min.x, max.x, self.pixel_width, self.cols)?,
            span(min.y, max.y, self.pixel_height, self.rows * 2)?,
        ))
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgb, alpha: f32) {
        let index = y * self.cols + x;
        self.pixels[index] = color.over(self.pixels[index], alpha);
        self.glyphs[(y / 2) * self.cols + x] = None;
    }
}

impl Canvas for CellCanvas {
    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.translate(x, y);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.rotate(angle);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale(sx, sy);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.set_alpha(alpha);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb) {
        let alpha = self.state.current().alpha;
        if points.len() < 3 || alpha <= 0.0 {
            return;
        }
        let surface: Vec<Vec2> = points.iter().map(|&p| self.state.to_surface(p)).collect();
        let (min, max) = bounds(&surface);

        let mut painted = false;
        if let Some((xs, ys)) = self.pixels_within(min, max) {
            for y in ys {
                for x in xs.clone() {
                    if polygon_contains(&surface, self.pixel_center(x, y)) {
                        self.blend(x, y, color, alpha);
                        painted = true;
                    }
                }
            }
        }

        // Shapes smaller than a pixel still light the pixel they sit in.
        if !painted {
            let centroid = surface.iter().copied().sum::<Vec2>() / surface.len() as f32;
            if let Some((x, y)) = self.pixel_at(centroid) {
                self.blend(x, y, color, alpha);
            }
        }
    }

    fn draw_image(&mut self, bitmap: &Bitmap, x: f32, y: f32, width: f32, height: f32) {
        let state = self.state.current();
        if width <= 0.0 || height <= 0.0 || state.alpha <= 0.0 {
            return;
        }
        if state.transform.matrix2.determinant().abs() < f32::EPSILON {
            return;
        }
        let inverse = state.transform.inverse();
        let corners = [
            Vec2::new(x, y),
            Vec2::new(x + width, y),
            Vec2::new(x, y + height),
            Vec2::new(x + width, y + height),
        ]
        .map(|p| self.state.to_surface(p));
        let (min, max) = bounds(&corners);

        let Some((xs, ys)) = self.pixels_within(min, max) else {
            return;
        };
        for py in ys {
            for px in xs.clone() {
                let local = inverse.transform_point2(self.pixel_center(px, py));
                let u = (local.x - x) / width;
                let v = (local.y - y) / height;
                if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
                    self.blend(px, py, bitmap.sample(u, v), state.alpha);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        let alpha = self.state.current().alpha;
        let anchor = self.state.to_surface(Vec2::new(x, y));
        if alpha <= 0.0 || !anchor.is_finite() || anchor.y < 0.0 {
            return;
        }
        let row = (anchor.y / (self.pixel_height * 2.0)) as usize;
        if row >= self.rows {
            return;
        }

        let len = text.chars().count() as f32;
        let start = (anchor.x / self.pixel_width - len / 2.0).round() as i64;
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if ch.is_whitespace() || col < 0 || col as usize >= self.cols {
                continue;
            }
            let col = col as usize;
            let top = self.pixels[(row * 2) * self.cols + col];
            let bottom = self.pixels[(row * 2 + 1) * self.cols + col];
            let fg = color.over(top.over(bottom, 0.5), alpha);
            self.glyphs[row * self.cols + col] = Some((ch, fg));
        }
    }
}

fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
    points.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), &p| (min.min(p), max.max(p)),
    )
}

/// Even-odd point-in-polygon test.
fn polygon_contains(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = Rgb(0, 0, 0);
    const RED: Rgb = Rgb(255, 0, 0);

    /// 10x5 cells of 8x16 scene pixels, i.e. 10x10 raster pixels of 8x8.
    fn canvas() -> CellCanvas {
        CellCanvas::new(10, 5, 8.0, 16.0, BG)
    }

    fn square(x: f32, y: f32, side: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(x, y),
            Vec2::new(x + side, y),
            Vec2::new(x + side, y + side),
            Vec2::new(x, y + side),
        ]
    }

    #[test]
    fn test_fill_square_covers_expected_pixels() {
        let mut c = canvas();
        c.fill_polygon(&square(0.0, 0.0, 16.0), RED);
        assert_eq!(c.pixel(0, 0), Some(RED));
        assert_eq!(c.pixel(1, 1), Some(RED));
        assert_eq!(c.pixel(2, 0), Some(BG));
        assert_eq!(c.pixel(0, 2), Some(BG));
    }

    #[test]
    fn test_fill_respects_translate() {
        let mut c = canvas();
        c.translate(44.0, 44.0);
        c.fill_polygon(&square(-4.0, -4.0, 8.0), RED);
        assert_eq!(c.pixel(5, 5), Some(RED));
        assert_eq!(c.pixel(4, 4), Some(BG));
    }

    #[test]
    fn test_alpha_blends_over_background() {
        let mut c = canvas();
        c.set_alpha(0.5);
        c.fill_polygon(&square(0.0, 0.0, 8.0), Rgb(200, 100, 0));
        assert_eq!(c.pixel(0, 0), Some(Rgb(100, 50, 0)));
    }

    #[test]
    fn test_tiny_shape_lights_its_pixel() {
        let mut c = canvas();
        c.translate(18.0, 18.0);
        c.fill_polygon(&square(-0.5, -0.5, 1.0), RED);
        assert_eq!(c.pixel(2, 2), Some(RED));
    }

    #[test]
    fn test_offscreen_fill_is_ignored() {
        let mut c = canvas();
        c.fill_polygon(&square(-500.0, -500.0, 10.0), RED);
        c.fill_polygon(&square(f32::NAN, 0.0, 10.0), RED);
        assert!((0..10).all(|x| (0..10).all(|y| c.pixel(x, y) == Some(BG))));
    }

    #[test]
    fn test_draw_image_scaled() {
        let mut c = canvas();
        let bitmap = Bitmap::new(2, 1, vec![RED, Rgb(0, 0, 255)]).unwrap();
        c.translate(16.0, 16.0);
        c.scale(2.0, 2.0);
        c.draw_image(&bitmap, -8.0, -8.0, 16.0, 16.0);
        // Covers scene pixels 0..32 in both axes.
        assert_eq!(c.pixel(0, 0), Some(RED));
        assert_eq!(c.pixel(3, 3), Some(Rgb(0, 0, 255)));
        assert_eq!(c.pixel(4, 0), Some(BG));
    }

    #[test]
    fn test_draw_image_degenerate_scale_is_skipped() {
        let mut c = canvas();
        c.scale(0.0, 0.0);
        c.draw_image(&Bitmap::solid(1, 1, RED).unwrap(), 0.0, 0.0, 8.0, 8.0);
        assert_eq!(c.pixel(0, 0), Some(BG));
    }

    #[test]
    fn test_fill_text_centered() {
        let mut c = canvas();
        c.translate(40.0, 24.0);
        c.fill_text("abcd", 0.0, 0.0, RED);
        assert_eq!(c.glyph(3, 1), Some(('a', RED)));
        assert_eq!(c.glyph(6, 1).map(|g| g.0), Some('d'));
        assert_eq!(c.glyph(2, 1), None);
    }

    #[test]
    fn test_later_fill_erases_glyph() {
        let mut c = canvas();
        c.fill_text("x", 4.0, 4.0, RED);
        assert!(c.glyph(0, 0).is_some());
        c.fill_polygon(&square(0.0, 0.0, 8.0), RED);
        assert!(c.glyph(0, 0).is_none());
    }

    #[test]
    fn test_to_lines_shape() {
        let mut c = canvas();
        c.fill_polygon(&square(0.0, 0.0, 8.0), RED);
        let lines = c.to_lines();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.spans.len() == 10));
        assert_eq!(lines[0].spans[0].content, UPPER_HALF.to_string());
        assert_eq!(lines[0].spans[1].content, " ");
    }

    #[test]
    fn test_polygon_contains() {
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        assert!(polygon_contains(&tri, Vec2::new(2.0, 2.0)));
        assert!(!polygon_contains(&tri, Vec2::new(8.0, 8.0)));
    }
}
