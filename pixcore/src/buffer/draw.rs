//! Primitive rasterization
//!
//! Shapes are sampled at pixel centers (`x + 0.5`, `y + 0.5`) and clipped to
//! the buffer. Coordinates are floats so shapes can sit between pixels.

use glam::{DVec2, Vec2};

use super::PixelBuffer;
use crate::color::Color;
use crate::rect::Rect;

/// Signed edge function: positive on one side of `a -> b`, negative on the other.
///
/// Evaluated in f64 so products of any finite f32 coordinates stay finite.
#[inline]
fn edge(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Inclusive-exclusive pixel span covering `[min, max]`, clipped to `0..limit`
#[inline]
fn pixel_span(min: f32, max: f32, limit: u32) -> (i64, i64) {
    let lo = (min.floor() as i64).max(0);
    let hi = (max.ceil() as i64).min(limit as i64);
    (lo, hi)
}

impl PixelBuffer {
    /// Fill a triangle.
    ///
    /// A pixel is covered when its center lies on the inner side of all three
    /// edges (edges themselves count as inside). Both windings are accepted:
    /// the sign of the triangle's area selects which side is inner. Degenerate
    /// triangles draw nothing.
    pub fn fill_triangle(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, color: Color) {
        let (a, b, c) = (p1.as_dvec2(), p2.as_dvec2(), p3.as_dvec2());
        let area = edge(a, b, c);
        if area == 0.0 || !area.is_finite() {
            return;
        }
        let (min_x, max_x) = pixel_span(
            p1.x.min(p2.x).min(p3.x),
            p1.x.max(p2.x).max(p3.x),
            self.width,
        );
        let (min_y, max_y) = pixel_span(
            p1.y.min(p2.y).min(p3.y),
            p1.y.max(p2.y).max(p3.y),
            self.height,
        );

        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let w1 = edge(b, c, p);
                let w2 = edge(c, a, p);
                let w3 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w1 >= 0.0 && w2 >= 0.0 && w3 >= 0.0
                } else {
                    w1 <= 0.0 && w2 <= 0.0 && w3 <= 0.0
                };
                if inside {
                    self.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Draw a line as a `thickness`-wide quad made of two triangles.
    ///
    /// Zero-length lines draw nothing.
    pub fn draw_line(&mut self, start: Vec2, end: Vec2, color: Color, thickness: f32) {
        let dir = end - start;
        let length = dir.length();
        if length < 1e-4 || thickness.is_nan() || thickness <= 0.0 {
            return;
        }
        let normal = Vec2::new(-dir.y, dir.x) / length * (thickness * 0.5);
        let quad = [start + normal, end + normal, end - normal, start - normal];
        self.fill_triangle(quad[0], quad[1], quad[2], color);
        self.fill_triangle(quad[0], quad[2], quad[3], color);
    }

    /// Outline a triangle with lines of the given thickness
    pub fn draw_triangle(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, color: Color, thickness: f32) {
        self.draw_line(p1, p2, color, thickness);
        self.draw_line(p2, p3, color, thickness);
        self.draw_line(p3, p1, color, thickness);
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x_end = rect.right().min(self.width as u64) as u32;
        let y_end = rect.bottom().min(self.height as u64) as u32;
        if rect.x >= x_end || rect.y >= y_end {
            return;
        }
        let bpp = self.bytes_per_pixel();
        let mut encoded = [0u8; 4];
        self.format.encode(color, &mut encoded[..bpp]);
        for y in rect.y..y_end {
            let start = self.pixel_index(rect.x, y);
            let end = self.pixel_index(x_end - 1, y) + bpp;
            for px in self.data[start..end].chunks_exact_mut(bpp) {
                px.copy_from_slice(&encoded[..bpp]);
            }
        }
    }

    /// Outline a rectangle with a border `thickness` pixels wide, drawn inside
    /// the rectangle's bounds.
    pub fn draw_rect(&mut self, rect: Rect, color: Color, thickness: u32) {
        if thickness == 0 || rect.is_empty() {
            return;
        }
        if thickness.saturating_mul(2) >= rect.width || thickness.saturating_mul(2) >= rect.height
        {
            self.fill_rect(rect, color);
            return;
        }
        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        let (x, y, t) = (x as u64, y as u64, thickness as u64);
        let inner_height = height - 2 * thickness;
        self.fill_edge(x, y, width, thickness, color);
        self.fill_edge(x, y + height as u64 - t, width, thickness, color);
        self.fill_edge(x, y + t, thickness, inner_height, color);
        self.fill_edge(x + width as u64 - t, y + t, thickness, inner_height, color);
    }

    /// `fill_rect` for an origin that may lie past `u32::MAX` (and so off every buffer)
    fn fill_edge(&mut self, x: u64, y: u64, width: u32, height: u32, color: Color) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            self.fill_rect(Rect::new(x, y, width, height), color);
        }
    }

    /// Fill a disc: every pixel whose center is within `radius` of `center`
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        self.rasterize_ring(center, radius, color, |d2| d2 <= r2);
    }

    /// Stroke a circle with a ring `thickness` wide centered on `radius`
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, thickness: f32) {
        if radius.is_nan() || radius <= 0.0 || thickness.is_nan() || thickness <= 0.0 {
            return;
        }
        let half = thickness * 0.5;
        let inner = (radius - half).max(0.0);
        let outer = radius + half;
        let (inner2, outer2) = (inner * inner, outer * outer);
        self.rasterize_ring(center, outer, color, |d2| d2 >= inner2 && d2 <= outer2);
    }

    /// Visit pixels inside the bounding square of a circle and fill those
    /// whose squared center distance passes `covered`.
    fn rasterize_ring(
        &mut self,
        center: Vec2,
        extent: f32,
        color: Color,
        covered: impl Fn(f32) -> bool,
    ) {
        let (min_x, max_x) = pixel_span(center.x - extent, center.x + extent, self.width);
        let (min_y, max_y) = pixel_span(center.y - extent, center.y + extent, self.height);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if covered(p.distance_squared(center)) {
                    self.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}
