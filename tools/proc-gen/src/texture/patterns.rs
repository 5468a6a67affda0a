//! Basic texture patterns
//!
//! Deterministic generators for solid colors, gradients, checkerboards and
//! circles. All of them produce RGBA buffers.

use glam::Vec2;
use pixcore::{Color, PixelBuffer, PixelFormat};

/// Generate a solid color texture
pub fn solid(width: u32, height: u32, color: Color) -> PixelBuffer {
    PixelBuffer::filled(width, height, PixelFormat::Rgba, color)
}

/// Generate a linear gradient running along `angle` degrees
/// (0 = left to right, 90 = top to bottom).
///
/// The gradient is stretched so the first pixel along the direction gets
/// `start` and the last one gets `end` exactly.
pub fn linear_gradient(width: u32, height: u32, start: Color, end: Color, angle: f32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height, PixelFormat::Rgba);
    if buffer.is_empty() {
        return buffer;
    }
    let (sin, cos) = angle.to_radians().sin_cos();
    let dir = Vec2::new(cos, sin);

    // Project the corners to find the extent of the gradient axis
    let far = Vec2::new((width - 1) as f32, (height - 1) as f32);
    let corners = [Vec2::ZERO, Vec2::new(far.x, 0.0), Vec2::new(0.0, far.y), far];
    let min = corners.iter().map(|c| c.dot(dir)).fold(f32::INFINITY, f32::min);
    let max = corners.iter().map(|c| c.dot(dir)).fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    for y in 0..height {
        for x in 0..width {
            let t = if range > f32::EPSILON {
                (Vec2::new(x as f32, y as f32).dot(dir) - min) / range
            } else {
                0.0
            };
            buffer.set_pixel(x, y, start.lerp(end, t));
        }
    }
    buffer
}

/// Generate a checkerboard of `tile_size` square tiles, `color1` at the origin.
///
/// A tile size of 0 is treated as 1.
pub fn checkerboard(width: u32, height: u32, tile_size: u32, color1: Color, color2: Color) -> PixelBuffer {
    let tile_size = tile_size.max(1);
    let mut buffer = PixelBuffer::new(width, height, PixelFormat::Rgba);

    for y in 0..height {
        for x in 0..width {
            let even = ((x / tile_size) + (y / tile_size)) % 2 == 0;
            buffer.set_pixel(x, y, if even { color1 } else { color2 });
        }
    }
    buffer
}

/// Generate a `size` x `size` disc on a transparent background, with an
/// outline ring `thickness` pixels wide along its edge.
pub fn circle(size: u32, fill: Color, outline: Color, thickness: f32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(size, size, PixelFormat::Rgba);
    let radius = size as f32 / 2.0;
    let center = Vec2::splat(radius);

    buffer.fill_circle(center, radius, fill);
    if thickness > 0.0 {
        let thickness = thickness.min(radius);
        buffer.draw_circle(center, radius - thickness / 2.0, outline, thickness);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid() {
        let color = Color::rgba(100, 150, 200, 255);
        let tex = solid(16, 16, color);
        assert_eq!(tex.width(), 16);
        assert_eq!(tex.height(), 16);
        assert!(tex.as_colors().unwrap().iter().all(|&c| c == color));
    }

    #[test]
    fn test_checkerboard() {
        let tex = checkerboard(8, 8, 4, Color::BLACK, Color::WHITE);

        // 2x2 blocks of 4x4, black at the origin
        for y in 0..8 {
            for x in 0..8 {
                let expected = if (x < 4) == (y < 4) {
                    Color::BLACK
                } else {
                    Color::WHITE
                };
                assert_eq!(tex.get_pixel(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_checkerboard_zero_tile() {
        let tex = checkerboard(3, 1, 0, Color::RED, Color::BLUE);
        assert_eq!(tex.get_pixel(0, 0), Color::RED);
        assert_eq!(tex.get_pixel(1, 0), Color::BLUE);
        assert_eq!(tex.get_pixel(2, 0), Color::RED);
    }

    #[test]
    fn test_gradient_horizontal() {
        let left = Color::RED;
        let right = Color::rgba(0, 255, 0, 255);
        let tex = linear_gradient(8, 4, left, right, 0.0);

        assert_eq!(tex.get_pixel(0, 0), left);
        assert_eq!(tex.get_pixel(7, 3), right);
        let mid = tex.get_pixel(4, 2);
        assert!(mid.r > 0 && mid.r < 255);
        assert!(mid.g > 0 && mid.g < 255);
        // Constant down each column
        assert_eq!(tex.get_pixel(3, 0), tex.get_pixel(3, 3));
    }

    #[test]
    fn test_gradient_vertical() {
        let tex = linear_gradient(4, 8, Color::WHITE, Color::BLACK, 90.0);
        assert_eq!(tex.get_pixel(2, 0), Color::WHITE);
        assert_eq!(tex.get_pixel(2, 7), Color::BLACK);
        assert_eq!(tex.get_pixel(0, 5), tex.get_pixel(3, 5));
    }

    #[test]
    fn test_gradient_single_pixel() {
        let tex = linear_gradient(1, 1, Color::RED, Color::BLUE, 45.0);
        assert_eq!(tex.get_pixel(0, 0), Color::RED);
        assert!(linear_gradient(0, 5, Color::RED, Color::BLUE, 0.0).is_empty());
    }

    #[test]
    fn test_circle() {
        let tex = circle(16, Color::RED, Color::WHITE, 2.0);
        assert_eq!(tex.get_pixel(8, 8), Color::RED);
        assert_eq!(tex.get_pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(tex.get_pixel(15, 8), Color::WHITE);
        assert_eq!(tex.get_pixel(8, 0), Color::WHITE);
    }
}
