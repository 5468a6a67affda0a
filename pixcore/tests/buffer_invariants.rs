//! Integration tests for PixelBuffer invariants
//!
//! Runs every public operation over every format and checks that the byte
//! length always matches the dimensions, plus the fixed points the filters and
//! transforms promise.

use glam::{IVec2, Vec2};
use pixcore::{Color, PixelBuffer, PixelFormat, Rect};

const FORMATS: [PixelFormat; 5] = [
    PixelFormat::Rgb,
    PixelFormat::Rgba,
    PixelFormat::Bgr,
    PixelFormat::Bgra,
    PixelFormat::Grayscale,
];

fn assert_len(buf: &PixelBuffer, step: &str) {
    let expected = buf.width() as usize * buf.height() as usize * buf.format().bytes_per_pixel();
    assert_eq!(
        buf.as_bytes().len(),
        expected,
        "{step}: {:?} {}x{}",
        buf.format(),
        buf.width(),
        buf.height()
    );
}

/// Deterministic non-uniform test image
fn pattern(width: u32, height: u32, format: PixelFormat) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height, format);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 37 + y * 91) as u8;
            buf.set_pixel(x, y, Color::rgba(v, v.wrapping_mul(3), 255 - v, 200));
        }
    }
    buf
}

#[test]
fn test_length_invariant_across_operations() {
    for format in FORMATS {
        let mut buf = pattern(7, 5, format);
        let other = pattern(3, 4, PixelFormat::Rgba);

        buf.flip_horizontally();
        assert_len(&buf, "flip_horizontally");
        buf.flip_vertically();
        assert_len(&buf, "flip_vertically");
        buf.rotate(33.0);
        assert_len(&buf, "rotate");
        buf.scale(1.5, 0.5);
        assert_len(&buf, "scale");
        assert_eq!((buf.width(), buf.height()), (11, 3));
        buf.resize(6, 9);
        assert_len(&buf, "resize");

        buf.apply_grayscale();
        buf.apply_gaussian_blur(1.2);
        buf.apply_box_blur(2);
        buf.apply_sharpen();
        buf.apply_edge_detection();
        buf.apply_sepia();
        buf.adjust_brightness(1.1);
        buf.adjust_contrast(0.8);
        buf.adjust_gamma(2.2);
        buf.adjust_hue(45.0);
        buf.adjust_saturation(0.3);
        assert_len(&buf, "filters");

        buf.fill_triangle(Vec2::ZERO, Vec2::new(6.0, 0.0), Vec2::new(0.0, 9.0), Color::RED);
        buf.draw_line(Vec2::new(-3.0, -3.0), Vec2::new(20.0, 20.0), Color::GREEN, 2.0);
        buf.fill_rect(Rect::new(1, 1, 100, 2), Color::BLUE);
        buf.draw_circle(Vec2::new(3.0, 4.0), 3.0, Color::WHITE, 1.0);
        assert_len(&buf, "drawing");

        buf.copy(&other, IVec2::new(-1, 4));
        buf.blend(&other, IVec2::new(4, -2), 0.5);
        buf.apply_mask(&pattern(6, 9, PixelFormat::Grayscale));
        assert_len(&buf, "compositing");

        buf.resize(0, 3);
        assert_len(&buf, "resize to empty");
        buf.rotate(90.0);
        buf.apply_gaussian_blur(2.0);
        assert_len(&buf, "empty buffer operations");
    }
}

#[test]
fn test_set_get_roundtrip_per_format() {
    let c = Color::rgba(10, 200, 30, 128);
    for format in FORMATS {
        let mut buf = PixelBuffer::new(3, 3, format);
        buf.set_pixel(1, 2, c);
        let read = buf.get_pixel(1, 2);
        match format {
            PixelFormat::Rgba | PixelFormat::Bgra => assert_eq!(read, c),
            PixelFormat::Rgb | PixelFormat::Bgr => assert_eq!(read, c.with_alpha(255)),
            PixelFormat::Grayscale => assert_eq!(read, Color::gray(c.luminance())),
        }
    }
}

#[test]
fn test_out_of_bounds_access_is_absorbed() {
    for format in FORMATS {
        let mut buf = pattern(4, 4, format);
        let before = buf.clone();
        buf.set_pixel(4, 0, Color::RED);
        buf.set_pixel(0, 4, Color::RED);
        buf.set_pixel(u32::MAX, u32::MAX, Color::RED);
        assert_eq!(buf, before);
        assert_eq!(buf.get_pixel(4, 0), Color::default());
    }
}

#[test]
fn test_blur_keeps_uniform_image() {
    let color = Color::rgba(37, 142, 250, 99);
    for sigma in [0.3, 1.0, 2.5, 7.0] {
        let mut buf = PixelBuffer::filled(10, 10, PixelFormat::Rgba, color);
        buf.apply_gaussian_blur(sigma);
        assert_eq!(buf.as_colors().unwrap(), &[color; 100], "sigma {sigma}");
    }
}

#[test]
fn test_rotation_identities() {
    for (w, h) in [(6, 6), (7, 4), (4, 9)] {
        let original = pattern(w, h, PixelFormat::Rgba);

        let mut zero = original.clone();
        zero.rotate(0.0);
        assert_eq!(zero, original, "{w}x{h} by 0");

        let mut full = original.clone();
        full.rotate(360.0);
        assert_eq!(full, original, "{w}x{h} by 360");
    }
}

#[test]
fn test_flip_twice_restores() {
    for format in FORMATS {
        let original = pattern(5, 3, format);
        let mut buf = original.clone();
        buf.flip_horizontally();
        assert_ne!(buf, original);
        buf.flip_horizontally();
        buf.flip_vertically();
        buf.flip_vertically();
        assert_eq!(buf, original);
    }
}
