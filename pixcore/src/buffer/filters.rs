//! Image filters
//!
//! Every filter is a small value type implementing [`PixelFilter`], so filters
//! can be stored, configured and chained:
//!
//! ```
//! use pixcore::{Color, GaussianBlur, PixelBuffer, PixelFormat, Sepia};
//!
//! let mut image = PixelBuffer::filled(16, 16, PixelFormat::Rgba, Color::rgb(90, 120, 200));
//! image.apply(GaussianBlur { sigma: 1.5 }).apply(Sepia);
//! ```
//!
//! `PixelBuffer` also exposes one convenience method per filter
//! (`apply_gaussian_blur`, `adjust_gamma`, ...). Colour adjustments never touch
//! the alpha channel; convolutions blur every stored channel independently.

use super::PixelBuffer;
use crate::color::{Color, unorm8};

/// A filter that rewrites a buffer in place
pub trait PixelFilter {
    fn apply_to(&self, buffer: &mut PixelBuffer);
}

impl PixelBuffer {
    /// Apply a filter and return self for chaining
    pub fn apply<F: PixelFilter>(&mut self, filter: F) -> &mut Self {
        filter.apply_to(self);
        self
    }

    /// Replace every pixel with `f(pixel)`
    pub fn map_colors(&mut self, mut f: impl FnMut(Color) -> Color) {
        let format = self.format;
        for px in self.data.chunks_exact_mut(format.bytes_per_pixel()) {
            let color = f(format.decode(px));
            format.encode(color, px);
        }
    }

    pub fn apply_grayscale(&mut self) {
        self.apply(Grayscale);
    }

    pub fn apply_gaussian_blur(&mut self, sigma: f32) {
        self.apply(GaussianBlur { sigma });
    }

    pub fn apply_box_blur(&mut self, radius: u32) {
        self.apply(BoxBlur { radius });
    }

    pub fn apply_sharpen(&mut self) {
        self.apply(Sharpen);
    }

    pub fn apply_edge_detection(&mut self) {
        self.apply(EdgeDetect);
    }

    pub fn apply_sepia(&mut self) {
        self.apply(Sepia);
    }

    pub fn adjust_brightness(&mut self, factor: f32) {
        self.apply(Brightness { factor });
    }

    pub fn adjust_contrast(&mut self, factor: f32) {
        self.apply(Contrast { factor });
    }

    pub fn adjust_gamma(&mut self, gamma: f32) {
        self.apply(Gamma { gamma });
    }

    pub fn adjust_hue(&mut self, degrees: f32) {
        self.apply(Hue { degrees });
    }

    pub fn adjust_saturation(&mut self, factor: f32) {
        self.apply(Saturation { factor });
    }
}

// ============================================================================
// Convolutions
// ============================================================================

/// Separable Gaussian blur.
///
/// The kernel has `ceil(6 * sigma)` taps (rounded up to odd so it is
/// symmetric) sampled from `exp(-x² / 2σ²)` and normalized. Taps that fall
/// outside the image are skipped and the remaining weights renormalized, so
/// edges do not darken and a uniform image is a fixed point.
#[derive(Debug, Clone, Copy)]
pub struct GaussianBlur {
    pub sigma: f32,
}

impl PixelFilter for GaussianBlur {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return;
        }
        // Taps further out than the longest side never land inside the image
        let longest = buffer.width.max(buffer.height) as usize;
        let kernel = gaussian_kernel(self.sigma, 2 * longest + 1);
        // A single tap is the identity
        if kernel.len() == 1 {
            return;
        }
        separable_convolve(buffer, &kernel);
    }
}

/// Separable box blur over a `(2 * radius + 1)` window
#[derive(Debug, Clone, Copy)]
pub struct BoxBlur {
    pub radius: u32,
}

impl PixelFilter for BoxBlur {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        if self.radius == 0 {
            return;
        }
        let longest = buffer.width.max(buffer.height) as usize;
        let taps = 2 * (self.radius as usize).min(longest) + 1;
        let kernel = vec![1.0 / taps as f32; taps];
        separable_convolve(buffer, &kernel);
    }
}

/// Normalized odd-length kernel, at most `max_len` taps (rounded up to odd)
fn gaussian_kernel(sigma: f32, max_len: usize) -> Vec<f32> {
    let len = ((sigma * 6.0).ceil() as usize).clamp(1, max_len.max(1)) | 1;
    if len == 1 {
        return vec![1.0];
    }
    let center = (len - 1) as f32 / 2.0;
    let mut kernel: Vec<f32> = (0..len)
        .map(|i| {
            let x = i as f32 - center;
            (-(x * x) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Horizontal pass into a scratch buffer, then vertical pass back into `buffer`.
fn separable_convolve(buffer: &mut PixelBuffer, kernel: &[f32]) {
    if buffer.is_empty() {
        return;
    }
    let width = buffer.width as usize;
    let height = buffer.height as usize;
    let bpp = buffer.bytes_per_pixel();
    let mut temp = vec![0u8; buffer.data.len()];

    convolve_axis(&buffer.data, &mut temp, width, height, bpp, kernel, true);
    convolve_axis(&temp, &mut buffer.data, width, height, bpp, kernel, false);
}

fn convolve_axis(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    bpp: usize,
    kernel: &[f32],
    horizontal: bool,
) {
    let half = (kernel.len() / 2) as isize;
    let (len, other) = if horizontal {
        (width, height)
    } else {
        (height, width)
    };
    let index = |along: usize, across: usize| {
        if horizontal {
            (across * width + along) * bpp
        } else {
            (along * width + across) * bpp
        }
    };

    let mut acc = [0.0f32; 4];
    for across in 0..other {
        for along in 0..len {
            acc[..bpp].fill(0.0);
            let mut weight_sum = 0.0f32;
            for (i, &w) in kernel.iter().enumerate() {
                let pos = along as isize + i as isize - half;
                if pos < 0 || pos >= len as isize {
                    continue;
                }
                let s = index(pos as usize, across);
                for c in 0..bpp {
                    acc[c] += src[s + c] as f32 * w;
                }
                weight_sum += w;
            }
            let d = index(along, across);
            for c in 0..bpp {
                dst[d + c] = (acc[c] / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Run a 3x3 kernel over the colour channels with clamp-to-edge sampling.
fn convolve_3x3(buffer: &mut PixelBuffer, kernel: [[f32; 3]; 3]) {
    let source = buffer.clone();
    let (w, h) = (buffer.width as i64, buffer.height as i64);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (ky, row) in kernel.iter().enumerate() {
                for (kx, &k) in row.iter().enumerate() {
                    let sx = (x + kx as i64 - 1).clamp(0, w - 1) as u32;
                    let sy = (y + ky as i64 - 1).clamp(0, h - 1) as u32;
                    let c = source.pixel_at(sx, sy);
                    acc[0] += c.r as f32 * k;
                    acc[1] += c.g as f32 * k;
                    acc[2] += c.b as f32 * k;
                }
            }
            let alpha = source.pixel_at(x as u32, y as u32).a;
            let to_u8 = |v: f32| v.round().clamp(0.0, 255.0) as u8;
            buffer.put_pixel(
                x as u32,
                y as u32,
                Color::rgba(to_u8(acc[0]), to_u8(acc[1]), to_u8(acc[2]), alpha),
            );
        }
    }
}

/// 3x3 sharpen (center 5, cross -1)
#[derive(Debug, Clone, Copy)]
pub struct Sharpen;

impl PixelFilter for Sharpen {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        convolve_3x3(
            buffer,
            [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
        );
    }
}

/// Sobel gradient magnitude of the luminance, written back as gray
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetect;

impl PixelFilter for EdgeDetect {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        const GX: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
        const GY: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

        let (w, h) = (buffer.width as i64, buffer.height as i64);
        let luma: Vec<f32> = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| buffer.pixel_at(x as u32, y as u32).luminance() as f32)
            .collect();

        for y in 0..h {
            for x in 0..w {
                let (mut gx, mut gy) = (0.0f32, 0.0f32);
                for ky in 0..3 {
                    for kx in 0..3 {
                        let sx = (x + kx as i64 - 1).clamp(0, w - 1);
                        let sy = (y + ky as i64 - 1).clamp(0, h - 1);
                        let l = luma[(sy * w + sx) as usize];
                        gx += GX[ky][kx] * l;
                        gy += GY[ky][kx] * l;
                    }
                }
                let magnitude = (gx * gx + gy * gy).sqrt().round().clamp(0.0, 255.0) as u8;
                let alpha = buffer.pixel_at(x as u32, y as u32).a;
                buffer.put_pixel(x as u32, y as u32, Color::gray(magnitude).with_alpha(alpha));
            }
        }
    }
}

// ============================================================================
// Per-pixel colour adjustments
// ============================================================================

/// Replace R, G and B with the pixel's luminance
#[derive(Debug, Clone, Copy)]
pub struct Grayscale;

impl PixelFilter for Grayscale {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        buffer.map_colors(|c| Color::gray(c.luminance()).with_alpha(c.a));
    }
}

/// Classic sepia tone matrix
#[derive(Debug, Clone, Copy)]
pub struct Sepia;

impl PixelFilter for Sepia {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        buffer.map_colors(|c| {
            let (r, g, b) = (c.r as f32, c.g as f32, c.b as f32);
            let to_u8 = |v: f32| v.round().clamp(0.0, 255.0) as u8;
            Color::rgba(
                to_u8(0.393 * r + 0.769 * g + 0.189 * b),
                to_u8(0.349 * r + 0.686 * g + 0.168 * b),
                to_u8(0.272 * r + 0.534 * g + 0.131 * b),
                c.a,
            )
        });
    }
}

/// Multiply colour channels by `factor`
#[derive(Debug, Clone, Copy)]
pub struct Brightness {
    pub factor: f32,
}

impl PixelFilter for Brightness {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        let factor = self.factor.max(0.0);
        buffer.map_colors(|c| map_rgb(c, |v| v * factor));
    }
}

/// Scale colour channels away from (or toward) mid-gray.
///
/// 1.0 leaves the image unchanged, >1 increases contrast, <1 reduces it.
#[derive(Debug, Clone, Copy)]
pub struct Contrast {
    pub factor: f32,
}

impl PixelFilter for Contrast {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        let factor = self.factor;
        buffer.map_colors(|c| map_rgb(c, |v| (v - 0.5) * factor + 0.5));
    }
}

/// Gamma correction: `out = in^(1/gamma)`. Non-positive gamma is a no-op.
#[derive(Debug, Clone, Copy)]
pub struct Gamma {
    pub gamma: f32,
}

impl PixelFilter for Gamma {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return;
        }
        let inv = 1.0 / self.gamma;
        let lut: [u8; 256] = std::array::from_fn(|i| unorm8((i as f32 / 255.0).powf(inv)));
        buffer.map_colors(|c| {
            Color::rgba(lut[c.r as usize], lut[c.g as usize], lut[c.b as usize], c.a)
        });
    }
}

/// Rotate hue by `degrees` in HSV space
#[derive(Debug, Clone, Copy)]
pub struct Hue {
    pub degrees: f32,
}

impl PixelFilter for Hue {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        let shift = self.degrees.rem_euclid(360.0);
        buffer.map_colors(|c| {
            let [r, g, b, a] = c.to_f32();
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (r, g, b) = hsv_to_rgb((h + shift).rem_euclid(360.0), s, v);
            Color::from_f32(r, g, b, a)
        });
    }
}

/// Scale chroma around the pixel's luminance; 0.0 yields grayscale
#[derive(Debug, Clone, Copy)]
pub struct Saturation {
    pub factor: f32,
}

impl PixelFilter for Saturation {
    fn apply_to(&self, buffer: &mut PixelBuffer) {
        let factor = self.factor.max(0.0);
        buffer.map_colors(|c| {
            let l = c.luminance() as f32 / 255.0;
            map_rgb(c, |v| l + (v - l) * factor)
        });
    }
}

/// Apply `f` to normalized R, G, B; alpha unchanged
#[inline]
fn map_rgb(c: Color, f: impl Fn(f32) -> f32) -> Color {
    let [r, g, b, _] = c.to_f32();
    Color::rgba(unorm8(f(r)), unorm8(f(g)), unorm8(f(b)), c.a)
}

fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        for sigma in [0.3, 1.0, 1.5, 2.7] {
            let k = gaussian_kernel(sigma, usize::MAX);
            assert_eq!(k.len() % 2, 1);
            let sum: f32 = k.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            for i in 0..k.len() / 2 {
                assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-6);
            }
        }
        assert_eq!(gaussian_kernel(1.0, usize::MAX).len(), 7);
    }

    #[test]
    fn test_blur_tiny_sigma_is_identity() {
        let mut buf = PixelBuffer::filled(10, 10, PixelFormat::Rgba, Color::rgba(100, 150, 200, 255));
        buf.set_pixel(5, 5, Color::RED);
        let original = buf.clone();
        for sigma in [1e-30, 1e-20, 0.1] {
            buf.apply_gaussian_blur(sigma);
            assert_eq!(buf, original, "sigma {sigma}");
        }
    }

    #[test]
    fn test_blur_uniform_is_fixed_point() {
        for sigma in [0.5, 1.0, 2.0, 5.0] {
            for format in [PixelFormat::Rgba, PixelFormat::Bgr, PixelFormat::Grayscale] {
                let color = Color::rgba(37, 142, 251, 200);
                let mut buf = PixelBuffer::filled(10, 10, format, color);
                let original = buf.clone();
                buf.apply_gaussian_blur(sigma);
                assert_eq!(buf, original, "sigma {sigma} {format:?}");
            }
        }
    }

    #[test]
    fn test_blur_spreads_single_pixel() {
        let mut buf = PixelBuffer::new(9, 9, PixelFormat::Grayscale);
        buf.set_pixel(4, 4, Color::WHITE);
        buf.apply_gaussian_blur(1.0);
        let center = buf.get_pixel(4, 4).r;
        let near = buf.get_pixel(5, 4).r;
        let far = buf.get_pixel(8, 4).r;
        assert!(center < 255);
        assert!(near > 0 && near < center);
        assert!(far < near);
        // Symmetric spread
        assert_eq!(buf.get_pixel(3, 4), buf.get_pixel(5, 4));
        assert_eq!(buf.get_pixel(4, 3), buf.get_pixel(4, 5));
    }

    #[test]
    fn test_blur_non_positive_sigma_is_noop() {
        let mut buf = PixelBuffer::new(4, 4, PixelFormat::Rgba);
        buf.set_pixel(1, 1, Color::RED);
        let original = buf.clone();
        buf.apply_gaussian_blur(0.0);
        buf.apply_gaussian_blur(-1.0);
        buf.apply_gaussian_blur(f32::NAN);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_box_blur_uniform_is_fixed_point() {
        let mut buf = PixelBuffer::filled(6, 5, PixelFormat::Rgb, Color::rgb(10, 20, 30));
        let original = buf.clone();
        buf.apply_box_blur(2);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_grayscale_keeps_alpha() {
        let mut buf = PixelBuffer::filled(2, 2, PixelFormat::Bgra, Color::rgba(255, 0, 0, 99));
        buf.apply_grayscale();
        assert_eq!(buf.get_pixel(1, 1), Color::rgba(76, 76, 76, 99));
    }

    #[test]
    fn test_sharpen_uniform_is_fixed_point() {
        let mut buf = PixelBuffer::filled(5, 5, PixelFormat::Rgba, Color::rgba(80, 90, 100, 7));
        let original = buf.clone();
        buf.apply_sharpen();
        assert_eq!(buf, original);
    }

    #[test]
    fn test_edge_detection() {
        let mut buf = PixelBuffer::filled(6, 6, PixelFormat::Rgba, Color::BLACK);
        for y in 0..6 {
            for x in 3..6 {
                buf.set_pixel(x, y, Color::WHITE);
            }
        }
        buf.apply_edge_detection();
        assert_eq!(buf.get_pixel(0, 0), Color::BLACK);
        assert_eq!(buf.get_pixel(3, 3), Color::WHITE);
        assert_eq!(buf.get_pixel(5, 3), Color::BLACK);
    }

    #[test]
    fn test_sepia() {
        let mut buf = PixelBuffer::filled(1, 1, PixelFormat::Rgba, Color::rgba(100, 100, 100, 50));
        buf.apply_sepia();
        assert_eq!(buf.get_pixel(0, 0), Color::rgba(135, 120, 94, 50));
    }

    #[test]
    fn test_brightness_and_contrast() {
        let mut buf = PixelBuffer::filled(2, 2, PixelFormat::Rgb, Color::rgb(100, 200, 50));
        buf.adjust_brightness(2.0);
        assert_eq!(buf.get_pixel(0, 0), Color::rgb(200, 255, 100));

        let mut buf = PixelBuffer::filled(2, 2, PixelFormat::Rgb, Color::rgb(191, 64, 128));
        buf.adjust_contrast(1.0);
        assert_eq!(buf.get_pixel(0, 0), Color::rgb(191, 64, 128));
        buf.adjust_contrast(0.0);
        assert_eq!(buf.get_pixel(0, 0), Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_gamma() {
        let mut buf = PixelBuffer::filled(1, 1, PixelFormat::Rgba, Color::rgba(0, 64, 255, 10));
        buf.adjust_gamma(1.0);
        assert_eq!(buf.get_pixel(0, 0), Color::rgba(0, 64, 255, 10));
        buf.adjust_gamma(2.0);
        let p = buf.get_pixel(0, 0);
        assert_eq!((p.r, p.b, p.a), (0, 255, 10));
        assert!(p.g > 64);
    }

    #[test]
    fn test_hue_rotation() {
        let mut buf = PixelBuffer::filled(1, 1, PixelFormat::Rgba, Color::RED);
        buf.adjust_hue(120.0);
        assert_eq!(buf.get_pixel(0, 0), Color::GREEN);
        buf.adjust_hue(-240.0);
        assert_eq!(buf.get_pixel(0, 0), Color::BLUE);
    }

    #[test]
    fn test_saturation_zero_is_grayscale() {
        let mut buf = PixelBuffer::filled(1, 1, PixelFormat::Rgba, Color::rgb(255, 0, 0));
        buf.adjust_saturation(0.0);
        assert_eq!(buf.get_pixel(0, 0), Color::gray(76));
    }

    #[test]
    fn test_filters_chain() {
        let mut buf = PixelBuffer::filled(4, 4, PixelFormat::Rgba, Color::rgb(10, 20, 30));
        buf.apply(Brightness { factor: 2.0 })
            .apply(Contrast { factor: 1.0 });
        assert_eq!(buf.get_pixel(0, 0), Color::rgb(20, 40, 60));
    }
}
