//! Noise-based texture generation
//!
//! White noise and fractal gradient (Perlin) noise, both emitted as grayscale
//! buffers. Perlin rows are accumulated in parallel with rayon; each pixel sums
//! its octaves in a fixed order, so the result does not depend on the thread
//! count.

use glam::Vec2;
use pixcore::{PixelBuffer, PixelFormat};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::seeded_rng;

/// Number of entries in the gradient lattice table
const GRADIENT_COUNT: usize = 256;

/// Configuration for uniform white noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Lowest channel value as a fraction of full scale
    #[serde(default)]
    pub min: f32,
    /// Highest channel value as a fraction of full scale
    #[serde(default = "default_max")]
    pub max: f32,
    /// Random seed (`None` = non-deterministic)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            seed: None,
        }
    }
}

impl NoiseConfig {
    /// Create a new noise config with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Generate a grayscale texture with an independent uniform value per
    /// pixel in `[min, max]` (clamped to [0, 1]).
    pub fn generate(&self, width: u32, height: u32) -> PixelBuffer {
        tracing::debug!(width, height, min = self.min, max = self.max, "generating white noise");
        let mut rng = seeded_rng(self.seed);
        let mut buffer = PixelBuffer::new(width, height, PixelFormat::Grayscale);
        for px in buffer.as_bytes_mut() {
            let value = self.min + (self.max - self.min) * rng.random::<f32>();
            *px = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        buffer
    }
}

/// Configuration for fractal Perlin noise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerlinConfig {
    /// Lattice cells across the image at the base octave
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Number of octaves; each doubles the frequency and halves the amplitude
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    /// Random seed for the gradient table (`None` = non-deterministic)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            octaves: default_octaves(),
            seed: None,
        }
    }
}

impl PerlinConfig {
    /// Create a new Perlin config with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Generate a grayscale texture of fractal Perlin noise.
    ///
    /// The octave sum is normalized by its global minimum and maximum, so the
    /// darkest pixel is 0 and the brightest 255. A flat field is all zeros.
    pub fn generate(&self, width: u32, height: u32) -> PixelBuffer {
        tracing::debug!(
            width,
            height,
            scale = self.scale,
            octaves = self.octaves,
            "generating perlin noise"
        );
        let mut buffer = PixelBuffer::new(width, height, PixelFormat::Grayscale);
        if buffer.is_empty() {
            return buffer;
        }

        let mut rng = seeded_rng(self.seed);
        let gradients: Vec<Vec2> = (0..GRADIENT_COUNT)
            .map(|_| Vec2::from_angle(rng.random::<f32>() * std::f32::consts::TAU))
            .collect();

        let mut field = vec![0.0f32; width as usize * height as usize];
        field
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, value) in row.iter_mut().enumerate() {
                    *value = self.fractal(&gradients, x as f32 / width as f32, y as f32 / height as f32);
                }
            });

        let (min, max) = field
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let range = max - min;
        if range > 0.0 && range.is_finite() {
            for (px, &value) in buffer.as_bytes_mut().iter_mut().zip(&field) {
                *px = ((value - min) / range * 255.0) as u8;
            }
        }
        buffer
    }

    /// Octave sum at a normalized image position
    fn fractal(&self, gradients: &[Vec2], u: f32, v: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for _ in 0..self.octaves {
            let p = Vec2::new(u, v) * self.scale * frequency;
            total += gradient_noise(gradients, p) * amplitude;
            frequency *= 2.0;
            amplitude *= 0.5;
        }
        total
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Single-octave gradient noise; lattice gradients are indexed by
/// `(corner.x + corner.y) & 255`.
fn gradient_noise(gradients: &[Vec2], p: Vec2) -> f32 {
    let x0 = p.x.floor() as i32;
    let y0 = p.y.floor() as i32;
    let (x1, y1) = (x0.wrapping_add(1), y0.wrapping_add(1));
    let corner = |cx: i32, cy: i32| {
        let g = gradients[(cx.wrapping_add(cy) & 255) as usize];
        g.dot(p - Vec2::new(cx as f32, cy as f32))
    };

    let tx = fade(p.x - x0 as f32);
    let ty = fade(p.y - y0 as f32);
    let top = lerp(corner(x0, y0), corner(x1, y0), tx);
    let bottom = lerp(corner(x0, y1), corner(x1, y1), tx);
    lerp(top, bottom, ty)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

fn default_max() -> f32 {
    1.0
}
fn default_scale() -> f32 {
    1.0
}
fn default_octaves() -> u32 {
    4
}
