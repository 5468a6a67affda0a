//! Starfield backgrounds

use glam::Vec2;
use pixcore::{Color, PixelBuffer, PixelFormat};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::seeded_rng;

/// Configuration for a field of random stars on a black sky
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarfieldConfig {
    /// Number of stars to place
    #[serde(default = "default_star_count")]
    pub star_count: u32,
    /// Largest star diameter in pixels; stars are at least one pixel wide
    #[serde(default = "default_max_star_size")]
    pub max_star_size: f32,
    /// Random seed (`None` = non-deterministic)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: default_star_count(),
            max_star_size: default_max_star_size(),
            seed: None,
        }
    }
}

impl StarfieldConfig {
    /// Create a new starfield config with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Generate an opaque RGBA texture: black background with `star_count`
    /// bright dots centered on random pixels.
    pub fn generate(&self, width: u32, height: u32) -> PixelBuffer {
        tracing::debug!(width, height, stars = self.star_count, "generating starfield");
        let mut buffer = PixelBuffer::filled(width, height, PixelFormat::Rgba, Color::BLACK);
        if buffer.is_empty() {
            return buffer;
        }

        let mut rng = seeded_rng(self.seed);
        let max_size = if self.max_star_size.is_finite() {
            self.max_star_size.max(1.0)
        } else {
            1.0
        };
        for _ in 0..self.star_count {
            let x = rng.random_range(0..width);
            let y = rng.random_range(0..height);
            let size = rng.random_range(1.0..=max_size);
            let brightness = rng.random_range(180..=255u8);
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            buffer.fill_circle(center, size / 2.0, Color::gray(brightness));
        }
        buffer
    }
}

fn default_star_count() -> u32 {
    100
}
fn default_max_star_size() -> f32 {
    3.0
}
