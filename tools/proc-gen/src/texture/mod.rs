//! Procedural texture generation
//!
//! Every generator returns a freshly allocated [`PixelBuffer`](pixcore::PixelBuffer)
//! of the requested size. Generators that consume randomness take an optional
//! seed: the same seed always produces the same image, `None` draws a fresh one.
//!
//! # Example
//! ```
//! use pixcore::Color;
//! use pixcore_proc_gen::texture::*;
//!
//! let sky = linear_gradient(64, 64, Color::rgb(20, 20, 60), Color::BLACK, 90.0);
//! let stars = StarfieldConfig::with_seed(3).generate(64, 64);
//! let clouds = PerlinConfig { scale: 4.0, ..PerlinConfig::with_seed(3) }.generate(64, 64);
//! assert_eq!(clouds.format(), pixcore::PixelFormat::Grayscale);
//! # let _ = (sky, stars);
//! ```

mod noise;
mod patterns;
mod recipe;
mod starfield;

// Basic patterns
pub use patterns::{checkerboard, circle, linear_gradient, solid};

// Random generators
pub use noise::{NoiseConfig, PerlinConfig};
pub use starfield::StarfieldConfig;

// Recipes
pub use recipe::{RecipeBook, RecipeError, TextureRecipe};

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Seeded generator for one texture; `None` picks a random seed
pub(crate) fn seeded_rng(seed: Option<u64>) -> Pcg32 {
    Pcg32::seed_from_u64(seed.unwrap_or_else(rand::random))
}
