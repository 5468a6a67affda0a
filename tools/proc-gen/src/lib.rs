//! Procedural texture generation for pixcore
//!
//! Generates [`PixelBuffer`](pixcore::PixelBuffer)s from patterns, noise and
//! starfields, and bakes TOML recipe books into a packed
//! [`TextureAtlas`](pixcore::TextureAtlas).
//!
//! # Example
//! ```
//! use pixcore::Color;
//! use pixcore_proc_gen::texture::*;
//!
//! // Basic patterns
//! let board = checkerboard(64, 64, 8, Color::BLACK, Color::WHITE);
//! assert_eq!(board.get_pixel(0, 0), Color::BLACK);
//!
//! // Seeded fractal noise is reproducible
//! let a = PerlinConfig::with_seed(7).generate(32, 32);
//! let b = PerlinConfig::with_seed(7).generate(32, 32);
//! assert_eq!(a, b);
//! ```

pub mod texture;
