//! In-memory image manipulation for pixcore
//!
//! This crate provides a [`PixelBuffer`] in one of several byte layouts, the
//! pixel-level operations on it (filters, transforms, compositing and
//! rasterization) and a [`TextureAtlas`] that packs many small images into a
//! single buffer.
//!
//! # Example
//! ```
//! use glam::{IVec2, Vec2};
//! use pixcore::{Color, PixelBuffer, PixelFormat};
//!
//! let mut canvas = PixelBuffer::filled(32, 32, PixelFormat::Rgba, Color::BLACK);
//! canvas.fill_circle(Vec2::new(16.0, 16.0), 8.0, Color::RED);
//! canvas.apply_gaussian_blur(1.0);
//!
//! let sprite = PixelBuffer::filled(4, 4, PixelFormat::Rgb, Color::BLUE);
//! canvas.copy(&sprite, IVec2::new(2, 2));
//! assert_eq!(canvas.get_pixel(3, 3), Color::BLUE);
//! ```
//!
//! Reading and writing container formats is left to an [`ImageCodec`]
//! implementation; see the [`codec`] module.

pub mod atlas;
pub mod buffer;
pub mod codec;
pub mod color;
pub mod format;
pub mod rect;

pub use atlas::{AtlasError, AtlasManifest, Region, TextureAtlas};
pub use buffer::{
    BoxBlur, Brightness, BufferError, Contrast, EdgeDetect, Gamma, GaussianBlur, Grayscale, Hue,
    PixelBuffer, PixelFilter, Saturation, Sepia, Sharpen,
};
pub use codec::{CodecError, ImageCodec, RawCodec};
pub use color::Color;
pub use format::PixelFormat;
pub use rect::Rect;
