//! Pixel storage formats
//!
//! A format fixes the channel count and channel order of one stored pixel.
//! Encoding and decoding always go through [`Color`], so any two formats can be
//! converted into each other (lossily when the target drops channels).

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// In-memory channel layout of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgb,
    #[default]
    Rgba,
    Bgr,
    Bgra,
    /// Single luminance byte; decodes to R = G = B = luminance, opaque
    Grayscale,
}

impl PixelFormat {
    /// Bytes occupied by one pixel
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb | PixelFormat::Bgr => 3,
            PixelFormat::Rgba | PixelFormat::Bgra => 4,
            PixelFormat::Grayscale => 1,
        }
    }

    /// Whether the format stores an alpha channel
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba | PixelFormat::Bgra)
    }

    /// Write `color` into one pixel slot (`px.len() == bytes_per_pixel()`).
    #[inline]
    pub fn encode(self, color: Color, px: &mut [u8]) {
        match self {
            PixelFormat::Rgb => px.copy_from_slice(&[color.r, color.g, color.b]),
            PixelFormat::Rgba => px.copy_from_slice(&[color.r, color.g, color.b, color.a]),
            PixelFormat::Bgr => px.copy_from_slice(&[color.b, color.g, color.r]),
            PixelFormat::Bgra => px.copy_from_slice(&[color.b, color.g, color.r, color.a]),
            PixelFormat::Grayscale => px[0] = color.luminance(),
        }
    }

    /// Read one pixel slot back as a colour.
    #[inline]
    pub fn decode(self, px: &[u8]) -> Color {
        match self {
            PixelFormat::Rgb => Color::rgb(px[0], px[1], px[2]),
            PixelFormat::Rgba => Color::rgba(px[0], px[1], px[2], px[3]),
            PixelFormat::Bgr => Color::rgb(px[2], px[1], px[0]),
            PixelFormat::Bgra => Color::rgba(px[2], px[1], px[0], px[3]),
            PixelFormat::Grayscale => Color::gray(px[0]),
        }
    }
}
