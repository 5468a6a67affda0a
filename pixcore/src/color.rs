//! RGBA colour exchange type
//!
//! Every pixel accessor speaks `Color` regardless of the buffer's storage
//! format. Conversion to and from the stored bytes lives in [`crate::format`].

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Luminance weights (ITU-R BT.601)
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// 8-bit RGBA colour.
///
/// Layout matches one RGBA pixel so RGBA buffers can be viewed as `&[Color]`.
/// The default colour is opaque white, which is also what out-of-bounds reads return.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Opaque gray with all colour channels set to `v`
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::rgba(v, v, v, 255)
    }

    /// Build from normalized float channels, clamping to [0, 1]
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba(unorm8(r), unorm8(g), unorm8(b), unorm8(a))
    }

    /// Normalized float channels
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Perceptual luminance `0.299R + 0.587G + 0.114B`, rounded to nearest.
    #[inline]
    pub fn luminance(self) -> u8 {
        let l = LUMA_R * self.r as f32 + LUMA_G * self.g as f32 + LUMA_B * self.b as f32;
        l.round().clamp(0.0, 255.0) as u8
    }

    /// Same colour with a different alpha
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Channel-wise linear interpolation (`t` clamped to [0, 1])
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgba(
            lerp_u8(self.r, other.r, t),
            lerp_u8(self.g, other.g, t),
            lerp_u8(self.b, other.b, t),
            lerp_u8(self.a, other.a, t),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Color::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Linear interpolation for u8 values, rounded to nearest
#[inline]
pub(crate) fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

/// Map a normalized float to a byte
#[inline]
pub(crate) fn unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
