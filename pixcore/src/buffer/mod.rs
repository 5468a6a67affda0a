//! Raw pixel buffer
//!
//! [`PixelBuffer`] owns a contiguous, row-major byte buffer together with its
//! dimensions and [`PixelFormat`]. The byte length always equals
//! `width * height * bytes_per_pixel`; every operation that changes the
//! dimensions builds the replacement in a local value and swaps it in whole.
//!
//! Pixel access is bounds-checked and never fails: writes outside the buffer
//! are dropped and reads outside the buffer return [`Color::default`] (opaque
//! white). Transforms, filters, drawing and compositing live in the submodules.

mod composite;
mod draw;
mod filters;
mod transform;

pub use filters::{
    BoxBlur, Brightness, Contrast, EdgeDetect, Gamma, GaussianBlur, Grayscale, Hue, PixelFilter,
    Saturation, Sepia, Sharpen,
};

use crate::color::Color;
use crate::format::PixelFormat;

/// Errors from constructing a buffer out of caller-supplied bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("pixel data is {actual} bytes, {width}x{height} {format:?} needs {expected}")]
    LengthMismatch {
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },
}

/// Owned image in one of the supported [`PixelFormat`]s.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

#[inline]
fn byte_len(width: u32, height: u32, format: PixelFormat) -> usize {
    width as usize * height as usize * format.bytes_per_pixel()
}

impl PixelBuffer {
    /// Create a zeroed buffer
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0u8; byte_len(width, height, format)],
        }
    }

    /// Create a buffer with every pixel set to `color`
    pub fn filled(width: u32, height: u32, format: PixelFormat, color: Color) -> Self {
        let mut buffer = Self::new(width, height, format);
        buffer.fill(color);
        buffer
    }

    /// Wrap existing pixel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LengthMismatch`] when `data` is not exactly
    /// `width * height * bytes_per_pixel` long.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let expected = byte_len(width, height, format);
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                format,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// Reallocate as a zeroed buffer, discarding the previous contents
    pub fn create(&mut self, width: u32, height: u32, format: PixelFormat) {
        *self = Self::new(width, height, format);
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Storage format of every pixel
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes per pixel for this buffer's format
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Bytes in one row
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// True for zero-sized buffers
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw pixel bytes, row-major
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes; the length cannot change
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its pixel bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Zero-copy colour view, only available for RGBA buffers
    pub fn as_colors(&self) -> Option<&[Color]> {
        (self.format == PixelFormat::Rgba).then(|| bytemuck::cast_slice(&self.data))
    }

    /// Mutable zero-copy colour view, only available for RGBA buffers
    pub fn as_colors_mut(&mut self) -> Option<&mut [Color]> {
        (self.format == PixelFormat::Rgba).then(|| bytemuck::cast_slice_mut(&mut self.data))
    }

    /// True when `(x, y)` addresses a pixel of this buffer
    #[inline]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        if let Some(colors) = self.as_colors_mut() {
            colors.fill(color);
            return;
        }
        let format = self.format;
        let bpp = format.bytes_per_pixel();
        let mut encoded = [0u8; 4];
        format.encode(color, &mut encoded[..bpp]);
        for px in self.data.chunks_exact_mut(bpp) {
            px.copy_from_slice(&encoded[..bpp]);
        }
    }

    /// Write a pixel; out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if self.in_bounds(x, y) {
            self.put_pixel(x, y, color);
        }
    }

    /// Read a pixel; out-of-range coordinates return opaque white.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if self.in_bounds(x, y) {
            self.pixel_at(x, y)
        } else {
            Color::default()
        }
    }

    /// Byte offset of pixel `(x, y)`
    #[inline]
    pub(crate) fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.bytes_per_pixel()
    }

    /// Write without the coordinate check; callers have range-checked their loops.
    #[inline]
    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        let bpp = self.bytes_per_pixel();
        let idx = self.pixel_index(x, y);
        self.format.encode(color, &mut self.data[idx..idx + bpp]);
    }

    /// Read without the coordinate check; callers have range-checked their loops.
    #[inline]
    pub(crate) fn pixel_at(&self, x: u32, y: u32) -> Color {
        let bpp = self.bytes_per_pixel();
        let idx = self.pixel_index(x, y);
        self.format.decode(&self.data[idx..idx + bpp])
    }

    /// Copy of this buffer re-encoded in another format
    pub fn convert(&self, format: PixelFormat) -> PixelBuffer {
        if format == self.format {
            return self.clone();
        }
        let mut out = PixelBuffer::new(self.width, self.height, format);
        let src_bpp = self.bytes_per_pixel();
        let dst_bpp = format.bytes_per_pixel();
        for (src, dst) in self
            .data
            .chunks_exact(src_bpp)
            .zip(out.data.chunks_exact_mut(dst_bpp))
        {
            format.encode(self.format.decode(src), dst);
        }
        out
    }

    /// Nearest-neighbor resample to a new size.
    ///
    /// Source coordinates are `dst * old / new` truncated; this stretches the
    /// image rather than padding or cropping it.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        let mut resized = PixelBuffer::new(width, height, self.format);
        if !self.is_empty() {
            let scale_x = self.width as f64 / width as f64;
            let scale_y = self.height as f64 / height as f64;
            let bpp = self.bytes_per_pixel();
            for y in 0..height {
                let src_y = ((y as f64 * scale_y) as u32).min(self.height - 1);
                for x in 0..width {
                    let src_x = ((x as f64 * scale_x) as u32).min(self.width - 1);
                    let src = self.pixel_index(src_x, src_y);
                    let dst = resized.pixel_index(x, y);
                    resized.data[dst..dst + bpp].copy_from_slice(&self.data[src..src + bpp]);
                }
            }
        }
        *self = resized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_len_invariant(buf: &PixelBuffer) {
        assert_eq!(
            buf.as_bytes().len(),
            buf.width() as usize * buf.height() as usize * buf.format().bytes_per_pixel()
        );
    }

    #[test]
    fn test_new_is_zeroed() {
        let buf = PixelBuffer::new(4, 3, PixelFormat::Rgb);
        assert_eq!(buf.as_bytes().len(), 36);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_default_is_empty() {
        let buf = PixelBuffer::default();
        assert!(buf.is_empty());
        assert_eq!(buf.format(), PixelFormat::Rgba);
        assert_eq!(buf.get_pixel(0, 0), Color::WHITE);
    }

    #[test]
    fn test_create_discards_contents() {
        let mut buf = PixelBuffer::filled(2, 2, PixelFormat::Rgba, Color::RED);
        buf.create(3, 1, PixelFormat::Grayscale);
        assert_eq!((buf.width(), buf.height()), (3, 1));
        assert_eq!(buf.as_bytes(), &[0, 0, 0]);
        assert_len_invariant(&buf);
    }

    #[test]
    fn test_from_raw_length_checked() {
        assert!(PixelBuffer::from_raw(2, 2, PixelFormat::Rgb, vec![0; 12]).is_ok());
        let err = PixelBuffer::from_raw(2, 2, PixelFormat::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            BufferError::LengthMismatch {
                expected: 12,
                actual: 11,
                ..
            }
        ));
    }

    #[test]
    fn test_rgba_roundtrip_exact() {
        let mut buf = PixelBuffer::new(4, 4, PixelFormat::Rgba);
        let c = Color::rgba(12, 34, 56, 78);
        buf.set_pixel(1, 2, c);
        assert_eq!(buf.get_pixel(1, 2), c);
    }

    #[test]
    fn test_grayscale_roundtrip_luminance() {
        let mut buf = PixelBuffer::new(4, 4, PixelFormat::Grayscale);
        let c = Color::rgba(200, 100, 50, 10);
        buf.set_pixel(3, 3, c);
        assert_eq!(buf.get_pixel(3, 3), Color::gray(c.luminance()));
    }

    #[test]
    fn test_out_of_bounds_write_is_noop() {
        let mut buf = PixelBuffer::new(4, 4, PixelFormat::Rgba);
        let before = buf.clone();
        buf.set_pixel(4, 0, Color::RED);
        buf.set_pixel(0, 4, Color::RED);
        buf.set_pixel(u32::MAX, u32::MAX, Color::RED);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_out_of_bounds_read_is_white() {
        let buf = PixelBuffer::new(4, 4, PixelFormat::Rgba);
        assert_eq!(buf.get_pixel(4, 0), Color::WHITE);
        assert_eq!(buf.get_pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn test_fill_all_formats() {
        for format in [
            PixelFormat::Rgb,
            PixelFormat::Rgba,
            PixelFormat::Bgr,
            PixelFormat::Bgra,
            PixelFormat::Grayscale,
        ] {
            let buf = PixelBuffer::filled(3, 2, format, Color::gray(77));
            for y in 0..2 {
                for x in 0..3 {
                    assert_eq!(buf.get_pixel(x, y), Color::gray(77), "{format:?}");
                }
            }
        }
    }

    #[test]
    fn test_as_colors_only_rgba() {
        let buf = PixelBuffer::filled(2, 2, PixelFormat::Rgba, Color::BLUE);
        assert_eq!(buf.as_colors().unwrap(), &[Color::BLUE; 4]);
        assert!(PixelBuffer::new(2, 2, PixelFormat::Bgra).as_colors().is_none());
    }

    #[test]
    fn test_convert_bgr_to_rgba() {
        let mut buf = PixelBuffer::new(2, 1, PixelFormat::Bgr);
        buf.set_pixel(0, 0, Color::rgb(1, 2, 3));
        let rgba = buf.convert(PixelFormat::Rgba);
        assert_eq!(&rgba.as_bytes()[..4], &[1, 2, 3, 255]);
        assert_len_invariant(&rgba);
    }

    #[test]
    fn test_resize_nearest_upscale() {
        let mut buf = PixelBuffer::new(2, 2, PixelFormat::Rgba);
        buf.set_pixel(0, 0, Color::RED);
        buf.set_pixel(1, 0, Color::GREEN);
        buf.set_pixel(0, 1, Color::BLUE);
        buf.set_pixel(1, 1, Color::WHITE);
        buf.resize(4, 4);
        assert_len_invariant(&buf);
        assert_eq!(buf.get_pixel(1, 1), Color::RED);
        assert_eq!(buf.get_pixel(2, 0), Color::GREEN);
        assert_eq!(buf.get_pixel(0, 3), Color::BLUE);
        assert_eq!(buf.get_pixel(3, 3), Color::WHITE);
    }

    #[test]
    fn test_resize_downscale_and_empty() {
        let mut buf = PixelBuffer::filled(8, 8, PixelFormat::Grayscale, Color::gray(9));
        buf.resize(3, 5);
        assert_len_invariant(&buf);
        assert!(buf.as_bytes().iter().all(|&b| b == 9));

        buf.resize(0, 5);
        assert!(buf.is_empty());
        assert_len_invariant(&buf);

        buf.resize(2, 2);
        assert_eq!(buf.as_bytes(), &[0, 0, 0, 0]);
    }
}
