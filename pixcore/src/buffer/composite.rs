//! Compositing one buffer onto another
//!
//! When the two buffers use different formats the source colour is converted
//! into the destination's format through the [`Color`] accessors.

use glam::IVec2;

use super::PixelBuffer;
use crate::color::{Color, lerp_u8};
use crate::rect::Rect;

/// Overlap of a `src_w` x `src_h` source placed at `dest` within a
/// `dst_w` x `dst_h` destination: `(src_x, src_y, dst_x, dst_y, width, height)`.
fn overlap(dest: IVec2, src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Option<[u32; 6]> {
    let axis = |pos: i32, src_len: u32, dst_len: u32| -> Option<(u32, u32, u32)> {
        let pos = pos as i64;
        let start = pos.max(0);
        let end = (pos + src_len as i64).min(dst_len as i64);
        (start < end).then(|| ((start - pos) as u32, start as u32, (end - start) as u32))
    };
    let (sx, dx, w) = axis(dest.x, src_w, dst_w)?;
    let (sy, dy, h) = axis(dest.y, src_h, dst_h)?;
    Some([sx, sy, dx, dy, w, h])
}

impl PixelBuffer {
    /// Overwrite the pixels under `source` placed with its top-left corner at
    /// `dest`; the parts that fall outside this buffer are clipped.
    pub fn copy(&mut self, source: &PixelBuffer, dest: IVec2) {
        let whole = Rect::new(0, 0, source.width, source.height);
        self.copy_rect(source, whole, dest);
    }

    /// Copy the `src_rect` area of `source` so its top-left corner lands on
    /// `dest`. Both the source rectangle and the destination are clipped.
    pub fn copy_rect(&mut self, source: &PixelBuffer, src_rect: Rect, dest: IVec2) {
        if src_rect.x >= source.width || src_rect.y >= source.height {
            return;
        }
        let src_w = (src_rect.right().min(source.width as u64) - src_rect.x as u64) as u32;
        let src_h = (src_rect.bottom().min(source.height as u64) - src_rect.y as u64) as u32;
        let Some([sx, sy, dx, dy, w, h]) = overlap(dest, src_w, src_h, self.width, self.height)
        else {
            return;
        };
        let (sx, sy) = (sx + src_rect.x, sy + src_rect.y);

        if source.format == self.format {
            let row_bytes = w as usize * self.bytes_per_pixel();
            for row in 0..h {
                let s = source.pixel_index(sx, sy + row);
                let d = self.pixel_index(dx, dy + row);
                self.data[d..d + row_bytes].copy_from_slice(&source.data[s..s + row_bytes]);
            }
            return;
        }

        for row in 0..h {
            for col in 0..w {
                let color = source.pixel_at(sx + col, sy + row);
                self.put_pixel(dx + col, dy + row, color);
            }
        }
    }

    /// New buffer holding the `rect` area of this one (clipped to the bounds)
    pub fn crop(&self, rect: Rect) -> PixelBuffer {
        let x_end = rect.right().min(self.width as u64);
        let y_end = rect.bottom().min(self.height as u64);
        let width = x_end.saturating_sub(rect.x as u64) as u32;
        let height = y_end.saturating_sub(rect.y as u64) as u32;
        let mut out = PixelBuffer::new(width, height, self.format);
        out.copy_rect(self, rect, IVec2::ZERO);
        out
    }

    /// Linearly interpolate every overlapped pixel toward `source` by `opacity`
    /// (clamped to [0, 1]); 0 leaves this buffer unchanged, 1 behaves like
    /// [`copy`](Self::copy).
    pub fn blend(&mut self, source: &PixelBuffer, dest: IVec2, opacity: f32) {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        let Some([sx, sy, dx, dy, w, h]) =
            overlap(dest, source.width, source.height, self.width, self.height)
        else {
            return;
        };
        for row in 0..h {
            for col in 0..w {
                let over = source.pixel_at(sx + col, sy + row);
                let base = self.pixel_at(dx + col, dy + row);
                self.put_pixel(dx + col, dy + row, base.lerp(over, opacity));
            }
        }
    }

    /// Multiply by a same-size mask.
    ///
    /// The mask value is the mask's alpha when its format has one and its
    /// luminance otherwise. Buffers with alpha get their alpha scaled; buffers
    /// without alpha get their colour channels scaled. A mask of a different
    /// size is ignored.
    pub fn apply_mask(&mut self, mask: &PixelBuffer) {
        if mask.width != self.width || mask.height != self.height {
            tracing::debug!(
                buffer_width = self.width,
                buffer_height = self.height,
                mask_width = mask.width,
                mask_height = mask.height,
                "ignoring mask with mismatched size"
            );
            return;
        }
        let mask_has_alpha = mask.format.has_alpha();
        let keep_color = self.format.has_alpha();
        let scale = |v: u8, m: u8| lerp_u8(0, v, m as f32 / 255.0);

        for y in 0..self.height {
            for x in 0..self.width {
                let m = mask.pixel_at(x, y);
                let m = if mask_has_alpha { m.a } else { m.luminance() };
                let c = self.pixel_at(x, y);
                let masked = if keep_color {
                    c.with_alpha(scale(c.a, m))
                } else {
                    Color::rgba(scale(c.r, m), scale(c.g, m), scale(c.b, m), c.a)
                };
                self.put_pixel(x, y, masked);
            }
        }
    }
}
