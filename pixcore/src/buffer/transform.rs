//! Geometric transforms: mirroring, rotation and scaling

use super::PixelBuffer;

impl PixelBuffer {
    /// Mirror every row left-to-right in place.
    pub fn flip_horizontally(&mut self) {
        let bpp = self.bytes_per_pixel();
        let stride = self.stride();
        if stride == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(stride) {
            // Reversing the whole row also reverses the bytes inside each
            // pixel; undo that per pixel.
            row.reverse();
            if bpp > 1 {
                for px in row.chunks_exact_mut(bpp) {
                    px.reverse();
                }
            }
        }
    }

    /// Mirror the image top-to-bottom in place by swapping whole rows.
    pub fn flip_vertically(&mut self) {
        let stride = self.stride();
        let height = self.height as usize;
        for y in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - y) * stride);
            top[y * stride..(y + 1) * stride].swap_with_slice(&mut bottom[..stride]);
        }
    }

    /// Rotate about the image center by `angle` degrees (clockwise on screen,
    /// since y grows downward).
    ///
    /// The output keeps the same dimensions. Each destination pixel center is
    /// rotated back by `-angle` and nearest-neighbor sampled; destinations whose
    /// source falls outside the image are left zeroed.
    pub fn rotate(&mut self, angle: f32) {
        if self.is_empty() {
            return;
        }
        let (sin, cos) = (angle as f64).to_radians().sin_cos();
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;
        let bpp = self.bytes_per_pixel();

        let mut rotated = PixelBuffer::new(self.width, self.height, self.format);
        for y in 0..self.height {
            let dy = y as f64 + 0.5 - cy;
            for x in 0..self.width {
                let dx = x as f64 + 0.5 - cx;
                let src_x = (cx + dx * cos + dy * sin).floor();
                let src_y = (cy - dx * sin + dy * cos).floor();
                if src_x < 0.0
                    || src_y < 0.0
                    || src_x >= self.width as f64
                    || src_y >= self.height as f64
                {
                    continue;
                }
                let src = self.pixel_index(src_x as u32, src_y as u32);
                let dst = rotated.pixel_index(x, y);
                rotated.data[dst..dst + bpp].copy_from_slice(&self.data[src..src + bpp]);
            }
        }
        *self = rotated;
    }

    /// Nearest-neighbor scale by independent factors.
    ///
    /// The target size is `round(width * scale_x)` by `round(height * scale_y)`;
    /// negative or non-finite factors collapse the axis to zero.
    pub fn scale(&mut self, scale_x: f32, scale_y: f32) {
        let target = |len: u32, factor: f32| {
            let scaled = (len as f64 * factor as f64).round();
            if scaled.is_finite() && scaled > 0.0 {
                scaled.min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        self.resize(target(self.width, scale_x), target(self.height, scale_y));
    }
}
