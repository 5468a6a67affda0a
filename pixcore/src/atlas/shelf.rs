//! Incremental shelf packer
//!
//! Rectangles are placed left to right on the current shelf (row). When the
//! next rectangle would cross the right edge the shelf is closed and a new one
//! starts below it, at the height of the tallest rectangle on the closed shelf.
//! Each placement is O(1).

/// Packing cursor for one atlas extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShelfPacker {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    row_height: u32,
}

impl ShelfPacker {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: 0,
            y: 0,
            row_height: 0,
        }
    }

    /// Cursor that opens a fresh shelf at row `y`
    pub(crate) fn starting_at(width: u32, height: u32, y: u32) -> Self {
        Self {
            y: y.min(height),
            ..Self::new(width, height)
        }
    }

    /// Place a `w` x `h` rectangle, returning its origin.
    ///
    /// On failure the cursor is left untouched.
    pub(crate) fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        let (mut x, mut y, mut row_height) = (self.x, self.y, self.row_height);
        if x as u64 + w as u64 > self.width as u64 {
            x = 0;
            y += row_height;
            row_height = 0;
        }
        if w > self.width || y as u64 + h as u64 > self.height as u64 {
            return None;
        }
        self.x = x + w;
        self.y = y;
        self.row_height = row_height.max(h);
        Some((x, y))
    }
}
