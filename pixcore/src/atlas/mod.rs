//! Texture atlas
//!
//! A [`TextureAtlas`] owns one fixed-size [`PixelBuffer`] and packs many small
//! images into it with a shelf heuristic, so a renderer can draw all of them
//! from a single bound texture. Regions are looked up by name.
//!
//! ```
//! use pixcore::{Color, PixelBuffer, PixelFormat, Rect, TextureAtlas};
//!
//! let mut atlas = TextureAtlas::new(64, 64);
//! let icon = PixelBuffer::filled(16, 16, PixelFormat::Rgba, Color::RED);
//! atlas.add_texture("icon", &icon)?;
//! assert_eq!(atlas.get_region("icon"), Some(Rect::new(0, 0, 16, 16)));
//! # Ok::<(), pixcore::AtlasError>(())
//! ```

mod manifest;
mod shelf;

pub use manifest::AtlasManifest;

use glam::IVec2;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::format::PixelFormat;
use crate::rect::Rect;
use shelf::ShelfPacker;

/// Error type for atlas operations.
///
/// A failed call never modifies the atlas.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("region '{0}' already exists")]
    DuplicateName(String),

    #[error("no room for {width}x{height} texture '{name}'")]
    OutOfSpace {
        name: String,
        width: u32,
        height: u32,
    },

    #[error("region '{0}' not found")]
    NotFound(String),

    #[error("region '{name}' at {bounds:?} lies outside the atlas or overlaps another region")]
    InvalidRegion { name: String, bounds: Rect },

    #[error("atlas image is {actual_width}x{actual_height}, manifest expects {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("manifest I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Named rectangle inside the atlas image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub bounds: Rect,
}

/// Fixed-size image holding many named sub-images
#[derive(Debug, Clone)]
pub struct TextureAtlas {
    image: PixelBuffer,
    regions: Vec<Region>,
    index: HashMap<String, usize>,
    packer: ShelfPacker,
}

impl TextureAtlas {
    /// Create an empty RGBA atlas
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_format(width, height, PixelFormat::Rgba)
    }

    /// Create an empty atlas with a specific storage format
    pub fn with_format(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            image: PixelBuffer::new(width, height, format),
            regions: Vec::new(),
            index: HashMap::new(),
            packer: ShelfPacker::new(width, height),
        }
    }

    /// Atlas width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Atlas height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The packed atlas image
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// All regions in insertion (or last repack) order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Number of packed regions
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when no region is packed
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// True when a region named `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Pack `texture` into the atlas under `name` and return its bounds.
    ///
    /// The texture goes at the shelf cursor, wrapping to a new shelf when it
    /// would cross the right edge. Its pixels are converted to the atlas format.
    ///
    /// # Errors
    ///
    /// - [`AtlasError::DuplicateName`] if `name` is already registered
    /// - [`AtlasError::OutOfSpace`] if the texture does not fit below the
    ///   current shelf; the atlas is never resized
    pub fn add_texture(&mut self, name: &str, texture: &PixelBuffer) -> Result<Rect, AtlasError> {
        if self.index.contains_key(name) {
            return Err(AtlasError::DuplicateName(name.to_string()));
        }
        let (width, height) = (texture.width(), texture.height());
        let Some((x, y)) = self.packer.place(width, height) else {
            tracing::warn!(
                name,
                width,
                height,
                atlas_width = self.width(),
                atlas_height = self.height(),
                "texture does not fit in atlas"
            );
            return Err(AtlasError::OutOfSpace {
                name: name.to_string(),
                width,
                height,
            });
        };

        self.image.copy(texture, IVec2::new(x as i32, y as i32));
        let bounds = Rect::new(x, y, width, height);
        self.index.insert(name.to_string(), self.regions.len());
        self.regions.push(Region {
            name: name.to_string(),
            bounds,
        });
        tracing::debug!(name, x, y, width, height, "packed texture");
        Ok(bounds)
    }

    /// Bounds of the region registered under `name`
    pub fn get_region(&self, name: &str) -> Option<Rect> {
        self.region(name).map(|region| region.bounds)
    }

    /// Full region record registered under `name`
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.index.get(name).map(|&i| &self.regions[i])
    }

    /// Normalized texture coordinates `[u0, v0, u1, v1]` of a region
    pub fn uv_rect(&self, name: &str) -> Option<[f32; 4]> {
        let bounds = self.get_region(name)?;
        let (w, h) = (self.width() as f32, self.height() as f32);
        Some([
            bounds.x as f32 / w,
            bounds.y as f32 / h,
            bounds.right() as f32 / w,
            bounds.bottom() as f32 / h,
        ])
    }

    /// Copy of the pixels of one region
    pub fn texture(&self, name: &str) -> Option<PixelBuffer> {
        self.get_region(name).map(|bounds| self.image.crop(bounds))
    }

    /// Remove a region and clear its pixels to transparent.
    ///
    /// The freed space is not reused until the next [`optimize`](Self::optimize).
    pub fn remove_texture(&mut self, name: &str) -> Result<Region, AtlasError> {
        let Some(position) = self.index.get(name).copied() else {
            return Err(AtlasError::NotFound(name.to_string()));
        };
        let region = self.regions.remove(position);
        self.image.fill_rect(region.bounds, Color::TRANSPARENT);
        self.rebuild_index();
        tracing::debug!(name, "removed texture");
        Ok(region)
    }

    /// Repack every region, tallest first, into a fresh image of the same size.
    ///
    /// Names and pixel content are preserved; bounds are rewritten. Regions of
    /// equal height keep their current relative order, so optimizing an
    /// already optimized atlas produces the same layout.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::OutOfSpace`] naming the first region that no
    /// longer fits; the atlas is left as it was.
    pub fn optimize(&mut self) -> Result<(), AtlasError> {
        let mut order: Vec<&Region> = self.regions.iter().collect();
        order.sort_by(|a, b| b.bounds.height.cmp(&a.bounds.height));

        let mut packer = ShelfPacker::new(self.width(), self.height());
        let mut image = PixelBuffer::new(self.width(), self.height(), self.image.format());
        let mut packed = Vec::with_capacity(order.len());
        for region in order {
            let Rect { width, height, .. } = region.bounds;
            let Some((x, y)) = packer.place(width, height) else {
                tracing::warn!(name = %region.name, width, height, "repack does not fit in atlas");
                return Err(AtlasError::OutOfSpace {
                    name: region.name.clone(),
                    width,
                    height,
                });
            };
            image.copy_rect(&self.image, region.bounds, IVec2::new(x as i32, y as i32));
            packed.push(Region {
                name: region.name.clone(),
                bounds: Rect::new(x, y, width, height),
            });
        }

        self.image = image;
        self.regions = packed;
        self.packer = packer;
        self.rebuild_index();
        tracing::debug!(regions = self.regions.len(), "optimized atlas");
        Ok(())
    }

    /// Drop every region and blank the image (size and format are kept)
    pub fn clear(&mut self) {
        let (width, height, format) = (self.width(), self.height(), self.image.format());
        self.image.create(width, height, format);
        self.regions.clear();
        self.index.clear();
        self.packer = ShelfPacker::new(width, height);
        tracing::debug!("cleared atlas");
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .regions
            .iter()
            .enumerate()
            .map(|(i, region)| (region.name.clone(), i))
            .collect();
    }
}
