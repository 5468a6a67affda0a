//! JSON sidecar describing an atlas layout
//!
//! The image itself goes through an [`ImageCodec`](crate::codec::ImageCodec);
//! the manifest stores the region table next to it so the atlas can be rebuilt
//! without repacking.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AtlasError, Region, ShelfPacker, TextureAtlas};
use crate::buffer::PixelBuffer;
use crate::format::PixelFormat;

/// Serializable layout of a [`TextureAtlas`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasManifest {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub format: PixelFormat,
    pub regions: Vec<Region>,
}

impl TextureAtlas {
    /// Snapshot of the current layout
    pub fn manifest(&self) -> AtlasManifest {
        AtlasManifest {
            width: self.width(),
            height: self.height(),
            format: self.image.format(),
            regions: self.regions.clone(),
        }
    }

    /// Write the layout as pretty-printed JSON
    pub fn save_manifest(&self, path: &Path) -> Result<(), AtlasError> {
        let json = serde_json::to_string_pretty(&self.manifest())?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), regions = self.regions.len(), "saved atlas manifest");
        Ok(())
    }

    /// Rebuild an atlas from its image and layout.
    ///
    /// The image is converted to the manifest's format if needed. New textures
    /// are packed on a fresh shelf below the lowest existing region.
    ///
    /// # Errors
    ///
    /// - [`AtlasError::SizeMismatch`] if the image size differs from the manifest
    /// - [`AtlasError::InvalidRegion`] if a region leaves the image or overlaps
    ///   an earlier one
    /// - [`AtlasError::DuplicateName`] if two regions share a name
    pub fn from_parts(image: PixelBuffer, manifest: AtlasManifest) -> Result<Self, AtlasError> {
        let AtlasManifest {
            width,
            height,
            format,
            regions,
        } = manifest;
        if image.width() != width || image.height() != height {
            return Err(AtlasError::SizeMismatch {
                width,
                height,
                actual_width: image.width(),
                actual_height: image.height(),
            });
        }

        for (i, region) in regions.iter().enumerate() {
            let bounds = region.bounds;
            let overlaps = regions[..i].iter().any(|r| r.bounds.intersects(&bounds));
            if !bounds.fits_within(width, height) || overlaps {
                return Err(AtlasError::InvalidRegion {
                    name: region.name.clone(),
                    bounds,
                });
            }
            if regions[..i].iter().any(|r| r.name == region.name) {
                return Err(AtlasError::DuplicateName(region.name.clone()));
            }
        }

        let image = if image.format() == format {
            image
        } else {
            image.convert(format)
        };
        // bottom() is bounded by `height` after the fits_within check
        let floor = regions
            .iter()
            .map(|r| r.bounds.bottom() as u32)
            .max()
            .unwrap_or(0);

        let mut atlas = Self {
            image,
            regions,
            index: Default::default(),
            packer: ShelfPacker::starting_at(width, height, floor),
        };
        atlas.rebuild_index();
        Ok(atlas)
    }

    /// Read a JSON manifest and combine it with an already decoded image
    pub fn load_manifest(path: &Path, image: PixelBuffer) -> Result<Self, AtlasError> {
        let json = std::fs::read_to_string(path)?;
        let manifest: AtlasManifest = serde_json::from_str(&json)?;
        let atlas = Self::from_parts(image, manifest)?;
        tracing::debug!(path = %path.display(), regions = atlas.len(), "loaded atlas manifest");
        Ok(atlas)
    }
}
