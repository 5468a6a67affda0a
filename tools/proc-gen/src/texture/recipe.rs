//! TOML texture recipes
//!
//! A recipe book names a set of generated textures:
//!
//! ```toml
//! [textures.floor]
//! kind = "checkerboard"
//! width = 32
//! height = 32
//! tile_size = 8
//! color1 = [40, 40, 40, 255]
//! color2 = [90, 90, 90, 255]
//!
//! [textures.clouds]
//! kind = "perlin"
//! width = 64
//! height = 32
//! scale = 4.0
//! seed = 7
//! ```
//!
//! [`RecipeBook::bake_atlas`] generates every entry and packs the results,
//! in name order, into one [`TextureAtlas`].

use std::collections::BTreeMap;

use pixcore::{AtlasError, Color, PixelBuffer, TextureAtlas};
use serde::{Deserialize, Serialize};

use super::{NoiseConfig, PerlinConfig, StarfieldConfig, patterns};

/// Errors from loading or baking a recipe book
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("invalid recipe TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to pack recipe output: {0}")]
    Atlas(#[from] AtlasError),
}

/// One generated texture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextureRecipe {
    Solid {
        width: u32,
        height: u32,
        color: Color,
    },
    Gradient {
        width: u32,
        height: u32,
        start: Color,
        end: Color,
        /// Direction in degrees (default: 0, left to right)
        #[serde(default)]
        angle: f32,
    },
    Checkerboard {
        width: u32,
        height: u32,
        tile_size: u32,
        color1: Color,
        color2: Color,
    },
    Circle {
        size: u32,
        fill: Color,
        outline: Color,
        /// Outline width in pixels (default: 1.0)
        #[serde(default = "default_thickness")]
        thickness: f32,
    },
    Noise {
        width: u32,
        height: u32,
        #[serde(default)]
        min: f32,
        #[serde(default = "default_one")]
        max: f32,
        #[serde(default)]
        seed: Option<u64>,
    },
    Perlin {
        width: u32,
        height: u32,
        #[serde(default = "default_one")]
        scale: f32,
        #[serde(default = "default_octaves")]
        octaves: u32,
        #[serde(default)]
        seed: Option<u64>,
    },
    Starfield {
        width: u32,
        height: u32,
        #[serde(default = "default_star_count")]
        star_count: u32,
        #[serde(default = "default_max_star_size")]
        max_star_size: f32,
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl TextureRecipe {
    /// Run the generator this recipe describes
    pub fn generate(&self) -> PixelBuffer {
        match *self {
            TextureRecipe::Solid { width, height, color } => patterns::solid(width, height, color),
            TextureRecipe::Gradient {
                width,
                height,
                start,
                end,
                angle,
            } => patterns::linear_gradient(width, height, start, end, angle),
            TextureRecipe::Checkerboard {
                width,
                height,
                tile_size,
                color1,
                color2,
            } => patterns::checkerboard(width, height, tile_size, color1, color2),
            TextureRecipe::Circle {
                size,
                fill,
                outline,
                thickness,
            } => patterns::circle(size, fill, outline, thickness),
            TextureRecipe::Noise {
                width,
                height,
                min,
                max,
                seed,
            } => NoiseConfig { min, max, seed }.generate(width, height),
            TextureRecipe::Perlin {
                width,
                height,
                scale,
                octaves,
                seed,
            } => PerlinConfig {
                scale,
                octaves,
                seed,
            }
            .generate(width, height),
            TextureRecipe::Starfield {
                width,
                height,
                star_count,
                max_star_size,
                seed,
            } => StarfieldConfig {
                star_count,
                max_star_size,
                seed,
            }
            .generate(width, height),
        }
    }
}

/// Named collection of texture recipes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeBook {
    #[serde(default)]
    pub textures: BTreeMap<String, TextureRecipe>,
}

impl RecipeBook {
    /// Parse a recipe book from TOML text
    pub fn from_toml(text: &str) -> Result<Self, RecipeError> {
        Ok(toml::from_str(text)?)
    }

    /// Generate every texture and pack them into a new RGBA atlas.
    ///
    /// # Errors
    ///
    /// Fails with [`RecipeError::Atlas`] on the first texture that does not fit.
    pub fn bake_atlas(&self, width: u32, height: u32) -> Result<TextureAtlas, RecipeError> {
        let mut atlas = TextureAtlas::new(width, height);
        for (name, recipe) in &self.textures {
            let image = recipe.generate();
            atlas.add_texture(name, &image)?;
        }
        tracing::debug!(textures = atlas.len(), width, height, "baked recipe atlas");
        Ok(atlas)
    }
}

fn default_thickness() -> f32 {
    1.0
}
fn default_one() -> f32 {
    1.0
}
fn default_octaves() -> u32 {
    4
}
fn default_star_count() -> u32 {
    100
}
fn default_max_star_size() -> f32 {
    3.0
}
