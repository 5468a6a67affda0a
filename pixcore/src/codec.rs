//! Load/save seam for external image codecs
//!
//! Container formats (PNG, BMP, ...) are parsed by an [`ImageCodec`]
//! implementation supplied by the caller. This module only moves bytes between
//! the file system, the codec and [`PixelBuffer`].

use std::path::Path;

use crate::buffer::{BufferError, PixelBuffer};
use crate::format::PixelFormat;

/// Error type for loading or saving through a codec.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decoded pixel data is inconsistent: {0}")]
    Buffer(#[from] BufferError),

    #[error("codec error: {0}")]
    Codec(String),
}

/// Converts between an encoded byte stream and a [`PixelBuffer`]
pub trait ImageCodec {
    /// Decode a complete encoded image
    fn decode(&self, data: &[u8]) -> Result<PixelBuffer, CodecError>;

    /// Encode `image` into the codec's container format
    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, CodecError>;
}

/// Headerless codec: the stream is exactly the pixel bytes of an image whose
/// dimensions and format are known up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCodec {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl ImageCodec for RawCodec {
    fn decode(&self, data: &[u8]) -> Result<PixelBuffer, CodecError> {
        Ok(PixelBuffer::from_raw(
            self.width,
            self.height,
            self.format,
            data.to_vec(),
        )?)
    }

    fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, CodecError> {
        if image.width() != self.width || image.height() != self.height {
            return Err(CodecError::Codec(format!(
                "raw codec expects {}x{}, image is {}x{}",
                self.width,
                self.height,
                image.width(),
                image.height()
            )));
        }
        Ok(image.convert(self.format).into_bytes())
    }
}

impl PixelBuffer {
    /// Decode an image from an in-memory byte stream
    pub fn load_from_memory(data: &[u8], codec: &impl ImageCodec) -> Result<Self, CodecError> {
        codec.decode(data)
    }

    /// Read and decode an image file
    pub fn load_from_file(path: &Path, codec: &impl ImageCodec) -> Result<Self, CodecError> {
        let data = std::fs::read(path)?;
        let image = codec.decode(&data)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "loaded image"
        );
        Ok(image)
    }

    /// Encode and write this image to a file
    pub fn save_to_file(&self, path: &Path, codec: &impl ImageCodec) -> Result<(), CodecError> {
        let data = codec.encode(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
