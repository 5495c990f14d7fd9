//! Output encoding for cropped rasters.
//!
//! The encoded container format is a configuration choice ([`OutputEncoding`]),
//! not something the engine ever parses back.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray, opaque
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default JPEG quality when JPEG output is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Errors that can occur while encoding output.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Container format of the cropped output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputEncoding {
    /// Lossless PNG with alpha.
    #[default]
    Png,
    /// Lossy JPEG, alpha dropped.
    Jpeg {
        #[serde(default = "default_jpeg_quality")]
        quality: u8,
    },
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl OutputEncoding {
    /// Short format name, as reported to the host (`"png"`, `"jpeg"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputEncoding::Png => "png",
            OutputEncoding::Jpeg { .. } => "jpeg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputEncoding::Png => "image/png",
            OutputEncoding::Jpeg { .. } => "image/jpeg",
        }
    }

    /// File extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputEncoding::Png => ".png",
            OutputEncoding::Jpeg { .. } => ".jpg",
        }
    }

    /// Encode RGBA pixels in this format.
    pub fn encode(&self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
        match *self {
            OutputEncoding::Png => encode_png(pixels, width, height),
            OutputEncoding::Jpeg { quality } => encode_jpeg(pixels, width, height, quality),
        }
    }
}

/// An encoded output raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub encoding: OutputEncoding,
    pub width: u32,
    pub height: u32,
}
