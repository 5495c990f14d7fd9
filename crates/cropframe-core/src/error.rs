//! Error type for the crop engine.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::geometry::Rect;

/// Errors surfaced by the crop session and its pipeline stages.
///
/// None of these are retried internally. A failed `crop()` leaves the
/// session `Ready` so the user can adjust the rectangle and try again.
#[derive(Debug, Error)]
pub enum CropError {
    /// The source image is empty, undecodable, or inconsistent with its geometry.
    #[error("Invalid source image: {0}")]
    InvalidSource(String),

    /// The container or natural size cannot produce a positive scale.
    #[error("Invalid display geometry: {0}")]
    InvalidGeometry(String),

    /// The mapped crop rectangle has no area inside the source image.
    #[error("Crop region is empty ({width} x {height} source pixels)")]
    EmptySourceRegion { width: f64, height: f64 },

    /// The mapped crop rectangle extends past the source image edges.
    #[error(
        "Crop region {region:?} extends beyond the {image_width}x{image_height} source image"
    )]
    RegionOutOfBounds {
        region: Rect,
        image_width: u32,
        image_height: u32,
    },

    /// No drawing surface could be acquired for the output raster.
    #[error("Rasterization surface unavailable: {0}")]
    RasterizationUnavailable(String),

    /// The operation is not valid in the session's current state.
    #[error("Cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// A configuration value is out of range or malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The extracted raster could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CropError {
    /// Stable name of the error kind, used as the error name across the JS boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            CropError::InvalidSource(_) => "InvalidSource",
            CropError::InvalidGeometry(_) => "InvalidGeometry",
            CropError::EmptySourceRegion { .. } => "EmptySourceRegion",
            CropError::RegionOutOfBounds { .. } => "RegionOutOfBounds",
            CropError::RasterizationUnavailable(_) => "RasterizationUnavailable",
            CropError::InvalidState { .. } => "InvalidState",
            CropError::InvalidConfig(_) => "InvalidConfig",
            CropError::Encode(_) => "EncodingFailed",
        }
    }
}

impl From<DecodeError> for CropError {
    fn from(err: DecodeError) -> Self {
        CropError::InvalidSource(err.to_string())
    }
}
