//! Rasterization of a source-pixel region into an encoded output image.
//!
//! The region handed to a [`Rasterizer`] is already in the image's own pixel
//! space. No scaling happens here: the output is exactly
//! `round(width) x round(height)` and pixels are copied 1:1.

use serde::{Deserialize, Serialize};

use crate::decode::{SourceImage, CHANNELS};
use crate::encode::{EncodedImage, OutputEncoding};
use crate::error::CropError;
use crate::geometry::Rect;
use crate::region::PixelRegion;

/// Pixel value written where the region lies outside the source image.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Turns a source-pixel region of an image into encoded bytes.
pub trait Rasterizer {
    /// Extract `region` from `image` and encode it.
    ///
    /// # Errors
    ///
    /// - `EmptySourceRegion` if the region has no pixels after snapping
    /// - `RasterizationUnavailable` if no output surface can be acquired
    fn rasterize(&self, image: &SourceImage, region: Rect) -> Result<EncodedImage, CropError>;
}

/// Largest output surface the rasterizer will allocate.
///
/// Defaults mirror common browser canvas limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceLimits {
    /// Maximum width or height in pixels.
    pub max_edge: u32,
    /// Maximum width * height in pixels.
    pub max_area: u64,
}

impl Default for SurfaceLimits {
    fn default() -> Self {
        Self {
            max_edge: 16_384,
            max_area: 16_384 * 16_384,
        }
    }
}

impl SurfaceLimits {
    fn check(&self, region: &PixelRegion) -> Result<(), CropError> {
        if region.width > self.max_edge || region.height > self.max_edge {
            return Err(CropError::RasterizationUnavailable(format!(
                "{}x{} surface exceeds the maximum edge of {} pixels",
                region.width, region.height, self.max_edge
            )));
        }
        if region.pixel_count() > self.max_area {
            return Err(CropError::RasterizationUnavailable(format!(
                "{}x{} surface exceeds the maximum area of {} pixels",
                region.width, region.height, self.max_area
            )));
        }
        Ok(())
    }
}

/// Default rasterizer: CPU copy into an RGBA buffer, then encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageRasterizer {
    pub limits: SurfaceLimits,
    pub encoding: OutputEncoding,
}

impl ImageRasterizer {
    pub fn new(limits: SurfaceLimits, encoding: OutputEncoding) -> Self {
        Self { limits, encoding }
    }
}

impl Rasterizer for ImageRasterizer {
    fn rasterize(&self, image: &SourceImage, region: Rect) -> Result<EncodedImage, CropError> {
        let pixels = extract_region(image, region, &self.limits)?;
        let (width, height) = (pixels.width(), pixels.height());
        let bytes = self.encoding.encode(pixels.pixels(), width, height)?;

        Ok(EncodedImage {
            bytes,
            encoding: self.encoding,
            width,
            height,
        })
    }
}

/// Copy the pixels under `region` into a new RGBA image.
///
/// Pixels outside the source image are [`TRANSPARENT`].
pub fn extract_region(
    image: &SourceImage,
    region: Rect,
    limits: &SurfaceLimits,
) -> Result<SourceImage, CropError> {
    if region.is_empty() {
        return Err(CropError::EmptySourceRegion {
            width: region.width,
            height: region.height,
        });
    }

    let px = PixelRegion::snap(region, image.width(), image.height())?;
    limits.check(&px)?;

    let out_stride = surface_len(px.width, 1)?;
    let len = surface_len(px.width, px.height)?;
    let mut output = Vec::new();
    output.try_reserve_exact(len).map_err(|e| {
        CropError::RasterizationUnavailable(format!(
            "cannot allocate {}x{} surface: {e}",
            px.width, px.height
        ))
    })?;
    output.resize(len, 0);

    // Horizontal span of the output that overlaps the source
    let src_w = image.width() as i64;
    let src_h = image.height() as i64;
    let col_start = (-px.x).clamp(0, px.width as i64);
    let col_end = (src_w - px.x).clamp(0, px.width as i64);

    if col_end > col_start {
        let src_stride = image.row_stride();
        let span = (col_end - col_start) as usize * CHANNELS;
        let src = image.pixels();

        // Copy pixel data row by row
        for y in 0..px.height as i64 {
            let src_y = px.y + y;
            if src_y < 0 || src_y >= src_h {
                continue;
            }
            let src_start = src_y as usize * src_stride + (px.x + col_start) as usize * CHANNELS;
            let dst_start = y as usize * out_stride + col_start as usize * CHANNELS;
            output[dst_start..dst_start + span].copy_from_slice(&src[src_start..src_start + span]);
        }
    }

    SourceImage::new(px.width, px.height, output)
}

/// Byte length of a `width x height` RGBA buffer.
fn surface_len(width: u32, height: u32) -> Result<usize, CropError> {
    (width as usize)
        .checked_mul(CHANNELS)
        .and_then(|stride| stride.checked_mul(height as usize))
        .ok_or_else(|| {
            CropError::RasterizationUnavailable(format!(
                "{width}x{height} surface does not fit in memory"
            ))
        })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
