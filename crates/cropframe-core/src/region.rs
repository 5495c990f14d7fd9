//! Source-region resolution: out-of-bounds policy and pixel snapping.
//!
//! A mapped crop rectangle may reach past the source image (the overlay was
//! dragged over a letterbox margin or off the preview). What happens then is
//! an explicit [`BoundsPolicy`] choice rather than an accident of the blit.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::Rect;

/// Slack, in source pixels, below which a region still counts as inside the image.
pub const BOUNDS_TOLERANCE: f64 = 1e-6;

/// What to do with a crop region that extends past the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Fail with `RegionOutOfBounds`.
    #[default]
    Reject,
    /// Crop only the part of the region that overlaps the image.
    Clamp,
    /// Keep the requested size; pixels outside the image are transparent.
    Pad,
}

/// Validate a source-space region against the image and apply `policy`.
///
/// # Errors
///
/// - `EmptySourceRegion` if the region has no area or does not overlap the image
/// - `RegionOutOfBounds` if it sticks out and `policy` is `Reject`
pub fn resolve_region(
    region: Rect,
    image_width: u32,
    image_height: u32,
    policy: BoundsPolicy,
) -> Result<Rect, CropError> {
    if region.is_empty() {
        return Err(CropError::EmptySourceRegion {
            width: region.width,
            height: region.height,
        });
    }

    let image = Rect::new(0.0, 0.0, image_width as f64, image_height as f64);
    let Some(overlap) = region.intersection(&image) else {
        return Err(CropError::EmptySourceRegion {
            width: 0.0,
            height: 0.0,
        });
    };

    if is_within(&region, image_width, image_height) {
        return Ok(region);
    }

    match policy {
        BoundsPolicy::Reject => Err(CropError::RegionOutOfBounds {
            region,
            image_width,
            image_height,
        }),
        BoundsPolicy::Clamp => Ok(overlap),
        BoundsPolicy::Pad => Ok(region),
    }
}

/// True if `region` lies inside a `width x height` image, within [`BOUNDS_TOLERANCE`].
pub fn is_within(region: &Rect, width: u32, height: u32) -> bool {
    region.x >= -BOUNDS_TOLERANCE
        && region.y >= -BOUNDS_TOLERANCE
        && region.right() <= width as f64 + BOUNDS_TOLERANCE
        && region.bottom() <= height as f64 + BOUNDS_TOLERANCE
}

/// A crop region snapped to whole source pixels.
///
/// The origin may be negative or past the image edge (padding); the size is
/// always at least 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRegion {
    /// Snap `region` to pixels: origin and size are each rounded.
    ///
    /// A region that lies inside the image before snapping stays inside it
    /// afterwards; rounding both origin and size can otherwise push the far
    /// edge one pixel out, so the origin is nudged back.
    ///
    /// # Errors
    ///
    /// Returns `EmptySourceRegion` if width or height rounds to zero.
    pub fn snap(region: Rect, image_width: u32, image_height: u32) -> Result<Self, CropError> {
        let width = region.width.round();
        let height = region.height.round();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(CropError::EmptySourceRegion {
                width: region.width,
                height: region.height,
            });
        }

        let mut x = region.x.round() as i64;
        let mut y = region.y.round() as i64;
        let width = width as u32;
        let height = height as u32;

        if is_within(&region, image_width, image_height) {
            let max_x = (image_width as i64 - width as i64).max(0);
            let max_y = (image_height as i64 - height as i64).max(0);
            x = x.clamp(0, max_x);
            y = y.clamp(0, max_y);
        }

        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
