//! Crop session configuration.
//!
//! Hosts pass configuration as a camelCase object; every field has a default,
//! so `{}` and `{"aspectRatio": "16:9"}` are both complete configurations.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::encode::OutputEncoding;
use crate::error::CropError;
use crate::geometry::Size;
use crate::interaction::{ResizeMode, ResizeOptions, DEFAULT_MIN_SIZE};
use crate::raster::SurfaceLimits;
use crate::region::BoundsPolicy;

/// Configuration of a [`crate::session::CropSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Minimum side length of the crop rectangle, in display units.
    pub min_size: f64,
    /// Default rectangle size for camera (`stretch`) sources.
    pub camera_box_width: f64,
    pub camera_box_height: f64,
    /// Default rectangle size for gallery (`contain`) sources, as a fraction
    /// of the displayed image size.
    pub gallery_fraction: f64,
    /// Lock resizing to this ratio, e.g. `"1:1"` or `"16:9"`.
    pub aspect_ratio: Option<AspectRatio>,
    pub resize_mode: ResizeMode,
    /// Resize around the rectangle's center rather than its top-left corner.
    pub center_anchored: bool,
    pub bounds_policy: BoundsPolicy,
    pub encoding: OutputEncoding,
    pub surface_limits: SurfaceLimits,
    /// Size of the resize handle at the bottom center of the rectangle.
    pub handle_width: f64,
    pub handle_height: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            camera_box_width: 200.0,
            camera_box_height: 200.0,
            gallery_fraction: 0.5,
            aspect_ratio: None,
            resize_mode: ResizeMode::Unconstrained,
            center_anchored: false,
            bounds_policy: BoundsPolicy::Reject,
            encoding: OutputEncoding::Png,
            surface_limits: SurfaceLimits::default(),
            handle_width: 20.0,
            handle_height: 5.0,
        }
    }
}

impl CropConfig {
    /// Check that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), CropError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CropError::InvalidConfig(format!(
                    "{name} must be positive, got {v}"
                )))
            }
        };

        positive("minSize", self.min_size)?;
        positive("cameraBoxWidth", self.camera_box_width)?;
        positive("cameraBoxHeight", self.camera_box_height)?;
        positive("handleWidth", self.handle_width)?;
        positive("handleHeight", self.handle_height)?;

        if !(self.gallery_fraction > 0.0 && self.gallery_fraction <= 1.0) {
            return Err(CropError::InvalidConfig(format!(
                "galleryFraction must be in (0, 1], got {}",
                self.gallery_fraction
            )));
        }
        if self.surface_limits.max_edge == 0 || self.surface_limits.max_area == 0 {
            return Err(CropError::InvalidConfig(
                "surfaceLimits must be non-zero".to_string(),
            ));
        }
        if let OutputEncoding::Jpeg { quality } = self.encoding {
            if !(1..=100).contains(&quality) {
                return Err(CropError::InvalidConfig(format!(
                    "JPEG quality must be 1-100, got {quality}"
                )));
            }
        }
        Ok(())
    }

    /// Resize behavior derived from this configuration.
    pub fn resize_options(&self) -> ResizeOptions {
        ResizeOptions {
            min_size: self.min_size,
            mode: self.resize_mode,
            aspect_ratio: self.aspect_ratio,
            center_anchored: self.center_anchored,
        }
    }

    pub fn handle_size(&self) -> Size {
        Size::new(self.handle_width, self.handle_height)
    }
}
