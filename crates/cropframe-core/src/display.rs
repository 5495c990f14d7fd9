//! How a source image is presented inside its on-screen container.
//!
//! # Fill Modes
//!
//! - **Stretch**: the image exactly covers the container. Used for the live
//!   camera preview, whose capture resolution is chosen to match the
//!   viewport. Horizontal and vertical scales may differ.
//! - **Contain**: the image is scaled uniformly to fit inside the container
//!   and centered, leaving letterbox margins on one axis. Used for gallery
//!   photos.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::{Point, Rect, Size};

/// Presentation of the source image inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Image fills the container edge-to-edge.
    #[default]
    Stretch,
    /// Image is scaled to fit and centered, preserving its aspect ratio.
    Contain,
}

impl FillMode {
    /// The kind of source this presentation is used for.
    pub fn source_kind(self) -> SourceKind {
        match self {
            FillMode::Stretch => SourceKind::Camera,
            FillMode::Contain => SourceKind::Gallery,
        }
    }
}

impl std::str::FromStr for FillMode {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stretch" => Ok(FillMode::Stretch),
            "contain" => Ok(FillMode::Contain),
            other => Err(CropError::InvalidGeometry(format!(
                "unknown fill mode {other:?}, expected \"stretch\" or \"contain\""
            ))),
        }
    }
}

/// Where the cropped image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Camera,
    Gallery,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Camera => "camera",
            SourceKind::Gallery => "gallery",
        }
    }
}

/// Geometry of a source image displayed inside a container.
///
/// Construct with [`DisplayGeometry::new`], which guarantees a positive,
/// finite scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayGeometry {
    natural_width: u32,
    natural_height: u32,
    container_width: f64,
    container_height: f64,
    fill_mode: FillMode,
    /// Viewport position of the container's top-left corner.
    origin: Point,
}

impl DisplayGeometry {
    /// Describe an image of `natural_width x natural_height` pixels shown in a
    /// container of `container` display units whose top-left is at `origin`.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidGeometry` if any dimension is zero,
    /// negative or not finite.
    pub fn new(
        natural_width: u32,
        natural_height: u32,
        container: Size,
        origin: Point,
        fill_mode: FillMode,
    ) -> Result<Self, CropError> {
        if natural_width == 0 || natural_height == 0 {
            return Err(CropError::InvalidGeometry(format!(
                "natural size must be non-zero, got {natural_width}x{natural_height}"
            )));
        }
        let valid_extent = |v: f64| v.is_finite() && v > 0.0;
        if !valid_extent(container.width) || !valid_extent(container.height) {
            return Err(CropError::InvalidGeometry(format!(
                "container size must be positive, got {}x{}",
                container.width, container.height
            )));
        }
        if !(origin.x.is_finite() && origin.y.is_finite()) {
            return Err(CropError::InvalidGeometry(format!(
                "container origin must be finite, got ({}, {})",
                origin.x, origin.y
            )));
        }

        Ok(Self {
            natural_width,
            natural_height,
            container_width: container.width,
            container_height: container.height,
            fill_mode,
            origin,
        })
    }

    pub fn natural_width(&self) -> u32 {
        self.natural_width
    }

    pub fn natural_height(&self) -> u32 {
        self.natural_height
    }

    pub fn natural_size(&self) -> Size {
        Size::new(self.natural_width as f64, self.natural_height as f64)
    }

    pub fn container_size(&self) -> Size {
        Size::new(self.container_width, self.container_height)
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Uniform display scale. Always 1 under `Stretch`.
    pub fn scale(&self) -> f64 {
        match self.fill_mode {
            FillMode::Stretch => 1.0,
            FillMode::Contain => (self.container_width / self.natural_width as f64)
                .min(self.container_height / self.natural_height as f64),
        }
    }

    /// On-screen size of the image.
    ///
    /// Under `Stretch` the image is taken to cover the container exactly.
    pub fn displayed_size(&self) -> Size {
        match self.fill_mode {
            FillMode::Stretch => self.container_size(),
            FillMode::Contain => {
                let scale = self.scale();
                Size::new(
                    self.natural_width as f64 * scale,
                    self.natural_height as f64 * scale,
                )
            }
        }
    }

    /// Letterbox offset of the displayed image inside the container.
    pub fn offset(&self) -> Point {
        match self.fill_mode {
            FillMode::Stretch => Point::zero(),
            FillMode::Contain => {
                let displayed = self.displayed_size();
                Point::new(
                    (self.container_width - displayed.width) / 2.0,
                    (self.container_height - displayed.height) / 2.0,
                )
            }
        }
    }

    /// Container bounds in viewport coordinates.
    pub fn container_rect(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.container_width,
            self.container_height,
        )
    }

    /// Displayed image bounds in viewport coordinates.
    pub fn displayed_rect(&self) -> Rect {
        let offset = self.offset();
        let displayed = self.displayed_size();
        Rect::new(
            self.origin.x + offset.x,
            self.origin.y + offset.y,
            displayed.width,
            displayed.height,
        )
    }

    /// Map a viewport rectangle into source-pixel space.
    pub fn to_source(&self, rect: Rect) -> Rect {
        crate::mapping::map_to_source(rect, self.origin, self)
    }

    /// Map a source-pixel rectangle back into viewport space.
    pub fn to_display(&self, rect: Rect) -> Rect {
        crate::mapping::map_from_source(rect, self.origin, self)
    }
}
