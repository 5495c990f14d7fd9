//! Resizing of the crop rectangle from its handle.
//!
//! # Modes
//!
//! With `(dx, dy)` the cumulative pointer displacement since gesture start
//! and `(w0, h0)` the starting size:
//!
//! - **Unconstrained**: `w = max(min, w0 + dx)`, `h = max(min, h0 + dy)`
//! - **Uniform**: `s = max(min, max(w0, h0) + (dx + dy) / 2)`, and the
//!   result is always an `s` by `s` square
//! - **Aspect-locked**: width follows `dx`, height is derived from the ratio.
//!   If the derived height drops below the floor, height is pinned to the
//!   floor and width re-derived, so the ratio holds exactly at the boundary.
//!
//! The floor applies on every update, not only at gesture end.

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::geometry::{Point, Rect, Size};

/// Default minimum side length of the crop rectangle, in display units.
pub const DEFAULT_MIN_SIZE: f64 = 50.0;

/// How pointer displacement maps to a new size when no aspect ratio is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Each axis follows its own displacement.
    #[default]
    Unconstrained,
    /// One side length for both axes, driven by the mean displacement.
    Uniform,
}

/// Parameters fixed for the lifetime of a resize controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    pub min_size: f64,
    pub mode: ResizeMode,
    /// Takes precedence over `mode` when set.
    pub aspect_ratio: Option<AspectRatio>,
    /// Keep the rectangle's center fixed instead of its top-left corner.
    pub center_anchored: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            mode: ResizeMode::Unconstrained,
            aspect_ratio: None,
            center_anchored: false,
        }
    }
}

impl ResizeOptions {
    /// Size for a resize of `start` by `(dx, dy)`, floor applied.
    pub fn resized(&self, start: Size, dx: f64, dy: f64) -> Size {
        let min = self.min_size;

        if let Some(ratio) = self.aspect_ratio {
            return self.locked_size(ratio, start.width + dx);
        }

        match self.mode {
            ResizeMode::Unconstrained => Size::new(
                (start.width + dx).max(min),
                (start.height + dy).max(min),
            ),
            ResizeMode::Uniform => {
                // A non-square start grows from its longer side
                let side = (start.width.max(start.height) + (dx + dy) / 2.0).max(min);
                Size::new(side, side)
            }
        }
    }

    /// Ratio-exact size for a requested width, both sides at or above the floor.
    pub fn locked_size(&self, ratio: AspectRatio, requested_width: f64) -> Size {
        let min = self.min_size;
        let width = requested_width.max(min);
        let height = ratio.height_for(width);
        if height < min {
            Size::new(ratio.width_for(min), min)
        } else {
            Size::new(width, height)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum ResizeState {
    #[default]
    Idle,
    Resizing {
        pointer_origin: Point,
        start: Rect,
        /// Set only for center-anchored resizing.
        center: Option<Point>,
    },
}

/// Tracks a resize gesture on the rectangle's handle.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    options: ResizeOptions,
    state: ResizeState,
}

impl ResizeController {
    pub fn new(options: ResizeOptions) -> Self {
        Self {
            options,
            state: ResizeState::Idle,
        }
    }

    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    /// Begin resizing `rect` from `pointer`.
    ///
    /// Returns `false` (and changes nothing) if a resize is already in progress.
    pub fn start(&mut self, pointer: Point, rect: Rect) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = ResizeState::Resizing {
            pointer_origin: pointer,
            start: rect,
            center: self.options.center_anchored.then(|| rect.center()),
        };
        true
    }

    /// Rectangle for the current pointer position, or `None` when idle.
    pub fn update(&self, pointer: Point) -> Option<Rect> {
        let ResizeState::Resizing {
            pointer_origin,
            start,
            center,
        } = self.state
        else {
            return None;
        };

        let (dx, dy) = pointer.delta_from(pointer_origin);
        let size = self.options.resized(start.size(), dx, dy);

        Some(match center {
            Some(center) => Rect::centered_at(center, size),
            None => start.with_size(size),
        })
    }

    /// End the gesture, returning the gesture-start snapshot.
    pub fn end(&mut self) -> Option<Rect> {
        match std::mem::take(&mut self.state) {
            ResizeState::Idle => None,
            ResizeState::Resizing { start, .. } => Some(start),
        }
    }
}
