//! Pointer-driven interaction with the crop rectangle.
//!
//! The host normalizes mouse and touch input into [`PointerEvent`]s once, at
//! its boundary; nothing in this crate branches on input device kind.
//!
//! Two controllers own the transient gesture state:
//! - [`DragController`] translates the rectangle
//! - [`ResizeController`] resizes it from the handle
//!
//! A gesture starting on the resize handle never reaches the drag
//! controller: [`hit_test`] reports the handle before the body, so the two
//! gestures are mutually exclusive by construction.

mod drag;
mod resize;

pub use drag::DragController;
pub use resize::{ResizeController, ResizeMode, ResizeOptions, DEFAULT_MIN_SIZE};

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Phase of a normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// Which part of the overlay a gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureTarget {
    /// The rectangle body: drag.
    Body,
    /// The resize affordance: resize.
    ResizeHandle,
}

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    /// Target of a `Start` event when the host did its own hit testing.
    /// `None` lets the session hit-test. Ignored for `Move` and `End`.
    #[serde(default)]
    pub target: Option<GestureTarget>,
}

impl PointerEvent {
    /// Gesture start, hit-tested by the session.
    pub fn start(position: Point) -> Self {
        Self {
            phase: PointerPhase::Start,
            position,
            target: None,
        }
    }

    /// Gesture start on a target the host already identified.
    pub fn start_on(position: Point, target: GestureTarget) -> Self {
        Self {
            phase: PointerPhase::Start,
            position,
            target: Some(target),
        }
    }

    pub fn moved(position: Point) -> Self {
        Self {
            phase: PointerPhase::Move,
            position,
            target: None,
        }
    }

    pub fn end(position: Point) -> Self {
        Self {
            phase: PointerPhase::End,
            position,
            target: None,
        }
    }
}

/// Bounds of the resize handle: a bar centered on the rectangle's bottom edge,
/// lying inside the rectangle.
pub fn handle_rect(rect: &Rect, handle: Size) -> Rect {
    Rect::new(
        rect.x + (rect.width - handle.width) / 2.0,
        rect.bottom() - handle.height,
        handle.width,
        handle.height,
    )
}

/// Find which part of the overlay `point` hits.
///
/// The handle is tested first so its area is excluded from the body.
pub fn hit_test(rect: &Rect, handle: Size, point: Point) -> Option<GestureTarget> {
    if handle_rect(rect, handle).contains(point) {
        Some(GestureTarget::ResizeHandle)
    } else if rect.contains(point) {
        Some(GestureTarget::Body)
    } else {
        None
    }
}
