//! Translation of the crop rectangle.

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        pointer_origin: Point,
        start: Rect,
    },
}

/// Tracks a drag gesture on the rectangle body.
///
/// The new position is always computed from the gesture-start snapshot and
/// the cumulative pointer displacement, never accumulated frame by frame.
/// Size is never touched, and no bounds clamping is applied.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begin dragging `rect` from `pointer`.
    ///
    /// Returns `false` (and changes nothing) if a drag is already in progress.
    pub fn start(&mut self, pointer: Point, rect: Rect) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = DragState::Dragging {
            pointer_origin: pointer,
            start: rect,
        };
        true
    }

    /// Rectangle for the current pointer position, or `None` when idle.
    pub fn update(&self, pointer: Point) -> Option<Rect> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging {
                pointer_origin,
                start,
            } => {
                let (dx, dy) = pointer.delta_from(pointer_origin);
                Some(start.translate(dx, dy))
            }
        }
    }

    /// End the gesture, returning the gesture-start snapshot.
    pub fn end(&mut self) -> Option<Rect> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { start, .. } => Some(start),
        }
    }
}
