//! Crop session WASM bindings.
//!
//! The host owns the DOM: it positions the overlay from the rectangle getters
//! and forwards pointer events (mouse and touch alike) as plain coordinates.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession();
//! session.configure({ aspectRatio: "1:1", encoding: { format: "png" } });
//!
//! const box = container.getBoundingClientRect();
//! session.set_source(image, box.left, box.top, box.width, box.height, "contain");
//!
//! overlay.onpointerdown = (e) => session.pointer_down(e.clientX, e.clientY);
//! window.onpointermove = (e) => {
//!   if (session.pointer_move(e.clientX, e.clientY)) redraw(session);
//! };
//! window.onpointerup = (e) => session.pointer_up(e.clientX, e.clientY);
//!
//! const out = session.crop();
//! ```

use cropframe_core::{
    AspectRatio, CropConfig, CropError, CropSession, DisplayGeometry, FillMode, GestureTarget,
    Point, PointerEvent, Rect, Size,
};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::{JsCropOutput, JsSourceImage};

/// Interactive crop session for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsCropSession, JsValue> {
        CropSession::new(CropConfig::default())
            .map(|inner| JsCropSession { inner })
            .map_err(to_js_error)
    }

    /// Replace the configuration with a camelCase config object.
    ///
    /// Omitted fields take their defaults, so `{}` restores the default config.
    ///
    /// # Errors
    /// Throws `InvalidConfig` for malformed or out-of-range values, and
    /// `InvalidState` while a gesture is in progress.
    pub fn configure(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: CropConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| to_js_error(CropError::InvalidConfig(e.to_string())))?;
        self.inner.configure(config).map_err(to_js_error)
    }

    /// Lock resizing to a ratio like `"16:9"`; an empty string unlocks it.
    pub fn set_aspect_ratio(&mut self, ratio: &str) -> Result<(), JsValue> {
        let ratio = parse_aspect_ratio(ratio).map_err(to_js_error)?;
        self.inner.set_aspect_ratio(ratio).map_err(to_js_error)
    }

    pub fn set_center_anchored(&mut self, center_anchored: bool) -> Result<(), JsValue> {
        self.inner
            .set_center_anchored(center_anchored)
            .map_err(to_js_error)
    }

    /// Load a source displayed in a container at the given viewport position.
    ///
    /// `fill_mode` is `"stretch"` for a live camera preview or `"contain"` for
    /// a gallery photo.
    pub fn set_source(
        &mut self,
        image: &JsSourceImage,
        container_x: f64,
        container_y: f64,
        container_width: f64,
        container_height: f64,
        fill_mode: &str,
    ) -> Result<(), JsValue> {
        if image.width() == 0 || image.height() == 0 {
            return Err(to_js_error(CropError::InvalidSource(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            ))));
        }
        let fill_mode: FillMode = fill_mode.parse().map_err(to_js_error)?;
        let geometry = DisplayGeometry::new(
            image.width(),
            image.height(),
            Size::new(container_width, container_height),
            Point::new(container_x, container_y),
            fill_mode,
        )
        .map_err(to_js_error)?;

        self.inner
            .set_source(image.to_source(), geometry)
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Place the rectangle directly, in viewport coordinates.
    pub fn set_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), JsValue> {
        self.inner
            .set_rect(Rect::new(x, y, width, height))
            .map_err(to_js_error)
    }

    /// Pointer pressed; the session decides between drag and resize.
    ///
    /// Returns `true` if a gesture started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        self.inner
            .handle_pointer(PointerEvent::start(Point::new(x, y)))
            .map(|rect| rect.is_some())
            .map_err(to_js_error)
    }

    /// Pointer pressed on an element the host already identified: the resize
    /// handle when `on_handle` is `true`, otherwise the rectangle body.
    pub fn pointer_down_on(&mut self, x: f64, y: f64, on_handle: bool) -> Result<bool, JsValue> {
        let target = if on_handle {
            GestureTarget::ResizeHandle
        } else {
            GestureTarget::Body
        };
        self.inner
            .handle_pointer(PointerEvent::start_on(Point::new(x, y), target))
            .map(|rect| rect.is_some())
            .map_err(to_js_error)
    }

    /// Returns `true` if the rectangle changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        self.inner
            .handle_pointer(PointerEvent::moved(Point::new(x, y)))
            .map(|rect| rect.is_some())
            .map_err(to_js_error)
    }

    /// Returns `true` if a gesture ended.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        self.inner
            .handle_pointer(PointerEvent::end(Point::new(x, y)))
            .map(|rect| rect.is_some())
            .map_err(to_js_error)
    }

    /// Abort the gesture in progress, restoring the rectangle it started from.
    ///
    /// Returns `true` if a gesture was cancelled.
    pub fn cancel_gesture(&mut self) -> bool {
        self.inner.cancel_gesture().is_some()
    }

    /// Crop the current selection. The session moves to `"cropped"`.
    pub fn crop(&mut self) -> Result<JsCropOutput, JsValue> {
        self.inner
            .crop()
            .map(JsCropOutput::from_output)
            .map_err(to_js_error)
    }

    /// Crop without changing the session state.
    pub fn preview(&self) -> Result<JsCropOutput, JsValue> {
        self.inner
            .preview()
            .map(JsCropOutput::from_output)
            .map_err(to_js_error)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.inner.reset().map_err(to_js_error)
    }

    /// `"awaitingSource"`, `"ready"` or `"cropped"`
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn gesture_active(&self) -> bool {
        self.inner.is_gesture_active()
    }

    /// Rectangle left edge in viewport coordinates, `undefined` without a source.
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> Option<f64> {
        self.inner.rect().map(|r| r.x)
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> Option<f64> {
        self.inner.rect().map(|r| r.y)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> Option<f64> {
        self.inner.rect().map(|r| r.width)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> Option<f64> {
        self.inner.rect().map(|r| r.height)
    }

    /// Current selection in source pixels as `[x, y, width, height]`.
    pub fn source_region(&self) -> Option<Vec<f64>> {
        self.inner
            .source_region()
            .map(|r| vec![r.x, r.y, r.width, r.height])
    }
}

fn parse_aspect_ratio(ratio: &str) -> Result<Option<AspectRatio>, CropError> {
    let ratio = ratio.trim();
    if ratio.is_empty() {
        return Ok(None);
    }
    ratio.parse().map(Some)
}
