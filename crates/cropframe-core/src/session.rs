//! The crop session: source, overlay rectangle, gestures and the crop itself.
//!
//! ```text
//!                 set_source                 crop (ok)
//! AwaitingSource ───────────► Ready ───────────────────► Cropped
//!       ▲                       │  ▲  pointer / set_rect     │
//!       │         reset         │  └──┘                      │
//!       └───────────────────────┴────────────────────────────┘
//! ```
//!
//! `set_source` is accepted from every state and restarts the session with
//! the default rectangle for the new source. A failed crop leaves the session
//! `Ready` with its rectangle untouched.

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::decode::SourceImage;
use crate::display::{DisplayGeometry, FillMode, SourceKind};
use crate::encode::EncodedImage;
use crate::error::CropError;
use crate::geometry::{Point, Rect, Size};
use crate::interaction::{
    hit_test, DragController, GestureTarget, PointerEvent, PointerPhase, ResizeController,
};
use crate::raster::{ImageRasterizer, Rasterizer};
use crate::region::resolve_region;

/// Lifecycle state of a [`CropSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingSource,
    Ready,
    Cropped,
}

impl SessionState {
    /// Name used in error messages and by the host bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::AwaitingSource => "awaitingSource",
            SessionState::Ready => "ready",
            SessionState::Cropped => "cropped",
        }
    }
}

/// Result of a successful crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropOutput {
    pub image: EncodedImage,
    pub source_kind: SourceKind,
}

impl CropOutput {
    pub fn bytes(&self) -> &[u8] {
        &self.image.bytes
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Suggested file name, e.g. `IMG_1700000000000.png`.
    pub fn file_name(&self, timestamp_ms: u64) -> String {
        format!("IMG_{timestamp_ms}{}", self.image.encoding.extension())
    }
}

#[derive(Debug, Clone)]
struct Loaded {
    image: SourceImage,
    geometry: DisplayGeometry,
    /// Overlay rectangle in viewport coordinates.
    rect: Rect,
}

/// Interactive crop session over one source image at a time.
#[derive(Debug)]
pub struct CropSession<R: Rasterizer = ImageRasterizer> {
    config: CropConfig,
    rasterizer: R,
    state: SessionState,
    source: Option<Loaded>,
    drag: DragController,
    resize: ResizeController,
}

impl CropSession<ImageRasterizer> {
    /// Create a session with the default rasterizer.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidConfig` if `config` does not validate.
    pub fn new(config: CropConfig) -> Result<Self, CropError> {
        let rasterizer = ImageRasterizer::new(config.surface_limits, config.encoding);
        Self::with_rasterizer(config, rasterizer)
    }

    /// Replace the configuration, including output encoding and surface limits.
    pub fn configure(&mut self, config: CropConfig) -> Result<(), CropError> {
        let rasterizer = ImageRasterizer::new(config.surface_limits, config.encoding);
        self.set_config(config)?;
        self.rasterizer = rasterizer;
        Ok(())
    }
}

impl<R: Rasterizer> CropSession<R> {
    pub fn with_rasterizer(config: CropConfig, rasterizer: R) -> Result<Self, CropError> {
        config.validate()?;
        Ok(Self {
            resize: ResizeController::new(config.resize_options()),
            drag: DragController::new(),
            config,
            rasterizer,
            state: SessionState::AwaitingSource,
            source: None,
        })
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Replace the interaction configuration.
    ///
    /// The current rectangle is kept as is; new limits apply from the next
    /// gesture.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if `config` does not validate
    /// - `InvalidState` while a gesture is in progress
    pub fn set_config(&mut self, config: CropConfig) -> Result<(), CropError> {
        if self.is_gesture_active() {
            return Err(self.invalid_state("reconfigure"));
        }
        config.validate()?;
        self.resize = ResizeController::new(config.resize_options());
        self.config = config;
        log::debug!("Crop session reconfigured");
        Ok(())
    }

    pub fn set_aspect_ratio(&mut self, ratio: Option<AspectRatio>) -> Result<(), CropError> {
        let mut config = self.config.clone();
        config.aspect_ratio = ratio;
        self.set_config(config)
    }

    pub fn set_center_anchored(&mut self, center_anchored: bool) -> Result<(), CropError> {
        let mut config = self.config.clone();
        config.center_anchored = center_anchored;
        self.set_config(config)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current overlay rectangle in viewport coordinates.
    pub fn rect(&self) -> Option<Rect> {
        self.source.as_ref().map(|loaded| loaded.rect)
    }

    pub fn geometry(&self) -> Option<&DisplayGeometry> {
        self.source.as_ref().map(|loaded| &loaded.geometry)
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.source.as_ref().map(|loaded| &loaded.image)
    }

    /// The current rectangle mapped into source pixels, before bounds handling.
    pub fn source_region(&self) -> Option<Rect> {
        self.source
            .as_ref()
            .map(|loaded| loaded.geometry.to_source(loaded.rect))
    }

    pub fn is_gesture_active(&self) -> bool {
        self.drag.is_active() || self.resize.is_active()
    }

    /// Load a new source and place the default rectangle for it.
    ///
    /// Any gesture in progress is discarded. Returns the new rectangle.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidSource` if the image has no pixels or its
    /// size differs from the geometry's natural size.
    pub fn set_source(
        &mut self,
        image: SourceImage,
        geometry: DisplayGeometry,
    ) -> Result<Rect, CropError> {
        if image.is_empty() {
            return Err(logged(CropError::InvalidSource(format!(
                "image has zero dimensions ({}x{})",
                image.width(),
                image.height()
            ))));
        }
        if image.width() != geometry.natural_width() || image.height() != geometry.natural_height()
        {
            return Err(logged(CropError::InvalidSource(format!(
                "image is {}x{} but geometry expects {}x{}",
                image.width(),
                image.height(),
                geometry.natural_width(),
                geometry.natural_height()
            ))));
        }

        self.detach_gesture();
        let rect = default_rect(&self.config, &geometry);
        log::debug!(
            "Source set: {}x{} {:?}, default rect {:?}",
            image.width(),
            image.height(),
            geometry.fill_mode(),
            rect
        );
        self.source = Some(Loaded {
            image,
            geometry,
            rect,
        });
        self.state = SessionState::Ready;
        Ok(rect)
    }

    /// Place the rectangle directly, ending any gesture in progress.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is `Ready`
    /// - `InvalidGeometry` if either side is below the minimum size or not finite
    pub fn set_rect(&mut self, rect: Rect) -> Result<(), CropError> {
        if self.state != SessionState::Ready {
            return Err(logged(self.invalid_state("place the crop rectangle")));
        }
        let min = self.config.min_size;
        let finite = [rect.x, rect.y, rect.width, rect.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || rect.width < min || rect.height < min {
            return Err(logged(CropError::InvalidGeometry(format!(
                "crop rectangle {}x{} is below the minimum size of {min}",
                rect.width, rect.height
            ))));
        }

        self.detach_gesture();
        if let Some(loaded) = self.source.as_mut() {
            loaded.rect = rect;
        }
        Ok(())
    }

    /// Feed a normalized pointer event.
    ///
    /// Returns the rectangle after the event, or `None` when the event had
    /// no effect (a start outside the rectangle, or a move with no gesture).
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidState` for a `Start` while the session is
    /// not `Ready` or while another gesture is in progress.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Option<Rect>, CropError> {
        match event.phase {
            PointerPhase::Start => self.begin_gesture(event.position, event.target),
            PointerPhase::Move => Ok(self.update_gesture(event.position)),
            PointerPhase::End => Ok(self.end_gesture()),
        }
    }

    fn begin_gesture(
        &mut self,
        position: Point,
        target: Option<GestureTarget>,
    ) -> Result<Option<Rect>, CropError> {
        if self.state != SessionState::Ready || self.is_gesture_active() {
            return Err(logged(self.invalid_state("start a gesture")));
        }
        let Some(rect) = self.rect() else {
            return Err(logged(self.invalid_state("start a gesture")));
        };

        let target = target.or_else(|| hit_test(&rect, self.config.handle_size(), position));
        let started = match target {
            Some(GestureTarget::Body) => self.drag.start(position, rect),
            Some(GestureTarget::ResizeHandle) => self.resize.start(position, rect),
            None => return Ok(None),
        };
        if started {
            log::debug!("Gesture {target:?} started at ({}, {})", position.x, position.y);
        }
        Ok(Some(rect))
    }

    fn update_gesture(&mut self, position: Point) -> Option<Rect> {
        let rect = if self.drag.is_active() {
            self.drag.update(position)
        } else {
            self.resize.update(position)
        }?;

        let loaded = self.source.as_mut()?;
        loaded.rect = rect;
        Some(rect)
    }

    /// Ends the active gesture, keeping its last rectangle.
    fn end_gesture(&mut self) -> Option<Rect> {
        self.detach_gesture()?;
        log::debug!("Gesture ended with {:?}", self.rect());
        self.rect()
    }

    /// End the gesture in progress and restore the rectangle it started from.
    ///
    /// Returns the restored rectangle, or `None` if no gesture was active.
    pub fn cancel_gesture(&mut self) -> Option<Rect> {
        let snapshot = self.detach_gesture()?;
        if let Some(loaded) = self.source.as_mut() {
            loaded.rect = snapshot;
        }
        log::debug!("Gesture cancelled, restored {snapshot:?}");
        Some(snapshot)
    }

    /// Idle both controllers, returning the start snapshot of the one that was active.
    fn detach_gesture(&mut self) -> Option<Rect> {
        let dragged = self.drag.end();
        let resized = self.resize.end();
        dragged.or(resized)
    }

    /// Crop the source under the current rectangle.
    ///
    /// Ends any gesture in progress first. On success the session moves to
    /// `Cropped`; on failure it stays `Ready`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is `Ready`
    /// - `EmptySourceRegion`, `RegionOutOfBounds` from region resolution
    /// - `RasterizationUnavailable`, `Encode` from the rasterizer
    pub fn crop(&mut self) -> Result<CropOutput, CropError> {
        if self.state != SessionState::Ready {
            return Err(logged(self.invalid_state("crop")));
        }
        self.detach_gesture();

        let output = self.render().map_err(logged)?;
        self.state = SessionState::Cropped;
        log::info!(
            "Cropped {}x{} {} from {} source",
            output.width(),
            output.height(),
            output.image.encoding.as_str(),
            output.source_kind.as_str()
        );
        Ok(output)
    }

    /// Run the crop pipeline without changing state.
    ///
    /// Available in `Ready` and `Cropped`. A gesture in progress is left
    /// running and its current rectangle is used.
    pub fn preview(&self) -> Result<CropOutput, CropError> {
        if self.state == SessionState::AwaitingSource {
            return Err(logged(self.invalid_state("preview")));
        }
        self.render().map_err(logged)
    }

    fn render(&self) -> Result<CropOutput, CropError> {
        let loaded = self
            .source
            .as_ref()
            .ok_or_else(|| self.invalid_state("crop"))?;

        let mapped = loaded.geometry.to_source(loaded.rect);
        let region = resolve_region(
            mapped,
            loaded.image.width(),
            loaded.image.height(),
            self.config.bounds_policy,
        )?;
        log::debug!("Rect {:?} maps to source region {:?}", loaded.rect, region);

        let image = self.rasterizer.rasterize(&loaded.image, region)?;
        Ok(CropOutput {
            image,
            source_kind: loaded.geometry.fill_mode().source_kind(),
        })
    }

    /// Discard the source and return to `AwaitingSource`.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidState` if there is no source to discard.
    pub fn reset(&mut self) -> Result<(), CropError> {
        if self.state == SessionState::AwaitingSource {
            return Err(logged(self.invalid_state("reset")));
        }
        self.detach_gesture();
        self.source = None;
        self.state = SessionState::AwaitingSource;
        log::debug!("Crop session reset");
        Ok(())
    }

    fn invalid_state(&self, operation: &'static str) -> CropError {
        let state = if self.drag.is_active() {
            "dragging"
        } else if self.resize.is_active() {
            "resizing"
        } else {
            self.state.as_str()
        };
        CropError::InvalidState { operation, state }
    }
}

fn logged(err: CropError) -> CropError {
    log::warn!("{}: {err}", err.kind());
    err
}

/// Default rectangle for a freshly loaded source, centered in the container.
fn default_rect(config: &CropConfig, geometry: &DisplayGeometry) -> Rect {
    let size = match geometry.fill_mode() {
        FillMode::Stretch => Size::new(config.camera_box_width, config.camera_box_height),
        FillMode::Contain => {
            let displayed = geometry.displayed_size();
            Size::new(
                displayed.width * config.gallery_fraction,
                displayed.height * config.gallery_fraction,
            )
        }
    };
    let size = match config.aspect_ratio {
        Some(ratio) => config.resize_options().locked_size(ratio, size.width),
        None => size,
    };
    Rect::centered_at(geometry.container_rect().center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;
    use crate::encode::OutputEncoding;
    use crate::region::BoundsPolicy;

    /// Image whose pixel (x, y) is `[x, y, x ^ y, 255]` (low bytes).
    fn gradient(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, (x ^ y) as u8, 255]);
            }
        }
        SourceImage::new(width, height, pixels).unwrap()
    }

    fn geometry(nw: u32, nh: u32, cw: f64, ch: f64, fill_mode: FillMode) -> DisplayGeometry {
        DisplayGeometry::new(nw, nh, Size::new(cw, ch), Point::zero(), fill_mode).unwrap()
    }

    fn gallery_session() -> CropSession {
        let mut session = CropSession::new(CropConfig::default()).unwrap();
        session
            .set_source(
                gradient(1000, 500),
                geometry(1000, 500, 500.0, 500.0, FillMode::Contain),
            )
            .unwrap();
        session
    }

    struct Unavailable;

    impl Rasterizer for Unavailable {
        fn rasterize(&self, _: &SourceImage, _: Rect) -> Result<EncodedImage, CropError> {
            Err(CropError::RasterizationUnavailable("no canvas".to_string()))
        }
    }

    #[test]
    fn test_new_session_awaits_source() {
        let session = CropSession::new(CropConfig::default()).unwrap();
        assert_eq!(session.state(), SessionState::AwaitingSource);
        assert_eq!(session.rect(), None);
        assert_eq!(session.source_region(), None);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(SessionState::AwaitingSource.as_str(), "awaitingSource");
        assert_eq!(SessionState::Ready.as_str(), "ready");
        assert_eq!(SessionState::Cropped.as_str(), "cropped");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = CropConfig::default();
        config.min_size = -1.0;
        assert!(matches!(
            CropSession::new(config),
            Err(CropError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_gallery_end_to_end() {
        let mut session = gallery_session();
        session
            .set_rect(Rect::new(50.0, 150.0, 100.0, 100.0))
            .unwrap();

        assert_eq!(
            session.source_region(),
            Some(Rect::new(100.0, 50.0, 200.0, 200.0))
        );

        let output = session.crop().unwrap();
        assert_eq!((output.width(), output.height()), (200, 200));
        assert_eq!(output.source_kind, SourceKind::Gallery);
        assert_eq!(output.image.encoding, OutputEncoding::Png);
        assert_eq!(session.state(), SessionState::Cropped);

        let decoded = decode_image(output.bytes()).unwrap();
        assert_eq!(decoded.pixel(0, 0), Some([100, 50, 100 ^ 50, 255]));
        assert_eq!(decoded.pixel(199, 199), Some([43, 249, 43 ^ 249, 255]));
    }

    #[test]
    fn test_preview_is_deterministic_and_keeps_state() {
        let mut session = gallery_session();
        let a = session.preview().unwrap();
        let b = session.preview().unwrap();
        assert_eq!(a, b);
        assert_eq!(session.state(), SessionState::Ready);

        let cropped = session.crop().unwrap();
        assert_eq!(cropped, a);
        assert_eq!(session.preview().unwrap(), a);
    }

    #[test]
    fn test_default_rect_gallery() {
        let session = gallery_session();
        // Displayed 500x250 centered in 500x500
        assert_eq!(session.rect(), Some(Rect::new(125.0, 187.5, 250.0, 125.0)));
    }

    #[test]
    fn test_default_rect_camera_uses_origin() {
        let mut session = CropSession::new(CropConfig::default()).unwrap();
        let geometry = DisplayGeometry::new(
            640,
            480,
            Size::new(400.0, 300.0),
            Point::new(10.0, 20.0),
            FillMode::Stretch,
        )
        .unwrap();
        let rect = session.set_source(gradient(640, 480), geometry).unwrap();
        assert_eq!(rect, Rect::new(110.0, 70.0, 200.0, 200.0));
        assert_eq!(session.rect(), Some(rect));
    }

    #[test]
    fn test_default_rect_honors_aspect_ratio() {
        let mut config = CropConfig::default();
        config.aspect_ratio = Some(AspectRatio::new(16.0, 9.0).unwrap());
        let mut session = CropSession::new(config).unwrap();
        let rect = session
            .set_source(
                gradient(400, 400),
                geometry(400, 400, 400.0, 400.0, FillMode::Stretch),
            )
            .unwrap();
        assert_eq!(rect.width, 200.0);
        assert!((rect.height - 112.5).abs() < 1e-9);
        assert_eq!(rect.center(), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_set_source_validation() {
        let mut session = CropSession::new(CropConfig::default()).unwrap();
        let mismatch = session.set_source(
            gradient(100, 100),
            geometry(200, 100, 100.0, 100.0, FillMode::Stretch),
        );
        assert!(matches!(mismatch, Err(CropError::InvalidSource(_))));

        let empty = SourceImage::new(0, 0, Vec::new()).unwrap();
        let result = session.set_source(empty, geometry(1, 1, 100.0, 100.0, FillMode::Stretch));
        assert!(matches!(result, Err(CropError::InvalidSource(_))));
        assert_eq!(session.state(), SessionState::AwaitingSource);
    }

    #[test]
    fn test_set_source_restarts_from_any_state() {
        let mut session = gallery_session();
        session.crop().unwrap();
        assert_eq!(session.state(), SessionState::Cropped);

        session
            .set_source(
                gradient(300, 300),
                geometry(300, 300, 300.0, 300.0, FillMode::Stretch),
            )
            .unwrap();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.rect(), Some(Rect::new(50.0, 50.0, 200.0, 200.0)));
    }

    #[test]
    fn test_drag_moves_rect() {
        let mut session = gallery_session();
        let start = session.rect().unwrap();
        let grab = start.center();

        assert_eq!(
            session.handle_pointer(PointerEvent::start(grab)).unwrap(),
            Some(start)
        );
        assert!(session.is_gesture_active());

        let moved = session
            .handle_pointer(PointerEvent::moved(Point::new(grab.x + 30.0, grab.y - 10.0)))
            .unwrap()
            .unwrap();
        assert_eq!(moved, start.translate(30.0, -10.0));

        let ended = session
            .handle_pointer(PointerEvent::end(Point::new(grab.x + 30.0, grab.y - 10.0)))
            .unwrap();
        assert_eq!(ended, Some(moved));
        assert!(!session.is_gesture_active());
        assert_eq!(session.rect(), Some(moved));
    }

    #[test]
    fn test_resize_from_handle() {
        let mut session = gallery_session();
        let start = session.rect().unwrap();
        let handle = Point::new(start.center().x, start.bottom() - 1.0);

        session.handle_pointer(PointerEvent::start(handle)).unwrap();
        let resized = session
            .handle_pointer(PointerEvent::moved(Point::new(handle.x + 20.0, handle.y + 40.0)))
            .unwrap()
            .unwrap();
        assert_eq!(resized.origin(), start.origin());
        assert_eq!(resized.size(), Size::new(start.width + 20.0, start.height + 40.0));
    }

    #[test]
    fn test_explicit_target_skips_hit_test() {
        let mut session = gallery_session();
        let start = session.rect().unwrap();
        let outside = Point::new(0.0, 0.0);

        session
            .handle_pointer(PointerEvent::start_on(outside, GestureTarget::ResizeHandle))
            .unwrap();
        let resized = session
            .handle_pointer(PointerEvent::moved(Point::new(-500.0, -500.0)))
            .unwrap()
            .unwrap();
        assert_eq!(resized, Rect::new(start.x, start.y, 50.0, 50.0));
    }

    #[test]
    fn test_start_outside_rect_is_ignored() {
        let mut session = gallery_session();
        let result = session.handle_pointer(PointerEvent::start(Point::new(1.0, 1.0)));
        assert_eq!(result.unwrap(), None);
        assert!(!session.is_gesture_active());
    }

    #[test]
    fn test_second_gesture_rejected() {
        let mut session = gallery_session();
        let center = session.rect().unwrap().center();
        session.handle_pointer(PointerEvent::start(center)).unwrap();

        let err = session
            .handle_pointer(PointerEvent::start_on(center, GestureTarget::ResizeHandle))
            .unwrap_err();
        assert!(matches!(
            err,
            CropError::InvalidState {
                state: "dragging",
                ..
            }
        ));
    }

    #[test]
    fn test_move_without_gesture_is_ignored() {
        let mut session = gallery_session();
        let before = session.rect();
        assert_eq!(
            session
                .handle_pointer(PointerEvent::moved(Point::new(400.0, 400.0)))
                .unwrap(),
            None
        );
        assert_eq!(
            session
                .handle_pointer(PointerEvent::end(Point::new(400.0, 400.0)))
                .unwrap(),
            None
        );
        assert_eq!(session.rect(), before);
    }

    #[test]
    fn test_gesture_requires_ready() {
        let mut session = CropSession::new(CropConfig::default()).unwrap();
        let err = session
            .handle_pointer(PointerEvent::start(Point::zero()))
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidState");
    }

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut session = gallery_session();
        let start = session.rect().unwrap();
        let grab = start.center();

        session.handle_pointer(PointerEvent::start(grab)).unwrap();
        session
            .handle_pointer(PointerEvent::moved(Point::new(grab.x + 80.0, grab.y)))
            .unwrap();
        assert_eq!(session.cancel_gesture(), Some(start));
        assert_eq!(session.rect(), Some(start));
        assert_eq!(session.cancel_gesture(), None);
    }

    #[test]
    fn test_stale_move_after_crop_does_nothing() {
        let mut session = gallery_session();
        let grab = session.rect().unwrap().center();
        session.handle_pointer(PointerEvent::start(grab)).unwrap();
        session
            .handle_pointer(PointerEvent::moved(Point::new(grab.x + 5.0, grab.y)))
            .unwrap();

        session.crop().unwrap();
        let after_crop = session.rect();
        assert!(!session.is_gesture_active());
        assert_eq!(
            session
                .handle_pointer(PointerEvent::moved(Point::new(0.0, 0.0)))
                .unwrap(),
            None
        );
        assert_eq!(session.rect(), after_crop);
    }

    #[test]
    fn test_crop_requires_ready() {
        let mut session = CropSession::new(CropConfig::default()).unwrap();
        assert!(matches!(
            session.crop(),
            Err(CropError::InvalidState {
                operation: "crop",
                state: "awaitingSource"
            })
        ));

        let mut session = gallery_session();
        session.crop().unwrap();
        assert!(matches!(session.crop(), Err(CropError::InvalidState { .. })));
    }

    #[test]
    fn test_out_of_bounds_rejected_by_default() {
        let mut session = gallery_session();
        // Reaches into the top letterbox margin
        session
            .set_rect(Rect::new(50.0, 100.0, 100.0, 100.0))
            .unwrap();

        let err = session.crop().unwrap_err();
        assert!(matches!(err, CropError::RegionOutOfBounds { .. }));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.rect(), Some(Rect::new(50.0, 100.0, 100.0, 100.0)));
    }

    #[test]
    fn test_out_of_bounds_clamp_and_pad() {
        let rect = Rect::new(50.0, 100.0, 100.0, 100.0);

        let mut session = gallery_session();
        let mut config = session.config().clone();
        config.bounds_policy = BoundsPolicy::Clamp;
        session.configure(config).unwrap();
        session.set_rect(rect).unwrap();
        let clamped = session.crop().unwrap();
        // Source region (100, -50, 200, 200) clamped to y >= 0
        assert_eq!((clamped.width(), clamped.height()), (200, 150));

        let mut session = gallery_session();
        let mut config = session.config().clone();
        config.bounds_policy = BoundsPolicy::Pad;
        session.configure(config).unwrap();
        session.set_rect(rect).unwrap();
        let padded = session.crop().unwrap();
        assert_eq!((padded.width(), padded.height()), (200, 200));

        let decoded = decode_image(padded.bytes()).unwrap();
        assert_eq!(decoded.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(decoded.pixel(0, 50), Some([100, 0, 100, 255]));
    }

    #[test]
    fn test_rect_entirely_in_letterbox_is_empty() {
        let mut session = gallery_session();
        session.set_rect(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert!(matches!(
            session.crop(),
            Err(CropError::EmptySourceRegion { .. })
        ));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_rasterizer_failure_keeps_ready() {
        let mut session = CropSession::with_rasterizer(CropConfig::default(), Unavailable).unwrap();
        session
            .set_source(
                gradient(100, 100),
                geometry(100, 100, 100.0, 100.0, FillMode::Stretch),
            )
            .unwrap();
        session.set_rect(Rect::new(10.0, 10.0, 60.0, 60.0)).unwrap();

        let err = session.crop().unwrap_err();
        assert_eq!(err.kind(), "RasterizationUnavailable");
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_set_rect_enforces_minimum() {
        let mut session = gallery_session();
        assert!(matches!(
            session.set_rect(Rect::new(0.0, 0.0, 49.0, 100.0)),
            Err(CropError::InvalidGeometry(_))
        ));
        assert!(session.set_rect(Rect::new(0.0, 0.0, f64::NAN, 100.0)).is_err());
    }

    #[test]
    fn test_reset() {
        let mut session = gallery_session();
        session.crop().unwrap();
        session.reset().unwrap();
        assert_eq!(session.state(), SessionState::AwaitingSource);
        assert_eq!(session.rect(), None);
        assert!(matches!(
            session.reset(),
            Err(CropError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_configure_rejected_mid_gesture() {
        let mut session = gallery_session();
        let grab = session.rect().unwrap().center();
        session.handle_pointer(PointerEvent::start(grab)).unwrap();
        assert!(matches!(
            session.set_center_anchored(true),
            Err(CropError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_aspect_ratio_applies_to_next_resize() {
        let mut session = gallery_session();
        session.set_aspect_ratio(Some(AspectRatio::square())).unwrap();
        let start = session.rect().unwrap();

        session
            .handle_pointer(PointerEvent::start_on(start.center(), GestureTarget::ResizeHandle))
            .unwrap();
        let resized = session
            .handle_pointer(PointerEvent::moved(Point::new(
                start.center().x + 10.0,
                start.center().y + 90.0,
            )))
            .unwrap()
            .unwrap();
        assert_eq!(resized.width, resized.height);
        assert_eq!(resized.width, start.width + 10.0);
    }

    #[test]
    fn test_jpeg_output_file_name() {
        let mut session = gallery_session();
        let mut config = session.config().clone();
        config.encoding = OutputEncoding::Jpeg { quality: 80 };
        session.configure(config).unwrap();

        let output = session.crop().unwrap();
        assert_eq!(output.image.encoding.mime_type(), "image/jpeg");
        assert_eq!(output.file_name(1_700_000_000_000), "IMG_1700000000000.jpg");
    }

    #[test]
    fn test_camera_source_kind() {
        let mut session = CropSession::new(CropConfig::default()).unwrap();
        session
            .set_source(
                gradient(640, 480),
                geometry(640, 480, 320.0, 240.0, FillMode::Stretch),
            )
            .unwrap();
        let output = session.crop().unwrap();
        assert_eq!(output.source_kind, SourceKind::Camera);
        // 200x200 display box at scale 2 per axis
        assert_eq!((output.width(), output.height()), (400, 400));
        assert_eq!(output.file_name(42), "IMG_42.png");
    }
}
