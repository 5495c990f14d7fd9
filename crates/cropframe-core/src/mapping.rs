//! Display-space to source-pixel-space coordinate mapping.
//!
//! This is the step that decides which source pixels end up in the crop, and
//! the one most easily gotten wrong: mixing up `contain` and `stretch`, or the
//! two axes, produces a plausible-looking but wrong crop with no error.
//!
//! # Algorithm
//!
//! ```text
//! local  = rect - origin                      (viewport -> container-local)
//! stretch: source = local * natural / container   (per axis)
//! contain: source = (local - offset) / scale      (uniform)
//! ```
//!
//! No clamping is performed here. Under `contain`, a rectangle reaching into
//! the letterbox maps to coordinates outside `[0, natural]`; that case is
//! handled by [`crate::region::resolve_region`].

use crate::display::{DisplayGeometry, FillMode};
use crate::geometry::{Point, Rect};

/// Map a rectangle in viewport coordinates to source-pixel coordinates.
///
/// # Arguments
///
/// * `rect` - Rectangle in viewport coordinates (e.g. a hit-test bounding box)
/// * `rect_space_origin` - Viewport position of the container's top-left corner
/// * `geometry` - How the source image is presented inside the container
pub fn map_to_source(rect: Rect, rect_space_origin: Point, geometry: &DisplayGeometry) -> Rect {
    let local_x = rect.x - rect_space_origin.x;
    let local_y = rect.y - rect_space_origin.y;

    match geometry.fill_mode() {
        FillMode::Stretch => {
            let natural = geometry.natural_size();
            let container = geometry.container_size();
            Rect::new(
                local_x * natural.width / container.width,
                local_y * natural.height / container.height,
                rect.width * natural.width / container.width,
                rect.height * natural.height / container.height,
            )
        }
        FillMode::Contain => {
            let scale = geometry.scale();
            let offset = geometry.offset();
            Rect::new(
                (local_x - offset.x) / scale,
                (local_y - offset.y) / scale,
                rect.width / scale,
                rect.height / scale,
            )
        }
    }
}

/// Map a rectangle in source-pixel coordinates back to viewport coordinates.
///
/// Inverse of [`map_to_source`] for the same origin and geometry.
pub fn map_from_source(rect: Rect, rect_space_origin: Point, geometry: &DisplayGeometry) -> Rect {
    match geometry.fill_mode() {
        FillMode::Stretch => {
            let natural = geometry.natural_size();
            let container = geometry.container_size();
            Rect::new(
                rect.x * container.width / natural.width + rect_space_origin.x,
                rect.y * container.height / natural.height + rect_space_origin.y,
                rect.width * container.width / natural.width,
                rect.height * container.height / natural.height,
            )
        }
        FillMode::Contain => {
            let scale = geometry.scale();
            let offset = geometry.offset();
            Rect::new(
                rect.x * scale + offset.x + rect_space_origin.x,
                rect.y * scale + offset.y + rect_space_origin.y,
                rect.width * scale,
                rect.height * scale,
            )
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::Size;
    use proptest::prelude::*;

    /// Natural image sizes typical of phone cameras and galleries.
    fn natural_strategy() -> impl Strategy<Value = (u32, u32)> {
        (16u32..=4032, 16u32..=4032)
    }

    /// Phone viewport sizes.
    fn container_strategy() -> impl Strategy<Value = (f64, f64)> {
        (200.0f64..=1200.0, 200.0f64..=1200.0)
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f64..1500.0, -500.0f64..1500.0, 1.0f64..800.0, 1.0f64..800.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        /// Property: stretch mapping is exactly `r * natural / container` per axis.
        #[test]
        fn prop_stretch_formula(
            (nw, nh) in natural_strategy(),
            (cw, ch) in container_strategy(),
            r in rect_strategy(),
        ) {
            let g = DisplayGeometry::new(nw, nh, Size::new(cw, ch), Point::zero(), FillMode::Stretch).unwrap();
            let mapped = map_to_source(r, Point::zero(), &g);

            let (nw, nh) = (nw as f64, nh as f64);
            prop_assert_eq!(mapped.x, r.x * nw / cw);
            prop_assert_eq!(mapped.y, r.y * nh / ch);
            prop_assert_eq!(mapped.width, r.width * nw / cw);
            prop_assert_eq!(mapped.height, r.height * nh / ch);
        }

        /// Property: the displayed image bounds always map to the full natural image.
        #[test]
        fn prop_contain_displayed_rect_is_full_image(
            (nw, nh) in natural_strategy(),
            (cw, ch) in container_strategy(),
            (ox, oy) in (-100.0f64..100.0, -100.0f64..100.0),
        ) {
            let g = DisplayGeometry::new(nw, nh, Size::new(cw, ch), Point::new(ox, oy), FillMode::Contain).unwrap();
            let mapped = g.to_source(g.displayed_rect());
            let full = Rect::new(0.0, 0.0, nw as f64, nh as f64);
            prop_assert!(mapped.approx_eq(&full, 1e-6), "{:?} != {:?}", mapped, full);
        }

        /// Property: contain mapping uses a single scale for both axes.
        #[test]
        fn prop_contain_preserves_aspect(
            (nw, nh) in natural_strategy(),
            (cw, ch) in container_strategy(),
            r in rect_strategy(),
        ) {
            let g = DisplayGeometry::new(nw, nh, Size::new(cw, ch), Point::zero(), FillMode::Contain).unwrap();
            let mapped = map_to_source(r, Point::zero(), &g);
            let display_ratio = r.width / r.height;
            let source_ratio = mapped.width / mapped.height;
            prop_assert!((display_ratio - source_ratio).abs() <= display_ratio * 1e-9);
        }

        /// Property: mapping to source and back lands on the starting rectangle.
        #[test]
        fn prop_inverse_mapping(
            (nw, nh) in natural_strategy(),
            (cw, ch) in container_strategy(),
            r in rect_strategy(),
            contain in any::<bool>(),
        ) {
            let mode = if contain { FillMode::Contain } else { FillMode::Stretch };
            let g = DisplayGeometry::new(nw, nh, Size::new(cw, ch), Point::new(3.0, 40.0), mode).unwrap();
            let back = g.to_display(g.to_source(r));
            prop_assert!(back.approx_eq(&r, 1e-6), "{:?} != {:?}", back, r);
        }
    }
}
