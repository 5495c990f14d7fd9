//! Cropframe Core - interactive crop engine
//!
//! This crate holds the platform-independent half of Cropframe: an overlay
//! rectangle the user drags and resizes over a displayed photo or camera
//! preview, the mapping from that on-screen rectangle to source pixels, and
//! the extraction and encoding of the cropped region.
//!
//! The host (see `cropframe-wasm`) supplies decoded images, the display
//! geometry and normalized pointer events, and receives encoded bytes back.

pub mod aspect;
pub mod config;
pub mod decode;
pub mod display;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod mapping;
pub mod raster;
pub mod region;
pub mod session;

pub use aspect::AspectRatio;
pub use config::CropConfig;
pub use decode::{decode_image, DecodeError, SourceImage};
pub use display::{DisplayGeometry, FillMode, SourceKind};
pub use encode::{EncodeError, EncodedImage, OutputEncoding};
pub use error::CropError;
pub use geometry::{Point, Rect, Size};
pub use interaction::{GestureTarget, PointerEvent, PointerPhase, ResizeMode};
pub use mapping::{map_from_source, map_to_source};
pub use raster::{ImageRasterizer, Rasterizer, SurfaceLimits};
pub use region::{resolve_region, BoundsPolicy};
pub use session::{CropOutput, CropSession, SessionState};
