//! Source image decoding.
//!
//! Camera captures and gallery photos reach the engine as encoded bytes
//! (PNG or JPEG). This module turns them into a [`SourceImage`] whose
//! dimensions are the natural size the host displays.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage, CHANNELS};
