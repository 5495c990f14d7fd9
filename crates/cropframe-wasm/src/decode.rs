//! Image decoding WASM bindings.
//!
//! Gallery photos arrive as file bytes; decoding them here (rather than through
//! a canvas) applies EXIF orientation the same way the browser displays them,
//! so the natural size handed to the session matches what is on screen.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@cropframe/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use cropframe_core::{decode, CropError};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::JsSourceImage;

/// Decode PNG or JPEG bytes into an RGBA source image.
///
/// # Errors
///
/// Throws `InvalidSource` if the format is not recognized or the data is
/// corrupted or truncated.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| to_js_error(CropError::from(e)))
}
