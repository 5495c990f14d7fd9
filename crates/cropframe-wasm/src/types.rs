//! WASM-compatible wrapper types for images and crop results.
//!
//! This module provides JavaScript-friendly types that wrap the core Cropframe
//! types, handling the conversion between Rust and JavaScript data representations.

use cropframe_core::{CropOutput, SourceImage};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;

/// A decoded source image for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Passing the image to
/// `JsCropSession.set_source` copies it into the session, so the wrapper can be
/// freed right after.
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a source image from RGBA pixel data, e.g. `ImageData.data` of a canvas.
    ///
    /// # Errors
    /// Throws `InvalidSource` if `pixels.length != width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSourceImage, JsValue> {
        SourceImage::new(width, height, pixels)
            .map(Self::from_source)
            .map_err(to_js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }
}

impl JsSourceImage {
    pub(crate) fn from_source(inner: SourceImage) -> Self {
        Self { inner }
    }

    /// Clone of the core image, as handed to the session.
    pub(crate) fn to_source(&self) -> SourceImage {
        self.inner.clone()
    }
}

/// Result of a crop, ready to be wrapped in a `Blob` or `File`.
///
/// # Example (TypeScript)
/// ```typescript
/// const out = session.crop();
/// const file = new File([out.bytes()], out.file_name(), { type: out.mime_type });
/// ```
#[wasm_bindgen]
pub struct JsCropOutput {
    inner: CropOutput,
}

#[wasm_bindgen]
impl JsCropOutput {
    /// Encoded bytes (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// `"png"` or `"jpeg"`
    #[wasm_bindgen(getter)]
    pub fn encoding(&self) -> String {
        self.inner.image.encoding.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.image.encoding.mime_type().to_string()
    }

    /// `"camera"` or `"gallery"`
    #[wasm_bindgen(getter)]
    pub fn source_kind(&self) -> String {
        self.inner.source_kind.as_str().to_string()
    }

    /// File name stamped with the current time, e.g. `IMG_1700000000000.png`.
    pub fn file_name(&self) -> String {
        self.file_name_at(js_sys::Date::now())
    }

    /// File name for an explicit millisecond timestamp.
    pub fn file_name_at(&self, timestamp_ms: f64) -> String {
        self.inner.file_name(timestamp_ms.max(0.0) as u64)
    }
}

impl JsCropOutput {
    pub(crate) fn from_output(inner: CropOutput) -> Self {
        Self { inner }
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_js_source_image_rejects_short_buffer() {
        let result = JsSourceImage::new(10, 10, vec![0u8; 10 * 10 * 3]);
        let err: js_sys::Error = result.err().unwrap().dyn_into().unwrap();
        assert_eq!(String::from(err.name()), "InvalidSource");
    }
}
