//! Conversion of core errors into JavaScript exceptions.

use cropframe_core::CropError;
use wasm_bindgen::prelude::*;

/// Build a JS `Error` whose `name` is the error kind, e.g. `RegionOutOfBounds`,
/// so callers can branch on `err.name` instead of parsing messages.
pub(crate) fn to_js_error(err: CropError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    js_err.set_name(err.kind());
    js_err.into()
}
