//! Cropframe WASM - WebAssembly bindings for Cropframe
//!
//! This crate exposes the cropframe-core crop session to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `session` - The interactive crop session (`JsCropSession`)
//! - `types` - WASM-compatible wrapper types for images and crop results
//! - `decode` - Image decoding bindings (PNG, JPEG with EXIF orientation)
//! - `logging` - `log` records routed to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsCropSession, set_log_level } from '@cropframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level("debug");
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const session = new JsCropSession();
//! session.set_source(image, 0, 0, 400, 400, "contain");
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod error;
mod logging;
mod session;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use session::JsCropSession;
pub use types::{JsCropOutput, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init(log::Level::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Set the console log level: `off`, `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logging::parse_level(level).ok_or_else(|| {
        error::to_js_error(cropframe_core::CropError::InvalidConfig(format!(
            "unknown log level {level:?}"
        )))
    })?;
    logging::set_level(filter);
    Ok(())
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_log_level() {
        assert!(set_log_level("debug").is_ok());
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        assert!(set_log_level("loud").is_err());
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        assert!(set_log_level("off").is_ok());
        assert_eq!(log::max_level(), log::LevelFilter::Off);
    }
}
