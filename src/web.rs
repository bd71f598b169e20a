//! Browser entry point.

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

use crate::viewer::Viewer;

/// Called by the generated JS glue once the module is instantiated.
///
/// # Errors
///
/// Rejects with the error message if the event loop cannot start.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    Viewer::builder()
        .build()
        .run()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
