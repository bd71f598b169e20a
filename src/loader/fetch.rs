use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::source::AssetSource;
use crate::error::OrbitViewError;

/// Reads assets over HTTP with the browser's `fetch`.
#[derive(Debug, Clone, Default)]
pub struct FetchSource {
    base_url: String,
}

impl FetchSource {
    /// Source prefixing every URI with `base_url` (empty for page-relative).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

fn js_error(url: &str, value: &JsValue) -> OrbitViewError {
    OrbitViewError::AssetLoad(format!("{url}: {value:?}"))
}

#[allow(clippy::future_not_send)]
impl AssetSource for FetchSource {
    async fn read(&self, uri: &str) -> Result<Vec<u8>, OrbitViewError> {
        let url = if uri.contains("://") {
            uri.to_owned()
        } else {
            format!("{}{uri}", self.base_url)
        };
        let window = web_sys::window()
            .ok_or_else(|| OrbitViewError::AssetLoad("no browser window".into()))?;

        let response = JsFuture::from(window.fetch_with_str(&url))
            .await
            .map_err(|e| js_error(&url, &e))?;
        let response: web_sys::Response =
            response.dyn_into().map_err(|e| js_error(&url, &e))?;
        if !response.ok() {
            return Err(OrbitViewError::AssetLoad(format!(
                "{url}: HTTP {}",
                response.status()
            )));
        }

        let promise = response.array_buffer().map_err(|e| js_error(&url, &e))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|e| js_error(&url, &e))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}
