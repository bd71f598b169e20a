//! Where asset bytes come from.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use percent_encoding::percent_decode_str;

use crate::error::OrbitViewError;

/// A store of named binary resources.
///
/// URIs are `/`-separated and relative to the source's root. Reads are
/// asynchronous so a browser fetch and a filesystem read share one loader.
pub trait AssetSource {
    /// Read the whole resource at `uri`.
    fn read(
        &self,
        uri: &str,
    ) -> impl Future<Output = Result<Vec<u8>, OrbitViewError>>;
}

/// Reads assets from the local filesystem below a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Source rooted at `root`. Absolute URIs ignore the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for FsSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl AssetSource for FsSource {
    async fn read(&self, uri: &str) -> Result<Vec<u8>, OrbitViewError> {
        let path = self.root.join(uri);
        std::fs::read(&path).map_err(|e| {
            OrbitViewError::AssetLoad(format!("{}: {e}", path.display()))
        })
    }
}

/// In-memory assets keyed by URI.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the resource at `uri`.
    #[must_use]
    pub fn with(mut self, uri: impl Into<String>, bytes: Vec<u8>) -> Self {
        let _ = self.files.insert(uri.into(), bytes);
        self
    }
}

impl AssetSource for MemorySource {
    async fn read(&self, uri: &str) -> Result<Vec<u8>, OrbitViewError> {
        self.files
            .get(uri)
            .cloned()
            .ok_or_else(|| OrbitViewError::AssetLoad(format!("{uri}: not found")))
    }
}

/// Resolve `reference` against the URI of the document that mentions it.
///
/// Absolute references (a scheme or a leading `/`) are returned as-is;
/// relative ones replace the last path segment of `base`.
pub fn resolve_relative(base: &str, reference: &str) -> String {
    if reference.contains("://") || reference.starts_with('/') {
        return reference.to_owned();
    }
    match base.rfind(['/', '\\']) {
        Some(slash) => format!("{}{reference}", &base[..=slash]),
        None => reference.to_owned(),
    }
}

/// Decode a base64 `data:` URI. Returns `None` for any other URI.
pub fn decode_data_uri(uri: &str) -> Option<Result<Vec<u8>, OrbitViewError>> {
    let rest = uri.strip_prefix("data:")?;
    let decoded = match rest.split_once(";base64,") {
        Some((_, payload)) => BASE64_STANDARD.decode(payload).map_err(|e| {
            OrbitViewError::AssetLoad(format!("bad base64 data URI: {e}"))
        }),
        None => Err(OrbitViewError::AssetLoad(
            "only base64 data URIs are supported".into(),
        )),
    };
    Some(decoded)
}

/// Read `reference` as found inside the document at `base`: data URIs are
/// decoded in place, anything else is read from `source`.
///
/// Relative references are percent-decoded first, so `my%20mesh.bin`
/// names the file `my mesh.bin`. Absolute URLs are passed through.
pub async fn read_referenced<S: AssetSource>(
    source: &S,
    base: &str,
    reference: &str,
) -> Result<Vec<u8>, OrbitViewError> {
    if let Some(decoded) = decode_data_uri(reference) {
        return decoded;
    }
    if reference.contains("://") {
        return source.read(reference).await;
    }
    let decoded = percent_decode_str(reference).decode_utf8().map_err(|e| {
        OrbitViewError::AssetLoad(format!("{reference}: bad percent-encoding: {e}"))
    })?;
    source.read(&resolve_relative(base, &decoded)).await
}
