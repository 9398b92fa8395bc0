use std::collections::BTreeMap;

use {
    formpost_multipart::MultipartEncoder,
    serde::{Deserialize, Serialize},
};

/// Root configuration.
///
/// ```toml
/// boundary = "----WebKitFormBoundaryABC123"   # omit for a random one
/// field_name = "document"
///
/// [content_types]
/// ".png" = "image/png"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormpostConfig {
    /// Fixed boundary token. A random one is generated when unset.
    pub boundary: Option<String>,
    /// Field name used for the file part, `file` when unset.
    pub field_name: Option<String>,
    /// Extra extension to MIME type mappings, keys including the leading dot.
    pub content_types: BTreeMap<String, String>,
}

impl FormpostConfig {
    /// Build an encoder with this config's boundary and content types.
    pub fn build_encoder(&self) -> formpost_multipart::Result<MultipartEncoder> {
        let mut encoder = match &self.boundary {
            Some(boundary) => MultipartEncoder::with_boundary(boundary.as_str())?,
            None => MultipartEncoder::new(),
        };
        encoder.register_types(&self.content_types)?;
        Ok(encoder)
    }
}
