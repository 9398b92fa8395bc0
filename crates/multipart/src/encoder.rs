//! Single-file multipart/form-data encoder.
//!
//! Output layout, every line terminated by CRLF:
//!
//! ```text
//! --<boundary>
//! Content-Disposition: form-data; name="<field>"; filename="<sanitized>"
//! Content-Type: <mime>
//!
//! <file bytes>
//! --<boundary>--
//! ```
//!
//! File bytes are copied verbatim. The boundary is never checked against the
//! body; a generated boundary carries 128 random bits.

use std::path::Path;

use {
    rand::CryptoRng,
    tracing::{debug, warn},
};

use crate::{
    Error, Result,
    boundary::Boundary,
    mime::ContentTypeTable,
    sanitize::{basename, sanitize_filename},
};

/// Form field name used when the caller does not supply one.
pub const DEFAULT_FIELD_NAME: &str = "file";

const CRLF: &str = "\r\n";

/// An encoded body together with the header that must accompany it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedForm {
    pub body: Vec<u8>,
    /// Value for the `Content-Type` request header.
    pub content_type: String,
}

impl EncodedForm {
    /// Value for the `Content-Length` request header.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

/// Encodes one file per call, framed by a boundary fixed at construction.
///
/// Shared references are enough for encoding, so one instance can serve any
/// number of concurrent callers. Registering types takes `&mut self`; wrap
/// the encoder in a lock if it must be reconfigured while shared.
#[derive(Debug, Clone)]
pub struct MultipartEncoder {
    boundary: Boundary,
    content_types: ContentTypeTable,
}

impl Default for MultipartEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartEncoder {
    /// Encoder with a boundary drawn from the thread-local CSPRNG.
    pub fn new() -> Self {
        Self::from_boundary(Boundary::generate())
    }

    /// Encoder with a boundary drawn from `rng`.
    pub fn with_rng<R: CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self::from_boundary(Boundary::generate_with(rng))
    }

    /// Encoder with a caller-chosen boundary.
    ///
    /// Fails with [`Error::InvalidBoundary`] unless the token is 1-70
    /// printable ASCII characters free of RFC 2045 `tspecials`.
    pub fn with_boundary(boundary: impl Into<String>) -> Result<Self> {
        Boundary::new(boundary).map(Self::from_boundary)
    }

    pub fn from_boundary(boundary: Boundary) -> Self {
        Self {
            boundary,
            content_types: ContentTypeTable::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        self.boundary.as_str()
    }

    /// `multipart/form-data; boundary=<boundary>`.
    pub fn content_type_header(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// MIME type for `path`, falling back to `application/octet-stream`.
    pub fn content_type(&self, path: &str) -> &str {
        self.content_types.lookup(path)
    }

    /// Register `mime_type` for `extension` (which must start with `.`).
    pub fn register_type(&mut self, extension: &str, mime_type: impl Into<String>) -> Result<()> {
        self.content_types.register(extension, mime_type)
    }

    /// Register several types, stopping at the first invalid extension.
    pub fn register_types<I, K, V>(&mut self, types: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (extension, mime_type) in types {
            self.register_type(extension.as_ref(), mime_type)?;
        }
        Ok(())
    }

    /// Encode `file` as a single form part.
    ///
    /// The content type comes from `original_filename`; the `filename`
    /// parameter is its sanitized basename. `field_name` defaults to
    /// [`DEFAULT_FIELD_NAME`] and is written as given, so it must be a
    /// trusted identifier.
    pub fn encode(
        &self,
        file: &[u8],
        original_filename: &str,
        field_name: Option<&str>,
    ) -> Vec<u8> {
        let field_name = field_name.unwrap_or(DEFAULT_FIELD_NAME);
        if field_name.contains(['"', '\r', '\n']) {
            warn!(field_name, "field name contains characters that break header framing");
        }

        let content_type = self.content_type(original_filename);
        let filename = sanitize_filename(basename(original_filename));
        let boundary = self.boundary.as_str();

        let head = format!(
            "--{boundary}{CRLF}\
             Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"{CRLF}\
             Content-Type: {content_type}{CRLF}\
             {CRLF}"
        );
        let tail = format!("{CRLF}--{boundary}--{CRLF}");

        let mut body = Vec::with_capacity(head.len() + file.len() + tail.len());
        body.extend_from_slice(head.as_bytes());
        body.extend_from_slice(file);
        body.extend_from_slice(tail.as_bytes());

        debug!(
            field_name,
            filename = %filename,
            content_type,
            file_bytes = file.len(),
            body_bytes = body.len(),
            "encoded multipart body"
        );
        body
    }

    /// Like [`encode`](Self::encode), bundled with the matching header value.
    pub fn encode_part(
        &self,
        file: &[u8],
        original_filename: &str,
        field_name: Option<&str>,
    ) -> EncodedForm {
        EncodedForm {
            body: self.encode(file, original_filename, field_name),
            content_type: self.content_type_header(),
        }
    }

    /// Read `path` into memory and encode it.
    ///
    /// Read failures surface as [`Error::FileRead`] carrying the path.
    pub async fn encode_from_path(
        &self,
        path: impl AsRef<Path>,
        field_name: Option<&str>,
    ) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let file = tokio::fs::read(path)
            .await
            .map_err(|e| Error::file_read(path, e))?;
        Ok(self.encode(&file, &path.to_string_lossy(), field_name))
    }

    pub async fn encode_part_from_path(
        &self,
        path: impl AsRef<Path>,
        field_name: Option<&str>,
    ) -> Result<EncodedForm> {
        let body = self.encode_from_path(path, field_name).await?;
        Ok(EncodedForm {
            body,
            content_type: self.content_type_header(),
        })
    }
}
