//! Multipart/form-data encoding for single-file uploads: boundary generation,
//! content-type lookup, filename sanitization and RFC 2046 framing.

pub mod boundary;
pub mod encoder;
pub mod error;
pub mod mime;
pub mod sanitize;

pub use {
    boundary::Boundary,
    encoder::{DEFAULT_FIELD_NAME, EncodedForm, MultipartEncoder},
    error::{Error, Result},
    mime::{ContentTypeTable, OCTET_STREAM},
    sanitize::sanitize_filename,
};
