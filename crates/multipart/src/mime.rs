//! Extension to MIME type lookup.

use std::collections::HashMap;

use tracing::debug;

use crate::{Error, Result, sanitize::basename};

/// Fallback for any extension missing from the table.
pub const OCTET_STREAM: &str = "application/octet-stream";

const DEFAULT_TYPES: &[(&str, &str)] = &[
    (".pdf", "application/pdf"),
    (".mp3", "audio/mpeg"),
    (".wav", "audio/wav"),
    (".m4a", "audio/mp4"),
    (".ogg", "audio/ogg"),
];

/// Mapping from lowercase extension (with leading dot) to MIME type.
///
/// Unknown extensions are never rejected; they resolve to [`OCTET_STREAM`].
#[derive(Debug, Clone)]
pub struct ContentTypeTable {
    types: HashMap<String, String>,
}

impl Default for ContentTypeTable {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES
                .iter()
                .map(|(ext, mime)| ((*ext).to_string(), (*mime).to_string()))
                .collect(),
        }
    }
}

impl ContentTypeTable {
    /// Table preloaded with the built-in audio and PDF types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the MIME type for `extension`.
    ///
    /// The extension must include its leading dot, e.g. `.doc`.
    pub fn register(&mut self, extension: &str, mime_type: impl Into<String>) -> Result<()> {
        if !extension.starts_with('.') {
            return Err(Error::invalid_extension(extension));
        }
        let key = extension.to_lowercase();
        let mime_type = mime_type.into();
        debug!(extension = %key, mime_type = %mime_type, "registered content type");
        self.types.insert(key, mime_type);
        Ok(())
    }

    /// Resolve the MIME type for a file path by its extension.
    pub fn lookup(&self, path: &str) -> &str {
        extension(path)
            .and_then(|ext| self.types.get(&ext))
            .map_or(OCTET_STREAM, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Lowercased extension of the final path segment, including the dot.
///
/// Dotfiles such as `.env` have no extension.
pub fn extension(path: &str) -> Option<String> {
    let name = basename(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(name[idx..].to_lowercase()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case("a.pdf", "application/pdf")]
    #[case("a.PDF", "application/pdf")]
    #[case("/downloads/voice.Mp3", "audio/mpeg")]
    #[case("clip.wav", "audio/wav")]
    #[case("memo.m4a", "audio/mp4")]
    #[case("ptt.ogg", "audio/ogg")]
    #[case("a.xyz", OCTET_STREAM)]
    #[case("Makefile", OCTET_STREAM)]
    #[case(".pdf", OCTET_STREAM)]
    #[case("archive.tar.pdf", "application/pdf")]
    #[case("dir.pdf/readme", OCTET_STREAM)]
    fn resolves_defaults(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(ContentTypeTable::new().lookup(path), expected);
    }

    #[test]
    fn registered_type_resolves() {
        let mut table = ContentTypeTable::new();
        assert_eq!(table.lookup("a.xyz"), OCTET_STREAM);
        table.register(".xyz", "text/custom").unwrap();
        assert_eq!(table.lookup("a.xyz"), "text/custom");
        assert_eq!(table.lookup("A.XYZ"), "text/custom");
    }

    #[test]
    fn registration_key_is_lowercased() {
        let mut table = ContentTypeTable::new();
        table.register(".DOCX", "application/msword").unwrap();
        assert_eq!(table.lookup("report.docx"), "application/msword");
    }

    #[test]
    fn last_registration_wins() {
        let mut table = ContentTypeTable::new();
        table.register(".bin", "application/x-first").unwrap();
        table.register(".bin", "application/x-second").unwrap();
        assert_eq!(table.lookup("blob.bin"), "application/x-second");
    }

    #[test]
    fn overriding_a_default() {
        let mut table = ContentTypeTable::new();
        table.register(".ogg", "audio/ogg; codecs=opus").unwrap();
        assert_eq!(table.lookup("ptt.ogg"), "audio/ogg; codecs=opus");
    }

    #[test]
    fn extension_without_dot_is_rejected() {
        let mut table = ContentTypeTable::new();
        let before = table.len();
        let err = table.register("doc", "application/msword").unwrap_err();
        assert!(matches!(err, Error::InvalidExtension { ref extension } if extension == "doc"));
        assert_eq!(table.len(), before);
        assert_eq!(table.lookup("a.doc"), OCTET_STREAM);
    }

    #[test]
    fn extension_extraction() {
        assert_eq!(extension("a/b/c.TXT").as_deref(), Some(".txt"));
        assert_eq!(extension("noext"), None);
        assert_eq!(extension(".bashrc"), None);
        assert_eq!(extension("trailing."), Some(".".to_string()));
    }
}
