use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid multipart boundary: {boundary:?}")]
    InvalidBoundary { boundary: String },

    #[error("extension must start with a dot (.): {extension:?}")]
    InvalidExtension { extension: String },

    #[error("failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    #[must_use]
    pub fn invalid_boundary(boundary: impl Into<String>) -> Self {
        Self::InvalidBoundary {
            boundary: boundary.into(),
        }
    }

    #[must_use]
    pub fn invalid_extension(extension: impl Into<String>) -> Self {
        Self::InvalidExtension {
            extension: extension.into(),
        }
    }

    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
