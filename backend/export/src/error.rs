use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while moving text between files and the converter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type: {path} (expected .md, .markdown, or .txt)")]
    UnsupportedExtension { path: PathBuf },

    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
