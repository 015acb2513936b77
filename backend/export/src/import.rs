//! Markdown file import.
//!
//! Reads `.md`, `.markdown`, and `.txt` files as UTF-8 text. Invalid byte
//! sequences are replaced rather than rejected, the way a browser reads an
//! uploaded text file.

use std::path::Path;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::error::ExportError;

/// File extensions accepted for import (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

const BOM: char = '\u{feff}';

fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

fn decode(bytes: Vec<u8>, origin: &str) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(origin, "Input is not valid UTF-8; replacing invalid sequences");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    match text.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Reads a Markdown or text file from disk.
pub async fn read_markdown_file(path: &Path) -> Result<String, ExportError> {
    if !is_accepted(path) {
        return Err(ExportError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ExportError::io(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read markdown file");
    Ok(decode(bytes, &path.display().to_string()))
}

/// Reads Markdown from any async reader, typically stdin.
pub async fn read_markdown_reader<R>(mut reader: R) -> Result<String, ExportError>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| ExportError::io("<stdin>", e))?;
    Ok(decode(bytes, "<stdin>"))
}
