//! Plain text file export.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

use crate::error::ExportError;

/// Suggested name for the converted text file.
pub const DEFAULT_TEXT_FILE_NAME: &str = "converted-text.txt";

/// Content type of the exported file.
pub const TEXT_MIME_TYPE: &str = "text/plain; charset=utf-8";

/// Rejects names that would escape the output directory.
pub(crate) fn check_file_name(name: &str) -> Result<(), ExportError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\'])
    {
        return Err(ExportError::InvalidFileName(name.to_string()));
    }
    Ok(())
}

/// Writes `contents` to `path` through a temp file and a rename.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ExportError::io(parent, e))?;
        }
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, contents)
        .await
        .map_err(|e| ExportError::io(&tmp_path, e))?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(ExportError::io(path, e));
    }
    Ok(())
}

/// Writes converted text into an output directory.
pub struct TextExporter {
    pub output_dir: PathBuf,
}

impl TextExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Writes `text` unchanged as UTF-8 and returns the file path.
    ///
    /// `file_name` defaults to [`DEFAULT_TEXT_FILE_NAME`].
    pub async fn export(&self, text: &str, file_name: Option<&str>) -> Result<PathBuf, ExportError> {
        let name = file_name.unwrap_or(DEFAULT_TEXT_FILE_NAME);
        check_file_name(name)?;
        let path = self.output_dir.join(name);
        write_atomic(&path, text.as_bytes()).await?;
        info!(path = %path.display(), bytes = text.len(), "Exported plain text");
        Ok(path)
    }
}
