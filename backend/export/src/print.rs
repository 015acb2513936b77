//! Print rendering.
//!
//! Wraps converted text in a minimal HTML document whose `<pre>` block keeps
//! every line break and run of spaces, ready for the browser's print dialog
//! (and "Save as PDF").

use std::path::PathBuf;

use tracing::info;

use crate::error::ExportError;
use crate::text::{check_file_name, write_atomic};

/// Title used when the caller gives none.
pub const DEFAULT_PRINT_TITLE: &str = "Converted Markdown Text";

/// Suggested name for the print document.
pub const DEFAULT_PRINT_FILE_NAME: &str = "converted-text.html";

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders `text` verbatim inside a printable HTML document.
pub fn render_print_html(title: &str, text: &str) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_PRINT_TITLE
    } else {
        title
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; line-height: 1.5; margin: 2cm; }}
pre {{ white-space: pre-wrap; font-family: monospace; }}
</style>
</head>
<body onload="window.print()">
<pre>{content}</pre>
</body>
</html>
"#,
        title = html_escape(title),
        content = html_escape(text),
    )
}

/// Writes print documents into an output directory.
pub struct PrintExporter {
    pub output_dir: PathBuf,
}

impl PrintExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub async fn export(
        &self,
        title: &str,
        text: &str,
        file_name: Option<&str>,
    ) -> Result<PathBuf, ExportError> {
        let name = file_name.unwrap_or(DEFAULT_PRINT_FILE_NAME);
        check_file_name(name)?;
        let path = self.output_dir.join(name);
        let html = render_print_html(title, text);
        write_atomic(&path, html.as_bytes()).await?;
        info!(path = %path.display(), "Exported print document");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_escaped_and_verbatim() {
        let html = render_print_html("Notes", "a < b && \"c\"\n    indented\n\n\nend");
        assert!(html.contains(
            "<pre>a &lt; b &amp;&amp; &quot;c&quot;\n    indented\n\n\nend</pre>"
        ));
        assert!(html.contains("white-space: pre-wrap"));
    }

    #[test]
    fn test_title() {
        assert!(render_print_html("<T>", "x").contains("<title>&lt;T&gt;</title>"));
        assert!(render_print_html("  ", "x").contains(&format!("<title>{DEFAULT_PRINT_TITLE}</title>")));
    }

    #[tokio::test]
    async fn test_export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = PrintExporter::new(dir.path())
            .export("Doc", "• item", None)
            .await
            .unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_PRINT_FILE_NAME);
        let html = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(html.contains("<pre>• item</pre>"));
    }
}
