//! Collaborators around the plain text converter.
//!
//! Everything here moves strings in and out of `mdplain_markdown::convert`:
//! reading uploaded Markdown, writing the converted text file, rendering the
//! print document, and the sample text.

pub mod error;
pub mod import;
pub mod print;
pub mod sample;
pub mod text;

pub use error::ExportError;
pub use import::{read_markdown_file, read_markdown_reader, ACCEPTED_EXTENSIONS};
pub use print::{render_print_html, PrintExporter, DEFAULT_PRINT_FILE_NAME, DEFAULT_PRINT_TITLE};
pub use sample::SAMPLE_MARKDOWN;
pub use text::{TextExporter, DEFAULT_TEXT_FILE_NAME, TEXT_MIME_TYPE};
