//! mdplain configuration schema.
//!
//! Every section and field is optional in the YAML file; `defaults` fills the
//! gaps after loading.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MdplainConfig {
    /// Where converted files are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,

    /// Print document rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print: Option<PrintConfig>,

    /// HTTP API server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    /// Name of the plain text file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Name of the print HTML document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_file_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Request body limit in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling NDJSON logs; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors (valid after `apply_all_defaults`)
// ---------------------------------------------------------------------------

impl MdplainConfig {
    pub fn output_dir(&self) -> &str {
        self.export
            .as_ref()
            .and_then(|e| e.output_dir.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_OUTPUT_DIR)
    }

    pub fn text_file_name(&self) -> &str {
        self.export
            .as_ref()
            .and_then(|e| e.file_name.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_TEXT_FILE_NAME)
    }

    pub fn print_file_name(&self) -> &str {
        self.export
            .as_ref()
            .and_then(|e| e.print_file_name.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_PRINT_FILE_NAME)
    }

    pub fn print_title(&self) -> &str {
        self.print
            .as_ref()
            .and_then(|p| p.title.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_PRINT_TITLE)
    }

    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_BIND)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(crate::defaults::DEFAULT_PORT)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.server
            .as_ref()
            .and_then(|s| s.max_body_bytes)
            .unwrap_or(crate::defaults::DEFAULT_MAX_BODY_BYTES)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(crate::defaults::DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.dir.as_deref())
    }
}
