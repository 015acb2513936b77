//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{ExportConfig, LoggingConfig, MdplainConfig, PrintConfig, ServerConfig};

pub const DEFAULT_OUTPUT_DIR: &str = ".";

// File names and the print title belong to the exporters.
pub use mdplain_export::{DEFAULT_PRINT_FILE_NAME, DEFAULT_PRINT_TITLE, DEFAULT_TEXT_FILE_NAME};

pub const DEFAULT_BIND: &str = "127.0.0.1";

pub const DEFAULT_PORT: u16 = 8080;

/// 5 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: MdplainConfig) -> MdplainConfig {
    let config = apply_export_defaults(config);
    let config = apply_print_defaults(config);
    let config = apply_server_defaults(config);
    apply_logging_defaults(config)
}

fn apply_export_defaults(mut config: MdplainConfig) -> MdplainConfig {
    let export = config.export.get_or_insert_with(ExportConfig::default);
    export
        .output_dir
        .get_or_insert_with(|| DEFAULT_OUTPUT_DIR.to_string());
    export
        .file_name
        .get_or_insert_with(|| DEFAULT_TEXT_FILE_NAME.to_string());
    export
        .print_file_name
        .get_or_insert_with(|| DEFAULT_PRINT_FILE_NAME.to_string());
    config
}

fn apply_print_defaults(mut config: MdplainConfig) -> MdplainConfig {
    let print = config.print.get_or_insert_with(PrintConfig::default);
    if print.title.is_none() {
        print.title = Some(DEFAULT_PRINT_TITLE.to_string());
    }
    config
}

fn apply_server_defaults(mut config: MdplainConfig) -> MdplainConfig {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    server.bind.get_or_insert_with(|| DEFAULT_BIND.to_string());
    server.port.get_or_insert(DEFAULT_PORT);
    server.max_body_bytes.get_or_insert(DEFAULT_MAX_BODY_BYTES);
    config
}

/// Log directory stays unset: console-only logging unless configured.
fn apply_logging_defaults(mut config: MdplainConfig) -> MdplainConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}
