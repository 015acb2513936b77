//! Config validation: schema checks with user-friendly error messages.

use thiserror::Error;

use crate::schema::MdplainConfig;

/// Levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Emit every finding through `tracing`.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &MdplainConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_export(config, &mut report);
    validate_server(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn check_file_name(path: &str, name: &str, report: &mut ValidationReport) {
    if name.trim().is_empty() {
        report.error(path, "File name cannot be empty");
    } else if name.contains(['/', '\\']) || name == "." || name == ".." {
        report.error(path, "File name must not contain path separators");
    }
}

fn validate_export(config: &MdplainConfig, report: &mut ValidationReport) {
    let Some(export) = &config.export else { return };
    if let Some(name) = &export.file_name {
        check_file_name("export.fileName", name, report);
    }
    if let Some(name) = &export.print_file_name {
        check_file_name("export.printFileName", name, report);
    }
    if export.output_dir.as_deref().map(str::trim) == Some("") {
        report.error("export.outputDir", "Output directory cannot be empty");
    }
}

fn validate_server(config: &MdplainConfig, report: &mut ValidationReport) {
    let Some(server) = &config.server else { return };
    if let Some(port) = server.port {
        if port == 0 {
            report.error("server.port", "Port must be > 0");
        } else if port < 1024 {
            report.warn(
                "server.port",
                format!("Port {port} requires elevated privileges; consider using a port >= 1024"),
            );
        }
    }
    if server.max_body_bytes == Some(0) {
        report.error("server.maxBodyBytes", "maxBodyBytes must be > 0");
    }
}

fn validate_logging(config: &MdplainConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else {
        return;
    };
    if !LOG_LEVELS.iter().any(|l| l.eq_ignore_ascii_case(level)) {
        report.error(
            "logging.level",
            format!("Unknown log level '{level}' (expected one of {})", LOG_LEVELS.join(", ")),
        );
    }
}
