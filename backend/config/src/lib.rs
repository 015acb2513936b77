//! `mdplain-config` — mdplain configuration management.
//!
//! Provides:
//! - Typed config schema (export, print, server, logging)
//! - YAML read/write with atomic replacement
//! - `MDPLAIN_*` environment overrides
//! - Default value application
//! - Schema validation

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

// Re-export most-used types at crate root.
pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::MdplainConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::Result;
use std::path::Path;

/// Load a config file, apply env overrides and defaults, then validate it.
///
/// This is the main entry point for loading a config at runtime. Validation
/// problems are returned rather than raised so the caller can log them once
/// logging is up.
pub async fn load_and_prepare(path: &Path) -> Result<(MdplainConfig, ValidationReport)> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config);
    let config = apply_all_defaults(config);
    let report = validate(&config);
    Ok((config, report))
}
