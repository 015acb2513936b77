//! CLI Config Commands
//!
//! Creates, prints, and checks the config file.

use std::path::Path;

use anyhow::{bail, Result};

use mdplain_config::{apply_all_defaults, validate, write_config, MdplainConfig};

/// Write a config file populated with every default.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    let config = apply_all_defaults(MdplainConfig::default());
    write_config(&config, path).await?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Print the effective config as YAML.
pub fn show(config: &MdplainConfig) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

/// Validate the effective config; fails when any error is found.
pub fn check(config: &MdplainConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if !report.is_valid() {
        bail!("Config has {} error(s)", report.errors.len());
    }
    println!("Config OK");
    Ok(())
}
