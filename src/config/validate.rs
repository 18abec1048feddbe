//! Configuration validation.

use crate::analysis::{GeneticCode, validate_alpha};
use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_hyphy(config)?;
    validate_defaults(config)?;
    Ok(())
}

/// Validate HyPhy installation settings.
fn validate_hyphy(config: &Config) -> Result<()> {
    let hyphy = &config.hyphy;

    if hyphy.executable.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "hyphy.executable must not be empty".to_string(),
        });
    }

    if hyphy.build_path.is_some() && hyphy.install_path.is_some() {
        return Err(Error::ConfigValidation {
            message: "set only one of hyphy.build_path and hyphy.install_path".to_string(),
        });
    }

    if hyphy.cpu == Some(0) {
        return Err(Error::ConfigValidation {
            message: "hyphy.cpu must be at least 1".to_string(),
        });
    }

    Ok(())
}

/// Validate default analysis settings.
fn validate_defaults(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    validate_alpha(defaults.alpha).map_err(|e| Error::ConfigValidation {
        message: format!("defaults.{e}"),
    })?;

    defaults
        .genetic_code
        .parse::<GeneticCode>()
        .map_err(|e| Error::ConfigValidation {
            message: format!("defaults.genetic_code: {e}"),
        })?;

    Ok(())
}
