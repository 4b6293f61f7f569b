//! Configuration validation.
//!
//! Validates all engine config fields before a run starts.

use crate::domain::error::GoldenCrossError;
use crate::ports::config_port::ConfigPort;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), GoldenCrossError> {
    validate_data_dir(config)?;
    validate_windows(config)?;
    validate_unit_size(config)?;
    validate_initial_capital(config)?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), GoldenCrossError> {
    match config.get_string("data", "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        Some(_) => Err(GoldenCrossError::ConfigInvalid {
            section: "data".to_string(),
            key: "dir".to_string(),
            reason: "dir must not be empty".to_string(),
        }),
        None => Err(GoldenCrossError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), GoldenCrossError> {
    let short = config.get_int("strategy", "short_window", 50);
    let long = config.get_int("strategy", "long_window", 200);

    if short < 1 {
        return Err(GoldenCrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be at least 1".to_string(),
        });
    }
    if long < 1 {
        return Err(GoldenCrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "long_window".to_string(),
            reason: "long_window must be at least 1".to_string(),
        });
    }
    if short >= long {
        return Err(GoldenCrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be less than long_window".to_string(),
        });
    }
    Ok(())
}

fn validate_unit_size(config: &dyn ConfigPort) -> Result<(), GoldenCrossError> {
    let value = config.get_double("engine", "unit_size", 1000.0);
    if value <= 0.0 {
        return Err(GoldenCrossError::ConfigInvalid {
            section: "engine".to_string(),
            key: "unit_size".to_string(),
            reason: "unit_size must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), GoldenCrossError> {
    let value = config.get_double("engine", "initial_capital", 10_000.0);
    if value <= 0.0 {
        return Err(GoldenCrossError::ConfigInvalid {
            section: "engine".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        });
    }
    Ok(())
}
