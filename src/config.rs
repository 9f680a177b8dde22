//! Engine configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use crate::consts::{ENV_HANDLE_SIZE, ENV_HANDLE_TOLERANCE, ENV_HIT_PRIORITY, HANDLE_SIZE, HANDLE_TOLERANCE};
use crate::error::ConfigError;
use crate::geometry::{HitOptions, HitPriority};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Half-width of the square around a rectangle corner that grabs the handle.
    pub handle_tolerance: f64,
    /// Side of the handle boxes reported in the scene.
    pub handle_size: f64,
    pub hit_priority: HitPriority,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handle_tolerance: HANDLE_TOLERANCE,
            handle_size: HANDLE_SIZE,
            hit_priority: HitPriority::FirstCommitted,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `SKETCHPAD_HANDLE_TOLERANCE`: default 5
    /// - `SKETCHPAD_HANDLE_SIZE`: default 6
    /// - `SKETCHPAD_HIT_PRIORITY`: `first` (default) or `topmost`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let tolerance = read_var(ENV_HANDLE_TOLERANCE)?;
        let size = read_var(ENV_HANDLE_SIZE)?;
        let priority = read_var(ENV_HIT_PRIORITY)?;
        Self::from_values(tolerance.as_deref(), size.as_deref(), priority.as_deref())
    }

    /// Build config from a lookup function standing in for the environment.
    ///
    /// # Errors
    ///
    /// Same as [`EngineConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_values(
            lookup(ENV_HANDLE_TOLERANCE).as_deref(),
            lookup(ENV_HANDLE_SIZE).as_deref(),
            lookup(ENV_HIT_PRIORITY).as_deref(),
        )
    }

    fn from_values(tolerance: Option<&str>, size: Option<&str>, priority: Option<&str>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            handle_tolerance: parse_positive(ENV_HANDLE_TOLERANCE, tolerance, defaults.handle_tolerance)?,
            handle_size: parse_positive(ENV_HANDLE_SIZE, size, defaults.handle_size)?,
            hit_priority: parse_priority(priority)?,
        })
    }

    /// Hit-test options derived from this config.
    #[must_use]
    pub fn hit_options(&self) -> HitOptions {
        HitOptions { handle_tolerance: self.handle_tolerance, priority: self.hit_priority }
    }
}

fn read_var(var: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var }),
    }
}

fn parse_positive(var: &'static str, raw: Option<&str>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw.to_string() })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::OutOfRange { var, value });
    }
    Ok(value)
}

fn parse_priority(raw: Option<&str>) -> Result<HitPriority, ConfigError> {
    match raw.map(str::trim).unwrap_or("first") {
        "first" => Ok(HitPriority::FirstCommitted),
        "topmost" => Ok(HitPriority::Topmost),
        other => Err(ConfigError::UnknownPriority(other.to_string())),
    }
}
