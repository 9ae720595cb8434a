//! Routing configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {name}: {value} (must be a positive finite number)")]
    InvalidGap { name: &'static str, value: f64 },
}

/// Gaps reserved around documents for routing corridors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingConfig {
    /// Horizontal space between document columns
    pub column_gap: f64,
    /// Vertical space between document rows
    pub row_gap: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            column_gap: 150.0, // Matches the slide spacing of the line review canvas
            row_gap: 150.0,
        }
    }
}

impl RoutingConfig {
    pub fn new(column_gap: f64, row_gap: f64) -> Result<Self, ConfigError> {
        let config = Self {
            column_gap,
            row_gap,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_gap("column gap", self.column_gap)?;
        check_gap("row gap", self.row_gap)
    }

    pub fn half_column_gap(&self) -> f64 {
        self.column_gap / 2.0
    }

    pub fn half_row_gap(&self) -> f64 {
        self.row_gap / 2.0
    }
}

fn check_gap(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidGap { name, value })
    }
}
