use serde::Deserialize;

use crate::error::ConfigError;

/// Largest supported side length.
pub const MAX_BOARD_SIZE: u8 = 52;

/// Engine construction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub cols: u8,
    pub rows: u8,
    /// Fixes the position-hash table. Drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cols: 9,
            rows: 9,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_dimensions(cols: u8, rows: u8) -> Self {
        EngineConfig {
            cols,
            rows,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |n: u8| (1..=MAX_BOARD_SIZE).contains(&n);
        if valid(self.cols) && valid(self.rows) {
            Ok(())
        } else {
            Err(ConfigError::InvalidDimensions {
                cols: self.cols,
                rows: self.rows,
            })
        }
    }
}
