//! Store configuration.

use crate::history::DEFAULT_HISTORY_LIMIT;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for a [`DocumentStore`](crate::DocumentStore).
///
/// Every field has a default, so a host config file only needs to name the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of undo entries kept.
    pub history_limit: usize,
    /// Offset applied to a duplicated element.
    pub duplicate_offset: Vec2,
    /// Region the alignment commands align against.
    pub artboard: Rect,
    /// Arrow-key nudge distance.
    pub nudge_step: f64,
    /// Shift+arrow nudge distance.
    pub nudge_step_large: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            duplicate_offset: Vec2::new(20.0, 20.0),
            artboard: Rect::new(100.0, 100.0, 700.0, 500.0),
            nudge_step: 1.0,
            nudge_step_large: 10.0,
        }
    }
}

impl StoreConfig {
    /// Parse a config from JSON, filling in defaults for missing fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.history_limit, 30);
        assert_eq!(config.duplicate_offset, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_partial_json() {
        let config = StoreConfig::from_json(r#"{ "history_limit": 5 }"#).unwrap();
        assert_eq!(config.history_limit, 5);
        assert!((config.nudge_step_large - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_round_trip() {
        let config = StoreConfig {
            history_limit: 12,
            ..StoreConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(StoreConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            StoreConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
