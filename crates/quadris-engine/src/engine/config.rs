use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Grid dimensions and gravity timing for an [`Engine`](super::Engine).
///
/// Deserialisation fills missing fields from [`EngineConfig::default`]:
///
/// ```
/// use quadris_engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "columns": 12 }"#).unwrap();
/// assert_eq!(config.columns, 12);
/// assert_eq!(config.rows, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Number of columns of the grid.
    pub columns: usize,
    /// Number of rows of the grid.
    pub rows: usize,
    /// Time per cell of gravity at level 1.
    pub base_fall_interval_ms: u64,
    /// How much faster gravity gets with each level.
    pub fall_interval_step_ms: u64,
    /// Lower bound of the gravity interval.
    pub min_fall_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 20,
            base_fall_interval_ms: 800,
            fall_interval_step_ms: 50,
            min_fall_interval_ms: 50,
        }
    }
}

impl EngineConfig {
    /// Smallest grid side that fits every rotation state of every piece.
    pub const MIN_GRID_SIDE: usize = 4;
    /// Largest grid side accepted.
    pub const MAX_GRID_SIDE: usize = 1024;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(Self::MIN_GRID_SIDE..=Self::MAX_GRID_SIDE).contains(&self.columns) {
            return Err(ConfigError::InvalidColumns {
                columns: self.columns,
            });
        }
        if !(Self::MIN_GRID_SIDE..=Self::MAX_GRID_SIDE).contains(&self.rows) {
            return Err(ConfigError::InvalidRows { rows: self.rows });
        }
        if self.base_fall_interval_ms == 0 || self.min_fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        Ok(())
    }

    /// Returns the gravity interval for `level`.
    ///
    /// `max(min, base - (level - 1) * step)`; with the defaults this is 800 ms at
    /// level 1, 50 ms faster per level, and never below 50 ms.
    #[must_use]
    pub fn fall_interval(&self, level: usize) -> Duration {
        let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
        let millis = self
            .base_fall_interval_ms
            .saturating_sub(self.fall_interval_step_ms.saturating_mul(steps))
            .max(self.min_fall_interval_ms);
        Duration::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_fall_interval_by_level() {
        let config = EngineConfig::default();
        assert_eq!(config.fall_interval(1), Duration::from_millis(800));
        assert_eq!(config.fall_interval(2), Duration::from_millis(750));
        assert_eq!(config.fall_interval(15), Duration::from_millis(100));
        assert_eq!(config.fall_interval(16), Duration::from_millis(50));
        assert_eq!(config.fall_interval(100), Duration::from_millis(50));
        // Level 0 never occurs, but is treated like level 1.
        assert_eq!(config.fall_interval(0), Duration::from_millis(800));
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let config = EngineConfig {
            columns: 3,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidColumns { columns: 3 })
        );

        let config = EngineConfig {
            rows: 2,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidRows { rows: 2 }));

        let config = EngineConfig {
            columns: 2000,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidColumns { columns: 2000 })
        );
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = EngineConfig {
            min_fall_interval_ms: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFallInterval));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::InvalidColumns { columns: 2 }.to_string(),
            "grid columns must be between 4 and 1024, got 2"
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result = serde_json::from_str::<EngineConfig>(r#"{ "colums": 12 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = EngineConfig {
            columns: 8,
            rows: 16,
            ..EngineConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<EngineConfig>(&json).unwrap(), config);
    }
}
