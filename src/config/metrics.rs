//! Metrics history configuration

use serde::Deserialize;

use crate::domain::routing::DEFAULT_METRICS_CAPACITY;

use super::error::ValidationError;

/// Metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    /// Maximum number of outcome records retained; oldest are evicted first
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl MetricsConfig {
    /// Validate metrics configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == 0 {
            return Err(ValidationError::InvalidMetricsCapacity);
        }
        Ok(())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_METRICS_CAPACITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(MetricsConfig::default().capacity, 1000);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = MetricsConfig { capacity: 0 };
        assert!(config.validate().is_err());
    }
}
