use crate::error::VerdantError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLES_PER_SEGMENT: usize = 1000;

/// Engine settings that are not part of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Trapezoid intervals per gradient segment.
    pub samples_per_segment: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            samples_per_segment: DEFAULT_SAMPLES_PER_SEGMENT,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), VerdantError> {
        if self.samples_per_segment < 2 {
            return Err(VerdantError::InvalidConfig(format!(
                "samples_per_segment must be at least 2, got {}",
                self.samples_per_segment
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let config = ScoringConfig::default();
        assert_eq!(config.samples_per_segment, 1000);
        config.validate().unwrap();
    }

    #[test]
    fn test_too_coarse_resolution_rejected() {
        let config = ScoringConfig {
            samples_per_segment: 1,
        };
        assert_eq!(config.validate().unwrap_err().kind(), "invalid_config");
    }
}
