use crate::error::ConfigError;

/// Minimum ingredient coverage (0.0 to 1.0) for a recipe to show up in match results.
pub const DEFAULT_MINIMUM_MATCH_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    minimum_match_threshold: f64,
}

impl MatchConfig {
    pub fn new(minimum_match_threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&minimum_match_threshold) {
            return Err(ConfigError::InvalidThreshold(minimum_match_threshold));
        }
        Ok(Self {
            minimum_match_threshold,
        })
    }

    pub fn minimum_match_threshold(&self) -> f64 {
        self.minimum_match_threshold
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            minimum_match_threshold: DEFAULT_MINIMUM_MATCH_THRESHOLD,
        }
    }
}
