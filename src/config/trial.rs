//! Trial configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Trial configuration
///
/// Controls the window granted to first-time users when their
/// subscription record is provisioned.
#[derive(Debug, Clone, Deserialize)]
pub struct TrialConfig {
    /// Trial length in days
    #[serde(default = "default_trial_days")]
    pub days: i64,
}

impl TrialConfig {
    /// Validate trial configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.days < 1 {
            return Err(ValidationError::InvalidTrialLength);
        }
        Ok(())
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            days: default_trial_days(),
        }
    }
}

fn default_trial_days() -> i64 {
    7
}
