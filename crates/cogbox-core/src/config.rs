//! Model configuration

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default activation for excited elements
pub const DEFAULT_EXCITE_ACTIVATION: f64 = 1.0;

/// Default activation for inhibited elements
pub const DEFAULT_INHIBIT_ACTIVATION: f64 = 0.1;

/// Configuration for a simulation model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model name, used in dumps and as the fallback component name
    pub name: String,
    /// Seed for the model's random stream (OS entropy when absent)
    pub seed: Option<u64>,
    /// Activation set on elements with a positive Excite/Inhibit tally
    pub excite_activation: f64,
    /// Activation set on elements with a negative Excite/Inhibit tally
    pub inhibit_activation: f64,
    /// Trials per unit, for the outer driver loop
    pub trials_per_unit: usize,
    /// Units per run, for the outer driver loop
    pub units_per_run: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "model".to_string(),
            seed: None,
            excite_activation: DEFAULT_EXCITE_ACTIVATION,
            inhibit_activation: DEFAULT_INHIBIT_ACTIVATION,
            trials_per_unit: 1,
            units_per_run: 1,
        }
    }
}

impl ModelConfig {
    /// Default configuration with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.excite_activation.is_finite() || !self.inhibit_activation.is_finite() {
            return Err(ModelError::InvalidConfig(
                "activation levels must be finite".to_string(),
            ));
        }
        if self.trials_per_unit == 0 || self.units_per_run == 0 {
            return Err(ModelError::InvalidConfig(
                "repetition counts must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
