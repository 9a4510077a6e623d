//! Run configuration for a cross-validation pass.
//!
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! learning_rate = 0.1
//! folds = 5
//! epochs = 25
//! seed = 7
//! ```

use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::{PerceptronError, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub learning_rate: f64,
    pub folds: usize,
    /// Delta-rule passes per training record.
    pub epochs: usize,
    /// Fixed seed for the fold shuffles. Without one, every fold draws its
    /// seed from the clock.
    pub seed: Option<u64>,
    /// Train a fresh model for each fold instead of carrying the weights
    /// from one fold into the next.
    pub reset_per_fold: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            folds: 10,
            epochs: 1,
            seed: None,
            reset_per_fold: false,
        }
    }
}

impl RunConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| {
            PerceptronError::config(format!("could not read {}: {}", path.display(), err))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|err| PerceptronError::config(format!("invalid config: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.folds < 2 {
            return Err(PerceptronError::config(format!(
                "fold count must be >= 2, got {}",
                self.folds
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(PerceptronError::config(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if self.epochs < 1 {
            return Err(PerceptronError::config("epoch count must be >= 1, got 0"));
        }
        Ok(())
    }
}
