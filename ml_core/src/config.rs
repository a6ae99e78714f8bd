use std::{env, fs, path::PathBuf};

use crate::{
    split::{DEFAULT_SEED, DEFAULT_TEST_FRACTION},
    MlError, Result,
};

pub const DEFAULT_DATA_PATH: &str = "maisons.csv";
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Environment variable overriding [`TrainingConfig::data_path`].
pub const DATA_PATH_VAR: &str = "IMMO_DATA";
/// Environment variable overriding [`TrainingConfig::model_path`].
pub const MODEL_PATH_VAR: &str = "IMMO_MODEL";

/// Everything the training pipeline needs to run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// CSV file with the listings and their prices.
    pub data_path: PathBuf,
    /// Where the fitted model is written.
    pub model_path: PathBuf,
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f64,
    /// Seed of the train/test shuffle.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.into(),
            model_path: DEFAULT_MODEL_PATH.into(),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrainingConfig {
    /// Loads a config from a JSON file, missing keys fall back to the defaults.
    ///
    /// ```json
    /// { "data_path": "maisons.csv", "model_path": "model.json",
    ///   "test_fraction": 0.2, "seed": 42 }
    /// ```
    ///
    /// # Errors
    /// Returns `MlError::Io` if the file cannot be read, `MlError::Json` if it
    /// is not JSON and `MlError::InvalidConfig` if a value has the wrong type
    /// or is out of range.
    pub fn from_json_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parses a config document, see [`TrainingConfig::from_json_file`].
    pub fn from_json_str(content: &str) -> Result<Self> {
        let val: serde_json::Value = serde_json::from_str(content)?;
        let defaults = Self::default();

        let path = |key: &str, default: PathBuf| -> Result<PathBuf> {
            match &val[key] {
                serde_json::Value::Null => Ok(default),
                serde_json::Value::String(s) if !s.trim().is_empty() => Ok(s.into()),
                _ => Err(MlError::InvalidConfig(format!(
                    "{key} must be a non-empty string"
                ))),
            }
        };

        let test_fraction = match &val["test_fraction"] {
            serde_json::Value::Null => defaults.test_fraction,
            v => v
                .as_f64()
                .filter(|f| (0.0..1.0).contains(f))
                .ok_or_else(|| {
                    MlError::InvalidConfig("test_fraction must be a number within [0, 1)".into())
                })?,
        };

        let seed = match &val["seed"] {
            serde_json::Value::Null => defaults.seed,
            v => v.as_u64().ok_or_else(|| {
                MlError::InvalidConfig("seed must be a non-negative integer".into())
            })?,
        };

        Ok(Self {
            data_path: path("data_path", defaults.data_path)?,
            model_path: path("model_path", defaults.model_path)?,
            test_fraction,
            seed,
        })
    }

    /// Replaces the paths with the `IMMO_DATA` / `IMMO_MODEL` variables when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(data) = env::var(DATA_PATH_VAR) {
            self.data_path = data.into();
        }
        if let Ok(model) = env::var(MODEL_PATH_VAR) {
            self.model_path = model.into();
        }
        self
    }
}
