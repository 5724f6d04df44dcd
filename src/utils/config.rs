//! File-backed engine configuration
//!
//! Deployments that tune the solver (tighter tolerance, stricter
//! collinearity threshold) keep the options in a JSON file next to the
//! application; the manager loads, validates, and persists them.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::api::types::EngineOptions;

/// Iteration cap accepted from configuration files
const MAX_CONFIGURABLE_ITERATIONS: usize = 10_000;

/// Errors from loading, validating, or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read or written
    Io { path: String, message: String },
    /// File contents were not valid configuration JSON
    Parse { message: String },
    /// A parameter was outside its accepted range
    InvalidParameter {
        parameter: String,
        value: String,
        valid_range: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "Configuration I/O error for {}: {}", path, message)
            }
            ConfigError::Parse { message } => {
                write!(f, "Configuration parse error: {}", message)
            }
            ConfigError::InvalidParameter {
                parameter,
                value,
                valid_range,
            } => {
                write!(
                    f,
                    "Invalid configuration parameter {}: {} (valid range: {})",
                    parameter, value, valid_range
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Engine configuration with file persistence
#[derive(Debug, Clone)]
pub struct ConfigurationManager {
    options: EngineOptions,
    modified: bool,
}

impl ConfigurationManager {
    /// Manager seeded with default options
    pub fn new() -> Self {
        Self {
            options: EngineOptions::default(),
            modified: false,
        }
    }

    /// Load and validate options from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let options: EngineOptions =
            serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            })?;
        Self::validate_options(&options)?;

        Ok(Self {
            options,
            modified: false,
        })
    }

    /// Persist the current options as pretty-printed JSON
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents =
            serde_json::to_string_pretty(&self.options).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            })?;
        fs::write(path, contents).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Replace the options after validating them
    pub fn set_options(&mut self, options: EngineOptions) -> Result<(), ConfigError> {
        Self::validate_options(&options)?;
        self.options = options;
        self.modified = true;
        Ok(())
    }

    /// Whether options changed since construction or the last load
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Range checks for every tunable parameter
    pub fn validate_options(options: &EngineOptions) -> Result<(), ConfigError> {
        if options.max_iterations == 0 || options.max_iterations > MAX_CONFIGURABLE_ITERATIONS {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_iterations".to_string(),
                value: options.max_iterations.to_string(),
                valid_range: format!("[1, {}]", MAX_CONFIGURABLE_ITERATIONS),
            });
        }
        if !options.epsilon_m.is_finite() || options.epsilon_m <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "epsilon_m".to_string(),
                value: options.epsilon_m.to_string(),
                valid_range: "(0, inf)".to_string(),
            });
        }
        if !options.collinearity_threshold.is_finite() || options.collinearity_threshold <= 1.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "collinearity_threshold".to_string(),
                value: options.collinearity_threshold.to_string(),
                valid_range: "(1, inf)".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_are_valid() {
        let manager = ConfigurationManager::new();
        assert!(!manager.is_modified());
        assert!(ConfigurationManager::validate_options(manager.options()).is_ok());
    }

    #[test]
    fn test_set_options_validates() {
        let mut manager = ConfigurationManager::new();
        let bad = EngineOptions {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            manager.set_options(bad),
            Err(ConfigError::InvalidParameter { .. })
        ));
        assert!(!manager.is_modified());

        let good = EngineOptions {
            max_iterations: 100,
            ..Default::default()
        };
        manager.set_options(good).unwrap();
        assert!(manager.is_modified());
        assert_eq!(manager.options().max_iterations, 100);
    }

    #[test]
    fn test_rejects_bad_epsilon_and_threshold() {
        let zero_epsilon = EngineOptions {
            epsilon_m: 0.0,
            ..Default::default()
        };
        assert!(ConfigurationManager::validate_options(&zero_epsilon).is_err());

        let nan_threshold = EngineOptions {
            collinearity_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(ConfigurationManager::validate_options(&nan_threshold).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let mut manager = ConfigurationManager::new();
        manager
            .set_options(EngineOptions {
                max_iterations: 40,
                epsilon_m: 5e-4,
                collinearity_threshold: 1e7,
            })
            .unwrap();

        let temp_path = PathBuf::from("test_engine_config.json");
        manager.save_to_file(&temp_path).unwrap();
        let loaded = ConfigurationManager::from_file(&temp_path).unwrap();

        assert_eq!(loaded.options(), manager.options());
        assert!(!loaded.is_modified());

        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ConfigurationManager::from_file("does_not_exist_config.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
