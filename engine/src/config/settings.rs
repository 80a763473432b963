// Engine settings, loaded from a JSON file or left at their defaults
use serde::Deserialize;
use std::path::Path;

use crate::error::EngineError;
use crate::indicators::window::MAX_WINDOW;

/// Environment variable naming the JSON settings file.
pub const CONFIG_ENV_VAR: &str = "TA_ENGINE_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Largest period any indicator parameter may request.
    pub max_window: usize,
    /// Evaluate batch indicators on the rayon thread pool.
    pub parallel_batch: bool,
    /// Default tracing filter when RUST_LOG is not set.
    pub log_filter: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            max_window: 5000,
            parallel_batch: false,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(json)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Reads the file named by `TA_ENGINE_CONFIG`, or falls back to defaults.
    pub fn load() -> Result<Self, EngineError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::debug!(path = %path, "Loading engine settings");
                Self::from_file(path.trim())
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_window == 0 || self.max_window > MAX_WINDOW {
            return Err(EngineError::ConfigError(format!(
                "max_window must be between 1 and {}, got {}",
                MAX_WINDOW, self.max_window
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.max_window, 5000);
        assert!(!settings.parallel_batch);
        assert_eq!(settings.log_filter, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = EngineSettings::from_json_str(r#"{ "parallel_batch": true }"#).unwrap();
        assert!(settings.parallel_batch);
        assert_eq!(settings.max_window, 5000);
    }

    #[test]
    fn test_zero_max_window_rejected() {
        let err = EngineSettings::from_json_str(r#"{ "max_window": 0 }"#).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
        assert!(err.to_string().contains("max_window"));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = EngineSettings::from_json_str("{ max_window: }").unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "max_window": 250, "log_filter": "debug" }}"#).unwrap();
        file.flush().unwrap();
        let settings = EngineSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.max_window, 250);
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineSettings::from_file("does/not/exist.json").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }
}
