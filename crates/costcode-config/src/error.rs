//! # Config Error Types
//!
//! Everything that can go wrong between a `costcode.toml` on disk and a
//! working codec.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  File            TOML              Scheme                               │
//! │  ───────────     ───────────       ─────────────────────                │
//! │  LoadFailed      LoadFailed        InvalidMapping (from costcode-core)  │
//! │  NotFound        SaveFailed        InvalidConfig                        │
//! │  SaveFailed                                                             │
//! │  NoConfigPath                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use costcode_core::MappingError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    /// No explicit path and no platform config directory.
    #[error("No config path available")]
    NoConfigPath,

    /// A setting that is well-formed TOML but not a usable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configured letters do not form a usable scheme.
    #[error("Invalid cost code scheme: {0}")]
    InvalidMapping(#[from] MappingError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_converts() {
        let err: ConfigError = MappingError::MissingDigit { digit: 3 }.into();
        assert!(matches!(err, ConfigError::InvalidMapping(_)));
        assert_eq!(
            err.to_string(),
            "Invalid cost code scheme: digit 3 has no letter assigned"
        );
    }

    #[test]
    fn test_toml_error_is_load_failure() {
        let err: ConfigError = toml::from_str::<toml::Table>("[mapping").unwrap_err().into();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
    }

    #[test]
    fn test_not_found_names_the_path() {
        let err = ConfigError::NotFound(PathBuf::from("typo.toml"));
        assert_eq!(err.to_string(), "Config file not found: typo.toml");
    }
}
