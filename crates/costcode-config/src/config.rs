//! # Cost Code Configuration
//!
//! Which scheme a store uses, and where that choice comes from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     COSTCODE_DIGITS=SNBQMFZVLJ                                         │
//! │     COSTCODE_DOUBLE_ZERO=SC                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/pos/costcode.toml (Linux)                                │
//! │     ~/Library/Application Support/com.costcode.pos/costcode.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     The standard S N B Q M F Z V L J / SC / SCS scheme                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # costcode.toml
//! [mapping]
//! digits = "SNBQMFZVLJ"   # letters for 0,1,2,...,9
//! double_zero = "SC"
//! triple_zero = "SCS"
//!
//! [display]
//! currency_symbol = "$"
//! ```
//!
//! Every field is optional. A missing file means the default scheme.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use costcode_core::mapping::{DEFAULT_DIGIT_LETTERS, DEFAULT_DOUBLE_ZERO, DEFAULT_TRIPLE_ZERO};
use costcode_core::{CostCodeCodec, CostCodeMapping};

use crate::error::{ConfigError, ConfigResult};

/// Overrides `mapping.digits`.
pub const ENV_DIGITS: &str = "COSTCODE_DIGITS";
/// Overrides `mapping.double_zero`.
pub const ENV_DOUBLE_ZERO: &str = "COSTCODE_DOUBLE_ZERO";
/// Overrides `mapping.triple_zero`.
pub const ENV_TRIPLE_ZERO: &str = "COSTCODE_TRIPLE_ZERO";
/// Overrides `display.currency_symbol`.
pub const ENV_CURRENCY_SYMBOL: &str = "COSTCODE_CURRENCY_SYMBOL";

const CONFIG_FILE_NAME: &str = "costcode.toml";

// =============================================================================
// Mapping Settings
// =============================================================================

/// The scheme as written in the config file.
///
/// Unchecked until [`CostCodeConfig::build_mapping`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSettings {
    /// Ten letters, one per digit, in order 0..9.
    #[serde(default = "default_digits")]
    pub digits: String,

    /// Token replacing "00".
    #[serde(default = "default_double_zero")]
    pub double_zero: String,

    /// Token replacing "000".
    #[serde(default = "default_triple_zero")]
    pub triple_zero: String,
}

fn default_digits() -> String {
    DEFAULT_DIGIT_LETTERS.iter().collect()
}

fn default_double_zero() -> String {
    DEFAULT_DOUBLE_ZERO.to_string()
}

fn default_triple_zero() -> String {
    DEFAULT_TRIPLE_ZERO.to_string()
}

impl Default for MappingSettings {
    fn default() -> Self {
        MappingSettings {
            digits: default_digits(),
            double_zero: default_double_zero(),
            triple_zero: default_triple_zero(),
        }
    }
}

impl From<&CostCodeMapping> for MappingSettings {
    fn from(mapping: &CostCodeMapping) -> Self {
        MappingSettings {
            digits: mapping.digit_to_letter().values().collect(),
            double_zero: mapping.double_zero_code().to_string(),
            triple_zero: mapping.triple_zero_code().to_string(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How decoded costs are shown in the back-office tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Currency symbol placed before a decoded cost.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl DisplaySettings {
    /// Formats a decoded whole-unit cost.
    ///
    /// ## Example
    /// ```rust
    /// use costcode_config::DisplaySettings;
    ///
    /// assert_eq!(DisplaySettings::default().format_units(30050), "$30050");
    /// ```
    pub fn format_units(&self, units: u64) -> String {
        format!("{}{}", self.currency_symbol, units)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cost code configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCodeConfig {
    /// Scheme letters and zero-run tokens.
    #[serde(default)]
    pub mapping: MappingSettings,

    /// Output formatting.
    #[serde(default)]
    pub display: DisplaySettings,
}

impl CostCodeConfig {
    /// Creates a config holding the default scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (costcode.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. Only the platform default file
    /// may be absent.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with a custom variable lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                info!(?path, "Loading cost code config from file");
                config = Self::read_file(&path)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading cost code config from file");
                    config = Self::read_file(&path)?;
                }
                path => debug!(?path, "Config file not found, using defaults"),
            },
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cost code config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Cost code config saved");
        Ok(())
    }

    /// Validates the configuration by building its scheme.
    pub fn validate(&self) -> ConfigResult<()> {
        self.build_mapping().map(|_| ())
    }

    /// Builds the checked scheme described by this config.
    pub fn build_mapping(&self) -> ConfigResult<CostCodeMapping> {
        let letters = parse_digit_letters(&self.mapping.digits)?;
        let mapping = CostCodeMapping::new(
            letters,
            self.mapping.double_zero.as_str(),
            self.mapping.triple_zero.as_str(),
        )?;
        Ok(mapping)
    }

    /// Builds a codec for this config's scheme.
    pub fn codec(&self) -> ConfigResult<CostCodeCodec> {
        self.build_mapping().map(CostCodeCodec::new)
    }

    /// Replaces the scheme with an already validated one.
    pub fn set_mapping(&mut self, mapping: &CostCodeMapping) {
        self.mapping = MappingSettings::from(mapping);
    }

    fn read_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies overrides from a variable lookup (normally the environment).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(digits) = lookup(ENV_DIGITS) {
            let digits = digits.trim().to_string();
            match parse_digit_letters(&digits) {
                Ok(_) => {
                    debug!(digits = %digits, "Overriding scheme digits from environment");
                    self.mapping.digits = digits;
                }
                Err(e) => warn!(value = %digits, error = %e, "Ignoring {}", ENV_DIGITS),
            }
        }

        if let Some(token) = lookup(ENV_DOUBLE_ZERO) {
            debug!(token = %token, "Overriding double-zero token from environment");
            self.mapping.double_zero = token.trim().to_string();
        }

        if let Some(token) = lookup(ENV_TRIPLE_ZERO) {
            debug!(token = %token, "Overriding triple-zero token from environment");
            self.mapping.triple_zero = token.trim().to_string();
        }

        if let Some(symbol) = lookup(ENV_CURRENCY_SYMBOL) {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "costcode", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

/// Splits a ten-letter string into per-digit letters.
///
/// Only the count is checked here; letter rules belong to
/// [`CostCodeMapping::new`].
fn parse_digit_letters(digits: &str) -> ConfigResult<[char; 10]> {
    let chars: Vec<char> = digits.chars().collect();
    <[char; 10]>::try_from(chars).map_err(|chars| {
        ConfigError::InvalidConfig(format!(
            "digits must list exactly 10 letters for 0-9, got {}",
            chars.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config_builds_default_mapping() {
        let config = CostCodeConfig::default();
        assert_eq!(config.mapping.digits, "SNBQMFZVLJ");
        assert_eq!(config.build_mapping().unwrap(), CostCodeMapping::default_mapping());
        assert_eq!(config.codec().unwrap().encode(125.0), "NBF");
    }

    /// Empty file: every field takes its default.
    fn empty_config(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("costcode.toml");
        std::fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CostCodeConfig::load_with(Some(empty_config(&dir)), no_env).unwrap();
        assert_eq!(config, CostCodeConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = CostCodeConfig::load_with(Some(path.clone()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if *p == path));

        // Even with a full scheme in the environment.
        let lookup = env(&[(ENV_DIGITS, "ABCDEFGHIJ")]);
        assert!(CostCodeConfig::load_with(Some(path), lookup).is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costcode.toml");
        std::fs::write(&path, "[mapping]\ndigits = \"ABCDEFGHIJ\"\ndouble_zero = \"X\"\ntriple_zero = \"Y\"\n").unwrap();

        let config = CostCodeConfig::load_with(Some(path), no_env).unwrap();
        assert_eq!(config.display.currency_symbol, "$");
        let codec = config.codec().unwrap();
        assert_eq!(codec.encode(1000.0), "BY");
        assert_eq!(codec.decode("BX"), Some(100));
    }

    #[test]
    fn test_bad_scheme_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costcode.toml");
        std::fs::write(&path, "[mapping]\ndigits = \"SNBQMFZVLS\"\n").unwrap();

        let err = CostCodeConfig::load_with(Some(path.clone()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMapping(_)));

        std::fs::write(&path, "[mapping]\ndigits = \"SNB\"\n").unwrap();
        let err = CostCodeConfig::load_with(Some(path.clone()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));

        std::fs::write(&path, "[mapping\n").unwrap();
        let err = CostCodeConfig::load_with(Some(path), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costcode.toml");
        CostCodeConfig::default().save(Some(path.clone())).unwrap();

        let lookup = env(&[
            (ENV_DIGITS, "ABCDEFGHIJ"),
            (ENV_DOUBLE_ZERO, " X "),
            (ENV_TRIPLE_ZERO, "Y"),
            (ENV_CURRENCY_SYMBOL, "₱"),
        ]);
        let config = CostCodeConfig::load_with(Some(path), lookup).unwrap();
        assert_eq!(config.mapping.digits, "ABCDEFGHIJ");
        assert_eq!(config.mapping.double_zero, "X");
        assert_eq!(config.display.format_units(5), "₱5");
    }

    #[test]
    fn test_malformed_digits_override_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = env(&[(ENV_DIGITS, "ABC")]);
        let config = CostCodeConfig::load_with(Some(empty_config(&dir)), lookup).unwrap();
        assert_eq!(config.mapping.digits, "SNBQMFZVLJ");
    }

    #[test]
    fn test_ambiguous_env_tokens_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let lookup = env(&[(ENV_DOUBLE_ZERO, "S")]);
        let err = CostCodeConfig::load_with(Some(empty_config(&dir)), lookup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMapping(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("costcode.toml");

        let mut config = CostCodeConfig::default();
        let custom = CostCodeMapping::new(
            ['Q', 'W', 'E', 'R', 'T', 'Y', 'U', 'I', 'O', 'P'],
            "QZ",
            "QZQ",
        )
        .unwrap();
        config.set_mapping(&custom);
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[mapping]"));
        assert!(contents.contains("QWERTYUIOP"));

        let reloaded = CostCodeConfig::load_with(Some(path), no_env).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.build_mapping().unwrap(), custom);
    }
}
