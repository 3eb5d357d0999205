//! # costcode-config: Scheme Configuration
//!
//! Loads the store's cost code scheme from a TOML file and environment
//! variables, and turns it into a ready [`CostCodeCodec`](costcode_core::CostCodeCodec).
//!
//! Kept out of `costcode-core` so the core stays free of file and
//! environment access.
//!
//! ## Usage
//! ```rust,no_run
//! use costcode_config::CostCodeConfig;
//!
//! let config = CostCodeConfig::load_or_default(None);
//! let codec = config.codec()?;
//! println!("{}", codec.encode(125.0));
//! # Ok::<(), costcode_config::ConfigError>(())
//! ```

pub mod config;
pub mod error;

pub use config::{CostCodeConfig, DisplaySettings, MappingSettings};
pub use error::{ConfigError, ConfigResult};
