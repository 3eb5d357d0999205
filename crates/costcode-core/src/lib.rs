//! # costcode-core: Pure Cost Code Logic
//!
//! Products carry a hidden cost. Staff at the counter see a *cost code*
//! instead: a short run of letters that the back office can turn back into
//! the cost, but that a customer looking over the counter cannot read.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cost Code Workspace                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   Mobile POS (pricing screens, receiving)  /  costcode-cli      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   costcode-config: which scheme? (TOML, env, defaults)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CostCodeMapping                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ costcode-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  mapping  │  │   codec   │  │   money   │  │ validation│  │   │
//! │  │   │  scheme   │  │  encode   │  │   Money   │  │   input   │  │   │
//! │  │   │  checks   │  │  decode   │  │  units    │  │  cleanup  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`mapping`] - The digit ↔ letter scheme and its construction checks
//! - [`codec`] - `encode` / `decode` / `is_valid_code`
//! - [`money`] - Integer money, bridged to whole-unit costs
//! - [`validation`] - Cleanup of typed or scanned codes
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use costcode_core::{CostCodeCodec, CostCodeMapping};
//!
//! let codec = CostCodeCodec::new(CostCodeMapping::default_mapping());
//!
//! let code = codec.encode(20500.0);
//! assert_eq!(code, "BSFSC");
//! assert_eq!(codec.decode(&code), Some(20500));
//! assert!(!codec.is_valid_code("NAX"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod mapping;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use codec::{decode, default_codec, encode, is_valid_code, CostCodeCodec};
pub use error::{MappingError, ValidationError};
pub use mapping::{CostCodeMapping, MappingSpec, ZeroRun};
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest cost code accepted from user input.
///
/// ## Business Reason
/// A `u64` cost has at most 20 digits, so a default-scheme code is at most
/// 20 letters. The extra room covers custom schemes with longer zero-run
/// tokens without letting pasted junk through.
pub const MAX_CODE_LENGTH: usize = 32;
