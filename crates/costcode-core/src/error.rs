//! # Error Types
//!
//! Domain-specific error types for costcode-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  costcode-core errors (this file)                                      │
//! │  ├── MappingError     - A scheme that cannot be used (construction)    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  costcode-config errors (separate crate)                               │
//! │  └── ConfigError      - File/env/TOML problems                         │
//! │                                                                         │
//! │  NOT an error: a code that fails to decode.                            │
//! │  decode() returns None - garbage typed at a register is expected.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (digit, letter, token)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Mapping Error
// =============================================================================

/// Construction-time failures for a [`CostCodeMapping`](crate::CostCodeMapping).
///
/// These are configuration mistakes, not runtime data errors: a scheme that
/// fails here never reaches the codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A digit 0-9 has no letter.
    #[error("digit {digit} has no letter assigned")]
    MissingDigit { digit: u8 },

    /// A key in a mapping spec is not a single decimal digit.
    #[error("'{key}' is not a single decimal digit")]
    InvalidDigit { key: String },

    /// A digit's symbol is not exactly one uppercase ASCII letter.
    #[error("digit {digit} maps to '{symbol}', expected one uppercase letter A-Z")]
    InvalidLetter { digit: u8, symbol: String },

    /// Two digits share a letter.
    #[error("letter '{letter}' is used by both digit {first} and digit {second}")]
    DuplicateLetter { letter: char, first: u8, second: u8 },

    /// A zero-run token is empty or contains something other than A-Z.
    #[error("{name} '{token}' must be one or more uppercase letters A-Z")]
    InvalidToken { name: &'static str, token: String },

    /// A zero-run token can be matched where the encoder placed something else.
    ///
    /// ## Example
    /// ```text
    /// triple_zero = "SN", digit 0 = 'S', digit 1 = 'N'
    ///
    /// encode(1001) = "N" "SC" "N"   ... fine
    /// encode(101)  = "N" "S"  "N"   → "NSN"
    ///                    └──┴── decode sees "SN" = 000  ✗
    /// ```
    #[error("{name} '{token}' can be read inside '{context}', decoding would not reverse encoding")]
    AmbiguousToken {
        name: &'static str,
        token: String,
        context: String,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the codec runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., digits inside a cost code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
