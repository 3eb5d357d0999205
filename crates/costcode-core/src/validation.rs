//! # Validation Module
//!
//! Checks on user input before it reaches the codec.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Staff types " nbf "                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_code_input ← THIS MODULE                                     │
//! │       ├── empty?           → Required                                   │
//! │       ├── > 32 chars?      → TooLong                                    │
//! │       ├── not A-Z / a-z?   → InvalidFormat                              │
//! │       └── OK → "NBF"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CostCodeCodec::decode("NBF") → Some(125)                              │
//! │                                                                         │
//! │  The codec stays strict (case-sensitive); leniency lives here.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_CODE_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Cleans up a typed or scanned cost code.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty
/// - At most [`MAX_CODE_LENGTH`] characters
/// - Letters only; returned uppercased
///
/// ## Example
/// ```rust
/// use costcode_core::validation::normalize_code_input;
///
/// assert_eq!(normalize_code_input(" nbf ").unwrap(), "NBF");
/// assert!(normalize_code_input("").is_err());
/// assert!(normalize_code_input("N4X").is_err());
/// ```
pub fn normalize_code_input(input: &str) -> ValidationResult<String> {
    let code = input.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "cost code".to_string(),
        });
    }

    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "cost code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "cost code".to_string(),
            reason: "must contain only letters A-Z".to_string(),
        });
    }

    Ok(code.to_ascii_uppercase())
}

// =============================================================================
// Unit Tests
// =============================================================================
