//! # Commands
//!
//! What each subcommand does, separated from argument parsing and printing
//! so it can be tested directly.
//!
//! ```text
//! costcode encode 125.99   → EncodeOutput { cost: 125.99, units: 125, code: "NBF" }
//! costcode decode " nbf "  → DecodeOutput { code: "NBF", units: 125, display: "$125" }
//! costcode check NAX       → CheckOutput  { code: "NAX", valid: false }
//! costcode show            → MappingSpec  (digits, double_zero, triple_zero)
//! ```

use serde::Serialize;
use std::fmt;
use tracing::debug;

use costcode_config::DisplaySettings;
use costcode_core::validation::normalize_code_input;
use costcode_core::{CostCodeCodec, MappingSpec};

use crate::error::CliError;

/// Result of `encode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeOutput {
    /// The number as given.
    pub cost: f64,
    /// Whole units actually encoded (clamped, truncated).
    pub units: u64,
    pub code: String,
}

/// Result of `decode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeOutput {
    /// The normalized code that was decoded.
    pub code: String,
    pub units: u64,
    /// Units formatted for people.
    pub display: String,
}

/// Result of `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutput {
    pub code: String,
    pub valid: bool,
}

/// Result of `show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowOutput {
    #[serde(flatten)]
    pub spec: MappingSpec,
}

/// Encodes a cost.
pub fn encode(codec: &CostCodeCodec, cost: f64) -> EncodeOutput {
    let units = CostCodeCodec::units_for(cost);
    let code = codec.encode_units(units);
    debug!(cost, units, code = %code, "Encoded cost");
    EncodeOutput { cost, units, code }
}

/// Decodes a typed or scanned code.
///
/// Input is trimmed and uppercased first; the decode itself is strict.
pub fn decode(
    codec: &CostCodeCodec,
    display: &DisplaySettings,
    input: &str,
) -> Result<DecodeOutput, CliError> {
    let code = normalize_code_input(input)?;
    let units = codec
        .decode(&code)
        .ok_or_else(|| CliError::invalid_code(&code))?;

    debug!(code = %code, units, "Decoded cost code");
    Ok(DecodeOutput {
        display: display.format_units(units),
        code,
        units,
    })
}

/// Reports whether a code decodes.
///
/// Input that fails cleanup (empty, digits, punctuation) is simply invalid.
pub fn check(codec: &CostCodeCodec, input: &str) -> CheckOutput {
    match normalize_code_input(input) {
        Ok(code) => CheckOutput {
            valid: codec.is_valid_code(&code),
            code,
        },
        Err(_) => CheckOutput {
            code: input.trim().to_string(),
            valid: false,
        },
    }
}

/// Describes the active scheme.
pub fn show(codec: &CostCodeCodec) -> ShowOutput {
    ShowOutput {
        spec: codec.mapping().to_spec(),
    }
}

// =============================================================================
// Plain Text Rendering
// =============================================================================

impl fmt::Display for EncodeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl fmt::Display for DecodeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl fmt::Display for CheckOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.valid { "valid" } else { "invalid" };
        write!(f, "{}: {}", self.code, verdict)
    }
}

impl fmt::Display for ShowOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (digit, letter) in &self.spec.digits {
            writeln!(f, "{digit}   → {letter}")?;
        }
        writeln!(f, "00  → {}", self.spec.double_zero)?;
        write!(f, "000 → {}", self.spec.triple_zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn codec() -> CostCodeCodec {
        CostCodeCodec::default()
    }

    #[test]
    fn test_encode_reports_encoded_units() {
        let out = encode(&codec(), 125.99);
        assert_eq!(out.units, 125);
        assert_eq!(out.code, "NBF");
        assert_eq!(out.to_string(), "NBF");

        let out = encode(&codec(), -3.0);
        assert_eq!(out.units, 0);
        assert_eq!(out.code, "S");

        let out = encode(&codec(), f64::NAN);
        assert_eq!(out.units, 0);
        assert_eq!(out.code, codec().encode(f64::NAN));
    }

    #[test]
    fn test_decode_normalizes_input() {
        let out = decode(&codec(), &DisplaySettings::default(), "  qscfs ").unwrap();
        assert_eq!(out.code, "QSCFS");
        assert_eq!(out.units, 30050);
        assert_eq!(out.to_string(), "$30050");
    }

    #[test]
    fn test_decode_errors() {
        let display = DisplaySettings::default();

        let err = decode(&codec(), &display, "NAX").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCode);

        let err = decode(&codec(), &display, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = decode(&codec(), &display, "N4").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_check() {
        assert!(check(&codec(), "NSCS").valid);
        assert!(check(&codec(), "nscs").valid);
        assert!(!check(&codec(), "X").valid);
        assert!(!check(&codec(), "").valid);
        assert_eq!(check(&codec(), "X").to_string(), "X: invalid");
    }

    #[test]
    fn test_show_lists_scheme() {
        let out = show(&codec());
        assert_eq!(out.spec.triple_zero, "SCS");

        let text = out.to_string();
        assert!(text.starts_with("0   → S\n1   → N"));
        assert!(text.ends_with("000 → SCS"));

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["double_zero"], "SC");
        assert_eq!(json["digits"]["9"], "J");
    }
}
