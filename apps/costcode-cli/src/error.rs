//! # CLI Error Type
//!
//! One error type for every command, with a machine-readable code so
//! scripts driving `costcode --json` can branch on it.
//!
//! ```json
//! { "code": "INVALID_CODE", "message": "'NAX' is not a valid cost code" }
//! ```

use serde::Serialize;
use std::process::ExitCode;

use costcode_config::ConfigError;
use costcode_core::ValidationError;

/// Error returned from commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Well-formed input that the scheme cannot decode
    InvalidCode,

    /// Input rejected before decoding
    ValidationError,

    /// Config file, environment or scheme problem
    ConfigError,

    /// Anything else
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid-code error.
    pub fn invalid_code(code: &str) -> Self {
        CliError::new(
            ErrorCode::InvalidCode,
            format!("'{}' is not a valid cost code", code),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// Process exit status for this error.
    ///
    /// `1` means "the answer is no" (bad code), `2` means the tool itself
    /// could not do its job.
    pub fn exit_status(&self) -> u8 {
        match self.code {
            ErrorCode::InvalidCode | ErrorCode::ValidationError => 1,
            ErrorCode::ConfigError | ErrorCode::Internal => 2,
        }
    }

    /// [`exit_status`](Self::exit_status) as an [`ExitCode`].
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Failed to serialize output: {}", err);
        CliError::internal("Failed to serialize output")
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;
    use costcode_core::MappingError;

    #[test]
    fn test_serializes_with_screaming_code() {
        let err = CliError::invalid_code("NAX");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"code":"INVALID_CODE","message":"'NAX' is not a valid cost code"}"#
        );
    }

    #[test]
    fn test_errors_keep_their_category() {
        let err: CliError = ValidationError::Required {
            field: "cost code".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: CliError =
            ConfigError::InvalidMapping(MappingError::MissingDigit { digit: 1 }).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::invalid_code("X").exit_status(), 1);
        assert_eq!(CliError::internal("boom").exit_status(), 2);
    }
}
