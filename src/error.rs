//! Error types.
//!
//! - `AnalysisError`: typed failures of the numeric core (decay model, crossing
//!   search, standardization classifier).
//! - `AppError`: application-level error carrying a process exit code.

use thiserror::Error;

/// Failures raised by the numeric core.
///
/// "No crossing found" is deliberately absent: it is an expected outcome and is
/// represented by `CrossingResult::NOT_FOUND`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("domain error: {reason}")]
    Domain { reason: String },

    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid model identifier '{id}': {reason}")]
    InvalidModelIdentifier { id: String, reason: String },

    #[error("duplicate catalog identifier '{id}'")]
    DuplicateIdentifier { id: String },
}

impl AnalysisError {
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    /// Return `Err(DimensionMismatch)` unless `found == expected`.
    pub fn ensure_len(what: &'static str, expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch {
                what,
                expected,
                found,
            })
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::new(4, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
