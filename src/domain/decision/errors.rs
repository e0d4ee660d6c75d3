//! Decision-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Decision-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// No candidate menu item could be resolved.
    NoCandidates,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Storage or other infrastructure failure.
    Infrastructure(String),
}

impl DecisionError {
    pub fn no_candidates() -> Self {
        DecisionError::NoCandidates
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DecisionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        DecisionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::NoCandidates => ErrorCode::NoCandidates,
            DecisionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DecisionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            DecisionError::NoCandidates => "没有可选择的菜品".to_string(),
            DecisionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            DecisionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
    /// Whether the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DecisionError::Infrastructure(_))
    }
}

impl std::fmt::Display for DecisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DecisionError {}

impl From<DomainError> for DecisionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::NoCandidates => DecisionError::NoCandidates,
            ErrorCode::ValidationFailed => DecisionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => DecisionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for DecisionError {
    fn from(err: ValidationError) -> Self {
        DecisionError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
