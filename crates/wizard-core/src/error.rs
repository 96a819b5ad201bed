//! Error Types

use thiserror::Error;

/// Result type alias for wizard operations
pub type Result<T> = std::result::Result<T, WizardError>;

/// Wizard error types
#[derive(Error, Debug)]
pub enum WizardError {
    /// Required request context is missing or inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target account does not exist in the progress store
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// A step name that is not part of the wizard plan
    #[error("Unknown wizard step: {0}")]
    UnknownStep(String),

    /// Upstream service failed or returned an unusable response
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WizardError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            WizardError::Config(_) | WizardError::AccountNotFound(_) => {
                "There is a problem with your account setup. Try again or contact support."
            }
            WizardError::UnknownStep(_) => "The page you requested does not exist.",
            _ => "Something went wrong. Try again or contact support.",
        }
    }
}

impl From<anyhow::Error> for WizardError {
    fn from(err: anyhow::Error) -> Self {
        WizardError::Upstream(err.to_string())
    }
}

/// Error returned by a step's external side-effect service.
///
/// A `Domain` error carries the upstream `code` field; recognized codes are
/// mapped to field-level messages by the step controller, unrecognized ones
/// bubble to the generic error handler.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Structured error with an upstream error code
    #[error("{code}: {message}")]
    Domain { code: String, message: String },

    /// Transport-level failure (connection, timeout, malformed body)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    pub fn domain(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Domain {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The upstream error code, if this is a domain error
    pub fn code(&self) -> Option<&str> {
        match self {
            ServiceError::Domain { code, .. } => Some(code),
            ServiceError::Transport(_) => None,
        }
    }
}

impl From<ServiceError> for WizardError {
    fn from(err: ServiceError) -> Self {
        WizardError::Upstream(err.to_string())
    }
}
