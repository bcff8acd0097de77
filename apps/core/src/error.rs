use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required credential or endpoint is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A provider call failed before a usable response was received (network, decoding).
    #[error("Provider error: {0}")]
    Provider(String),

    /// A provider answered with a non-success HTTP status.
    #[error("{service} request failed with status {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Represents data validation errors (e.g., missing or empty input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Taxonomy name reported to clients as `tipo_error` / `error_type`.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(_) => "ConfigurationError",
            AppError::Provider(_) | AppError::Upstream { .. } | AppError::Timeout(_) => {
                "ProviderError"
            }
            AppError::Validation(_) => "ValidationError",
            AppError::Io(_) | AppError::Internal(_) => "UnexpectedError",
        }
    }

    /// The human-readable detail without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            AppError::Config(s)
            | AppError::Provider(s)
            | AppError::Validation(s)
            | AppError::Timeout(s)
            | AppError::Internal(s) => s.clone(),
            AppError::Io(e) => e.to_string(),
            AppError::Upstream { .. } => self.to_string(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(format!("HTTP request timed out: {}", err))
        } else {
            AppError::Provider(format!("HTTP error: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_taxonomy() {
        assert_eq!(AppError::Config("x".into()).kind(), "ConfigurationError");
        assert_eq!(AppError::Provider("x".into()).kind(), "ProviderError");
        assert_eq!(AppError::Timeout("x".into()).kind(), "ProviderError");
        assert_eq!(
            AppError::Upstream {
                service: "Translator",
                status: 401,
                body: String::new()
            }
            .kind(),
            "ProviderError"
        );
        assert_eq!(AppError::Validation("x".into()).kind(), "ValidationError");
        assert_eq!(AppError::Internal("x".into()).kind(), "UnexpectedError");
        assert_eq!(
            AppError::Io(io::Error::other("disk")).kind(),
            "UnexpectedError"
        );
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = AppError::Config("LANGUAGE_KEY missing".to_string());
        assert_eq!(err.message(), "LANGUAGE_KEY missing");
        assert_eq!(err.to_string(), "Configuration error: LANGUAGE_KEY missing");
    }

    #[test]
    fn test_upstream_display() {
        let err = AppError::Upstream {
            service: "Vision",
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.message(), "Vision request failed with status 500: boom");
    }
}
