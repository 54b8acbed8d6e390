//! # Payment Error Types
//!
//! Typed error handling for the apple-cart payment engine.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Credential exchange with the identity service failed.
    /// `body` is the raw upstream response text (or transport error text).
    #[error("Credential exchange failed: {body}")]
    Auth { body: String },

    /// Gateway session/payment call failed.
    /// `body` is the raw upstream response text (or transport error text).
    #[error("Gateway error: {body}")]
    Gateway { body: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Auth { .. } | PaymentError::Gateway { .. })
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::Auth { .. } => 502,
            PaymentError::Gateway { .. } => 502,
            PaymentError::Serialization(_) => 500,
            PaymentError::Internal(_) => 500,
        }
    }

    /// The raw upstream response text, if this error carries one
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            PaymentError::Auth { body } | PaymentError::Gateway { body } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PaymentError::Auth {
            body: "401 unauthorized".into()
        }
        .is_retryable());
        assert!(PaymentError::Gateway {
            body: "card declined".into()
        }
        .is_retryable());
        assert!(!PaymentError::InvalidRequest("bad data".into()).is_retryable());
        assert!(!PaymentError::Configuration("missing key".into()).is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PaymentError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(
            PaymentError::Auth {
                body: "denied".into()
            }
            .status_code(),
            502
        );
        assert_eq!(
            PaymentError::Gateway {
                body: "declined".into()
            }
            .status_code(),
            502
        );
        assert_eq!(
            PaymentError::Configuration("missing".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_upstream_body_carried_verbatim() {
        let body = r#"{"code":"invalid_terminal","message":"unknown terminal"}"#;
        let err = PaymentError::Gateway { body: body.into() };
        assert_eq!(err.upstream_body(), Some(body));

        let err = PaymentError::Auth { body: body.into() };
        assert_eq!(err.upstream_body(), Some(body));

        assert_eq!(
            PaymentError::Serialization("oops".into()).upstream_body(),
            None
        );
    }
}
