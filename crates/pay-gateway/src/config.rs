//! # Gateway Configuration
//!
//! Configuration for the processor integration.
//! All secrets are loaded from environment variables.

use pay_core::{PayloadEncoding, PaymentError};
use std::env;

/// Processor API configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API key used only to obtain bearer tokens from the identity service
    pub api_key: String,

    /// Processing terminal all session/payment calls run against
    pub processing_terminal_id: String,

    /// Apple merchant domain registered with the processor
    pub apple_domain_id: String,

    /// ISO 4217 settlement currency attached to every order
    pub currency: String,

    /// Base URL for session/payment endpoints
    pub api_base_url: String,

    /// Full URL of the credential-exchange endpoint
    pub identity_url: String,

    /// Transport encoding for the Apple Pay payload
    pub payload_encoding: PayloadEncoding,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PROCESSOR_API_KEY`
    /// - `PROCESSING_TERMINAL_ID`
    /// - `APPLE_DOMAIN_ID`
    /// - `CURRENCY`
    /// - `PROCESSOR_API_HOST`
    /// - `PROCESSOR_IDENTITY_HOST`
    ///
    /// Optional:
    /// - `APPLE_PAYLOAD_ENCODING` (`hex` | `opaque`, defaults to `hex`)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("PROCESSOR_API_KEY")
            .map_err(|_| PaymentError::Configuration("PROCESSOR_API_KEY not set".to_string()))?;

        let processing_terminal_id = env::var("PROCESSING_TERMINAL_ID").map_err(|_| {
            PaymentError::Configuration("PROCESSING_TERMINAL_ID not set".to_string())
        })?;

        let apple_domain_id = env::var("APPLE_DOMAIN_ID")
            .map_err(|_| PaymentError::Configuration("APPLE_DOMAIN_ID not set".to_string()))?;

        let currency = env::var("CURRENCY")
            .map_err(|_| PaymentError::Configuration("CURRENCY not set".to_string()))?;

        let api_base_url = env::var("PROCESSOR_API_HOST")
            .map_err(|_| PaymentError::Configuration("PROCESSOR_API_HOST not set".to_string()))?;

        let identity_url = env::var("PROCESSOR_IDENTITY_HOST").map_err(|_| {
            PaymentError::Configuration("PROCESSOR_IDENTITY_HOST not set".to_string())
        })?;

        let payload_encoding = match env::var("APPLE_PAYLOAD_ENCODING") {
            Ok(value) => value.parse()?,
            Err(_) => PayloadEncoding::default(),
        };

        let config = Self {
            api_key,
            processing_terminal_id,
            apple_domain_id,
            currency,
            api_base_url,
            identity_url,
            payload_encoding,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        api_key: impl Into<String>,
        processing_terminal_id: impl Into<String>,
        apple_domain_id: impl Into<String>,
        currency: impl Into<String>,
        api_base_url: impl Into<String>,
        identity_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            processing_terminal_id: processing_terminal_id.into(),
            apple_domain_id: apple_domain_id.into(),
            currency: currency.into(),
            api_base_url: api_base_url.into(),
            identity_url: identity_url.into(),
            payload_encoding: PayloadEncoding::default(),
        }
    }

    /// Builder: select the Apple Pay payload encoding
    pub fn with_payload_encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.payload_encoding = encoding;
        self
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set custom identity endpoint URL (for testing)
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = url.into();
        self
    }

    fn validate(&self) -> Result<(), PaymentError> {
        if self.api_key.is_empty() {
            return Err(PaymentError::Configuration(
                "PROCESSOR_API_KEY must not be empty".to_string(),
            ));
        }
        if self.processing_terminal_id.is_empty() {
            return Err(PaymentError::Configuration(
                "PROCESSING_TERMINAL_ID must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
