//! # Wallet Gateway Trait
//!
//! Seam between the HTTP front end and the processor integration.
//! The API layer holds a `BoxedWalletGateway`, so the concrete client can be
//! swapped for another processor (or a mock in tests) without changing
//! handler code.

use crate::error::PaymentResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for processor-facing Apple Pay operations.
///
/// Implementations own their credential lifecycle; callers never see the
/// bearer token, only the two business operations.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    /// Request an Apple Pay merchant session from the processor.
    ///
    /// # Arguments
    /// * `validation_url` - The validation URL Apple handed to the browser
    ///
    /// # Returns
    /// The decoded merchant session object, ready to be passed verbatim to
    /// `session.completeMerchantValidation(...)` in the browser.
    async fn get_apple_session(
        &self,
        validation_url: &str,
    ) -> PaymentResult<serde_json::Value>;

    /// Submit a captured Apple Pay payment token as a payment.
    ///
    /// # Arguments
    /// * `amount` - Amount in the configured currency's minor unit
    /// * `description` - Statement description; a fixed default applies when `None`
    /// * `apple_payload` - The Apple Pay payment token, serialized to a string
    ///
    /// # Returns
    /// The processor's payment result object, unmodified.
    async fn create_payment(
        &self,
        amount: i64,
        description: Option<&str>,
        apple_payload: &str,
    ) -> PaymentResult<serde_json::Value>;

    /// Get the processor name (for logging and routing).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed wallet gateway (dynamic dispatch)
pub type BoxedWalletGateway = Arc<dyn WalletGateway>;
