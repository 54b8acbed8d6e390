//! # Order Types
//!
//! Wire-shaped payment body types for the processor's `/payments` endpoint.
//! Field names follow the processor's camelCase JSON contract.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Description attached to a payment order when the caller supplies none
pub const DEFAULT_PAYMENT_DESCRIPTION: &str = "Apple Payment";

/// Sales channel reported on every payment
pub const WEB_CHANNEL: &str = "web";

/// A single payment order, built fresh per payment request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    /// Processor-visible order ID (Unix epoch milliseconds as a string)
    pub order_id: String,

    /// Free-text description shown on the customer statement
    pub description: String,

    /// ISO 4217 currency code, passed through unchanged
    pub currency: String,

    /// Amount in the currency's minor unit (cents for USD)
    pub amount: i64,
}

impl PaymentOrder {
    /// Create an order with a time-derived ID
    pub fn new(
        amount: i64,
        description: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            order_id: Utc::now().timestamp_millis().to_string(),
            description: description.into(),
            currency: currency.into(),
            amount,
        }
    }
}

/// A digital-wallet payment method carrying the encrypted Apple Pay payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Always `digitalWallet` for this integration
    #[serde(rename = "type")]
    pub method_type: String,

    /// Wallet provider (`apple`)
    pub service_provider: String,

    /// The Apple Pay payment token in its transport representation
    pub encrypted_data: String,
}

impl PaymentMethod {
    /// Create an Apple Pay payment method from an already-encoded payload
    pub fn apple_pay(encrypted_data: impl Into<String>) -> Self {
        Self {
            method_type: "digitalWallet".to_string(),
            service_provider: "apple".to_string(),
            encrypted_data: encrypted_data.into(),
        }
    }
}

/// Full request body for the processor's `/payments` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Terminal the payment settles against
    pub processing_terminal_id: String,

    /// Sales channel (`web`)
    pub channel: String,

    /// Order details
    pub order: PaymentOrder,

    /// Wallet payment method
    pub payment_method: PaymentMethod,
}

impl PaymentRequest {
    /// Build a web-channel payment request
    pub fn web(
        processing_terminal_id: impl Into<String>,
        order: PaymentOrder,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            processing_terminal_id: processing_terminal_id.into(),
            channel: WEB_CHANNEL.to_string(),
            order,
            payment_method,
        }
    }
}
