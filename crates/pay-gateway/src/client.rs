//! # Gateway Client
//!
//! The processor-facing payment client. Builds and sends the two outbound
//! operations (Apple Pay merchant-session validation, payment creation),
//! fetching a bearer token from the [`TokenService`] before every call and
//! attaching a fresh idempotency key to every request.
//!
//! All outbound traffic funnels through the private `send` chokepoint, so
//! timeout, logging, and error-mapping behavior lives in exactly one place.

use crate::config::GatewayConfig;
use crate::token::TokenService;
use async_trait::async_trait;
use pay_core::{
    PaymentError, PaymentMethod, PaymentOrder, PaymentRequest, PaymentResult, WalletGateway,
    DEFAULT_PAYMENT_DESCRIPTION,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Apple Pay gateway client for the processor API
pub struct GatewayClient {
    config: GatewayConfig,
    client: Client,
    tokens: TokenService,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(config: GatewayConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let tokens = TokenService::new(config.clone(), client.clone());

        Self {
            config,
            client,
            tokens,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = GatewayConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build the outbound header set for one request.
    ///
    /// The bearer token is fetched first (refreshing if needed) and a fresh
    /// idempotency key is generated on every call, so each request carries
    /// its own key even when the token is reused.
    async fn build_headers(&self) -> PaymentResult<HeaderMap> {
        let token = self.tokens.get_access_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| PaymentError::Internal(format!("Invalid bearer header: {}", e)))?,
        );
        headers.insert(
            "Idempotency-Key",
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .map_err(|e| PaymentError::Internal(format!("Invalid idempotency key: {}", e)))?,
        );

        Ok(headers)
    }

    /// Single chokepoint for all outbound processor calls
    async fn send<T: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &T,
    ) -> PaymentResult<serde_json::Value> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| PaymentError::Gateway {
                body: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| PaymentError::Gateway {
            body: e.to_string(),
        })?;

        if !status.is_success() {
            error!("Gateway API error: status={}, body={}", status, text);
            return Err(PaymentError::Gateway { body: text });
        }

        serde_json::from_str(&text).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse gateway response: {}", e))
        })
    }
}

#[async_trait]
impl WalletGateway for GatewayClient {
    #[instrument(skip(self))]
    async fn get_apple_session(
        &self,
        validation_url: &str,
    ) -> PaymentResult<serde_json::Value> {
        let url = format!(
            "{}/processing-terminals/{}/apple-pay-sessions",
            self.config.api_base_url, self.config.processing_terminal_id
        );

        let request = AppleSessionRequest {
            apple_domain_id: &self.config.apple_domain_id,
            apple_validation_url: validation_url,
        };

        let headers = self.build_headers().await?;
        let response = self.send(&url, headers, &request).await?;

        // The processor wraps the merchant session in a string-encoded JSON
        // field, so it has to be decoded a second time before the browser
        // can hand it to completeMerchantValidation.
        let envelope: AppleSessionEnvelope = serde_json::from_value(response).map_err(|e| {
            PaymentError::Serialization(format!("Unexpected session response shape: {}", e))
        })?;

        let session = serde_json::from_str(&envelope.apple_pay_session_response).map_err(|e| {
            PaymentError::Serialization(format!("Failed to decode merchant session: {}", e))
        })?;

        debug!("Merchant session validated");
        Ok(session)
    }

    #[instrument(skip(self, apple_payload))]
    async fn create_payment(
        &self,
        amount: i64,
        description: Option<&str>,
        apple_payload: &str,
    ) -> PaymentResult<serde_json::Value> {
        let url = format!("{}/payments", self.config.api_base_url);

        let order = PaymentOrder::new(
            amount,
            description.unwrap_or(DEFAULT_PAYMENT_DESCRIPTION),
            &self.config.currency,
        );
        let encrypted_data = self.config.payload_encoding.encode(apple_payload);
        let request = PaymentRequest::web(
            &self.config.processing_terminal_id,
            order,
            PaymentMethod::apple_pay(encrypted_data),
        );

        let headers = self.build_headers().await?;
        let response = self.send(&url, headers, &request).await?;

        info!("Payment submitted: order_id={}", request.order.order_id);
        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "gateway"
    }
}

// =============================================================================
// Processor API Types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppleSessionRequest<'a> {
    apple_domain_id: &'a str,
    apple_validation_url: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppleSessionEnvelope {
    apple_pay_session_response: String,
}
