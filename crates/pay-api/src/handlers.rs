//! # Request Handlers
//!
//! Axum request handlers for the Apple Pay storefront API.
//! The processor work happens behind the `WalletGateway` trait; these
//! handlers only translate between browser JSON and gateway calls.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use pay_core::PaymentError;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

/// Apple's cert-environment session URL, used when the browser doesn't send one
pub const APPLE_CERT_VALIDATION_URL: &str =
    "https://apple-pay-gateway-cert.apple.com/paymentservices/startSession";

/// Demo amount in minor units when the caller doesn't supply one
fn default_amount() -> i64 {
    1000
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Merchant validation request from the Apple Pay JS `onvalidatemerchant` hook
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateMerchantRequest {
    /// Validation URL Apple handed to the browser session
    #[serde(default)]
    pub validation_url: Option<String>,
}

/// Payment submission from the Apple Pay JS `onpaymentauthorized` hook
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentRequest {
    /// The captured Apple Pay payment token
    pub token: serde_json::Value,

    /// Amount in the settlement currency's minor unit
    #[serde(default = "default_amount")]
    pub amount: i64,

    /// Optional statement description
    #[serde(default)]
    pub description: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "apple-cart",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Validate an Apple Pay merchant session.
///
/// Returns the decoded merchant session object; the browser passes it
/// straight to `session.completeMerchantValidation(...)`.
#[instrument(skip(state, request))]
pub async fn validate_merchant(
    State(state): State<AppState>,
    Json(request): Json<ValidateMerchantRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let validation_url = request
        .validation_url
        .as_deref()
        .unwrap_or(APPLE_CERT_VALIDATION_URL);

    let session = state
        .gateway
        .get_apple_session(validation_url)
        .await
        .map_err(|e| {
            error!("Merchant validation failed: {}", e);
            payment_error_to_response(e)
        })?;

    info!("Merchant session validated");
    Ok(Json(session))
}

/// Submit a captured Apple Pay token as a payment
#[instrument(skip(state, request), fields(amount = request.amount))]
pub async fn process_payment(
    State(state): State<AppState>,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    let apple_payload = serde_json::to_string(&request.token).map_err(|e| {
        payment_error_to_response(PaymentError::InvalidRequest(format!(
            "Unserializable payment token: {}",
            e
        )))
    })?;

    let result = state
        .gateway
        .create_payment(request.amount, request.description.as_deref(), &apple_payload)
        .await
        .map_err(|e| {
            error!("Payment failed: {}", e);
            payment_error_to_response(e)
        })?;

    info!("Payment processed");
    Ok(Json(result))
}

/// Serve the Apple merchant domain-association file.
///
/// Apple fetches this during domain verification; the file contents are
/// issued by Apple and deployed alongside the binary.
pub async fn domain_association(
    State(state): State<AppState>,
) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let path = state
        .config
        .static_dir
        .join(".well-known")
        .join("apple-developer-merchant-id-domain-association");

    tokio::fs::read_to_string(&path).await.map_err(|e| {
        error!("Error reading domain association file: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(e.to_string(), 500)),
        )
    })
}

/// Serve the storefront demo page
pub async fn apple_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let path = state.config.static_dir.join("apple_pay.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents)),
        Err(e) => {
            error!("Error reading storefront page: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string(), 500)),
            ))
        }
    }
}
