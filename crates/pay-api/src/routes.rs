//! # Routes
//!
//! Axum router configuration for the Apple Pay storefront API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - GET  /apple - Storefront demo page
/// - GET  /.well-known/apple-developer-merchant-id-domain-association
/// - POST /validate-merchant - Apple Pay merchant session validation
/// - POST /process-payment - Submit a captured Apple Pay token
pub fn create_router(state: AppState) -> Router {
    // Browser-facing API, open origins for the demo storefront
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/apple", get(handlers::apple_page))
        .route(
            "/.well-known/apple-developer-merchant-id-domain-association",
            get(handlers::domain_association),
        )
        .route("/validate-merchant", post(handlers::validate_merchant))
        .route("/process-payment", post(handlers::process_payment))
        // Apple Pay JS refuses to run without this header
        .layer(middleware::from_fn(payment_permissions_policy))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Attach `Permissions-Policy: payment=(self)` to every response
async fn payment_permissions_policy(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        "Permissions-Policy",
        HeaderValue::from_static("payment=(self)"),
    );
    response
}
