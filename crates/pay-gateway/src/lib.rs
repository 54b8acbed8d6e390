//! # pay-gateway
//!
//! Processor integration for apple-cart-rs: everything that talks to the
//! payment gateway's API.
//!
//! This crate provides:
//!
//! 1. **TokenService** - Cached bearer-token lifecycle
//!    - One token per process, refreshed on expiry
//!    - Single-flight refresh under concurrency
//!    - Strict error propagation (no silent empty-token fallback)
//!
//! 2. **GatewayClient** - The two processor operations
//!    - Apple Pay merchant-session validation (with inner-JSON decoding)
//!    - Payment creation from a captured Apple Pay token
//!    - Fresh `Idempotency-Key` per outbound request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_gateway::GatewayClient;
//! use pay_core::WalletGateway;
//!
//! // Create client from environment
//! let client = GatewayClient::from_env()?;
//!
//! // Validate a merchant session for the browser
//! let session = client
//!     .get_apple_session("https://apple-pay-gateway-cert.apple.com/paymentservices/startSession")
//!     .await?;
//!
//! // Submit a captured Apple Pay token as a payment (1000 minor units)
//! let result = client.create_payment(1000, None, &token_json).await?;
//! ```

pub mod client;
pub mod config;
pub mod token;

// Re-exports
pub use client::GatewayClient;
pub use config::GatewayConfig;
pub use token::TokenService;
