//! # pay-core
//!
//! Core types and traits for the apple-cart payment engine.
//!
//! This crate provides:
//! - `WalletGateway` trait for processor integrations
//! - `PaymentOrder`, `PaymentMethod`, and `PaymentRequest` wire types
//! - `PayloadEncoding` for the configurable Apple Pay token encoding
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{BoxedWalletGateway, DEFAULT_PAYMENT_DESCRIPTION};
//!
//! // The front end only sees the trait
//! async fn charge(gateway: &BoxedWalletGateway, token_json: &str) -> anyhow::Result<()> {
//!     let result = gateway.create_payment(1000, None, token_json).await?;
//!     println!("payment status: {}", result["status"]);
//!     Ok(())
//! }
//! ```

pub mod encoding;
pub mod error;
pub mod gateway;
pub mod order;

// Re-exports for convenience
pub use encoding::PayloadEncoding;
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedWalletGateway, WalletGateway};
pub use order::{
    PaymentMethod, PaymentOrder, PaymentRequest, DEFAULT_PAYMENT_DESCRIPTION, WEB_CHANNEL,
};
