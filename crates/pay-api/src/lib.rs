//! # pay-api
//!
//! HTTP API layer for apple-cart-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Browser-facing endpoints for the Apple Pay flow
//! - Static serving of the Apple domain-association file and demo page
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/apple` | Storefront demo page |
//! | GET | `/.well-known/apple-developer-merchant-id-domain-association` | Apple domain verification |
//! | POST | `/validate-merchant` | Apple Pay merchant session validation |
//! | POST | `/process-payment` | Submit a captured Apple Pay token |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
