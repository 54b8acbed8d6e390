//! # Apple-Cart RS
//!
//! Apple Pay storefront backend.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PROCESSOR_API_KEY=...
//! export PROCESSING_TERMINAL_ID=...
//! export APPLE_DOMAIN_ID=merchant.example.com
//! export CURRENCY=USD
//! export PROCESSOR_API_HOST=https://api.processor.example
//! export PROCESSOR_IDENTITY_HOST=https://identity.processor.example/authorize
//!
//! # Run the server
//! apple-cart
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());
    info!("Static assets: {}", state.config.static_dir.display());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🍎 Apple-Cart starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🛒 Storefront: http://{}/apple", addr);
        info!("🔑 Merchant validation: POST http://{}/validate-merchant", addr);
        info!("💳 Payment: POST http://{}/process-payment", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🍎 Apple-Cart RS 🍎
  ━━━━━━━━━━━━━━━━━━━━━━━
  Apple Pay gateway backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
