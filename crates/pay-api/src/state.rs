//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the wallet gateway, configuration, and static asset location.

use pay_core::BoxedWalletGateway;
use pay_gateway::GatewayClient;
use std::path::PathBuf;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Directory holding apple_pay.html and the .well-known assets
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Processor gateway (behind the trait so tests can substitute a mock)
    pub gateway: BoxedWalletGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the environment-configured gateway client
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let gateway = GatewayClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize gateway client: {}", e))?;

        Ok(Self {
            gateway: Arc::new(gateway),
            config,
        })
    }

    /// Create an AppState around an explicit gateway (for testing)
    pub fn with_gateway(gateway: BoxedWalletGateway, config: AppConfig) -> Self {
        Self { gateway, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
            static_dir: PathBuf::from("static"),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_is_production() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "production".to_string(),
            static_dir: PathBuf::from("static"),
        };
        assert!(config.is_production());
    }
}
