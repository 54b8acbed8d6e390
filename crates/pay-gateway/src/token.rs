//! # Token Service
//!
//! Bearer-token lifecycle for the processor API. One token is cached per
//! process and refreshed through the identity service when it expires.
//!
//! The cache sits behind a `tokio::sync::Mutex` that is held across the
//! credential exchange, so concurrent callers that observe an expired token
//! all await the same in-flight exchange and at most one refresh happens per
//! expiry. A failed refresh propagates an error and leaves any previously
//! cached token untouched.

use crate::config::GatewayConfig;
use chrono::{DateTime, Duration, Utc};
use pay_core::{PaymentError, PaymentResult};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// A bearer token issued by the identity service, stamped with its issue time
#[derive(Debug, Clone)]
struct AuthorizationToken {
    access_token: String,
    expires_in: u64,
    issued_at: DateTime<Utc>,
}

impl AuthorizationToken {
    /// A token is valid strictly before `issued_at + expires_in` seconds
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let expires_at = self.issued_at + Duration::seconds(self.expires_in as i64);
        now >= expires_at
    }
}

/// Wire shape of a successful credential exchange
#[derive(Debug, Deserialize)]
struct AuthorizationResponse {
    access_token: String,
    expires_in: u64,
}

/// Caches and refreshes the bearer token shared by all processor calls
pub struct TokenService {
    config: GatewayConfig,
    client: Client,
    token: Mutex<Option<AuthorizationToken>>,
}

impl TokenService {
    /// Create a token service sharing the gateway's HTTP client
    pub fn new(config: GatewayConfig, client: Client) -> Self {
        Self {
            config,
            client,
            token: Mutex::new(None),
        }
    }

    /// Return a currently-valid access token, refreshing it first if the
    /// cached one is missing or expired.
    ///
    /// A refresh failure surfaces as `PaymentError::Auth` carrying the
    /// identity service's response text; there is no fallback to a stale or
    /// empty token.
    pub async fn get_access_token(&self) -> PaymentResult<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| !t.is_expired(Utc::now())) {
            return Ok(token.access_token.clone());
        }

        debug!("Bearer token missing or expired, exchanging credentials");
        let fresh = self.authorize().await?;
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);

        Ok(access_token)
    }

    /// Exchange the API key for a fresh token at the identity endpoint
    async fn authorize(&self) -> PaymentResult<AuthorizationToken> {
        let response = self
            .client
            .post(&self.config.identity_url)
            .header("Content-Type", "application/json")
            .header("X-API-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| PaymentError::Auth {
                body: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PaymentError::Auth {
            body: e.to_string(),
        })?;

        if !status.is_success() {
            error!("Credential exchange failed: status={}", status);
            return Err(PaymentError::Auth { body });
        }

        let parsed: AuthorizationResponse = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse identity response: {}", e))
        })?;

        debug!(
            "Credential exchange succeeded, token valid for {}s",
            parsed.expires_in
        );

        Ok(AuthorizationToken {
            access_token: parsed.access_token,
            expires_in: parsed.expires_in,
            issued_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> TokenService {
        let config = GatewayConfig::new(
            "key-abc123",
            "3204001",
            "merchant.example.com",
            "USD",
            server.uri(),
            format!("{}/authorize", server.uri()),
        );
        TokenService::new(config, Client::new())
    }

    fn token_body(access_token: &str, expires_in: u64) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .set_body_json(json!({ "access_token": access_token, "expires_in": expires_in }))
    }

    #[test]
    fn test_expiry_boundary() {
        let token = AuthorizationToken {
            access_token: "tok".into(),
            expires_in: 60,
            issued_at: Utc::now(),
        };
        let issued = token.issued_at;

        assert!(!token.is_expired(issued));
        assert!(!token.is_expired(issued + Duration::seconds(59)));
        // Expired at exactly issued_at + expires_in
        assert!(token.is_expired(issued + Duration::seconds(60)));
        assert!(token.is_expired(issued + Duration::seconds(61)));
    }

    #[tokio::test]
    async fn test_token_reused_within_lifetime() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authorize"))
            .and(header("X-API-Key", "key-abc123"))
            .respond_with(token_body("tok-1", 3600))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        assert_eq!(service.get_access_token().await.unwrap(), "tok-1");
        // Second call must reuse the cached token with no identity call
        assert_eq!(service.get_access_token().await.unwrap(), "tok-1");
    }

    #[tokio::test]
    async fn test_expired_token_triggers_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authorize"))
            .respond_with(token_body("tok-short", 0))
            .expect(2)
            .mount(&server)
            .await;

        let service = service_for(&server);
        // expires_in=0 means the token is dead on arrival, so each call
        // performs exactly one exchange
        assert_eq!(service.get_access_token().await.unwrap(), "tok-short");
        assert_eq!(service.get_access_token().await.unwrap(), "tok-short");
    }

    #[tokio::test]
    async fn test_auth_error_carries_upstream_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authorize"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let err = service.get_access_token().await.unwrap_err();
        assert_eq!(err.upstream_body(), Some("invalid api key"));
        assert!(matches!(err, PaymentError::Auth { .. }));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_token_state() {
        let server = MockServer::start().await;
        let service = service_for(&server);

        {
            let _ok = Mock::given(method("POST"))
                .and(path("/authorize"))
                .respond_with(token_body("tok-1", 0))
                .expect(1)
                .mount_as_scoped(&server)
                .await;
            assert_eq!(service.get_access_token().await.unwrap(), "tok-1");
        }

        {
            let _down = Mock::given(method("POST"))
                .and(path("/authorize"))
                .respond_with(ResponseTemplate::new(503).set_body_string("identity down"))
                .expect(1)
                .mount_as_scoped(&server)
                .await;
            let err = service.get_access_token().await.unwrap_err();
            assert_eq!(err.upstream_body(), Some("identity down"));
        }

        // The failure committed nothing; the next exchange succeeds cleanly
        let _recovered = Mock::given(method("POST"))
            .and(path("/authorize"))
            .respond_with(token_body("tok-2", 3600))
            .expect(1)
            .mount_as_scoped(&server)
            .await;
        assert_eq!(service.get_access_token().await.unwrap(), "tok-2");
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authorize"))
            .respond_with(
                token_body("tok-1", 3600).set_delay(std::time::Duration::from_millis(150)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let (a, b) = tokio::join!(service.get_access_token(), service.get_access_token());
        assert_eq!(a.unwrap(), "tok-1");
        assert_eq!(b.unwrap(), "tok-1");
    }
}
