//! Access-token handling for the Spotify Web API
//!
//! Two modes are supported:
//!
//! - a pre-issued bearer token, used as is
//! - the OAuth 2.0 client-credentials grant: the token is requested from the
//!   accounts service on first use and reused until shortly before it expires
//!
//! A rejected token is not refreshed and replayed. [`SpotifyAuth::invalidate`]
//! drops it so the next call starts from a fresh grant.

use std::collections::HashMap;
use std::sync::Arc;

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bridge_traits::time::Clock;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use core_runtime::config::{CatalogApiConfig, CatalogCredentials};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, SpotifyError};
use crate::types::{AuthErrorResponse, TokenResponse};

/// Tokens this close to expiry are treated as expired
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

enum AuthMode {
    Static(String),
    ClientCredentials(ClientCredentialsGrant),
}

struct ClientCredentialsGrant {
    http_client: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

/// Supplies bearer tokens to the connector
pub struct SpotifyAuth {
    mode: AuthMode,
}

impl SpotifyAuth {
    /// Always hand out `token`
    pub fn static_token(token: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Static(token.into()),
        }
    }

    /// Obtain tokens through the client-credentials grant at `token_url`
    pub fn client_credentials(
        http_client: Arc<dyn HttpClient>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            mode: AuthMode::ClientCredentials(ClientCredentialsGrant {
                http_client,
                clock,
                token_url: token_url.into(),
                client_id: client_id.into(),
                client_secret: client_secret.into(),
                cached: Mutex::new(None),
            }),
        }
    }

    /// Build from the catalog section of the core configuration
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::MissingCredentials`] when no credentials are
    /// configured.
    pub fn from_config(
        http_client: Arc<dyn HttpClient>,
        config: &CatalogApiConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        match &config.credentials {
            CatalogCredentials::None => Err(SpotifyError::MissingCredentials(
                "set an access token or a client id/secret pair".to_string(),
            )),
            CatalogCredentials::AccessToken(token) => Ok(Self::static_token(token.clone())),
            CatalogCredentials::ClientCredentials {
                client_id,
                client_secret,
            } => Ok(Self::client_credentials(
                http_client,
                config.token_url.clone(),
                client_id.clone(),
                client_secret.clone(),
                clock,
            )),
        }
    }

    /// Current bearer token, requesting a new one when needed
    pub async fn access_token(&self) -> Result<String> {
        match &self.mode {
            AuthMode::Static(token) => Ok(token.clone()),
            AuthMode::ClientCredentials(grant) => grant.access_token().await,
        }
    }

    /// Forget the cached token; the next call runs a fresh grant.
    pub async fn invalidate(&self) {
        if let AuthMode::ClientCredentials(grant) = &self.mode {
            if grant.cached.lock().await.take().is_some() {
                debug!("Access token invalidated");
            }
        }
    }
}

impl ClientCredentialsGrant {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        let now = self.clock.now();

        if let Some(token) = cached.as_ref() {
            if now + Duration::seconds(EXPIRY_MARGIN_SECS) < token.expires_at {
                return Ok(token.access_token.clone());
            }
            debug!("Cached access token expired");
        }

        let response = self.request_token().await?;

        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                SpotifyError::ParseError(format!(
                    "Token lifetime out of range: expires_in = {}",
                    response.expires_in
                ))
            })?;

        let token = CachedToken {
            access_token: response.access_token,
            expires_at,
        };
        let access_token = token.access_token.clone();
        *cached = Some(token);

        Ok(access_token)
    }

    #[instrument(skip(self), fields(token_url = %self.token_url, client_id = %self.client_id))]
    async fn request_token(&self) -> Result<TokenResponse> {
        let mut params = HashMap::new();
        params.insert("grant_type", "client_credentials");

        let encoded_body = serde_urlencoded::to_string(&params)
            .map_err(|e| SpotifyError::ParseError(format!("Failed to encode token request: {}", e)))?;

        let request = HttpRequest::new(HttpMethod::Post, self.token_url.as_str())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .basic_auth(&self.client_id, &self.client_secret)
            .body(Bytes::from(encoded_body));

        debug!("Requesting client-credentials token");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SpotifyError::NetworkError(e.to_string()))?;

        if !response.is_success() {
            let message = response
                .json::<AuthErrorResponse>()
                .map(|body| body.error_description.unwrap_or(body.error))
                .or_else(|_| response.text())
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            warn!(status = response.status, "Token request rejected");

            return Err(SpotifyError::AuthenticationFailed {
                status_code: response.status,
                message,
            });
        }

        let token_response: TokenResponse = response
            .json()
            .map_err(|e| SpotifyError::ParseError(e.to_string()))?;

        info!(
            "Obtained access token (expires in {}s)",
            token_response.expires_in
        );

        Ok(token_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result as BridgeResult;
    use bridge_traits::http::HttpResponse;
    use bridge_traits::time::ManualClock;
    use mockall::mock;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
            async fn is_connected(&self) -> bool;
        }
    }

    fn token_response(token: &str, expires_in: i64) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from(format!(
                r#"{{"access_token":"{}","token_type":"Bearer","expires_in":{}}}"#,
                token, expires_in
            )),
        }
    }

    #[tokio::test]
    async fn test_static_token_survives_invalidation() {
        let auth = SpotifyAuth::static_token("preissued");

        assert_eq!(auth.access_token().await.unwrap(), "preissued");
        auth.invalidate().await;
        assert_eq!(auth.access_token().await.unwrap(), "preissued");
    }

    #[tokio::test]
    async fn test_client_credentials_request_shape() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|request| {
                request.method == HttpMethod::Post
                    && request.url == "https://accounts.spotify.com/api/token"
                    && request.headers.get("Authorization")
                        == Some(&"Basic aWQ6c2VjcmV0".to_string())
                    && request.body == Some(Bytes::from("grant_type=client_credentials"))
            })
            .times(1)
            .returning(|_| Ok(token_response("granted", 3600)));

        let auth = SpotifyAuth::client_credentials(
            Arc::new(mock_http),
            "https://accounts.spotify.com/api/token",
            "id",
            "secret",
            Arc::new(ManualClock::at_millis(0)),
        );

        assert_eq!(auth.access_token().await.unwrap(), "granted");
    }

    #[tokio::test]
    async fn test_out_of_range_lifetime_is_rejected() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(2)
            .returning(|_| Ok(token_response("forever", i64::MAX)));

        let auth = SpotifyAuth::client_credentials(
            Arc::new(mock_http),
            "https://accounts.spotify.com/api/token",
            "id",
            "secret",
            Arc::new(ManualClock::at_millis(1_700_000_000_000)),
        );

        let err = auth.access_token().await.unwrap_err();
        assert!(matches!(err, SpotifyError::ParseError(msg) if msg.contains("expires_in")));

        // Nothing was cached, so the next call asks again
        assert!(auth.access_token().await.is_err());
    }

    #[tokio::test]
    async fn test_token_is_reused_until_expiry() {
        let mut mock_http = MockHttpClient::new();
        let mut seq = mockall::Sequence::new();
        mock_http
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(token_response("first", 3600)));
        mock_http
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(token_response("second", 3600)));

        let clock = Arc::new(ManualClock::at_millis(1_700_000_000_000));
        let auth = SpotifyAuth::client_credentials(
            Arc::new(mock_http),
            "https://accounts.spotify.com/api/token",
            "id",
            "secret",
            clock.clone(),
        );

        assert_eq!(auth.access_token().await.unwrap(), "first");
        clock.advance_secs(3000);
        assert_eq!(auth.access_token().await.unwrap(), "first");

        // Inside the expiry margin
        clock.advance_secs(580);
        assert_eq!(auth.access_token().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_invalidate_forces_new_grant() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(2)
            .returning(|_| Ok(token_response("token", 3600)));

        let auth = SpotifyAuth::client_credentials(
            Arc::new(mock_http),
            "https://accounts.spotify.com/api/token",
            "id",
            "secret",
            Arc::new(ManualClock::at_millis(0)),
        );

        auth.access_token().await.unwrap();
        auth.invalidate().await;
        auth.access_token().await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse {
                status: 400,
                headers: HashMap::new(),
                body: Bytes::from(
                    r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#,
                ),
            })
        });

        let auth = SpotifyAuth::client_credentials(
            Arc::new(mock_http),
            "https://accounts.spotify.com/api/token",
            "id",
            "wrong",
            Arc::new(ManualClock::at_millis(0)),
        );

        match auth.access_token().await {
            Err(SpotifyError::AuthenticationFailed {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 400);
                assert_eq!(message, "Invalid client secret");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_from_config_requires_credentials() {
        let http: Arc<dyn HttpClient> = Arc::new(MockHttpClient::new());
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at_millis(0));

        let result = SpotifyAuth::from_config(http.clone(), &CatalogApiConfig::new(), clock.clone());
        assert!(matches!(result, Err(SpotifyError::MissingCredentials(_))));

        let config = CatalogApiConfig::new().with_access_token("abc");
        let auth = SpotifyAuth::from_config(http, &config, clock).unwrap();
        assert_eq!(auth.access_token().await.unwrap(), "abc");
    }
}
