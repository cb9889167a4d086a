//! Spotify Web API connector
//!
//! Implements `CatalogProvider` over the `HttpClient` bridge.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::time::Clock;
use core_catalog::error::{CatalogError, Result};
use core_catalog::mapper;
use core_catalog::wire::{ArtistSearchResponse, CatalogAlbum, CatalogArtist, CatalogPage, CatalogTrack};
use core_catalog::{Album, Artist, CatalogProvider, Collection, Track};
use core_runtime::config::CatalogApiConfig;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::auth::SpotifyAuth;
use crate::types::ErrorResponse;

/// Default timeout for API requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Spotify Web API connector
///
/// # Endpoints
///
/// - `GET {base}/search?q=&type=artist&offset=&limit=`
/// - `GET {base}/artists/{id}` and `GET {base}/artists/{id}/albums?offset=&limit=`
/// - `GET {base}/albums/{id}`
/// - `GET {base}/tracks/{id}`
///
/// Every request is sent once. Status codes map to errors as follows:
/// 404 → `NotFound`, 401 → `Unauthorized` (the cached token is dropped),
/// any other non-2xx → `Provider`.
///
/// # Example
///
/// ```ignore
/// use provider_spotify::{SpotifyAuth, SpotifyConnector};
/// use core_catalog::CatalogProvider;
///
/// let connector = SpotifyConnector::new(http_client, SpotifyAuth::static_token(token));
/// let artists = connector.search_artists("muse", 0, 10).await?;
/// ```
pub struct SpotifyConnector {
    http_client: Arc<dyn HttpClient>,
    auth: SpotifyAuth,
    base_url: String,
    request_timeout: Duration,
}

impl SpotifyConnector {
    /// Create a connector against the public Web API
    pub fn new(http_client: Arc<dyn HttpClient>, auth: SpotifyAuth) -> Self {
        Self {
            http_client,
            auth,
            base_url: core_runtime::config::DEFAULT_CATALOG_BASE_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Create a connector from the catalog section of the core configuration
    pub fn from_config(
        http_client: Arc<dyn HttpClient>,
        config: &CatalogApiConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let auth = SpotifyAuth::from_config(Arc::clone(&http_client), config, clock)?;
        Ok(Self::new(http_client, auth)
            .with_base_url(config.base_url.clone())
            .with_request_timeout(config.request_timeout))
    }

    /// Override the API base URL (trailing slashes are ignored)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `url` and deserialize the body, mapping status codes to errors
    #[instrument(skip(self, url), fields(url = %url))]
    async fn get_json<T: DeserializeOwned>(&self, url: String, entity_type: &str, id: &str) -> Result<T> {
        let token = self.auth.access_token().await?;

        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(token)
            .header("Accept", "application/json")
            .timeout(self.request_timeout);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(self.status_error(&response, entity_type, id).await);
        }

        debug!(status = response.status, "API request succeeded");

        response
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    async fn status_error(&self, response: &HttpResponse, entity_type: &str, id: &str) -> CatalogError {
        let message = response
            .json::<ErrorResponse>()
            .map(|body| body.error.message)
            .or_else(|_| response.text())
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        // Rate limits are reported, not waited out
        let message = match response.header("Retry-After") {
            Some(after) if response.status == 429 => format!("{} (retry after {}s)", message, after),
            _ => message,
        };

        if response.is_server_error() {
            error!(status = response.status, message = %message, "Catalog provider failed");
        } else {
            warn!(status = response.status, message = %message, "API request failed");
        }

        match response.status {
            404 => CatalogError::NotFound {
                entity_type: entity_type.to_string(),
                id: id.to_string(),
            },
            401 => {
                self.auth.invalidate().await;
                CatalogError::Unauthorized(message)
            }
            status => CatalogError::Provider { status, message },
        }
    }
}

#[async_trait]
impl CatalogProvider for SpotifyConnector {
    #[instrument(skip(self))]
    async fn search_artists(&self, query: &str, offset: u32, limit: u32) -> Result<Collection<Artist>> {
        info!("Searching artists");

        let url = self.url(&format!(
            "/search?q={}&type=artist&offset={}&limit={}",
            urlencoding::encode(query),
            offset,
            limit
        ));

        let response: ArtistSearchResponse = self.get_json(url, "search", query).await?;
        Ok(mapper::map_artists_to_collection(&response))
    }

    #[instrument(skip(self))]
    async fn artist_with_albums(&self, artist_id: &str, offset: u32, limit: u32) -> Result<Artist> {
        let encoded = urlencoding::encode(artist_id);

        let artist: CatalogArtist = self
            .get_json(self.url(&format!("/artists/{}", encoded)), "artist", artist_id)
            .await?;

        let albums: CatalogPage<CatalogAlbum> = self
            .get_json(
                self.url(&format!(
                    "/artists/{}/albums?offset={}&limit={}",
                    encoded, offset, limit
                )),
                "artist",
                artist_id,
            )
            .await?;

        Ok(mapper::map_artist_and_albums(&artist, &albums))
    }

    #[instrument(skip(self))]
    async fn album(&self, album_id: &str) -> Result<Album> {
        let url = self.url(&format!("/albums/{}", urlencoding::encode(album_id)));
        let album: CatalogAlbum = self.get_json(url, "album", album_id).await?;
        Ok(mapper::map_album(&album))
    }

    #[instrument(skip(self))]
    async fn track(&self, track_id: &str) -> Result<Track> {
        let url = self.url(&format!("/tracks/{}", urlencoding::encode(track_id)));
        let track: CatalogTrack = self.get_json(url, "track", track_id).await?;
        Ok(mapper::map_track(&track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
            async fn is_connected(&self) -> bool;
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    fn connector(mock_http: MockHttpClient) -> SpotifyConnector {
        SpotifyConnector::new(Arc::new(mock_http), SpotifyAuth::static_token("test_token"))
            .with_base_url("https://api.test/v1/")
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let connector = connector(MockHttpClient::new());
        assert_eq!(connector.url("/albums/x"), "https://api.test/v1/albums/x");
    }

    #[tokio::test]
    async fn test_album_request_shape() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .withf(|request| {
                request.method == HttpMethod::Get
                    && request.url == "https://api.test/v1/albums/a%2Fb"
                    && request.headers.get("Authorization") == Some(&"Bearer test_token".to_string())
                    && request.timeout == Some(REQUEST_TIMEOUT)
            })
            .times(1)
            .returning(|_| {
                Ok(response(
                    200,
                    r#"{"id":"a/b","name":"Absolution","uri":"spotify:album:x","images":[],"type":"album","label":"Taste","release_date":"2003-09-15"}"#,
                ))
            });

        let album = connector(mock_http).album("a/b").await.unwrap();

        assert_eq!(album.name, "Absolution");
        assert_eq!(album.label.as_deref(), Some("Taste"));
        assert!(album.tracks.is_none());
    }

    #[tokio::test]
    async fn test_not_found() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|_| {
            Ok(response(
                404,
                r#"{"error":{"status":404,"message":"Non existing id"}}"#,
            ))
        });

        let err = connector(mock_http).track("nope").await.unwrap_err();

        match err {
            CatalogError::NotFound { entity_type, id } => {
                assert_eq!(entity_type, "track");
                assert_eq!(id, "nope");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|_| {
            Ok(response(
                401,
                r#"{"error":{"status":401,"message":"The access token expired"}}"#,
            ))
        });

        let err = connector(mock_http).album("x").await.unwrap_err();
        assert!(matches!(err, CatalogError::Unauthorized(msg) if msg == "The access token expired"));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(503, "upstream unavailable")));

        let err = connector(mock_http).album("x").await.unwrap_err();

        match err {
            CatalogError::Provider { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "upstream unavailable");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_reports_retry_after() {
        let mut mock_http = MockHttpClient::new();
        mock_http.expect_execute().times(1).returning(|_| {
            let mut limited = response(429, r#"{"error":{"status":429,"message":"API rate limit exceeded"}}"#);
            limited.headers.insert("retry-after".to_string(), "7".to_string());
            Ok(limited)
        });

        let err = connector(mock_http).album("x").await.unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Provider { status: 429, message }
                if message == "API rate limit exceeded (retry after 7s)"
        ));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::Timeout("https://api.test/v1/albums/x".to_string())));

        let err = connector(mock_http).album("x").await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let mut mock_http = MockHttpClient::new();
        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(200, r#"{"id":"x"}"#)));

        let err = connector(mock_http).album("x").await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
