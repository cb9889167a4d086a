//! # Core Configuration Module
//!
//! Provides configuration management for the Spotie core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds the HTTP bridge plus the settings for the catalog
//! provider, the invitation document store, pagination defaults and the
//! memoization cache. It enforces fail-fast validation so a misconfigured
//! deployment is rejected at startup rather than on the first request.
//!
//! ## Required Settings
//!
//! - Catalog API credentials (static access token or client id/secret)
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//!
//! When the `desktop-shims` feature is enabled, a `ReqwestHttpClient` is
//! injected automatically if no client was provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{CatalogApiConfig, CoreConfig};
//!
//! let config = CoreConfig::builder()
//!     .catalog_api(CatalogApiConfig::new().with_client_credentials("id", "secret"))
//!     .document_store_url("http://couchdb.internal:5984")
//!     .cache_capacity(250)
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ### From the environment
//!
//! ```ignore
//! let config = CoreConfig::builder().with_env()?.build()?;
//! ```
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `SPOTIE_CATALOG_URL` | catalog API base URL |
//! | `SPOTIE_CATALOG_TOKEN_URL` | client-credentials token endpoint |
//! | `SPOTIE_CATALOG_TOKEN` | static access token |
//! | `SPOTIE_CLIENT_ID` / `SPOTIE_CLIENT_SECRET` | client-credentials pair |
//! | `SPOTIE_COUCHDB_URL` | document store base URL |
//! | `SPOTIE_COUCHDB_USER` / `SPOTIE_COUCHDB_PASSWORD` | document store basic auth |
//! | `SPOTIE_INVITES_DB` | invitations database name |
//! | `SPOTIE_CACHE_CAPACITY` | memoization cache entries |

use crate::error::{Error, Result};
use bridge_traits::HttpClient;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default Spotify Web API base URL
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.spotify.com/v1";

/// Default Spotify accounts token endpoint
pub const DEFAULT_CATALOG_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Default CouchDB base URL
pub const DEFAULT_DOCUMENT_STORE_URL: &str = "http://localhost:5984";

/// Default invitations database
pub const DEFAULT_INVITES_DATABASE: &str = "invites";

/// Default number of memoized catalog responses
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Core configuration for the Spotie core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// HTTP client shared by the catalog provider and the document store
    pub http_client: Arc<dyn HttpClient>,

    /// Catalog provider API settings
    pub catalog_api: CatalogApiConfig,

    /// Invitation document store settings
    pub document_store: DocumentStoreConfig,

    /// Page sizes applied when a request does not carry `limit`
    pub pagination: PaginationDefaults,

    /// Maximum number of memoized catalog responses
    pub cache_capacity: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("http_client", &"HttpClient { ... }")
            .field("catalog_api", &self.catalog_api)
            .field("document_store", &self.document_store)
            .field("pagination", &self.pagination)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

/// How the core authenticates against the catalog provider.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum CatalogCredentials {
    /// No credentials configured (rejected by validation)
    #[default]
    None,
    /// Pre-issued bearer token
    AccessToken(String),
    /// OAuth client-credentials grant
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
}

impl std::fmt::Debug for CatalogCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogCredentials::None => f.write_str("None"),
            CatalogCredentials::AccessToken(_) => f.write_str("AccessToken([REDACTED])"),
            CatalogCredentials::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .field("client_secret", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Configuration for the catalog provider API.
///
/// # Security Note
///
/// Secrets should never be hardcoded in the binary. Load them from the
/// environment ([`CoreConfigBuilder::with_env`]) or the host's secret manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogApiConfig {
    /// API base URL, without trailing slash
    pub base_url: String,

    /// Token endpoint used by the client-credentials grant
    pub token_url: String,

    /// Credentials used to obtain bearer tokens
    pub credentials: CatalogCredentials,

    /// Timeout applied to each catalog request
    pub request_timeout: Duration,
}

impl Default for CatalogApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogApiConfig {
    /// Creates a configuration pointing at the public Spotify Web API with no
    /// credentials
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            token_url: DEFAULT_CATALOG_TOKEN_URL.to_string(),
            credentials: CatalogCredentials::None,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = CatalogCredentials::AccessToken(token.into());
        self
    }

    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials = CatalogCredentials::ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        };
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        validate_url("Catalog API base URL", &self.base_url)?;

        match &self.credentials {
            CatalogCredentials::None => {
                return Err(Error::Config(
                    "Catalog API credentials are required. \
                     Set an access token (SPOTIE_CATALOG_TOKEN) or a client id/secret pair \
                     (SPOTIE_CLIENT_ID, SPOTIE_CLIENT_SECRET)."
                        .to_string(),
                ));
            }
            CatalogCredentials::AccessToken(token) if token.is_empty() => {
                return Err(Error::Config(
                    "Catalog API access token cannot be empty".to_string(),
                ));
            }
            CatalogCredentials::ClientCredentials {
                client_id,
                client_secret,
            } => {
                if client_id.is_empty() || client_secret.is_empty() {
                    return Err(Error::Config(
                        "Catalog API client id and secret cannot be empty".to_string(),
                    ));
                }
                validate_url("Catalog API token URL", &self.token_url)?;
            }
            CatalogCredentials::AccessToken(_) => {}
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Catalog API request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration for the CouchDB-compatible document store holding invitations.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentStoreConfig {
    /// Server base URL, without trailing slash
    pub base_url: String,

    /// Database holding invitation documents
    pub invites_database: String,

    /// Optional basic-auth username
    pub username: Option<String>,

    /// Optional basic-auth password
    pub password: Option<String>,
}

impl std::fmt::Debug for DocumentStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStoreConfig")
            .field("base_url", &self.base_url)
            .field("invites_database", &self.invites_database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DOCUMENT_STORE_URL.to_string(),
            invites_database: DEFAULT_INVITES_DATABASE.to_string(),
            username: None,
            password: None,
        }
    }
}

impl DocumentStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_invites_database(mut self, name: impl Into<String>) -> Self {
        self.invites_database = name.into();
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// URL of the invitations database, with trailing slash.
    ///
    /// The database name is one path segment, so `/` in it is sent as `%2F`.
    ///
    /// ```
    /// use core_runtime::config::DocumentStoreConfig;
    ///
    /// let store = DocumentStoreConfig::new("http://localhost:5984/");
    /// assert_eq!(store.invites_url(), "http://localhost:5984/invites/");
    /// ```
    pub fn invites_url(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.invites_database)
        )
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        validate_url("Document store URL", &self.base_url)?;

        // CouchDB: lowercase letter first, then [a-z0-9_$()+/-]
        let valid_name = self
            .invites_database
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && self.invites_database.chars().all(|c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || "_$()+-/".contains(c)
            });
        if !valid_name {
            return Err(Error::Config(format!(
                "Invalid invites database name '{}': must start with a lowercase letter \
                 and contain only a-z, 0-9 and _$()+-/",
                self.invites_database
            )));
        }

        if self.username.is_some() != self.password.is_some() {
            return Err(Error::Config(
                "Document store username and password must be set together".to_string(),
            ));
        }

        Ok(())
    }
}

/// Page sizes used when a request leaves `limit` unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    /// Artist search results per page
    pub search_limit: u32,
    /// Albums per page on the artist profile
    pub artist_albums_limit: u32,
    /// Largest `limit` accepted from a request (provider maximum)
    pub max_limit: u32,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            search_limit: 10,
            artist_albums_limit: 5,
            max_limit: 50,
        }
    }
}

impl PaginationDefaults {
    pub fn validate(&self) -> Result<()> {
        if self.max_limit == 0 {
            return Err(Error::Config(
                "Maximum page size must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("Search page size", self.search_limit),
            ("Artist albums page size", self.artist_albums_limit),
        ] {
            if value == 0 || value > self.max_limit {
                return Err(Error::Config(format!(
                    "{} must be between 1 and {} (got {})",
                    name, self.max_limit, value
                )));
            }
        }

        Ok(())
    }
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Config(format!("{} cannot be empty", name)));
    }

    let parsed = Url::parse(value)
        .map_err(|e| Error::Config(format!("{} '{}' is invalid: {}", name, value, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "{} must use http or https (got '{}')",
            name,
            parsed.scheme()
        )));
    }

    Ok(())
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.catalog_api.validate()?;
        self.document_store.validate()?;
        self.pagination.validate()?;

        if self.cache_capacity == 0 {
            return Err(Error::Config(
                "Cache capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for catalog and document store access. \
                 Enable the 'desktop-shims' feature to use the default ReqwestHttpClient \
                 or inject one with .http_client()."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_timeout(timeout).map_err(|e| Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: e.to_string(),
    })?;
    let client: Arc<dyn HttpClient> = Arc::new(client);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](CoreConfigBuilder::build) to create the final config.
#[derive(Default)]
pub struct CoreConfigBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    catalog_api: Option<CatalogApiConfig>,
    document_store: Option<DocumentStoreConfig>,
    pagination: Option<PaginationDefaults>,
    cache_capacity: Option<usize>,
}

impl CoreConfigBuilder {
    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the catalog provider API configuration.
    pub fn catalog_api(mut self, config: CatalogApiConfig) -> Self {
        self.catalog_api = Some(config);
        self
    }

    /// Sets the document store configuration.
    pub fn document_store(mut self, config: DocumentStoreConfig) -> Self {
        self.document_store = Some(config);
        self
    }

    /// Shorthand for a document store at `url` with default database names.
    pub fn document_store_url(mut self, url: impl Into<String>) -> Self {
        let current = self.document_store.take().unwrap_or_default();
        self.document_store = Some(DocumentStoreConfig {
            base_url: url.into().trim_end_matches('/').to_string(),
            ..current
        });
        self
    }

    /// Sets the pagination defaults.
    pub fn pagination(mut self, pagination: PaginationDefaults) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Sets the memoization cache capacity (number of entries).
    ///
    /// Default: 100
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Overlays settings found in the process environment.
    ///
    /// See the module docs for the variable names. Values already set on the
    /// builder are replaced only when the variable is present.
    pub fn with_env(self) -> Result<Self> {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`with_env`](Self::with_env) with an injectable lookup.
    pub fn with_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut catalog = self.catalog_api.take().unwrap_or_default();
        if let Some(url) = lookup("SPOTIE_CATALOG_URL") {
            catalog = catalog.with_base_url(url);
        }
        if let Some(url) = lookup("SPOTIE_CATALOG_TOKEN_URL") {
            catalog = catalog.with_token_url(url);
        }
        match (lookup("SPOTIE_CLIENT_ID"), lookup("SPOTIE_CLIENT_SECRET")) {
            (Some(id), Some(secret)) => catalog = catalog.with_client_credentials(id, secret),
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::Config(
                    "SPOTIE_CLIENT_ID and SPOTIE_CLIENT_SECRET must be set together".to_string(),
                ));
            }
            (None, None) => {}
        }
        if let Some(token) = lookup("SPOTIE_CATALOG_TOKEN") {
            catalog = catalog.with_access_token(token);
        }
        self.catalog_api = Some(catalog);

        let mut store = self.document_store.take().unwrap_or_default();
        if let Some(url) = lookup("SPOTIE_COUCHDB_URL") {
            store.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(db) = lookup("SPOTIE_INVITES_DB") {
            store.invites_database = db;
        }
        if let Some(user) = lookup("SPOTIE_COUCHDB_USER") {
            store.username = Some(user);
        }
        if let Some(password) = lookup("SPOTIE_COUCHDB_PASSWORD") {
            store.password = Some(password);
        }
        self.document_store = Some(store);

        if let Some(capacity) = lookup("SPOTIE_CACHE_CAPACITY") {
            let capacity = capacity.parse::<usize>().map_err(|e| {
                Error::Config(format!(
                    "SPOTIE_CACHE_CAPACITY '{}' is not a number: {}",
                    capacity, e
                ))
            })?;
            self.cache_capacity = Some(capacity);
        }

        Ok(self)
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if:
    /// - No HTTP client was provided and no platform default exists
    /// - Configuration values are invalid
    pub fn build(self) -> Result<CoreConfig> {
        let catalog_api = self.catalog_api.unwrap_or_default();

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(catalog_api.request_timeout)?,
        };

        let config = CoreConfig {
            http_client,
            catalog_api,
            document_store: self.document_store.unwrap_or_default(),
            pagination: self.pagination.unwrap_or_default(),
            cache_capacity: self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::{BridgeError, HttpRequest, HttpResponse};
    use std::collections::HashMap;

    struct MockHttpClient;

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn execute(
            &self,
            _request: HttpRequest,
        ) -> std::result::Result<HttpResponse, BridgeError> {
            Err(BridgeError::NotAvailable("not used in config tests".to_string()))
        }
    }

    fn base_builder() -> CoreConfigBuilder {
        CoreConfig::builder()
            .http_client(Arc::new(MockHttpClient))
            .catalog_api(CatalogApiConfig::new().with_access_token("token"))
    }

    #[test]
    fn test_build_with_defaults() {
        let config = base_builder().build().expect("defaults should validate");

        assert_eq!(config.catalog_api.base_url, DEFAULT_CATALOG_BASE_URL);
        assert_eq!(config.document_store.base_url, DEFAULT_DOCUMENT_STORE_URL);
        assert_eq!(
            config.document_store.invites_url(),
            "http://localhost:5984/invites/"
        );
        assert_eq!(config.pagination.search_limit, 10);
        assert_eq!(config.pagination.artist_albums_limit, 5);
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_builder_requires_catalog_credentials() {
        let result = CoreConfig::builder()
            .http_client(Arc::new(MockHttpClient))
            .build();

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("credentials are required"));
    }

    #[cfg(not(feature = "desktop-shims"))]
    #[test]
    fn test_builder_requires_http_client() {
        let result = CoreConfig::builder()
            .catalog_api(CatalogApiConfig::new().with_access_token("token"))
            .build();

        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("HttpClient"));
        assert!(err_msg.contains("desktop-shims"));
    }

    #[cfg(feature = "desktop-shims")]
    #[test]
    fn test_build_with_desktop_http_client() {
        let config = CoreConfig::builder()
            .catalog_api(CatalogApiConfig::new().with_access_token("token"))
            .build();

        assert!(config.is_ok());
    }

    #[test]
    fn test_invalid_urls_rejected() {
        let result = base_builder().document_store_url("not a url").build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Document store URL"));

        let result = CoreConfig::builder()
            .http_client(Arc::new(MockHttpClient))
            .catalog_api(
                CatalogApiConfig::new()
                    .with_base_url("ftp://api.example.com")
                    .with_access_token("token"),
            )
            .build();
        assert!(result.unwrap_err().to_string().contains("http or https"));
    }

    #[test]
    fn test_invalid_database_name_rejected() {
        let result = base_builder()
            .document_store(DocumentStoreConfig::default().with_invites_database("Invites"))
            .build();

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid invites database name"));
    }

    #[test]
    fn test_invites_url_encodes_database_name() {
        let store = DocumentStoreConfig::new("http://couch:5984")
            .with_invites_database("spotie/invites");

        assert!(store.validate().is_ok());
        assert_eq!(store.invites_url(), "http://couch:5984/spotie%2Finvites/");
    }

    #[test]
    fn test_pagination_limits_validated() {
        let result = base_builder()
            .pagination(PaginationDefaults {
                search_limit: 0,
                ..PaginationDefaults::default()
            })
            .build();
        assert!(result.is_err());

        let result = base_builder()
            .pagination(PaginationDefaults {
                artist_albums_limit: 51,
                ..PaginationDefaults::default()
            })
            .build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("between 1 and 50"));
    }

    #[test]
    fn test_zero_cache_capacity_rejected() {
        let result = base_builder().cache_capacity(0).build();
        assert!(result.unwrap_err().to_string().contains("Cache capacity"));
    }

    #[test]
    fn test_with_lookup_overlays_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SPOTIE_CATALOG_URL", "https://catalog.test/v1/"),
            ("SPOTIE_CLIENT_ID", "client"),
            ("SPOTIE_CLIENT_SECRET", "secret"),
            ("SPOTIE_COUCHDB_URL", "http://couch.test:5984"),
            ("SPOTIE_COUCHDB_USER", "admin"),
            ("SPOTIE_COUCHDB_PASSWORD", "pw"),
            ("SPOTIE_INVITES_DB", "playlist_invites"),
            ("SPOTIE_CACHE_CAPACITY", "42"),
        ]);

        let config = CoreConfig::builder()
            .http_client(Arc::new(MockHttpClient))
            .with_lookup(|key| env.get(key).map(|v| v.to_string()))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.catalog_api.base_url, "https://catalog.test/v1");
        assert_eq!(
            config.catalog_api.credentials,
            CatalogCredentials::ClientCredentials {
                client_id: "client".to_string(),
                client_secret: "secret".to_string(),
            }
        );
        assert_eq!(
            config.document_store.invites_url(),
            "http://couch.test:5984/playlist_invites/"
        );
        assert_eq!(config.document_store.username.as_deref(), Some("admin"));
        assert_eq!(config.cache_capacity, 42);
    }

    #[test]
    fn test_with_lookup_rejects_half_client_credentials() {
        let result = CoreConfig::builder().with_lookup(|key| match key {
            "SPOTIE_CLIENT_ID" => Some("client".to_string()),
            _ => None,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_with_lookup_rejects_bad_cache_capacity() {
        let result = CoreConfig::builder().with_lookup(|key| match key {
            "SPOTIE_CACHE_CAPACITY" => Some("lots".to_string()),
            _ => None,
        });

        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = base_builder()
            .catalog_api(CatalogApiConfig::new().with_client_credentials("client", "s3cr3t"))
            .document_store(DocumentStoreConfig::default().with_credentials("admin", "hunter2"))
            .build()
            .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("client"));
    }
}
