//! Core service façade and bootstrap helpers.
//!
//! This crate wires a validated [`CoreConfig`] into the shared Rust core: the
//! Spotify connector behind a memoizing [`CachedCatalog`], the CouchDB invite
//! repository behind a [`SharingService`], and the request [`Controllers`].
//! Desktop hosts enable the `desktop-shims` feature so the reqwest-backed HTTP
//! client is injected automatically.

pub mod controllers;
pub mod error;
pub mod params;

pub use controllers::{Controllers, View};
pub use error::{CoreError, Result};
pub use params::RequestParams;

use std::sync::Arc;

use bridge_traits::time::SystemClock;
use core_catalog::{CachedCatalog, CatalogProvider};
use core_runtime::config::CoreConfig;
use core_sharing::{CouchInviteRepository, InviteRepository, SharingService};
use provider_spotify::SpotifyConnector;
use tracing::info;

/// Primary façade exposed to host applications.
#[derive(Clone)]
pub struct CoreService {
    config: Arc<CoreConfig>,
    catalog: Arc<dyn CatalogProvider>,
    sharing: Arc<SharingService>,
    controllers: Controllers,
}

impl CoreService {
    /// Build the service from configuration: Spotify catalog and CouchDB invites.
    pub fn from_config(config: CoreConfig) -> Result<Self> {
        let http_client = Arc::clone(&config.http_client);

        let connector = SpotifyConnector::from_config(
            Arc::clone(&http_client),
            &config.catalog_api,
            Arc::new(SystemClock),
        )?;
        let repository =
            CouchInviteRepository::from_config(http_client, &config.document_store);

        info!(
            catalog = %config.catalog_api.base_url,
            invites = %config.document_store.invites_url(),
            cache_capacity = config.cache_capacity,
            "Core service initialized"
        );

        Ok(Self::from_parts(config, connector, Arc::new(repository)))
    }

    /// Assemble the service around any catalog provider and invite repository.
    ///
    /// The provider is wrapped in a [`CachedCatalog`] sized by
    /// `config.cache_capacity`.
    pub fn from_parts<P>(
        config: CoreConfig,
        provider: P,
        repository: Arc<dyn InviteRepository>,
    ) -> Self
    where
        P: CatalogProvider + 'static,
    {
        let catalog: Arc<dyn CatalogProvider> =
            Arc::new(CachedCatalog::new(provider, config.cache_capacity));
        let controllers = Controllers::new(Arc::clone(&catalog), config.pagination);

        Self {
            config: Arc::new(config),
            catalog,
            sharing: Arc::new(SharingService::new(repository)),
            controllers,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// The memoized catalog used by the controllers
    pub fn catalog(&self) -> Arc<dyn CatalogProvider> {
        Arc::clone(&self.catalog)
    }

    pub fn sharing(&self) -> Arc<SharingService> {
        Arc::clone(&self.sharing)
    }

    pub fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    /// Route a request target to its controller by first path segment.
    ///
    /// `/` and `/?q=...` go to home or search, `/search/..`, `/artists/..` and
    /// `/albums/..` to their controllers.
    pub async fn handle(&self, target: &str) -> Result<View> {
        let params = RequestParams::parse(target)?;

        match params.segment(0) {
            None if params.query("q").is_none() => Ok(self.controllers.home()),
            None | Some("search") => self.controllers.search(&params).await,
            Some("artists") => self.controllers.artist(&params).await,
            Some("albums") => self.controllers.album(&params).await,
            Some(other) => Err(CoreError::UnknownRoute(other.to_string())),
        }
    }
}

/// Build a [`CoreService`] from `SPOTIE_*` environment variables.
///
/// ```no_run
/// # async fn example() -> core_service::Result<()> {
/// let core = core_service::bootstrap_from_env()?;
/// let view = core.handle("/?q=muse").await?;
/// println!("{}", view.title);
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "desktop-shims")]
pub fn bootstrap_from_env() -> Result<CoreService> {
    let config = CoreConfig::builder().with_env()?.build()?;
    CoreService::from_config(config)
}
