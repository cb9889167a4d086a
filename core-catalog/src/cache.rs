//! Passthrough memoization of catalog lookups
//!
//! Artist pages and albums change rarely, so [`CachedCatalog`] keeps the
//! most recently used results in memory. Searches and track lookups always
//! reach the wrapped provider. Failed lookups are never cached.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::collection::Collection;
use crate::error::Result;
use crate::models::{Album, Artist, Track};
use crate::provider::CatalogProvider;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ArtistKey {
    artist_id: String,
    offset: u32,
    limit: u32,
}

/// LRU-backed memoizing wrapper around any [`CatalogProvider`]
pub struct CachedCatalog<P> {
    inner: P,
    artists: Arc<Mutex<LruCache<ArtistKey, Artist>>>,
    albums: Arc<Mutex<LruCache<String, Album>>>,
}

impl<P: CatalogProvider> CachedCatalog<P> {
    /// Wrap `inner`, keeping up to `capacity` artists and `capacity` albums.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(inner: P, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            artists: Arc::new(Mutex::new(LruCache::new(capacity))),
            albums: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// The wrapped provider
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drop every memoized result
    pub async fn invalidate_all(&self) {
        self.artists.lock().await.clear();
        self.albums.lock().await.clear();
        debug!("Catalog cache cleared");
    }

    /// Number of memoized entries (artists, albums)
    pub async fn cached_entries(&self) -> (usize, usize) {
        (self.artists.lock().await.len(), self.albums.lock().await.len())
    }
}

#[async_trait]
impl<P: CatalogProvider> CatalogProvider for CachedCatalog<P> {
    async fn search_artists(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Collection<Artist>> {
        self.inner.search_artists(query, offset, limit).await
    }

    #[instrument(skip(self))]
    async fn artist_with_albums(&self, artist_id: &str, offset: u32, limit: u32) -> Result<Artist> {
        let key = ArtistKey {
            artist_id: artist_id.to_string(),
            offset,
            limit,
        };

        if let Some(artist) = self.artists.lock().await.get(&key) {
            debug!("Artist cache hit");
            return Ok(artist.clone());
        }

        debug!("Artist cache miss");
        let artist = self.inner.artist_with_albums(artist_id, offset, limit).await?;
        self.artists.lock().await.put(key, artist.clone());
        Ok(artist)
    }

    #[instrument(skip(self))]
    async fn album(&self, album_id: &str) -> Result<Album> {
        if let Some(album) = self.albums.lock().await.get(album_id) {
            debug!("Album cache hit");
            return Ok(album.clone());
        }

        debug!("Album cache miss");
        let album = self.inner.album(album_id).await?;
        self.albums
            .lock()
            .await
            .put(album_id.to_string(), album.clone());
        Ok(album)
    }

    async fn track(&self, track_id: &str) -> Result<Track> {
        self.inner.track(track_id).await
    }
}
