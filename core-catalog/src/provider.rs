//! Catalog provider trait
//!
//! Implemented by REST connectors (see `provider-spotify`) and by the
//! memoizing [`CachedCatalog`](crate::cache::CachedCatalog) wrapper.

use async_trait::async_trait;

use crate::collection::Collection;
use crate::error::Result;
use crate::models::{Album, Artist, Track};

/// Read access to a third-party music catalog.
///
/// Offsets and limits are passed through to the provider unchanged.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search artists by name
    async fn search_artists(&self, query: &str, offset: u32, limit: u32)
        -> Result<Collection<Artist>>;

    /// Fetch an artist together with one page of its albums
    async fn artist_with_albums(&self, artist_id: &str, offset: u32, limit: u32) -> Result<Artist>;

    /// Fetch an album with its first page of tracks
    async fn album(&self, album_id: &str) -> Result<Album>;

    /// Fetch a track with its album embedded
    async fn track(&self, track_id: &str) -> Result<Track>;
}
