//! Request controllers
//!
//! Each controller validates its parameters, queries the catalog and returns
//! a [`View`]: the template name plus the data a renderer needs. Missing
//! identifiers are rejected before any outbound request.

use std::sync::Arc;

use core_catalog::{CatalogError, CatalogProvider, Collection, PageInfo, PageRequest};
use core_runtime::config::PaginationDefaults;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::error::{CoreError, Result};
use crate::params::RequestParams;

/// Template name, page title and render data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub template: String,
    pub title: String,
    pub data: serde_json::Value,
}

impl View {
    fn new(template: &str, title: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            template: template.to_string(),
            title: title.into(),
            data,
        }
    }
}

/// Catalog page controllers
#[derive(Clone)]
pub struct Controllers {
    catalog: Arc<dyn CatalogProvider>,
    pagination: PaginationDefaults,
}

impl Controllers {
    pub fn new(catalog: Arc<dyn CatalogProvider>, pagination: PaginationDefaults) -> Self {
        Self {
            catalog,
            pagination,
        }
    }

    pub fn home(&self) -> View {
        View::new("home", "Homepage", json!({ "title": "Homepage" }))
    }

    /// Artist search: `/?q=name` or `/search/name`, with `page` and `limit`.
    #[instrument(skip_all)]
    pub async fn search(&self, params: &RequestParams) -> Result<View> {
        let query = params
            .query("q")
            .or_else(|| params.segment(1))
            .ok_or_else(|| CoreError::MissingParameter("artist".to_string()))?;
        let page = self.page_request(params, self.pagination.search_limit)?;

        debug!(query, page = page.page, limit = page.limit, "Searching artists");
        let collection = self
            .catalog
            .search_artists(query, page.offset(), page.limit())
            .await?;

        let pagination = page_info(&collection)?;
        let title = format!("{} Results for {}", collection.total, query);
        Ok(View::new(
            "search",
            title.clone(),
            json!({
                "title": title,
                "query": query,
                "collection": collection,
                "pagination": pagination,
            }),
        ))
    }

    /// Artist profile with a page of albums: `/artists/{id}`
    #[instrument(skip_all)]
    pub async fn artist(&self, params: &RequestParams) -> Result<View> {
        let artist_id = params
            .segment(1)
            .ok_or_else(|| CoreError::MissingParameter("artist id".to_string()))?;
        let page = self.page_request(params, self.pagination.artist_albums_limit)?;

        let artist = self
            .catalog
            .artist_with_albums(artist_id, page.offset(), page.limit())
            .await?;

        let pagination = artist.albums.as_ref().map(page_info).transpose()?;
        Ok(View::new(
            "artist",
            artist.name.clone(),
            json!({
                "title": artist.name,
                "artist": artist,
                "pagination": pagination,
            }),
        ))
    }

    /// Album with its first page of tracks: `/albums/{id}`
    #[instrument(skip_all)]
    pub async fn album(&self, params: &RequestParams) -> Result<View> {
        let album_id = params
            .segment(1)
            .ok_or_else(|| CoreError::MissingParameter("album id".to_string()))?;

        let album = self.catalog.album(album_id).await?;

        Ok(View::new(
            "album",
            album.name.clone(),
            json!({
                "title": album.name,
                "album": album,
            }),
        ))
    }

    fn page_request(&self, params: &RequestParams, default_limit: u32) -> Result<PageRequest> {
        let page = params.positive_u32("page", 1)?;
        let limit = params.positive_u32("limit", default_limit)?;

        if limit > self.pagination.max_limit {
            return Err(CoreError::InvalidParameter {
                name: "limit".to_string(),
                message: format!("must not exceed {}", self.pagination.max_limit),
            });
        }

        Ok(PageRequest::new(page, limit))
    }
}

/// Navigation facts of a provider page; a zero `limit` is a malformed reply.
fn page_info<T>(collection: &Collection<T>) -> Result<PageInfo> {
    if collection.limit == 0 {
        return Err(CatalogError::Parse(
            "provider returned a page with limit 0".to_string(),
        )
        .into());
    }
    Ok(collection.page_info())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_catalog::{Album, Artist, Track};
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Catalog {}

        #[async_trait]
        impl CatalogProvider for Catalog {
            async fn search_artists(&self, query: &str, offset: u32, limit: u32)
                -> core_catalog::Result<Collection<Artist>>;
            async fn artist_with_albums(&self, artist_id: &str, offset: u32, limit: u32)
                -> core_catalog::Result<Artist>;
            async fn album(&self, album_id: &str) -> core_catalog::Result<Album>;
            async fn track(&self, track_id: &str) -> core_catalog::Result<Track>;
        }
    }

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: id.to_string(),
            name: name.to_string(),
            image: None,
            genres: vec!["rock".to_string()],
            popularity: 80,
            kind: "artist".to_string(),
            uri: format!("spotify:artist:{}", id),
            followers: 1_000,
            albums: None,
        }
    }

    fn controllers(catalog: MockCatalog) -> Controllers {
        Controllers::new(Arc::new(catalog), PaginationDefaults::default())
    }

    fn params(target: &str) -> RequestParams {
        RequestParams::parse(target).unwrap()
    }

    #[test]
    fn test_home() {
        let view = controllers(MockCatalog::new()).home();
        assert_eq!(view.template, "home");
        assert_eq!(view.title, "Homepage");
    }

    #[tokio::test]
    async fn test_search_defaults() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_search_artists()
            .with(eq("muse"), eq(0), eq(10))
            .times(1)
            .returning(|_, offset, limit| {
                Ok(Collection::new(offset, limit, 57, vec![artist("1", "Muse")]))
            });

        let view = controllers(catalog).search(&params("/?q=muse")).await.unwrap();

        assert_eq!(view.template, "search");
        assert_eq!(view.title, "57 Results for muse");
        assert_eq!(view.data["query"], "muse");
        assert_eq!(view.data["pagination"]["total_pages"], 6);
    }

    #[tokio::test]
    async fn test_search_from_path_with_page() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_search_artists()
            .with(eq("daft punk"), eq(40), eq(20))
            .times(1)
            .returning(|_, offset, limit| {
                let last_five = (41..=45).map(|n| artist(&n.to_string(), "Daft Punk")).collect();
                Ok(Collection::new(offset, limit, 45, last_five))
            });

        let view = controllers(catalog)
            .search(&params("/search/daft%20punk?page=3&limit=20"))
            .await
            .unwrap();

        assert_eq!(view.data["pagination"]["current_page"], 3);
        assert_eq!(view.data["pagination"]["is_last"], true);
    }

    #[tokio::test]
    async fn test_zero_limit_page_is_a_parse_error() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_search_artists()
            .returning(|_, offset, _| Ok(Collection::new(offset, 0, 3, Vec::new())));
        catalog.expect_artist_with_albums().returning(|id, offset, _| {
            let mut found = artist(id, "Broken");
            found.albums = Some(Collection::new(offset, 0, 3, Vec::new()));
            Ok(found)
        });
        let controllers = controllers(catalog);

        assert!(matches!(
            controllers.search(&params("/?q=broken")).await,
            Err(CoreError::Catalog(CatalogError::Parse(_)))
        ));
        assert!(matches!(
            controllers.artist(&params("/artists/7")).await,
            Err(CoreError::Catalog(CatalogError::Parse(_)))
        ));
    }

    #[tokio::test]
    async fn test_search_without_query_makes_no_call() {
        let mut catalog = MockCatalog::new();
        catalog.expect_search_artists().never();

        let err = controllers(catalog).search(&params("/search")).await.unwrap_err();

        assert!(matches!(err, CoreError::MissingParameter(name) if name == "artist"));
    }

    #[tokio::test]
    async fn test_invalid_pagination_makes_no_call() {
        let mut catalog = MockCatalog::new();
        catalog.expect_search_artists().never();
        catalog.expect_artist_with_albums().never();
        let controllers = controllers(catalog);

        for target in ["/?q=a&page=0", "/?q=a&limit=x", "/?q=a&limit=51"] {
            assert!(matches!(
                controllers.search(&params(target)).await,
                Err(CoreError::InvalidParameter { .. })
            ));
        }
        assert!(matches!(
            controllers.artist(&params("/artists/1?page=-2")).await,
            Err(CoreError::InvalidParameter { .. })
        ));
    }

    #[tokio::test]
    async fn test_artist_uses_album_page_size() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_artist_with_albums()
            .with(eq("42"), eq(5), eq(5))
            .times(1)
            .returning(|id, offset, limit| {
                let mut found = artist(id, "Radiohead");
                found.albums = Some(Collection::new(offset, limit, 12, Vec::new()));
                Ok(found)
            });

        let view = controllers(catalog)
            .artist(&params("/artists/42?page=2"))
            .await
            .unwrap();

        assert_eq!(view.template, "artist");
        assert_eq!(view.title, "Radiohead");
        assert_eq!(view.data["pagination"]["current_page"], 2);
        assert_eq!(view.data["artist"]["type"], "artist");
    }

    #[tokio::test]
    async fn test_album_missing_id() {
        let mut catalog = MockCatalog::new();
        catalog.expect_album().never();

        let err = controllers(catalog).album(&params("/albums/")).await.unwrap_err();

        assert!(matches!(err, CoreError::MissingParameter(name) if name == "album id"));
    }

    #[tokio::test]
    async fn test_catalog_errors_pass_through() {
        let mut catalog = MockCatalog::new();
        catalog.expect_album().returning(|id| {
            Err(CatalogError::NotFound {
                entity_type: "album".to_string(),
                id: id.to_string(),
            })
        });

        let err = controllers(catalog).album(&params("/albums/nope")).await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::Catalog(CatalogError::NotFound { id, .. }) if id == "nope"
        ));
    }
}
