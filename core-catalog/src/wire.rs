//! Catalog provider payload shapes
//!
//! These mirror the JSON returned by the provider's Web API. Fields the
//! provider may omit are `Option`s (or default to empty); every other field
//! is required and a payload lacking it fails to deserialize. In particular
//! an artist object must carry `genres`, `popularity` and `followers`.

use serde::{Deserialize, Serialize};

/// Image variant of an artist or album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub url: String,
    /// Pixel width; the provider sends `null` for some user-uploaded images
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl CatalogImage {
    pub fn new(url: impl Into<String>, width: u32) -> Self {
        Self {
            url: url.into(),
            width: Some(width),
            height: Some(width),
        }
    }
}

/// Paging object: `{offset, limit, total, items}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage<T> {
    pub offset: u32,
    pub limit: u32,
    pub total: u32,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFollowers {
    pub total: u64,
}

/// Full artist object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<CatalogImage>,
    pub genres: Vec<String>,
    pub popularity: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    pub followers: CatalogFollowers,
}

/// Album object, full or simplified
///
/// Simplified albums (artist album lists, a track's embedded album) carry no
/// `label` and no `tracks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogAlbum {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub images: Vec<CatalogImage>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    pub release_date: String,
    #[serde(default)]
    pub tracks: Option<CatalogPage<CatalogTrack>>,
}

/// Track object, with the album embedded when fetched on its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
    #[serde(alias = "disc_number")]
    pub disk_number: u32,
    pub duration_ms: u64,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub track_number: u32,
    pub uri: String,
    #[serde(default)]
    pub album: Option<Box<CatalogAlbum>>,
}

/// Artist search response: `{artists: {offset, limit, total, items}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: CatalogPage<CatalogArtist>,
}
