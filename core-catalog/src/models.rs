//! Catalog entities
//!
//! Owned, provider-independent values produced by the [`mapper`](crate::mapper).
//! Nested entities are owned copies, so no reference cycles exist between an
//! album and its tracks.

use serde::{Deserialize, Serialize};

use crate::collection::Collection;

/// Fallback image for artists without pictures
pub const DEFAULT_ARTIST_IMAGE: &str = "/img/defaultAvatar.png";

/// Fallback image for albums without artwork
pub const DEFAULT_ALBUM_IMAGE: &str = "/img/music_default.jpg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub genres: Vec<String>,
    pub popularity: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    pub followers: u64,
    /// Present only when the artist was fetched together with its albums
    pub albums: Option<Collection<Album>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: Option<String>,
    pub release_date: String,
    /// `None` when tracks were not fetched; `Some(empty)` for an album with
    /// no tracks.
    pub tracks: Option<Collection<Track>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub disk_number: u32,
    pub duration_ms: u64,
    pub preview_url: Option<String>,
    pub track_number: u32,
    pub uri: String,
    pub album: Option<Box<Album>>,
}

impl Track {
    /// Duration formatted as `m:ss`
    pub fn duration_display(&self) -> String {
        let seconds = self.duration_ms / 1000;
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_display() {
        let track = Track {
            id: "t".into(),
            name: "Song".into(),
            disk_number: 1,
            duration_ms: 245_999,
            preview_url: None,
            track_number: 1,
            uri: "spotify:track:t".into(),
            album: None,
        };

        assert_eq!(track.duration_display(), "4:05");
    }
}
