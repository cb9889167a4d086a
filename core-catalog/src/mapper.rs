//! Catalog Mapper
//!
//! Stateless translation of provider payloads ([`wire`](crate::wire)) into
//! catalog entities ([`models`](crate::models)).
//!
//! - Genre lists are cloned into the entity, never shared with the payload.
//! - An album payload without `tracks` maps to `tracks: None`; an empty
//!   track page maps to `Some` of an empty collection.
//! - A track's embedded album is mapped recursively when present.
//! - Images are chosen by [`select_image`].
//!
//! The `*_from_json` entry points deserialize a raw `serde_json::Value`
//! first; a payload missing a required field yields
//! [`CatalogError::Parse`](crate::error::CatalogError::Parse).

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::collection::Collection;
use crate::error::Result;
use crate::models::{Album, Artist, Track, DEFAULT_ALBUM_IMAGE, DEFAULT_ARTIST_IMAGE};
use crate::wire::{
    ArtistSearchResponse, CatalogAlbum, CatalogArtist, CatalogImage, CatalogPage, CatalogTrack,
};

/// Provider image widths in order of preference
pub const DEFAULT_IMAGE_PREFERENCE: [u32; 5] = [200, 300, 640, 64, 1000];

/// Picks one image URL out of the provider's variants.
///
/// Returns `default` for an empty list. Otherwise the first width of
/// `preference` present in `images` wins; when none is present the first
/// image is returned whatever its width.
///
/// # Examples
///
/// ```
/// use core_catalog::mapper::{select_image, DEFAULT_IMAGE_PREFERENCE};
/// use core_catalog::wire::CatalogImage;
///
/// let images = vec![CatalogImage::new("a", 64), CatalogImage::new("b", 300)];
/// assert_eq!(
///     select_image(&images, None, &DEFAULT_IMAGE_PREFERENCE),
///     Some("b".to_string())
/// );
/// ```
pub fn select_image(
    images: &[CatalogImage],
    default: Option<&str>,
    preference: &[u32],
) -> Option<String> {
    let Some(first) = images.first() else {
        return default.map(str::to_string);
    };

    let chosen = preference
        .iter()
        .find_map(|wanted| images.iter().find(|image| image.width == Some(*wanted)))
        .unwrap_or(first);

    Some(chosen.url.clone())
}

/// Maps an artist object, without albums
pub fn map_artist(artist: &CatalogArtist) -> Artist {
    Artist {
        id: artist.id.clone(),
        name: artist.name.clone(),
        image: select_image(
            &artist.images,
            Some(DEFAULT_ARTIST_IMAGE),
            &DEFAULT_IMAGE_PREFERENCE,
        ),
        genres: artist.genres.clone(),
        popularity: artist.popularity,
        kind: artist.kind.clone(),
        uri: artist.uri.clone(),
        followers: artist.followers.total,
        albums: None,
    }
}

/// Maps an album object, with its tracks when the payload carries them
pub fn map_album(album: &CatalogAlbum) -> Album {
    Album {
        id: album.id.clone(),
        name: album.name.clone(),
        uri: album.uri.clone(),
        image: select_image(
            &album.images,
            Some(DEFAULT_ALBUM_IMAGE),
            &DEFAULT_IMAGE_PREFERENCE,
        ),
        kind: album.kind.clone(),
        label: album.label.clone(),
        release_date: album.release_date.clone(),
        tracks: map_tracks_to_collection(album.tracks.as_ref()),
    }
}

/// Maps a track page; `None` in, `None` out.
pub fn map_tracks_to_collection(
    tracks: Option<&CatalogPage<CatalogTrack>>,
) -> Option<Collection<Track>> {
    tracks.map(|page| map_page(page, map_track))
}

pub fn map_track(track: &CatalogTrack) -> Track {
    Track {
        id: track.id.clone(),
        name: track.name.clone(),
        disk_number: track.disk_number,
        duration_ms: track.duration_ms,
        preview_url: track.preview_url.clone(),
        track_number: track.track_number,
        uri: track.uri.clone(),
        album: track.album.as_deref().map(|album| Box::new(map_album(album))),
    }
}

/// Maps an artist search response into a page of artists, preserving order
pub fn map_artists_to_collection(response: &ArtistSearchResponse) -> Collection<Artist> {
    map_page(&response.artists, map_artist)
}

pub fn map_albums_to_collection(albums: &CatalogPage<CatalogAlbum>) -> Collection<Album> {
    map_page(albums, map_album)
}

/// Maps an artist and attaches its separately fetched album page
pub fn map_artist_and_albums(
    artist: &CatalogArtist,
    albums: &CatalogPage<CatalogAlbum>,
) -> Artist {
    Artist {
        albums: Some(map_albums_to_collection(albums)),
        ..map_artist(artist)
    }
}

fn map_page<W, T>(page: &CatalogPage<W>, f: impl Fn(&W) -> T) -> Collection<T> {
    Collection::new(
        page.offset,
        page.limit,
        page.total,
        page.items.iter().map(f).collect(),
    )
}

fn parse<T: DeserializeOwned>(json: &Value) -> Result<T> {
    Ok(T::deserialize(json)?)
}

pub fn artist_from_json(json: &Value) -> Result<Artist> {
    parse::<CatalogArtist>(json).map(|artist| map_artist(&artist))
}

pub fn album_from_json(json: &Value) -> Result<Album> {
    parse::<CatalogAlbum>(json).map(|album| map_album(&album))
}

pub fn track_from_json(json: &Value) -> Result<Track> {
    parse::<CatalogTrack>(json).map(|track| map_track(&track))
}

pub fn artists_collection_from_json(json: &Value) -> Result<Collection<Artist>> {
    parse::<ArtistSearchResponse>(json).map(|response| map_artists_to_collection(&response))
}

pub fn albums_collection_from_json(json: &Value) -> Result<Collection<Album>> {
    parse::<CatalogPage<CatalogAlbum>>(json).map(|page| map_albums_to_collection(&page))
}

pub fn artist_and_albums_from_json(artist_json: &Value, albums_json: &Value) -> Result<Artist> {
    let artist = parse::<CatalogArtist>(artist_json)?;
    let albums = parse::<CatalogPage<CatalogAlbum>>(albums_json)?;
    Ok(map_artist_and_albums(&artist, &albums))
}
