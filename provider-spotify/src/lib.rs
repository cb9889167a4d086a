//! # Spotify Provider
//!
//! Implements `CatalogProvider` for the Spotify Web API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Artist search, artist + album pages, album and track lookups
//! - Bearer authentication with a pre-issued token or the OAuth 2.0
//!   client-credentials grant, cached until expiry
//! - Status-code mapping into `CatalogError`
//!
//! Requests are never retried.

pub mod auth;
pub mod connector;
pub mod error;
pub mod types;

pub use auth::SpotifyAuth;
pub use connector::SpotifyConnector;
pub use error::{Result, SpotifyError};
