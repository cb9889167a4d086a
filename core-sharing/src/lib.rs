//! # Core Sharing
//!
//! Playlist sharing through email invitations stored in a CouchDB-compatible
//! document store.
//!
//! - [`models`] - the `Invitation` document and write acknowledgements
//! - [`couchdb`] - `_find` selectors, response envelopes, status mapping
//! - [`repository`] - `InviteRepository` and its CouchDB implementation
//! - [`service`] - invite / accept / decline / revoke flows
//!
//! Store errors reach the caller unchanged in meaning and nothing is
//! retried. A stale revision surfaces as [`SharingError::Conflict`].

pub mod couchdb;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{Result, SharingError};
pub use models::{DocumentAck, Invitation};
pub use repository::{CouchInviteRepository, InviteRepository};
pub use service::SharingService;
