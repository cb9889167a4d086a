//! # Core Catalog
//!
//! Catalog entities and the logic that produces them from a third-party
//! music catalog.
//!
//! ## Modules
//!
//! - [`collection`] - `Collection<T>` page arithmetic and `PageRequest`
//! - [`wire`] - provider payload shapes (serde)
//! - [`models`] - `Artist`, `Album`, `Track`
//! - [`mapper`] - payload → entity mapping and image selection
//! - [`provider`] - the `CatalogProvider` trait
//! - [`cache`] - `CachedCatalog`, a memoizing provider wrapper
//!
//! ## Example
//!
//! ```
//! use core_catalog::mapper::artists_collection_from_json;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "artists": { "offset": 0, "limit": 10, "total": 0, "items": [] }
//! });
//! let page = artists_collection_from_json(&payload).unwrap();
//! assert!(page.is_first());
//! assert!(page.is_last());
//! ```

pub mod cache;
pub mod collection;
pub mod error;
pub mod mapper;
pub mod models;
pub mod provider;
pub mod wire;

pub use cache::CachedCatalog;
pub use collection::{Collection, PageInfo, PageRequest};
pub use error::{CatalogError, Result};
pub use models::{Album, Artist, Track};
pub use provider::CatalogProvider;
