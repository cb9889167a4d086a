//! # Desktop/Server Bridge Implementations
//!
//! Default implementations of bridge traits for native hosts
//! (macOS, Windows, Linux servers).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` with connection pooling and rustls
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::ReqwestHttpClient;
//! use bridge_traits::HttpClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
//!
//!     // Hand to CoreConfig::builder().http_client(...)
//! }
//! ```

mod http;

pub use http::ReqwestHttpClient;
