//! # Host Bridge Traits
//!
//! Platform abstraction traits that the core crates program against.
//!
//! ## Overview
//!
//! This crate defines the contract between the catalog/sharing core and the
//! host-specific implementations. The core never talks to `reqwest` or the
//! system clock directly: it receives an `Arc<dyn HttpClient>` and an
//! `Arc<dyn Clock>` and stays testable with mocks.
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations against the catalog
//!   provider and the document store
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Implementations
//!
//! | Host    | Implementation Crate | Status |
//! |---------|---------------------|--------|
//! | Server  | `bridge-desktop`    | ✅ Available |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Host
//! implementations should:
//!
//! - Convert library-specific errors to `BridgeError`
//! - Provide actionable error messages
//! - Leave status-code interpretation to the caller (a 404 or 409 is a
//!   successful HTTP exchange at this layer)
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! across async tasks behind an `Arc`.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // Implementation
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod log;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::{LogEntry, LogLevel, LoggerSink};
pub use time::{Clock, ManualClock, SystemClock};
