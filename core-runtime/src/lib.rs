//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure shared by the catalog and
//! sharing crates:
//! - Logging and tracing infrastructure
//! - Configuration management (catalog API, document store, pagination)
//!
//! ## Overview
//!
//! Every other `core-*` crate receives its settings from a validated
//! [`CoreConfig`](config::CoreConfig) and logs through `tracing`, with the
//! subscriber installed once by [`init_logging`](logging::init_logging).

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
