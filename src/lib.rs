//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-service`, `core-catalog`, `core-sharing`).
//! Host applications can depend on `spotie-workspace` and enable the documented
//! features without needing to wire each crate individually.

#[cfg(feature = "desktop-shims")]
pub use core_service;

#[cfg(feature = "catalog")]
pub use core_catalog;

#[cfg(feature = "sharing")]
pub use core_sharing;
