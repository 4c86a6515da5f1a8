//! Data-driven item content and loaders.
//!
//! This crate provides loaders for the data files item tooling consumes:
//! - Enhancement configuration (data-driven via TOML)
//! - Item template catalogs (data-driven via RON)
//!
//! Content feeds item minting and decomposition and never appears in item payloads.
//!
//! All loaders use item-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemCatalog, ItemLoader, LoadResult};
