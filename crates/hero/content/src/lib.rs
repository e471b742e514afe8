//! Data-driven class content and manager settings.
//!
//! This crate reads the files a game ships alongside its binary:
//! - Class catalog (level curves, ability tuning, display text) from RON
//! - Lifecycle manager settings from TOML
//!
//! Loaded content is handed to the runtime as a [`hero_core::ClassOracle`]
//! and never changes afterwards. All loaders deserialize hero-core types
//! directly through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ClassCatalogLoader, ConfigLoader, ContentFactory, LoadResult};
