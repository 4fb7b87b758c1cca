//! Data-driven content for the dungeon.
//!
//! This crate reads the files a host may ship next to the binary:
//! - Game rules and starting values (`config.toml`)
//! - Spawn tables for a level (`layout.ron`)
//!
//! Everything loaded here is handed to the engine at construction time and
//! never appears in game state by itself.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LayoutLoader, LoadResult};
