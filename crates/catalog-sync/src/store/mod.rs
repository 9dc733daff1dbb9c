//! Durable local persistence
//!
//! This module provides the storage seams the sync engine is built against:
//! - Offline store for products awaiting upload, keyed by identity
//! - Favorite store holding the persisted favorite-identity set
//!
//! Both are best-effort: callers log failures and degrade rather than crash.

mod favorites;
mod offline;

pub use favorites::{FavoriteStore, JsonFavoriteStore};
pub use offline::{JsonOfflineStore, OfflineStore};
