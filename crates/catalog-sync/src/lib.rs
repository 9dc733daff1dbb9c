//! Offline-first product catalog synchronization
//!
//! This crate provides the core functionality for:
//! - Fetching and submitting products against the remote catalog API
//! - Buffering writes made while offline in a durable local store
//! - Replaying buffered writes in order once connectivity returns
//! - Favorite tracking reconciled against persisted identities

pub mod connectivity;
pub mod engine;
pub mod error;
pub mod models;
pub mod remote;
pub mod store;

pub use connectivity::{ConnectivityHandle, MonitorConfig, ProbeMonitor};
pub use engine::{CatalogSnapshot, Notice, SyncEngine};
pub use error::RemoteError;
pub use models::{OfflineRecord, Product, ProductId};
pub use remote::{HttpCatalogClient, RemoteCatalog, RemoteConfig};
pub use store::{FavoriteStore, JsonFavoriteStore, JsonOfflineStore, OfflineStore};
