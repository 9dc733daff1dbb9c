//! Engine state, published snapshots, and the shared sort primitive

use crate::error::RemoteError;
use crate::models::{OfflineRecord, Product, ProductId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet, VecDeque};

/// User-facing notification raised by engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Online submission succeeded and the product joined the catalog
    ProductAdded,
    /// Online submission failed; the product was not retried or queued
    AddFailed,
    /// Saved to the offline store, will sync when connected
    SavedOffline,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::ProductAdded => "Successfully added new product",
            Notice::AddFailed => "Error in adding this product",
            Notice::SavedOffline => "Product saved offline. Will sync when connected.",
        }
    }
}

/// Immutable view of the engine state published to subscribers
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Current catalog, sorted (favorites first, newest first)
    pub products: Vec<Product>,
    /// Products awaiting upload
    pub pending_offline: Vec<Product>,
    pub connected: bool,
    pub loading: bool,
    pub last_error: Option<RemoteError>,
    pub notice: Option<Notice>,
}

/// Mutable engine state. All mutation happens under one lock.
#[derive(Debug)]
pub(super) struct SyncState {
    pub products: Vec<Product>,
    /// Added-at timestamps used for the recency sort; in-memory only
    pub added_at: HashMap<ProductId, DateTime<Utc>>,
    /// Persisted favorite identities, the reconciliation source of truth
    pub favorite_ids: HashSet<ProductId>,
    pub offline_queue: VecDeque<OfflineRecord>,
    pub loading: bool,
    pub connected: bool,
    pub last_error: Option<RemoteError>,
    pub notice: Option<Notice>,
}

impl SyncState {
    pub fn new(
        favorite_ids: HashSet<ProductId>,
        offline_queue: VecDeque<OfflineRecord>,
        connected: bool,
    ) -> Self {
        Self {
            products: Vec::new(),
            added_at: HashMap::new(),
            favorite_ids,
            offline_queue,
            loading: false,
            connected,
            last_error: None,
            notice: None,
        }
    }

    /// Mark catalog entries whose identity is in the persisted favorite set
    pub fn reconcile_favorites(&mut self) {
        for product in &mut self.products {
            product.is_favorite = self.favorite_ids.contains(&product.id());
        }
    }

    /// Re-sort the catalog: favorites first, then added-at descending.
    ///
    /// Stable, so entries with equal keys keep their relative order and
    /// repeated sorts do not jitter.
    pub fn sort_products(&mut self) {
        let added_at = &self.added_at;
        self.products.sort_by(|a, b| {
            b.is_favorite.cmp(&a.is_favorite).then_with(|| {
                let ta = added_at.get(&a.id()).copied().unwrap_or(DateTime::<Utc>::MIN_UTC);
                let tb = added_at.get(&b.id()).copied().unwrap_or(DateTime::<Utc>::MIN_UTC);
                tb.cmp(&ta)
            })
        });
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            products: self.products.clone(),
            pending_offline: self.offline_queue.iter().map(|r| r.to_product()).collect(),
            connected: self.connected,
            loading: self.loading,
            last_error: self.last_error.clone(),
            notice: self.notice,
        }
    }
}
