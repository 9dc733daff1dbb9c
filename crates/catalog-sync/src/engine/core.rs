//! Engine operations: fetch, add, favorite toggle, and offline replay

use super::state::{CatalogSnapshot, Notice, SyncState};
use crate::connectivity::ConnectivityHandle;
use crate::models::{OfflineRecord, Product, ProductId};
use crate::remote::RemoteCatalog;
use crate::store::{FavoriteStore, OfflineStore};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Orchestrates catalog state against the remote service and local stores.
///
/// One `Mutex` serializes every mutation of [`SyncState`]; network and storage
/// I/O run off the lock and hand results back for mutation. Dependencies are
/// injected at construction, there is no ambient global storage.
pub struct SyncEngine {
    remote: Arc<dyn RemoteCatalog>,
    offline: Arc<dyn OfflineStore>,
    favorites: Arc<dyn FavoriteStore>,
    connectivity: ConnectivityHandle,
    state: Mutex<SyncState>,
    snapshot_tx: watch::Sender<CatalogSnapshot>,
}

impl SyncEngine {
    /// Construct the engine and start its connectivity watcher.
    ///
    /// Loads the persisted favorite set and any pending offline records; if
    /// currently connected and the queue is non-empty, a replay pass begins
    /// immediately.
    pub async fn start(
        remote: Arc<dyn RemoteCatalog>,
        offline: Arc<dyn OfflineStore>,
        favorites: Arc<dyn FavoriteStore>,
        connectivity: ConnectivityHandle,
    ) -> Arc<Self> {
        let favorite_ids = match favorites.load().await {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!(error = %e, "Failed to load favorite identities, starting empty");
                Default::default()
            }
        };

        let mut records = match offline.fetch_all().await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to load offline records, starting empty");
                Vec::new()
            }
        };
        // Store order is not guaranteed; persisted timestamps restore the
        // original enqueue order for FIFO replay.
        records.sort_by_key(|r| r.timestamp);
        let queue: VecDeque<OfflineRecord> = records.into();

        if !queue.is_empty() {
            info!(pending = queue.len(), "Loaded offline queue");
        }

        let connected = connectivity.is_connected();
        let state = SyncState::new(favorite_ids, queue, connected);
        let (snapshot_tx, _) = watch::channel(state.snapshot());

        let engine = Arc::new(Self {
            remote,
            offline,
            favorites,
            connectivity,
            state: Mutex::new(state),
            snapshot_tx,
        });

        let watcher = Arc::clone(&engine);
        tokio::spawn(async move { watcher.watch_connectivity().await });

        engine
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Receiver that fires whenever the published state changes
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Fetch the remote catalog and replace the in-memory view.
    ///
    /// A no-op while another fetch is in flight. On failure the previous
    /// catalog is left untouched and the error is published.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.lock().await;
            if state.loading {
                debug!("Refresh already in flight, ignoring");
                return;
            }
            state.loading = true;
            self.publish(&state);
        }

        let result = self.remote.fetch_catalog().await;

        let mut state = self.state.lock().await;
        match result {
            Ok(products) => {
                state.products = products;
                state.reconcile_favorites();
                state.sort_products();
                state.last_error = None;
                debug!(count = state.products.len(), "Catalog refreshed");
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                state.last_error = Some(e);
            }
        }
        state.loading = false;
        self.publish(&state);
    }

    /// Add a product: submit immediately when connected, otherwise persist it
    /// for replay.
    ///
    /// Online submissions are at-most-once; only offline submissions get
    /// durability.
    pub async fn add_product(&self, candidate: Product) {
        if self.connectivity.is_connected() {
            let accepted = self.remote.submit_product(&candidate).await;

            let mut state = self.state.lock().await;
            if accepted {
                state.added_at.insert(candidate.id(), Utc::now());
                state.products.insert(0, candidate);
                state.sort_products();
                state.notice = Some(Notice::ProductAdded);
            } else {
                state.notice = Some(Notice::AddFailed);
            }
            self.publish(&state);
        } else {
            let record = OfflineRecord::new(candidate, Utc::now());
            if let Err(e) = self.offline.save(&record).await {
                warn!(product = %record.product_id(), error = %e, "Failed to persist offline record");
            }

            let mut state = self.state.lock().await;
            info!(product = %record.product_id(), "Product queued for offline sync");
            state.offline_queue.push_back(record);
            state.notice = Some(Notice::SavedOffline);
            self.publish(&state);
        }
    }

    /// Flip the favorite flag for the matching catalog entry and persist the
    /// updated identity set. Unknown identities are ignored.
    pub async fn toggle_favorite(&self, id: &ProductId) {
        let favorite_ids: Vec<ProductId> = {
            let mut state = self.state.lock().await;
            let Some(product) = state.products.iter_mut().find(|p| &p.id() == id) else {
                debug!(product = %id, "Toggle for unknown identity ignored");
                return;
            };
            product.is_favorite = !product.is_favorite;

            // The persisted set is the catalog's favorite projection.
            state.favorite_ids = state
                .products
                .iter()
                .filter(|p| p.is_favorite)
                .map(|p| p.id())
                .collect();
            state.sort_products();
            self.publish(&state);
            state.favorite_ids.iter().cloned().collect()
        };

        if let Err(e) = self.favorites.save(&favorite_ids).await {
            warn!(error = %e, "Failed to persist favorite identities");
        }
    }

    /// Push queued offline records to the remote service, strictly FIFO.
    ///
    /// Each record is removed from the queue and the durable store exactly
    /// once, whether or not its submission succeeded; a failed push is
    /// dropped, not re-queued. Popping under the lock keeps overlapping
    /// passes from replaying a record twice.
    pub async fn flush_pending(&self) {
        let mut pushed = 0usize;
        let mut dropped = 0usize;

        loop {
            let record = {
                let mut state = self.state.lock().await;
                state.offline_queue.pop_front()
            };
            let Some(record) = record else { break };

            let id = record.product_id();
            if self.remote.submit_product(&record.to_product()).await {
                pushed += 1;
            } else {
                dropped += 1;
                warn!(product = %id, "Offline record dropped after failed push");
            }

            if let Err(e) = self.offline.delete(&id).await {
                warn!(product = %id, error = %e, "Failed to delete offline record");
            }
        }

        if pushed > 0 || dropped > 0 {
            info!(pushed, dropped, "Offline queue drained");
        }

        let state = self.state.lock().await;
        self.publish(&state);
    }

    /// React to connectivity transitions: keep the published flag current and
    /// replay the offline queue on every reconnect (and once at startup).
    async fn watch_connectivity(self: Arc<Self>) {
        let mut rx = self.connectivity.subscribe();
        let mut was_connected = *rx.borrow();

        if was_connected && self.has_pending().await {
            self.flush_pending().await;
        }

        loop {
            if rx.changed().await.is_err() {
                debug!("Connectivity channel closed, stopping watcher");
                break;
            }
            let now_connected = *rx.borrow();

            {
                let mut state = self.state.lock().await;
                state.connected = now_connected;
                self.publish(&state);
            }

            if now_connected && !was_connected {
                self.flush_pending().await;
            }
            was_connected = now_connected;
        }
    }

    async fn has_pending(&self) -> bool {
        !self.state.lock().await.offline_queue.is_empty()
    }

    fn publish(&self, state: &SyncState) {
        self.snapshot_tx.send_replace(state.snapshot());
    }
}
