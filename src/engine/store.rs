// file: src/engine/store.rs
// description: single-writer publish point for the current index snapshot
// reference: https://doc.rust-lang.org/std/sync/struct.RwLock.html

use crate::engine::index::{IndexBuilder, IndexSnapshot};
use crate::models::Document;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Holds the latest snapshot behind a reference that is swapped whole.
///
/// Readers clone the `Arc` and keep querying it even after a newer
/// generation is published; the old snapshot is freed when the last reader
/// drops it. The lock only guards the pointer, never passage data.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<IndexSnapshot>>,
    next_generation: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(IndexSnapshot::empty())),
            next_generation: AtomicU64::new(1),
        }
    }

    pub fn current(&self) -> Arc<IndexSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn generation(&self) -> u64 {
        self.current().generation()
    }

    /// Builds a new generation outside the lock and publishes it.
    pub fn rebuild(&self, builder: &IndexBuilder, documents: &[Document]) -> Arc<IndexSnapshot> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let snapshot = builder.build_generation(documents, generation);
        self.publish(snapshot)
    }

    /// Swaps in `snapshot` unless a newer generation is already live, and
    /// returns whichever snapshot is current afterwards.
    fn publish(&self, snapshot: IndexSnapshot) -> Arc<IndexSnapshot> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);

        if snapshot.generation() <= guard.generation() {
            warn!(
                "Discarding index generation {}: generation {} is already published",
                snapshot.generation(),
                guard.generation()
            );
            return Arc::clone(&guard);
        }

        info!(
            "Published index generation {} ({} passages from {} documents)",
            snapshot.generation(),
            snapshot.len(),
            snapshot.document_count()
        );
        *guard = Arc::new(snapshot);
        Arc::clone(&guard)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
