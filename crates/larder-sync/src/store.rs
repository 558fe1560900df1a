//! # Synchronization Store
//!
//! Holds the client's view of the remote collection and drives every
//! round trip through the gateway.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Operations                                │
//! │                                                                         │
//! │  load(term)                                                            │
//! │    is_loading=true, error=None, search_term=term                       │
//! │    ├── Ok(items)  → items = reversed(items), is_loading=false          │
//! │    └── Err(e)     → error = e.to_string(),  is_loading=false           │
//! │                                                                         │
//! │  create(form) / update(id, form)          delete(id)                   │
//! │    is_submitting=true, error=None           is_deleting=true           │
//! │    ├── Ok  → load(active term), flag off, return value                 │
//! │    └── Err → error = message, items untouched, flag off, return Err    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Loads
//! Loads are never cancelled. Each one takes a generation number when it
//! starts; a completion that is no longer the newest generation is dropped
//! without touching state, so the list always reflects the latest request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use larder_core::{FormInput, Item};

use crate::error::ClientResult;
use crate::gateway::FoodGateway;

// =============================================================================
// Store State
// =============================================================================

/// Snapshot of what the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Items from the latest successful load, oldest first. The remote
    /// collection lists newest first, so the response is reversed.
    pub items: Vec<Item>,

    /// A load is in flight.
    pub is_loading: bool,

    /// Message of the last failed operation.
    pub error: Option<String>,

    /// Term of the most recent load; mutations reload with it.
    pub search_term: String,

    /// A create or update is in flight.
    pub is_submitting: bool,

    /// A delete is in flight.
    pub is_deleting: bool,
}

// =============================================================================
// Event Emitter Trait
// =============================================================================

/// Receives store changes (implemented by the presentation layer).
pub trait StoreEventEmitter: Send + Sync {
    /// Called with the new state after every change.
    fn emit_state(&self, state: &StoreState);

    /// Called when an operation fails.
    fn emit_error(&self, message: &str);
}

/// Emitter that ignores everything.
pub struct NoOpEmitter;

impl StoreEventEmitter for NoOpEmitter {
    fn emit_state(&self, _state: &StoreState) {}
    fn emit_error(&self, _message: &str) {}
}

// =============================================================================
// Catalog Store
// =============================================================================

/// Shared handle to the catalog state. Clones share the same state.
#[derive(Clone)]
pub struct CatalogStore {
    gateway: Arc<dyn FoodGateway>,
    state: Arc<RwLock<StoreState>>,

    /// Generation of the newest issued load.
    generation: Arc<AtomicU64>,

    emitter: Arc<dyn StoreEventEmitter>,
}

impl CatalogStore {
    /// Creates an empty store over `gateway`.
    pub fn new(gateway: Arc<dyn FoodGateway>) -> Self {
        Self::with_emitter(gateway, Arc::new(NoOpEmitter))
    }

    /// Creates an empty store that reports changes to `emitter`.
    pub fn with_emitter(
        gateway: Arc<dyn FoodGateway>,
        emitter: Arc<dyn StoreEventEmitter>,
    ) -> Self {
        CatalogStore {
            gateway,
            state: Arc::new(RwLock::new(StoreState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            emitter,
        }
    }

    /// Current state.
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    /// Term of the most recent load.
    pub async fn search_term(&self) -> String {
        self.state.read().await.search_term.clone()
    }

    /// Applies `change` and notifies the emitter. The lock is released
    /// before the emitter runs.
    async fn update_state(&self, change: impl FnOnce(&mut StoreState)) {
        let snapshot = {
            let mut state = self.state.write().await;
            change(&mut *state);
            state.clone()
        };
        self.emitter.emit_state(&snapshot);
    }

    /// Records a failed operation.
    async fn record_failure(&self, message: String, clear: impl FnOnce(&mut StoreState)) {
        self.emitter.emit_error(&message);
        self.update_state(|state| {
            state.error = Some(message);
            clear(state);
        })
        .await;
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Fetches the collection filtered by `search_term` and replaces the
    /// item list with the result reversed into oldest-first order.
    ///
    /// The outcome is also returned; a failure is recorded in state either way.
    pub async fn load(&self, search_term: &str) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.update_state(|state| {
            state.is_loading = true;
            state.error = None;
            state.search_term = search_term.to_string();
        })
        .await;

        let term = (!search_term.is_empty()).then_some(search_term);
        let result = self.gateway.get_items(term).await;

        let snapshot = {
            let mut state = self.state.write().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, term = search_term, "Discarding stale load result");
                return result.map(|_| ());
            }

            match &result {
                Ok(items) => {
                    state.items = items.iter().rev().cloned().collect();
                    info!(count = state.items.len(), term = search_term, "Catalog loaded");
                }
                Err(err) => {
                    warn!(error = %err, term = search_term, "Catalog load failed");
                    state.error = Some(err.to_string());
                }
            }
            state.is_loading = false;
            state.clone()
        };

        if let Err(err) = &result {
            self.emitter.emit_error(&err.to_string());
        }
        self.emitter.emit_state(&snapshot);

        result.map(|_| ())
    }

    /// Reloads with the active search term.
    pub async fn reload(&self) -> ClientResult<()> {
        let term = self.search_term().await;
        self.load(&term).await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates an item, then reloads the list.
    pub async fn create(&self, form: &FormInput) -> ClientResult<Item> {
        self.begin_submit().await;
        let result = self.gateway.create_item(form).await;
        self.finish(result, |state| state.is_submitting = false).await
    }

    /// Updates item `id`, then reloads the list.
    pub async fn update(&self, id: &str, form: &FormInput) -> ClientResult<Item> {
        self.begin_submit().await;
        let result = self.gateway.update_item(id, form).await;
        self.finish(result, |state| state.is_submitting = false).await
    }

    /// Deletes item `id`, then reloads the list.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.update_state(|state| {
            state.is_deleting = true;
            state.error = None;
        })
        .await;
        let result = self.gateway.delete_item(id).await;
        self.finish(result, |state| state.is_deleting = false).await
    }

    async fn begin_submit(&self) {
        self.update_state(|state| {
            state.is_submitting = true;
            state.error = None;
        })
        .await;
    }

    /// Reloads after a successful mutation or records the failure, then
    /// clears the busy flag.
    async fn finish<T>(
        &self,
        result: ClientResult<T>,
        clear: impl FnOnce(&mut StoreState),
    ) -> ClientResult<T> {
        match result {
            Ok(value) => {
                // A failed reload is already recorded in state.
                let _ = self.reload().await;
                self.update_state(clear).await;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "Catalog mutation failed");
                self.record_failure(err.to_string(), clear).await;
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
