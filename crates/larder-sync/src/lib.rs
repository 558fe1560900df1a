//! # larder-sync: Remote Gateway & Synchronization Store for Larder
//!
//! This crate owns every network round trip and all mutable client state.
//! Presentation layers hold a [`CatalogStore`], feed search text through a
//! [`SearchHandle`], and render [`StoreState`] snapshots.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Client Data Flow                          │
//! │                                                                         │
//! │   keystrokes                                                           │
//! │       │                                                                │
//! │       ▼                                                                │
//! │  ┌────────────────┐  debounced   ┌────────────────┐                   │
//! │  │SearchController│─────────────►│  CatalogStore  │◄── create/update/ │
//! │  │ one timer slot │  load(term)  │                │    delete         │
//! │  └────────────────┘              │ items          │                   │
//! │                                  │ is_loading     │──► StoreEvent-    │
//! │                                  │ error          │    Emitter        │
//! │                                  └───────┬────────┘                   │
//! │                                          │                             │
//! │                                          ▼                             │
//! │                                  ┌────────────────┐                   │
//! │                                  │  FoodGateway   │                   │
//! │                                  │  (HttpGateway) │                   │
//! │                                  └───────┬────────┘                   │
//! │                                          │ GET/POST/PUT/DELETE         │
//! │                                          ▼                             │
//! │                                   remote /Food collection              │
//! │                                                                         │
//! │  Every mutation is followed by a full reload with the active term.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Client configuration (API URL, debounce window, page size)
//! - [`error`] - Client error types
//! - [`gateway`] - `FoodGateway` trait and its HTTP implementation
//! - [`store`] - `CatalogStore` state and operations
//! - [`search`] - Debounced search controller
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use larder_sync::{CatalogStore, ClientConfig, HttpGateway, SearchController};
//!
//! let config = ClientConfig::load(None)?;
//! let gateway = Arc::new(HttpGateway::from_config(&config)?);
//! let store = CatalogStore::new(gateway);
//!
//! store.load("").await?;
//! let search = SearchController::new(store.clone(), config.debounce()).start();
//! search.input("pizza").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod gateway;
pub mod search;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, ClientConfig, DisplaySettings, SearchSettings};
pub use error::{ClientError, ClientResult};
pub use gateway::{FoodGateway, HttpGateway};
pub use search::{SearchController, SearchHandle};
pub use store::{CatalogStore, NoOpEmitter, StoreEventEmitter, StoreState};
