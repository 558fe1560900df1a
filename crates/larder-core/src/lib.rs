//! # larder-core: Pure Catalog Logic for Larder
//!
//! This crate holds every piece of the food catalog that can be expressed
//! without I/O: the canonical item model, the normalizer that tames the
//! remote collection's inconsistent records, form validation, and
//! client-side pagination.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Larder Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (larder CLI, web UI)               │   │
//! │  │     Search box ──► Item list ──► Add/Edit form ──► Delete       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          larder-sync (Store, Search Controller, Gateway)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ larder-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ normalize │  │ validation│  │pagination │  │   │
//! │  │   │   Item    │  │  to_item  │  │ FormInput │  │ Paginator │  │   │
//! │  │   │ RawRecord │  │ to_payload│  │  checks   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item, Restaurant, FormInput, RawRecord, WritePayload
//! - [`normalize`] - Raw record → Item, FormInput → WritePayload
//! - [`validation`] - Field presence/format checks for the add/edit form
//! - [`pagination`] - "Load more" slicing of the item list
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use larder_core::normalize::to_item;
//! use larder_core::RawRecord;
//!
//! let raw = RawRecord::from_value(serde_json::json!({
//!     "id": "1",
//!     "name": "Pizza",
//!     "rating": "4",
//!     "Price": "$9"
//! }));
//!
//! let item = to_item(&raw);
//! assert_eq!(item.rating, 4.0);
//! assert_eq!(item.price, "9");
//! assert!(item.restaurant.is_none());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod normalize;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{FormErrors, FormField, ValidationError};
pub use normalize::{to_item, to_payload};
pub use pagination::Paginator;
pub use types::*;
pub use validation::validate_form;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display name used when a remote record carries no usable name.
pub const UNNAMED_FOOD: &str = "Unnamed Food";

/// Restaurant name used when a logo resolves but no name does.
pub const UNNAMED_RESTAURANT: &str = "Unnamed Restaurant";

/// Form value for an open restaurant.
pub const FORM_STATUS_OPEN: &str = "Open Now";

/// Form value for a closed restaurant.
pub const FORM_STATUS_CLOSED: &str = "Closed";

/// Number of items revealed per "load more" step.
pub const ITEMS_PER_PAGE: usize = 8;

/// Inclusive lower bound for a submitted rating.
pub const MIN_RATING: f64 = 1.0;

/// Inclusive upper bound for a submitted rating.
pub const MAX_RATING: f64 = 5.0;
