//! # Domain Types
//!
//! Core domain types used throughout Larder.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │   Remote side (untyped)            Local side (canonical)               │
//! │  ┌─────────────────┐   to_item   ┌─────────────────┐                   │
//! │  │   RawRecord     │ ──────────► │      Item       │                   │
//! │  │  every alias as │             │  id, createdAt  │                   │
//! │  │  a JSON value   │             │  name, image    │                   │
//! │  └─────────────────┘             │  rating (f64)   │                   │
//! │                                  │  price (text)   │                   │
//! │  ┌─────────────────┐ to_payload  │  restaurant?    │                   │
//! │  │  WritePayload   │ ◄────────┐  └─────────────────┘                   │
//! │  │  name, Price,   │          │                                         │
//! │  │  restaurant{}   │          │  ┌─────────────────┐                   │
//! │  └─────────────────┘          └─ │    FormInput    │                   │
//! │                                  │  7 raw strings  │                   │
//! │                                  └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` and `createdAt` are assigned by the remote collection and treated as
//! opaque text: never parsed, never generated locally.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::{FORM_STATUS_CLOSED, FORM_STATUS_OPEN};

// =============================================================================
// Restaurant Status
// =============================================================================

/// Whether the restaurant serving an item is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RestaurantStatus {
    Open,
    #[default]
    Closed,
}

impl RestaurantStatus {
    /// The value a form select uses for this status.
    pub const fn form_value(&self) -> &'static str {
        match self {
            RestaurantStatus::Open => FORM_STATUS_OPEN,
            RestaurantStatus::Closed => FORM_STATUS_CLOSED,
        }
    }
}

impl std::fmt::Display for RestaurantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestaurantStatus::Open => write!(f, "Open"),
            RestaurantStatus::Closed => write!(f, "Closed"),
        }
    }
}

// =============================================================================
// Restaurant
// =============================================================================

/// The restaurant an item is served by.
///
/// Only ever built when a logo resolves; a name or status alone never
/// produces a `Restaurant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Restaurant {
    pub name: String,
    pub logo: String,
    pub status: RestaurantStatus,
}

// =============================================================================
// Item
// =============================================================================

/// A food item in canonical, normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Identifier assigned by the remote collection.
    pub id: String,

    /// Creation timestamp as sent by the remote collection (not parsed).
    pub created_at: String,

    /// Display name, never empty.
    pub name: String,

    /// Image URL, empty when the record had none.
    pub image: String,

    /// Rating, always finite.
    pub rating: f64,

    /// Price as display text without a currency symbol.
    pub price: String,

    /// Serving restaurant, present only when a logo was found. Serialized
    /// as `null` otherwise.
    #[serde(default)]
    #[ts(optional = nullable)]
    pub restaurant: Option<Restaurant>,
}

// =============================================================================
// Form Input
// =============================================================================

/// Values of the add/edit form before validation or coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormInput {
    pub food_name: String,
    pub food_image: String,
    pub food_rating: String,
    pub price: String,
    pub restaurant_name: String,
    pub restaurant_logo: String,
    /// One of `"Open Now"` or `"Closed"` once validated.
    pub restaurant_status: String,
}

impl Default for FormInput {
    /// The blank "add a meal" form.
    fn default() -> Self {
        FormInput {
            food_name: String::new(),
            food_image: String::new(),
            food_rating: String::new(),
            price: String::new(),
            restaurant_name: String::new(),
            restaurant_logo: String::new(),
            restaurant_status: FORM_STATUS_OPEN.to_string(),
        }
    }
}

impl FormInput {
    /// Prefills an "edit a meal" form from an existing item.
    ///
    /// ## Example
    /// ```rust
    /// use larder_core::{FormInput, Item};
    ///
    /// let item = Item {
    ///     id: "7".into(),
    ///     created_at: String::new(),
    ///     name: "Ramen".into(),
    ///     image: "https://img.example/ramen.png".into(),
    ///     rating: 4.5,
    ///     price: "12.00".into(),
    ///     restaurant: None,
    /// };
    ///
    /// let form = FormInput::from_item(&item);
    /// assert_eq!(form.food_rating, "4.5");
    /// assert_eq!(form.restaurant_status, "Closed");
    /// ```
    pub fn from_item(item: &Item) -> Self {
        let (restaurant_name, restaurant_logo, status) = match &item.restaurant {
            Some(r) => (r.name.clone(), r.logo.clone(), r.status),
            None => (String::new(), String::new(), RestaurantStatus::Closed),
        };

        FormInput {
            food_name: item.name.clone(),
            food_image: item.image.clone(),
            food_rating: item.rating.to_string(),
            price: item.price.clone(),
            restaurant_name,
            restaurant_logo,
            restaurant_status: status.form_value().to_string(),
        }
    }
}

// =============================================================================
// Write Payload
// =============================================================================

/// Body of a create or update request, in the remote collection's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WritePayload {
    pub name: String,
    pub image: String,
    /// `None` serializes as `null` when the form rating is not a number.
    pub rating: Option<f64>,
    #[serde(rename = "Price")]
    pub price: String,
    pub restaurant: PayloadRestaurant,
}

/// Restaurant block of a [`WritePayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayloadRestaurant {
    pub name: String,
    pub logo: String,
    pub status: String,
}

// =============================================================================
// Raw Record
// =============================================================================

/// A record exactly as the remote collection sent it.
///
/// The collection has been written by several clients over time, so the same
/// fact shows up under different keys and with different JSON types (a
/// rating may be `4`, `"4.5"` or missing; a price may sit under `Price` or
/// `price`). Every known key is kept as an untyped value and resolved by the
/// fallback chains in [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: Option<Value>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<Value>,
    pub name: Option<Value>,
    pub image: Option<Value>,
    pub avatar: Option<Value>,
    pub rating: Option<Value>,
    #[serde(rename = "Price")]
    pub price_capitalized: Option<Value>,
    pub price: Option<Value>,
    /// Nested `{name, logo, status}` object, when present.
    pub restaurant: Option<Value>,
    pub restaurant_name: Option<Value>,
    pub restaurant_logo: Option<Value>,
    pub restaurant_status: Option<Value>,
    pub logo: Option<Value>,
    pub status: Option<Value>,
    pub open: Option<Value>,
}

impl RawRecord {
    /// Builds a record from any JSON value. Never fails: anything that is not
    /// an object yields an empty record.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return RawRecord::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Looks up a key of the nested `restaurant` object.
    pub fn restaurant_field(&self, key: &str) -> Option<&Value> {
        self.restaurant.as_ref().and_then(|r| r.get(key))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_item() -> Item {
        Item {
            id: "1".into(),
            created_at: "2024-06-18T08:00:00.000Z".into(),
            name: "Pizza".into(),
            image: "https://img.example/pizza.png".into(),
            rating: 4.0,
            price: "9".into(),
            restaurant: Some(Restaurant {
                name: "Luigi's".into(),
                logo: "https://img.example/luigi.png".into(),
                status: RestaurantStatus::Open,
            }),
        }
    }

    #[test]
    fn test_raw_record_reads_aliased_keys() {
        let raw = RawRecord::from_value(json!({
            "createdAt": "2024-01-01",
            "Price": "$3",
            "price": 4,
            "restaurant": { "logo": "https://x/l.png" }
        }));
        assert_eq!(raw.created_at, Some(json!("2024-01-01")));
        assert_eq!(raw.price_capitalized, Some(json!("$3")));
        assert_eq!(raw.price, Some(json!(4)));
        assert_eq!(raw.restaurant_field("logo"), Some(&json!("https://x/l.png")));
        assert_eq!(raw.restaurant_field("name"), None);
    }

    #[test]
    fn test_raw_record_from_non_object_is_empty() {
        assert_eq!(RawRecord::from_value(json!(42)), RawRecord::default());
        assert_eq!(RawRecord::from_value(json!(["a"])), RawRecord::default());
        assert_eq!(RawRecord::from_value(Value::Null), RawRecord::default());
    }

    #[test]
    fn test_raw_record_tolerates_non_object_restaurant() {
        let raw = RawRecord::from_value(json!({ "restaurant": "Luigi's" }));
        assert_eq!(raw.restaurant_field("name"), None);
    }

    #[test]
    fn test_item_serializes_missing_restaurant_as_null() {
        let mut item = sample_item();
        item.restaurant = None;
        let mut value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["createdAt"], json!("2024-06-18T08:00:00.000Z"));
        assert_eq!(value.get("restaurant"), Some(&Value::Null));

        value.as_object_mut().unwrap().remove("restaurant");
        let back: Item = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_form_default_is_open_now() {
        let form = FormInput::default();
        assert_eq!(form.restaurant_status, "Open Now");
        assert!(form.food_name.is_empty());
    }

    #[test]
    fn test_form_from_item_with_restaurant() {
        let form = FormInput::from_item(&sample_item());
        assert_eq!(form.food_name, "Pizza");
        assert_eq!(form.food_rating, "4");
        assert_eq!(form.price, "9");
        assert_eq!(form.restaurant_name, "Luigi's");
        assert_eq!(form.restaurant_status, "Open Now");
    }

    #[test]
    fn test_payload_uses_capitalized_price_key() {
        let payload = WritePayload {
            name: "Pizza".into(),
            image: String::new(),
            rating: None,
            price: "9".into(),
            restaurant: PayloadRestaurant {
                name: String::new(),
                logo: String::new(),
                status: "Closed".into(),
            },
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["Price"], json!("9"));
        assert_eq!(value["rating"], Value::Null);
        assert!(value.get("price").is_none());
    }
}
