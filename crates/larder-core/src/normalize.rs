//! # Normalizer
//!
//! Bridges the untyped, inconsistently-shaped records of the remote
//! collection and the canonical [`Item`], and turns form input into the
//! collection's write schema.
//!
//! ## Fallback Chains
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RawRecord → Item resolution                          │
//! │                                                                         │
//! │  name    : name ─────────────────────────────────► "Unnamed Food"      │
//! │  image   : image ──► avatar ─────────────────────► ""                  │
//! │  rating  : parseFloat(rating) ───────────────────► 0.0                 │
//! │  price   : Price ──► price ──────────────────────► "0"   (strip "$")   │
//! │                                                                         │
//! │  restaurant.logo   : restaurant.logo ──► restaurant_logo ──► logo      │
//! │  restaurant.name   : restaurant.name ──► restaurant_name               │
//! │                      ────────────────────────────► "Unnamed Restaurant"│
//! │  restaurant.status : restaurant.status ──► status ──► restaurant_status│
//! │                      "Open Now" | "Open" ──► Open                      │
//! │                      otherwise open == true ──► Open, else Closed      │
//! │                                                                         │
//! │  No logo resolved  ══►  restaurant = None (name/status ignored)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A link in a chain is taken when it is "truthy": a non-empty string, a
//! non-zero number, or `true`. `Price`/`price` are the exception: they are
//! taken whenever they are present and not `null`, so an explicit `""`
//! price survives as an empty string.
//!
//! Both directions are total functions. Missing or malformed fields fall
//! through to defaults; nothing here returns an error.

use serde_json::Value;

use crate::types::{
    FormInput, Item, PayloadRestaurant, RawRecord, Restaurant, RestaurantStatus, WritePayload,
};
use crate::{UNNAMED_FOOD, UNNAMED_RESTAURANT};

// =============================================================================
// Raw Record → Item
// =============================================================================

/// Converts a raw remote record into a canonical [`Item`]. Never fails.
///
/// ## Example
/// ```rust
/// use larder_core::{normalize::to_item, RawRecord, RestaurantStatus};
///
/// let raw = RawRecord::from_value(serde_json::json!({
///     "id": "12",
///     "name": "Tacos",
///     "rating": 4.2,
///     "price": "$7.50",
///     "restaurant_logo": "https://img.example/taco.png",
///     "open": true
/// }));
///
/// let item = to_item(&raw);
/// assert_eq!(item.price, "7.50");
/// let restaurant = item.restaurant.unwrap();
/// assert_eq!(restaurant.name, "Unnamed Restaurant");
/// assert_eq!(restaurant.status, RestaurantStatus::Open);
/// ```
pub fn to_item(raw: &RawRecord) -> Item {
    Item {
        id: raw.id.as_ref().and_then(scalar_text).unwrap_or_default(),
        created_at: raw
            .created_at
            .as_ref()
            .and_then(scalar_text)
            .unwrap_or_default(),
        name: first_truthy([raw.name.as_ref()]).unwrap_or_else(|| UNNAMED_FOOD.to_string()),
        image: first_truthy([raw.image.as_ref(), raw.avatar.as_ref()]).unwrap_or_default(),
        rating: resolve_rating(raw.rating.as_ref()),
        price: resolve_price(raw),
        restaurant: resolve_restaurant(raw),
    }
}

/// Resolves the rating with `parseFloat` semantics; anything unusable is `0.0`.
fn resolve_rating(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float_prefix(s),
        _ => None,
    };

    match parsed {
        Some(r) if r.is_finite() => r,
        _ => 0.0,
    }
}

fn resolve_price(raw: &RawRecord) -> String {
    let text = [raw.price_capitalized.as_ref(), raw.price.as_ref()]
        .into_iter()
        .flatten()
        .find_map(scalar_text)
        .unwrap_or_else(|| "0".to_string());

    match text.strip_prefix('$') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

fn resolve_restaurant(raw: &RawRecord) -> Option<Restaurant> {
    let logo = first_truthy([
        raw.restaurant_field("logo"),
        raw.restaurant_logo.as_ref(),
        raw.logo.as_ref(),
    ])?;

    let name = first_truthy([raw.restaurant_field("name"), raw.restaurant_name.as_ref()])
        .unwrap_or_else(|| UNNAMED_RESTAURANT.to_string());

    Some(Restaurant {
        name,
        logo,
        status: resolve_status(raw),
    })
}

fn resolve_status(raw: &RawRecord) -> RestaurantStatus {
    let status = first_truthy([
        raw.restaurant_field("status"),
        raw.status.as_ref(),
        raw.restaurant_status.as_ref(),
    ]);

    if matches!(status.as_deref(), Some("Open Now") | Some("Open")) {
        return RestaurantStatus::Open;
    }

    if raw.open == Some(Value::Bool(true)) {
        return RestaurantStatus::Open;
    }

    RestaurantStatus::Closed
}

// =============================================================================
// Form Input → Write Payload
// =============================================================================

/// Maps form input onto the remote write schema. No validation is done here.
///
/// `food_rating` is coerced like JavaScript's `Number()`: blank becomes `0`,
/// unparseable text becomes `None` (sent as `null`).
pub fn to_payload(form: &FormInput) -> WritePayload {
    WritePayload {
        name: form.food_name.clone(),
        image: form.food_image.clone(),
        rating: coerce_number(&form.food_rating),
        price: form.price.clone(),
        restaurant: PayloadRestaurant {
            name: form.restaurant_name.clone(),
            logo: form.restaurant_logo.clone(),
            status: form.restaurant_status.clone(),
        },
    }
}

// =============================================================================
// Value Helpers
// =============================================================================

/// Renders a scalar JSON value as text. `null`, arrays and objects yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integral floats print without a fractional part (`12.0` → `"12"`).
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    } else {
        n.to_string()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Bool(b) => *b,
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text of the first truthy value in the chain.
fn first_truthy<'a, const N: usize>(chain: [Option<&'a Value>; N]) -> Option<String> {
    chain
        .into_iter()
        .flatten()
        .find(|v| is_truthy(v))
        .and_then(scalar_text)
}

/// Parses the longest numeric prefix of `text`, as JavaScript's `parseFloat`.
///
/// Leading whitespace is skipped; `"4.5 stars"` gives `4.5`, `"abc"` gives
/// `None`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        let rest = &s[int_start..];
        if rest.starts_with("Infinity") {
            return Some(if s.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Coerces text like JavaScript's `Number()`: whole-string, blank is zero,
/// non-finite results are rejected.
///
/// Unsigned `0x`/`0b`/`0o` literals are read in their radix, so `"0x10"` is 16.
pub fn coerce_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    if let Some(n) = radix_literal(trimmed) {
        return n;
    }

    // Rust accepts "inf"/"nan" spellings that Number() does not.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `Some(parsed)` when `text` carries a radix prefix, `None` otherwise.
fn radix_literal(text: &str) -> Option<Option<f64>> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0b" | "0B" => 2,
        "0o" | "0O" => 8,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }
    Some(digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================
