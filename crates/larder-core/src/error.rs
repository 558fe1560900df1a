//! # Error Types
//!
//! Domain-specific error types for larder-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  larder-core errors (this file)                                        │
//! │  ├── ValidationError  - One field of the add/edit form is unusable     │
//! │  └── FormErrors       - Every failing field, keyed by FormField        │
//! │                                                                         │
//! │  larder-sync errors (separate crate)                                   │
//! │  └── ClientError      - Config, gateway and controller failures        │
//! │                                                                         │
//! │  Flow: ValidationError → FormErrors → ClientError → Store.error        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The normalizer has no error type: it is total and never fails.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

// =============================================================================
// Form Field
// =============================================================================

/// The seven fields of the add/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FoodName,
    FoodImage,
    FoodRating,
    Price,
    RestaurantName,
    RestaurantLogo,
    RestaurantStatus,
}

impl FormField {
    /// The form key, as used by [`crate::FormInput`].
    pub const fn key(&self) -> &'static str {
        match self {
            FormField::FoodName => "food_name",
            FormField::FoodImage => "food_image",
            FormField::FoodRating => "food_rating",
            FormField::Price => "price",
            FormField::RestaurantName => "restaurant_name",
            FormField::RestaurantLogo => "restaurant_logo",
            FormField::RestaurantStatus => "restaurant_status",
        }
    }

    /// Human-readable label used in error messages.
    pub const fn label(&self) -> &'static str {
        match self {
            FormField::FoodName => "Food Name",
            FormField::FoodImage => "Food Image URL",
            FormField::FoodRating => "Food Rating",
            FormField::Price => "Price",
            FormField::RestaurantName => "Restaurant Name",
            FormField::RestaurantLogo => "Restaurant Logo URL",
            FormField::RestaurantStatus => "Restaurant Status",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` holds the display label of the failing field so the message can be
/// shown next to the input as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field must parse as a number.
    #[error("{field} must be a number")]
    NotANumber { field: String },

    /// Numeric value is outside the accepted range.
    #[error("{field} is outside {min}-{max} range")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Field must be an absolute URL.
    #[error("Image URL is invalid")]
    InvalidUrl { field: String },

    /// Value is not in the allowed set.
    #[error("{field} must be {}", quote_alternatives(.allowed))]
    NotAllowed { field: String, allowed: Vec<String> },
}

fn quote_alternatives(allowed: &[String]) -> String {
    allowed
        .iter()
        .map(|a| format!("'{a}'"))
        .collect::<Vec<_>>()
        .join(" or ")
}

// =============================================================================
// Form Errors
// =============================================================================

/// Every failing field of a form, at most one error per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<FormField, ValidationError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`, keeping the first one reported.
    pub fn insert(&mut self, field: FormField, error: ValidationError) {
        self.errors.entry(field).or_insert(error);
    }

    pub fn get(&self, field: FormField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &ValidationError)> {
        self.errors.iter().map(|(f, e)| (*f, e))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.values().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Food Name".to_string(),
        };
        assert_eq!(err.to_string(), "Food Name is required");

        let err = ValidationError::OutOfRange {
            field: "Rating".to_string(),
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "Rating is outside 1-5 range");

        let err = ValidationError::NotAllowed {
            field: "Restaurant Status".to_string(),
            allowed: vec!["Open Now".to_string(), "Closed".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Restaurant Status must be 'Open Now' or 'Closed'"
        );
    }

    #[test]
    fn test_form_errors_keep_first_error_per_field() {
        let mut errors = FormErrors::new();
        errors.insert(
            FormField::Price,
            ValidationError::Required {
                field: "Price".into(),
            },
        );
        errors.insert(
            FormField::Price,
            ValidationError::NotANumber {
                field: "Price".into(),
            },
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Price).map(ToString::to_string),
            Some("Price is required".to_string())
        );
    }

    #[test]
    fn test_form_errors_display_in_form_order() {
        let mut errors = FormErrors::new();
        errors.insert(
            FormField::Price,
            ValidationError::Required {
                field: "Price".into(),
            },
        );
        errors.insert(
            FormField::FoodName,
            ValidationError::Required {
                field: "Food Name".into(),
            },
        );
        assert_eq!(
            errors.to_string(),
            "Food Name is required; Price is required"
        );
    }
}
