//! # Validation Module
//!
//! Field presence and format checks for the add/edit form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  └── THIS MODULE: validate_form() before submitting                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Normalizer                                                   │
//! │  └── to_payload() coerces, never rejects                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote collection                                            │
//! │  └── Non-2xx response → CreateError / UpdateError                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The Store does not call this module; deciding whether a form may be
//! submitted is the caller's job.
//!
//! ## Usage
//! ```rust
//! use larder_core::{validate_form, FormField, FormInput};
//!
//! let errors = validate_form(&FormInput::default()).unwrap_err();
//! assert_eq!(
//!     errors.get(FormField::FoodName).unwrap().to_string(),
//!     "Food Name is required"
//! );
//! ```

use url::Url;

use crate::error::{FormErrors, FormField, ValidationError};
use crate::normalize::coerce_number;
use crate::types::FormInput;
use crate::{FORM_STATUS_CLOSED, FORM_STATUS_OPEN, MAX_RATING, MIN_RATING};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates every field of `form`, collecting one error per failing field.
pub fn validate_form(form: &FormInput) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    let checks = [
        (FormField::FoodName, validate_required(FormField::FoodName, &form.food_name)),
        (FormField::FoodImage, validate_url(FormField::FoodImage, &form.food_image)),
        (FormField::FoodRating, validate_rating(&form.food_rating).map(|_| ())),
        (FormField::Price, validate_price(&form.price)),
        (
            FormField::RestaurantName,
            validate_required(FormField::RestaurantName, &form.restaurant_name),
        ),
        (
            FormField::RestaurantLogo,
            validate_url(FormField::RestaurantLogo, &form.restaurant_logo),
        ),
        (
            FormField::RestaurantStatus,
            validate_status(&form.restaurant_status),
        ),
    ];

    for (field, result) in checks {
        if let Err(e) = result {
            errors.insert(field, e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Rejects blank (empty or whitespace-only) values.
pub fn validate_required(field: FormField, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.label().to_string(),
        });
    }
    Ok(())
}

/// Requires a value that parses as an absolute URL.
pub fn validate_url(field: FormField, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;

    Url::parse(value).map_err(|_| ValidationError::InvalidUrl {
        field: field.label().to_string(),
    })?;

    Ok(())
}

/// Requires a number within [`MIN_RATING`]..=[`MAX_RATING`].
///
/// ## Rules
/// ```text
/// ""      → "Food Rating must be a number"
/// "abc"   → "Food Rating must be a number"
/// "7"     → "Rating is outside 1-5 range"
/// "4.5"   → OK
/// ```
pub fn validate_rating(value: &str) -> ValidationResult<f64> {
    let not_a_number = || ValidationError::NotANumber {
        field: FormField::FoodRating.label().to_string(),
    };

    if value.trim().is_empty() {
        return Err(not_a_number());
    }

    let rating = coerce_number(value).ok_or_else(not_a_number)?;

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "Rating".to_string(),
            min: MIN_RATING as i64,
            max: MAX_RATING as i64,
        });
    }

    Ok(rating)
}

/// Requires a numeric price. A currency symbol is not accepted here.
pub fn validate_price(value: &str) -> ValidationResult<()> {
    validate_required(FormField::Price, value)?;

    if coerce_number(value).is_none() {
        return Err(ValidationError::NotANumber {
            field: FormField::Price.label().to_string(),
        });
    }

    Ok(())
}

/// Requires one of the two form status values.
pub fn validate_status(value: &str) -> ValidationResult<()> {
    if value == FORM_STATUS_OPEN || value == FORM_STATUS_CLOSED {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: FormField::RestaurantStatus.label().to_string(),
        allowed: vec![FORM_STATUS_OPEN.to_string(), FORM_STATUS_CLOSED.to_string()],
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormInput {
        FormInput {
            food_name: "Margherita".into(),
            food_image: "https://img.example/margherita.png".into(),
            food_rating: "4.5".into(),
            price: "12.99".into(),
            restaurant_name: "Luigi's".into(),
            restaurant_logo: "https://img.example/luigi.png".into(),
            restaurant_status: "Open Now".into(),
        }
    }

    fn message(errors: &FormErrors, field: FormField) -> Option<String> {
        errors.get(field).map(ToString::to_string)
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_blank_form_reports_every_required_field() {
        let errors = validate_form(&FormInput::default()).unwrap_err();
        assert_eq!(message(&errors, FormField::FoodName).unwrap(), "Food Name is required");
        assert_eq!(
            message(&errors, FormField::FoodImage).unwrap(),
            "Food Image URL is required"
        );
        assert_eq!(
            message(&errors, FormField::FoodRating).unwrap(),
            "Food Rating must be a number"
        );
        assert_eq!(message(&errors, FormField::Price).unwrap(), "Price is required");
        assert_eq!(
            message(&errors, FormField::RestaurantName).unwrap(),
            "Restaurant Name is required"
        );
        assert_eq!(
            message(&errors, FormField::RestaurantLogo).unwrap(),
            "Restaurant Logo URL is required"
        );
        // The blank form defaults to "Open Now".
        assert!(errors.get(FormField::RestaurantStatus).is_none());
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_whitespace_name_is_blank() {
        let mut form = valid_form();
        form.food_name = "   ".into();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(FormField::FoodName).is_some());
    }

    #[test]
    fn test_invalid_urls() {
        let mut form = valid_form();
        form.food_image = "not a url".into();
        form.restaurant_logo = "/relative/logo.png".into();
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(message(&errors, FormField::FoodImage).unwrap(), "Image URL is invalid");
        assert_eq!(
            message(&errors, FormField::RestaurantLogo).unwrap(),
            "Image URL is invalid"
        );
    }

    #[test]
    fn test_rating_rules() {
        assert!(validate_rating("1").is_ok());
        assert!(validate_rating("5").is_ok());
        assert_eq!(validate_rating("3.5").unwrap(), 3.5);
        assert_eq!(
            validate_rating("0.5").unwrap_err().to_string(),
            "Rating is outside 1-5 range"
        );
        assert_eq!(
            validate_rating("7").unwrap_err().to_string(),
            "Rating is outside 1-5 range"
        );
        assert_eq!(
            validate_rating("great").unwrap_err().to_string(),
            "Food Rating must be a number"
        );
    }

    #[test]
    fn test_price_rules() {
        assert!(validate_price("9").is_ok());
        assert!(validate_price("12.99").is_ok());
        assert_eq!(
            validate_price("$9").unwrap_err().to_string(),
            "Price must be a number"
        );
        assert_eq!(validate_price(" ").unwrap_err().to_string(), "Price is required");
    }

    #[test]
    fn test_status_must_be_form_value() {
        assert!(validate_status("Open Now").is_ok());
        assert!(validate_status("Closed").is_ok());
        assert_eq!(
            validate_status("Open").unwrap_err().to_string(),
            "Restaurant Status must be 'Open Now' or 'Closed'"
        );
    }
}
