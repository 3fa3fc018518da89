//! # Validation Module
//!
//! Input validation for values typed at the console, checked before any
//! statement reaches the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal (apps/cli)                                          │
//! │  └── Type parsing: non-numeric input is reprompted                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules: lengths, ranges, positivity                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storeline_core::validation::{validate_units, validate_user_name};
//!
//! assert!(validate_user_name("alice").is_ok());
//! assert!(validate_units(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_COORDINATE, MAX_PRODUCT_NAME_LEN, MAX_UNITS, MAX_USER_NAME_LEN, MIN_COORDINATE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a user name: non-empty, at most 50 characters.
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_USER_NAME_LEN)
}

/// Validates a password: non-empty. Length and content are not restricted.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

/// Validates a product name: non-empty, at most 30 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("product name", name, MAX_PRODUCT_NAME_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a latitude or longitude on the 0..=100 grid.
pub fn validate_coordinate(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || !(MIN_COORDINATE..=MAX_COORDINATE).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: MIN_COORDINATE,
            max: MAX_COORDINATE,
        });
    }
    Ok(())
}

fn check_unit_ceiling(field: &str, units: i64, min: i64) -> ValidationResult<()> {
    if units > MAX_UNITS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: min as f64,
            max: MAX_UNITS as f64,
        });
    }
    Ok(())
}

/// Validates a unit count for an order or supply request (1..=MAX_UNITS).
pub fn validate_units(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "units".to_string(),
        });
    }
    check_unit_ceiling("units", units, 1)
}

/// Validates an absolute stock level set by a manager or admin (0..=MAX_UNITS).
pub fn validate_stock_level(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "number of units".to_string(),
        });
    }
    check_unit_ceiling("number of units", units, 0)
}

/// Validates a price per unit (finite, >= 0).
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price per unit".to_string(),
        });
    }
    Ok(())
}
