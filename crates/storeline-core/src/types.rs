//! # Domain Types
//!
//! Core domain types used throughout Storeline.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Role       │   │    Identity     │   │   Coordinates   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Customer       │   │  user_id        │   │  latitude       │       │
//! │  │  Manager        │   │  name           │   │  longitude      │       │
//! │  │  Admin          │   │  role           │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ StoreLocation   │   │ ProductChange   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  store_id       │   │  units: Option  │                             │
//! │  │  coordinates    │   │  price: Option  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows themselves stay in the store; these types only carry what an
//! operation needs between statements.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::geo;

// =============================================================================
// Role
// =============================================================================

/// The role stored in `Users.type`; gates which operations are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses nearby stores and places orders.
    Customer,
    /// Owns stores, edits their products and requests supplies.
    Manager,
    /// Views and edits any user or product.
    Admin,
}

impl Role {
    /// Every role, in menu order.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Manager, Role::Admin];

    /// The lowercase name written to and read from the store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses stored role text.
///
/// Fixed-width `CHAR` columns pad with spaces and seeded data is not
/// consistent about case, so the comparison trims and ignores case.
impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownRole(trimmed.to_string()))
    }
}

// =============================================================================
// Identity
// =============================================================================

/// The authenticated user carried by a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// `Users.userID`
    pub user_id: i64,
    /// Name the user logged in with.
    pub name: String,
    /// Role read at log-in time.
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: i64, name: impl Into<String>, role: Role) -> Self {
        Identity {
            user_id,
            name: name.into(),
            role,
        }
    }
}

// =============================================================================
// Coordinates
// =============================================================================

/// A point on the planar latitude/longitude grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude,
            longitude,
        }
    }

    /// Planar distance to another point. See [`geo::distance`].
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        geo::distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

// =============================================================================
// Store Location
// =============================================================================

/// A store row reduced to what the nearby-store filter needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreLocation {
    pub store_id: i64,
    pub coordinates: Coordinates,
}

// =============================================================================
// Product Change
// =============================================================================

/// The optional edits a manager applies to one product.
///
/// Each field is answered by its own yes/no prompt, so either may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductChange {
    /// New `numberOfUnits`, if the manager chose to update it.
    pub units: Option<i64>,
    /// New `pricePerUnit`, if the manager chose to update it.
    pub price: Option<f64>,
}

impl ProductChange {
    /// True when neither field was chosen; nothing is written in that case.
    pub fn is_empty(&self) -> bool {
        self.units.is_none() && self.price.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("customer", Role::Customer)]
    #[case("Customer", Role::Customer)]
    #[case("manager   ", Role::Manager)]
    #[case(" ADMIN", Role::Admin)]
    fn test_role_parsing(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "cashier".parse::<Role>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownRole(ref r) if r == "cashier"));
    }

    #[test]
    fn test_role_display_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_product_change_is_empty() {
        assert!(ProductChange::default().is_empty());
        assert!(!ProductChange {
            units: None,
            price: Some(2.5)
        }
        .is_empty());
    }
}
