//! # storeline-core: Pure Domain Logic for Storeline
//!
//! This crate holds everything the retail-ordering console decides without
//! touching a database or a terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storeline Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (Menu Driver)                       │   │
//! │  │    Log in ──► Customer menu ──► Manager menu ──► Admin menu     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storeline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  session  │  │    geo    │  │ validation│  │   │
//! │  │   │   Role    │  │  Session  │  │ distance  │  │   rules   │  │   │
//! │  │   │ Identity  │  │  gating   │  │  radius   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CONSOLE • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storeline-db (Data Access Gateway)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Role, Identity, Coordinates, ProductChange)
//! - [`session`] - The explicit session value passed into every operation
//! - [`geo`] - Planar distance and the nearby-store radius filter
//! - [`credentials`] - Credential-check seam for log-in and account writes
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storeline_core::geo::{distance, within_radius};
//! use storeline_core::Coordinates;
//!
//! let home = Coordinates::new(10.0, 10.0);
//! let store = Coordinates::new(10.0, 40.0);
//!
//! assert_eq!(distance(10.0, 10.0, 10.0, 40.0), 30.0);
//! assert!(within_radius(home, store, 30.0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credentials;
pub mod error;
pub mod geo;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use credentials::{CredentialCheck, PlaintextCredentials};
pub use error::{CoreError, CoreResult, ValidationError};
pub use session::Session;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Radius (in coordinate units) within which a store counts as "nearby".
pub const DEFAULT_NEARBY_RADIUS: f64 = 30.0;

/// Number of rows shown by the "recent" reports (orders, product updates).
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// Number of rows shown by the "popular" reports (products, customers).
pub const DEFAULT_POPULAR_LIMIT: u32 = 5;

/// Longest accepted user name.
pub const MAX_USER_NAME_LEN: usize = 50;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 30;

/// Coordinates are entered on a 0..=100 grid.
pub const MIN_COORDINATE: f64 = 0.0;

/// Upper bound of the coordinate grid.
pub const MAX_COORDINATE: f64 = 100.0;

/// Largest unit count accepted for an order, a supply request or a stock
/// level. Keeps `numberOfUnits +/- n` inside a 64-bit integer.
pub const MAX_UNITS: i64 = 1_000_000_000;
