//! # storeline-db: Data Access Gateway for Storeline
//!
//! This crate is the only path from the application to persistent state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storeline Data Flow                              │
//! │                                                                         │
//! │  Menu choice (e.g. "3. Place a Order")                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storeline-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Statement   │  │   │
//! │  │   │   (pool.rs)   │    │ (users, ...)  │    │  Table       │  │   │
//! │  │   │               │    │               │    │  UnitOfWork  │  │   │
//! │  │   │ execute_write │◄───│ OrderRepo     │───►│              │  │   │
//! │  │   │ query_rows    │    │ ProductRepo   │    │  $1..$n      │  │   │
//! │  │   │ commit        │    │ StoreRepo     │    │  text rows   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          PostgreSQL (production) / SQLite (dev + tests)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection configuration and the gateway operations
//! - [`statement`] - Parameterized statements and text result tables
//! - [`unit_of_work`] - Multi-statement writes committed all-or-nothing
//! - [`schema`] - Bootstrap DDL for a local SQLite store
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (users, stores, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storeline_db::{Database, DbConfig};
//!
//! let config = DbConfig::postgres("localhost", 5432, "retail", "alice", "")?;
//! let db = Database::new(config).await?;
//!
//! let stores = db.stores().locations().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;
pub mod statement;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Backend, Database, DbConfig};
pub use schema::create_sqlite_schema;
pub use statement::{placeholders, Row, SqlValue, Statement, Table};
pub use unit_of_work::UnitOfWork;

// Repository re-exports for convenience
pub use repository::order::{CustomerOrderCount, NewOrder, OrderRepository, StockGuard};
pub use repository::product::ProductRepository;
pub use repository::product_update::ProductUpdateRepository;
pub use repository::store::StoreRepository;
pub use repository::supply::{NewSupplyRequest, SupplyRequestRepository};
pub use repository::user::{StoredUser, UserRecord, UserRepository};
