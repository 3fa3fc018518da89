//! # Repository Module
//!
//! Every SQL statement the application issues lives in one of these
//! repositories. Each one holds a [`Database`](crate::Database) handle and
//! talks to the store only through its gateway operations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation (apps/cli)                                                  │
//! │       │                                                                 │
//! │       │  db.orders().place(&order, guard)                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── builds Statement / UnitOfWork with $n parameters                  │
//! │  └── Database::commit / execute_query_rows / ...                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PostgreSQL / SQLite                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Accounts, credentials lookup, admin edits
//! - [`store::StoreRepository`] - Store locations and ownership
//! - [`product::ProductRepository`] - Per-store stock and prices
//! - [`order::OrderRepository`] - Order placement and order history
//! - [`product_update::ProductUpdateRepository`] - Manager edits + audit rows
//! - [`supply::SupplyRequestRepository`] - Warehouses and restock requests

pub mod order;
pub mod product;
pub mod product_update;
pub mod store;
pub mod supply;
pub mod user;

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixture for repository tests.

    use crate::pool::{Database, DbConfig};
    use crate::schema::create_sqlite_schema;
    use crate::statement::Statement;

    /// In-memory store with a small, fixed data set.
    ///
    /// ```text
    /// Users:     1 alice (customer, 10,10)   2 mona (manager)
    ///            3 root (admin)              4 carl (customer)
    ///            5 nina (manager)
    /// Store:     1 North (10,40) mona        2 East (90,90) mona
    ///            3 West (40,10) nina
    /// Product:   (1,Bread,10,2.5) (1,Milk,5,1.25) (2,Bread,7,3) (3,Eggs,12,4)
    /// Warehouse: 1, 2
    /// ```
    pub(crate) async fn fixture() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        create_sqlite_schema(&db).await.unwrap();

        let script = [
            "INSERT INTO Users (name, password, latitude, longitude, type) VALUES
                ('alice', 'pw', 10, 10, 'customer'),
                ('mona', 'pw', 50, 50, 'manager'),
                ('root', 'pw', 0, 0, 'admin'),
                ('carl', 'pw', 12, 10, 'customer'),
                ('nina', 'pw', 60, 60, 'manager')",
            "INSERT INTO Store (storeID, name, latitude, longitude, managerID) VALUES
                (1, 'North', 10, 40, 2),
                (2, 'East', 90, 90, 2),
                (3, 'West', 40, 10, 5)",
            "INSERT INTO Product (storeID, productName, numberOfUnits, pricePerUnit) VALUES
                (1, 'Bread', 10, 2.5),
                (1, 'Milk', 5, 1.25),
                (2, 'Bread', 7, 3),
                (3, 'Eggs', 12, 4)",
            "INSERT INTO Warehouse (WarehouseID, area, latitude, longitude) VALUES
                (1, 500, 30, 30),
                (2, 800, 70, 70)",
        ];
        for sql in script {
            db.execute_write(&Statement::new(sql)).await.unwrap();
        }
        db
    }

    /// Single-value query helper.
    pub(crate) async fn scalar(db: &Database, statement: Statement) -> String {
        let table = db.execute_query_rows(&statement).await.unwrap();
        table.rows()[0].values()[0].clone()
    }
}
