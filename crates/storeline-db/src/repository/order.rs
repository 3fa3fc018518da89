//! # Order Repository
//!
//! Order placement and order history.
//!
//! ## Placing an Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UnitOfWork (one transaction)                                           │
//! │                                                                         │
//! │  1. UPDATE Product SET numberOfUnits = numberOfUnits - n               │
//! │       WHERE storeID = $s AND productName = $p [AND numberOfUnits >= n] │
//! │       └── must touch exactly one row                                   │
//! │  2. INSERT INTO Orders (..., orderTime) VALUES (..., CURRENT_TIMESTAMP)│
//! │                                                                         │
//! │  then currval('orders_ordernumber_seq') → order number                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bracketed predicate is added for [`StockGuard::RequireStock`].
//! Without it stock may go negative.

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::statement::{Statement, Table};
use crate::unit_of_work::UnitOfWork;

/// Sequence behind `Orders.orderNumber`.
pub const ORDER_NUMBER_SEQUENCE: &str = "orders_ordernumber_seq";

/// Whether an order may take stock below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockGuard {
    AllowNegative,
    RequireStock,
}

/// An order about to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder<'a> {
    pub customer_id: i64,
    pub store_id: i64,
    pub product_name: &'a str,
    pub units: i64,
}

/// Per-customer order counts for one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerOrderCount {
    pub customer_id: i64,
    pub orders: i64,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: Database,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(db: Database) -> Self {
        OrderRepository { db }
    }

    /// Decrements stock and records the order, all-or-nothing.
    ///
    /// ## Returns
    /// * `Ok(Some(n))` - Order number
    /// * `Ok(None)` - Committed, number not readable
    /// * `Err(DbError::NotFound)` - No such product, or (with
    ///   `RequireStock`) not enough units; nothing written
    pub async fn place(&self, order: &NewOrder<'_>, guard: StockGuard) -> DbResult<Option<i64>> {
        debug!(
            customer_id = order.customer_id,
            store_id = order.store_id,
            product = %order.product_name,
            units = order.units,
            ?guard,
            "Placing order"
        );

        let (decrement, entity) = match guard {
            StockGuard::AllowNegative => (
                Statement::new(
                    "UPDATE Product SET numberOfUnits = numberOfUnits - $1 \
                     WHERE storeID = $2 AND productName = $3",
                )
                .bind(order.units)
                .bind(order.store_id)
                .bind(order.product_name),
                "Product",
            ),
            StockGuard::RequireStock => (
                Statement::new(
                    "UPDATE Product SET numberOfUnits = numberOfUnits - $1 \
                     WHERE storeID = $2 AND productName = $3 AND numberOfUnits >= $4",
                )
                .bind(order.units)
                .bind(order.store_id)
                .bind(order.product_name)
                .bind(order.units),
                "Product (in stock)",
            ),
        };

        let insert = Statement::new(
            "INSERT INTO Orders (customerID, storeID, productName, unitsOrdered, orderTime) \
             VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP)",
        )
        .bind(order.customer_id)
        .bind(order.store_id)
        .bind(order.product_name)
        .bind(order.units);

        let work = UnitOfWork::new()
            .write_one(
                decrement,
                entity,
                format!("{}/{}", order.store_id, order.product_name),
            )
            .write(insert);

        self.db.commit(work).await?;
        self.db.current_sequence_value(ORDER_NUMBER_SEQUENCE).await
    }

    /// Most recent orders of one customer, newest first.
    pub async fn recent_for_customer(&self, customer_id: i64, limit: u32) -> DbResult<Table> {
        let stmt = Statement::new(
            "SELECT orderNumber, storeID, productName, unitsOrdered, \
             CAST(orderTime AS TEXT) AS orderTime FROM Orders WHERE customerID = $1 \
             ORDER BY orderTime DESC, orderNumber DESC LIMIT $2",
        )
        .bind(customer_id)
        .bind(limit);
        self.db.execute_query_rows(&stmt).await
    }

    /// Every order of one store with the customer's name, newest first.
    pub async fn for_store(&self, store_id: i64) -> DbResult<Table> {
        let stmt = Statement::new(
            "SELECT O.orderNumber, U.name, O.storeID, O.productName, \
             CAST(O.orderTime AS TEXT) AS orderTime \
             FROM Orders O JOIN Users U ON O.customerID = U.userID \
             WHERE O.storeID = $1 ORDER BY O.orderTime DESC, O.orderNumber DESC",
        )
        .bind(store_id);
        self.db.execute_query_rows(&stmt).await
    }

    /// Customers with the most orders at one store, highest count first.
    /// Ties are broken by customerID.
    pub async fn top_customers(
        &self,
        store_id: i64,
        limit: u32,
    ) -> DbResult<Vec<CustomerOrderCount>> {
        let stmt = Statement::new(
            "SELECT customerID, COUNT(*) AS orderCount FROM Orders WHERE storeID = $1 \
             GROUP BY customerID ORDER BY orderCount DESC, customerID LIMIT $2",
        )
        .bind(store_id)
        .bind(limit);

        self.db
            .execute_query_rows(&stmt)
            .await?
            .rows()
            .iter()
            .map(|row| -> DbResult<CustomerOrderCount> {
                Ok(CustomerOrderCount {
                    customer_id: row.parse(0)?,
                    orders: row.parse(1)?,
                })
            })
            .collect()
    }
}
