//! # Product Update Repository
//!
//! Manager edits to stock and price, each logged in `ProductUpdates`.
//! The edit and its audit row commit together or not at all.

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::statement::{Statement, Table};
use crate::unit_of_work::UnitOfWork;
use storeline_core::ProductChange;

/// Sequence behind `ProductUpdates.updateNumber`.
pub const UPDATE_NUMBER_SEQUENCE: &str = "productupdates_updatenumber_seq";

/// Repository for audited product edits.
#[derive(Debug, Clone)]
pub struct ProductUpdateRepository {
    db: Database,
}

impl ProductUpdateRepository {
    /// Creates a new ProductUpdateRepository.
    pub fn new(db: Database) -> Self {
        ProductUpdateRepository { db }
    }

    /// Applies `change` to one product and appends one audit row.
    ///
    /// An empty change writes nothing and returns `Ok(None)`.
    ///
    /// ## Returns
    /// * `Ok(Some(n))` - updateNumber of the audit row
    /// * `Err(DbError::NotFound)` - Product missing; nothing written
    pub async fn apply(
        &self,
        manager_id: i64,
        store_id: i64,
        product_name: &str,
        change: ProductChange,
    ) -> DbResult<Option<i64>> {
        if change.is_empty() {
            return Ok(None);
        }
        debug!(manager_id, store_id, product = %product_name, ?change, "Applying product update");

        let key = format!("{store_id}/{product_name}");
        let mut work = UnitOfWork::new();

        if let Some(units) = change.units {
            work = work.write_one(
                Statement::new(
                    "UPDATE Product SET numberOfUnits = $1 WHERE storeID = $2 AND productName = $3",
                )
                .bind(units)
                .bind(store_id)
                .bind(product_name),
                "Product",
                key.clone(),
            );
        }

        if let Some(price) = change.price {
            work = work.write_one(
                Statement::new(
                    "UPDATE Product SET pricePerUnit = $1 WHERE storeID = $2 AND productName = $3",
                )
                .bind(price)
                .bind(store_id)
                .bind(product_name),
                "Product",
                key,
            );
        }

        work = work.write(
            Statement::new(
                "INSERT INTO ProductUpdates (managerID, storeID, productName, updatedOn) \
                 VALUES ($1, $2, $3, CURRENT_TIMESTAMP)",
            )
            .bind(manager_id)
            .bind(store_id)
            .bind(product_name),
        );

        self.db.commit(work).await?;
        self.db.current_sequence_value(UPDATE_NUMBER_SEQUENCE).await
    }

    /// Most recent audit rows of one manager, newest first.
    pub async fn recent_for_manager(&self, manager_id: i64, limit: u32) -> DbResult<Table> {
        let stmt = Statement::new(
            "SELECT updateNumber, storeID, productName, CAST(updatedOn AS TEXT) AS updatedOn \
             FROM ProductUpdates WHERE managerID = $1 \
             ORDER BY updatedOn DESC, updateNumber DESC LIMIT $2",
        )
        .bind(manager_id)
        .bind(limit);
        self.db.execute_query_rows(&stmt).await
    }
}
