//! # Supply Request Repository
//!
//! Warehouses and restock requests. A request raises the store's stock
//! immediately and records who asked for it, in one unit of work.

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::statement::{Statement, Table};
use crate::unit_of_work::UnitOfWork;

/// Sequence behind `ProductSupplyRequests.requestNumber`.
pub const REQUEST_NUMBER_SEQUENCE: &str = "productsupplyrequests_requestnumber_seq";

/// A restock request about to be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplyRequest<'a> {
    pub manager_id: i64,
    pub warehouse_id: i64,
    pub store_id: i64,
    pub product_name: &'a str,
    pub units: i64,
}

/// Repository for warehouses and supply requests.
#[derive(Debug, Clone)]
pub struct SupplyRequestRepository {
    db: Database,
}

impl SupplyRequestRepository {
    /// Creates a new SupplyRequestRepository.
    pub fn new(db: Database) -> Self {
        SupplyRequestRepository { db }
    }

    pub async fn warehouses(&self) -> DbResult<Table> {
        self.db
            .execute_query_rows(&Statement::new(
                "SELECT WarehouseID, area, latitude, longitude FROM Warehouse ORDER BY WarehouseID",
            ))
            .await
    }

    pub async fn warehouse_exists(&self, warehouse_id: i64) -> DbResult<bool> {
        let stmt = Statement::new("SELECT WarehouseID FROM Warehouse WHERE WarehouseID = $1")
            .bind(warehouse_id);
        Ok(self.db.execute_query_count(&stmt).await? > 0)
    }

    /// Increments stock and records the request, all-or-nothing.
    ///
    /// ## Returns
    /// * `Ok(Some(n))` - requestNumber
    /// * `Err(DbError::NotFound)` - Product missing; nothing written
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown warehouse
    pub async fn place(&self, request: &NewSupplyRequest<'_>) -> DbResult<Option<i64>> {
        debug!(
            manager_id = request.manager_id,
            warehouse_id = request.warehouse_id,
            store_id = request.store_id,
            product = %request.product_name,
            units = request.units,
            "Placing supply request"
        );

        let work = UnitOfWork::new()
            .write_one(
                Statement::new(
                    "UPDATE Product SET numberOfUnits = numberOfUnits + $1 \
                     WHERE storeID = $2 AND productName = $3",
                )
                .bind(request.units)
                .bind(request.store_id)
                .bind(request.product_name),
                "Product",
                format!("{}/{}", request.store_id, request.product_name),
            )
            .write(
                Statement::new(
                    "INSERT INTO ProductSupplyRequests \
                     (managerID, warehouseID, storeID, productName, unitsRequested) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(request.manager_id)
                .bind(request.warehouse_id)
                .bind(request.store_id)
                .bind(request.product_name)
                .bind(request.units),
            );

        self.db.commit(work).await?;
        self.db.current_sequence_value(REQUEST_NUMBER_SEQUENCE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::testing::{fixture, scalar};

    fn restock(warehouse_id: i64) -> NewSupplyRequest<'static> {
        NewSupplyRequest {
            manager_id: 2,
            warehouse_id,
            store_id: 1,
            product_name: "Milk",
            units: 20,
        }
    }

    #[tokio::test]
    async fn test_place_increments_and_records() {
        let db = fixture().await;
        let number = db.supply_requests().place(&restock(2)).await.unwrap();

        assert_eq!(number, Some(1));
        assert_eq!(db.products().stock(1, "Milk").await.unwrap(), Some(25));
        assert_eq!(
            scalar(
                &db,
                Statement::new("SELECT warehouseID FROM ProductSupplyRequests")
            )
            .await,
            "2"
        );
    }

    #[tokio::test]
    async fn test_unknown_warehouse_rolls_back_increment() {
        let db = fixture().await;
        let err = db.supply_requests().place(&restock(99)).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.products().stock(1, "Milk").await.unwrap(), Some(5));
    }

    #[tokio::test]
    async fn test_warehouses() {
        let db = fixture().await;
        let repo = db.supply_requests();
        assert_eq!(repo.warehouses().await.unwrap().len(), 2);
        assert!(repo.warehouse_exists(1).await.unwrap());
        assert!(!repo.warehouse_exists(9).await.unwrap());
    }
}
