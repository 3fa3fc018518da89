//! # Store Repository
//!
//! Store locations and manager ownership. Stores are seeded externally and
//! never written by the client.

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use crate::statement::{Statement, Table};
use storeline_core::{Coordinates, StoreLocation};

/// Repository for store lookups.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    db: Database,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(db: Database) -> Self {
        StoreRepository { db }
    }

    /// Every store with its coordinates, in storeID order.
    ///
    /// The radius filter runs in process (see `storeline_core::geo`), so this
    /// scans the whole table rather than a fixed id range.
    pub async fn locations(&self) -> DbResult<Vec<StoreLocation>> {
        let table = self
            .db
            .execute_query_rows(&Statement::new(
                "SELECT storeID, latitude, longitude FROM Store ORDER BY storeID",
            ))
            .await?;

        let stores = table
            .rows()
            .iter()
            .map(|row| -> DbResult<StoreLocation> {
                Ok(StoreLocation {
                    store_id: row.parse(0)?,
                    coordinates: Coordinates::new(row.parse(1)?, row.parse(2)?),
                })
            })
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = stores.len(), "Loaded store locations");
        Ok(stores)
    }

    /// Stores whose managerID is `manager_id`.
    pub async fn managed_by(&self, manager_id: i64) -> DbResult<Table> {
        let stmt = Statement::new(
            "SELECT storeID, name FROM Store WHERE managerID = $1 ORDER BY storeID",
        )
        .bind(manager_id);
        self.db.execute_query_rows(&stmt).await
    }

    pub async fn is_managed_by(&self, store_id: i64, manager_id: i64) -> DbResult<bool> {
        let stmt = Statement::new("SELECT storeID FROM Store WHERE storeID = $1 AND managerID = $2")
            .bind(store_id)
            .bind(manager_id);
        Ok(self.db.execute_query_count(&stmt).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::testing::fixture;
    use storeline_core::Coordinates;

    #[tokio::test]
    async fn test_locations_cover_every_store() {
        let db = fixture().await;
        let stores = db.stores().locations().await.unwrap();

        let ids: Vec<_> = stores.iter().map(|s| s.store_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(stores[0].coordinates, Coordinates::new(10.0, 40.0));
    }

    #[tokio::test]
    async fn test_ownership() {
        let db = fixture().await;
        let repo = db.stores();

        assert_eq!(repo.managed_by(2).await.unwrap().len(), 2);
        assert!(repo.managed_by(1).await.unwrap().is_empty());
        assert!(repo.is_managed_by(3, 5).await.unwrap());
        assert!(!repo.is_managed_by(3, 2).await.unwrap());
    }
}
