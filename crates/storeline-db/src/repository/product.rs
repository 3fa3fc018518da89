//! # Product Repository
//!
//! Per-store stock and prices. A product is always addressed by its
//! composite key `(storeID, productName)`; the same name in another store is
//! a different row.
//!
//! Stock changes caused by orders and supply requests are written by
//! [`OrderRepository`](crate::OrderRepository) and
//! [`SupplyRequestRepository`](crate::SupplyRequestRepository) inside their
//! units of work, not here.

use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::statement::{Statement, Table};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(db: Database) -> Self {
        ProductRepository { db }
    }

    /// Products of one store: productName, numberOfUnits, pricePerUnit.
    pub async fn list_for_store(&self, store_id: i64) -> DbResult<Table> {
        let stmt = Statement::new(
            "SELECT productName, numberOfUnits, pricePerUnit FROM Product \
             WHERE storeID = $1 ORDER BY productName",
        )
        .bind(store_id);
        self.db.execute_query_rows(&stmt).await
    }

    /// Unfiltered dump for the admin tools.
    pub async fn list_all(&self) -> DbResult<Table> {
        self.db
            .execute_query_rows(&Statement::new(
                "SELECT storeID, productName, numberOfUnits, pricePerUnit FROM Product \
                 ORDER BY storeID, productName",
            ))
            .await
    }

    pub async fn exists(&self, store_id: i64, product_name: &str) -> DbResult<bool> {
        let stmt = Statement::new(
            "SELECT productName FROM Product WHERE storeID = $1 AND productName = $2",
        )
        .bind(store_id)
        .bind(product_name);
        Ok(self.db.execute_query_count(&stmt).await? > 0)
    }

    /// Units on hand, `None` if the product does not exist.
    pub async fn stock(&self, store_id: i64, product_name: &str) -> DbResult<Option<i64>> {
        let stmt = Statement::new(
            "SELECT numberOfUnits FROM Product WHERE storeID = $1 AND productName = $2",
        )
        .bind(store_id)
        .bind(product_name);

        let table = self.db.execute_query_rows(&stmt).await?;
        table.rows().first().map(|row| row.parse(0)).transpose()
    }

    /// Overwrites stock and price of one product (admin edit, no audit row).
    pub async fn overwrite(
        &self,
        store_id: i64,
        product_name: &str,
        units: i64,
        price: f64,
    ) -> DbResult<()> {
        debug!(store_id, product = %product_name, units, price, "Overwriting product");

        let stmt = Statement::new(
            "UPDATE Product SET numberOfUnits = $1, pricePerUnit = $2 \
             WHERE storeID = $3 AND productName = $4",
        )
        .bind(units)
        .bind(price)
        .bind(store_id)
        .bind(product_name);

        if self.db.execute_write(&stmt).await? == 0 {
            return Err(DbError::not_found(
                "Product",
                format!("{store_id}/{product_name}"),
            ));
        }
        Ok(())
    }

    /// Best sellers of one store by number of orders.
    ///
    /// Ties are broken by productName so the ranking is stable.
    pub async fn popular(&self, store_id: i64, limit: u32) -> DbResult<Table> {
        let stmt = Statement::new(
            "SELECT productName, COUNT(*) AS orderCount FROM Orders WHERE storeID = $1 \
             GROUP BY productName ORDER BY orderCount DESC, productName LIMIT $2",
        )
        .bind(store_id)
        .bind(limit);
        self.db.execute_query_rows(&stmt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::testing::fixture;

    #[tokio::test]
    async fn test_list_for_store() {
        let db = fixture().await;
        let table = db.products().list_for_store(1).await.unwrap();

        assert_eq!(table.columns(), &["productName", "numberOfUnits", "pricePerUnit"]);
        assert_eq!(table.rows()[0].values(), &["Bread", "10", "2.5"]);
        assert_eq!(table.rows()[1].values(), &["Milk", "5", "1.25"]);
    }

    #[tokio::test]
    async fn test_stock_is_keyed_by_store() {
        let db = fixture().await;
        let repo = db.products();

        assert_eq!(repo.stock(1, "Bread").await.unwrap(), Some(10));
        assert_eq!(repo.stock(2, "Bread").await.unwrap(), Some(7));
        assert_eq!(repo.stock(2, "Milk").await.unwrap(), None);
        assert!(repo.exists(3, "Eggs").await.unwrap());
        assert!(!repo.exists(1, "Eggs").await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite_touches_one_store_only() {
        let db = fixture().await;
        let repo = db.products();

        repo.overwrite(1, "Bread", 3, 4.75).await.unwrap();
        assert_eq!(repo.stock(1, "Bread").await.unwrap(), Some(3));
        assert_eq!(repo.stock(2, "Bread").await.unwrap(), Some(7));

        assert!(matches!(
            repo.overwrite(1, "Caviar", 1, 1.0).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_popular_ties_break_by_name() {
        let db = fixture().await;
        for (product, times) in [("Milk", 2), ("Bread", 2)] {
            for _ in 0..times {
                db.execute_write(
                    &Statement::new(
                        "INSERT INTO Orders (customerID, storeID, productName, unitsOrdered) \
                         VALUES (1, 1, $1, 1)",
                    )
                    .bind(product),
                )
                .await
                .unwrap();
            }
        }

        let table = db.products().popular(1, 5).await.unwrap();
        assert_eq!(table.rows()[0].values(), &["Bread", "2"]);
        assert_eq!(table.rows()[1].values(), &["Milk", "2"]);
        assert!(db.products().popular(2, 5).await.unwrap().is_empty());
    }
}
