//! # Bootstrap Schema
//!
//! DDL for a local SQLite store, embedded at compile time. Used by the `seed`
//! binary and by every test that needs real tables.
//!
//! The PostgreSQL counterpart lives in `sql/postgres/schema.sql` and is loaded
//! by an operator; the client never alters a production schema.

use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::{Backend, Database};
use crate::statement::Statement;

/// SQLite bootstrap DDL.
pub const SQLITE_SCHEMA: &str = include_str!("../sql/sqlite/schema.sql");

/// PostgreSQL reference DDL.
pub const POSTGRES_SCHEMA: &str = include_str!("../sql/postgres/schema.sql");

/// Splits a DDL script into individual statements.
fn statements(script: &str) -> impl Iterator<Item = &str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|chunk| {
            chunk
                .lines()
                .map(str::trim)
                .any(|line| !line.is_empty() && !line.starts_with("--"))
        })
}

/// Creates every table and index on a SQLite database. Idempotent.
///
/// ## Returns
/// * `Err(DbError::Internal)` - Called on a PostgreSQL connection
pub async fn create_sqlite_schema(db: &Database) -> DbResult<()> {
    if db.backend() != Backend::Sqlite {
        return Err(DbError::Internal(
            "bootstrap schema is only applied to SQLite".to_string(),
        ));
    }

    let mut applied = 0;
    for sql in statements(SQLITE_SCHEMA) {
        db.execute_write(&Statement::new(sql)).await?;
        applied += 1;
    }

    info!(statements = applied, "SQLite schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;

    #[test]
    fn test_statement_split_skips_comments() {
        let script = "-- header\n\nCREATE TABLE a (x INTEGER);\n-- trailing\n";
        let parts: Vec<_> = statements(script).collect();
        assert_eq!(parts.len(), 1);
        assert!(parts[0].ends_with("CREATE TABLE a (x INTEGER)"));
    }

    #[test]
    fn test_both_schemas_define_the_same_tables() {
        for table in [
            "Users",
            "Store",
            "Product",
            "Warehouse",
            "Orders",
            "ProductSupplyRequests",
            "ProductUpdates",
        ] {
            let needle = format!("TABLE {table} (");
            let sqlite_needle = format!("TABLE IF NOT EXISTS {table} (");
            assert!(POSTGRES_SCHEMA.contains(&needle), "postgres missing {table}");
            assert!(SQLITE_SCHEMA.contains(&sqlite_needle), "sqlite missing {table}");
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        create_sqlite_schema(&db).await.unwrap();
        create_sqlite_schema(&db).await.unwrap();

        let count = db
            .execute_query_count(&Statement::new("SELECT userID FROM Users"))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
