//! # User Repository
//!
//! Database operations for accounts.
//!
//! ## Key Operations
//! - Account creation with the generated id read back
//! - Credential lookup by name (all matches, lowest id first)
//! - Admin listing and full-record overwrite

use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::placeholders;
use crate::pool::Database;
use crate::statement::{Statement, Table};
use storeline_core::{Coordinates, Role};

/// Sequence behind `Users.userID`.
pub const USER_ID_SEQUENCE: &str = "users_userid_seq";

/// Column values of a Users row, minus the id.
///
/// `password` is written as given; callers pass it through
/// `CredentialCheck::prepare` first.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub coordinates: Coordinates,
    pub role: Role,
}

/// A Users row as needed for log-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub user_id: i64,
    pub name: String,
    pub password: String,
    /// Raw `type` column; parsed by the caller.
    pub role: String,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(db: Database) -> Self {
        UserRepository { db }
    }

    /// Inserts a user.
    ///
    /// ## Returns
    /// * `Ok(Some(id))` - The generated userID
    /// * `Ok(None)` - Row written but the id could not be read back
    pub async fn insert(&self, user: &UserRecord<'_>) -> DbResult<Option<i64>> {
        debug!(name = %user.name, role = %user.role, "Inserting user");

        let stmt = Statement::new(
            "INSERT INTO Users (name, password, latitude, longitude, type) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.name)
        .bind(user.password)
        .bind(user.coordinates.latitude)
        .bind(user.coordinates.longitude)
        .bind(user.role.as_str());

        self.db.execute_write(&stmt).await?;
        self.db.current_sequence_value(USER_ID_SEQUENCE).await
    }

    /// Every user with exactly this name, lowest userID first.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Vec<StoredUser>> {
        debug!(name = %name, "Looking up users by name");

        let stmt = Statement::new(
            "SELECT userID, name, password, type FROM Users WHERE name = $1 ORDER BY userID",
        )
        .bind(name);

        self.db
            .execute_query_rows(&stmt)
            .await?
            .rows()
            .iter()
            .map(|row| -> DbResult<StoredUser> {
                Ok(StoredUser {
                    user_id: row.parse(0)?,
                    name: row.text(1)?.to_string(),
                    password: row.text(2)?.to_string(),
                    role: row.text(3)?.to_string(),
                })
            })
            .collect()
    }

    /// Location of a user, `None` if the id is unknown.
    pub async fn coordinates(&self, user_id: i64) -> DbResult<Option<Coordinates>> {
        let stmt = Statement::new("SELECT latitude, longitude FROM Users WHERE userID = $1")
            .bind(user_id);

        let table = self.db.execute_query_rows(&stmt).await?;
        table
            .rows()
            .first()
            .map(|row| -> DbResult<Coordinates> {
                Ok(Coordinates::new(row.parse(0)?, row.parse(1)?))
            })
            .transpose()
    }

    pub async fn exists(&self, user_id: i64) -> DbResult<bool> {
        let stmt = Statement::new("SELECT userID FROM Users WHERE userID = $1").bind(user_id);
        Ok(self.db.execute_query_count(&stmt).await? > 0)
    }

    /// Unfiltered dump for the admin tools.
    pub async fn list_all(&self) -> DbResult<Table> {
        self.db
            .execute_query_rows(&Statement::new(
                "SELECT userID, name, password, latitude, longitude, type FROM Users ORDER BY userID",
            ))
            .await
    }

    /// Overwrites every column of one user.
    pub async fn overwrite(&self, user_id: i64, user: &UserRecord<'_>) -> DbResult<()> {
        debug!(user_id, "Overwriting user");

        let stmt = Statement::new(
            "UPDATE Users SET name = $1, password = $2, latitude = $3, longitude = $4, type = $5 \
             WHERE userID = $6",
        )
        .bind(user.name)
        .bind(user.password)
        .bind(user.coordinates.latitude)
        .bind(user.coordinates.longitude)
        .bind(user.role.as_str())
        .bind(user_id);

        if self.db.execute_write(&stmt).await? == 0 {
            return Err(DbError::not_found("User", user_id.to_string()));
        }
        Ok(())
    }

    /// Names for a set of ids, in userID order. Unknown ids are skipped.
    pub async fn names(&self, user_ids: &[i64]) -> DbResult<Vec<(i64, String)>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT userID, name FROM Users WHERE userID IN ({}) ORDER BY userID",
            placeholders(1, user_ids.len())
        );
        let stmt = user_ids
            .iter()
            .fold(Statement::new(sql), |stmt, id| stmt.bind(*id));

        self.db
            .execute_query_rows(&stmt)
            .await?
            .rows()
            .iter()
            .map(|row| -> DbResult<(i64, String)> { Ok((row.parse(0)?, row.text(1)?.to_string())) })
            .collect()
    }
}
