//! # Operations
//!
//! One async function per menu entry. Each takes the [`Context`], prompts for
//! what it needs, issues its statements through the repositories and prints
//! the result.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  account   create_account, log_in                      (anyone)        │
//! │  customer  nearby stores, product list, place order,                   │
//! │            recent orders                               (logged in)     │
//! │  manager   update product, recent updates, popular                     │
//! │            items / customers, supply request,                          │
//! │            store orders                                (manager)       │
//! │  admin     list / edit users and products              (admin)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Role checks happen inside each operation, so an entry reached by typing
//! its number without the menu showing it is still refused.

pub mod account;
pub mod admin;
pub mod customer;
pub mod manager;

use storeline_core::{CredentialCheck, PlaintextCredentials, Session};
use storeline_db::Database;

use crate::config::ShoppingSettings;
use crate::terminal::Terminal;

/// Everything an operation may touch.
pub struct Context {
    pub db: Database,
    pub session: Session,
    pub shopping: ShoppingSettings,
    pub credentials: Box<dyn CredentialCheck>,
    pub term: Terminal,
}

impl Context {
    /// Anonymous session with plaintext credential checks.
    pub fn new(db: Database, shopping: ShoppingSettings, term: Terminal) -> Self {
        Context {
            db,
            session: Session::anonymous(),
            shopping,
            credentials: Box::new(PlaintextCredentials),
            term,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixture store and scripted console for operation tests.

    use storeline_core::{Identity, Role};
    use storeline_db::{create_sqlite_schema, Database, DbConfig, Statement};

    use super::Context;
    use crate::config::ShoppingSettings;
    use crate::terminal::capture::{scripted, Capture};

    /// ```text
    /// Users:   1 alice customer (10,10)   2 mona manager   3 root admin
    ///          4 carl customer (12,10)    5 nina manager
    /// Store:   1 North (10,40) mona       distance from alice = 30
    ///          2 Edge (10,40.0001) mona   distance from alice = 30.0001
    ///          3 West (40,10) nina        distance from alice = 30
    ///          4 East (90,90) mona
    /// Product: (1,Bread,10,2.5) (1,Milk,5,1.25) (2,Bread,7,3)
    ///          (3,Eggs,12,4) (4,Tea,3,6)
    /// Warehouse: 1, 2
    /// ```
    pub(crate) async fn fixture_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        create_sqlite_schema(&db).await.unwrap();

        for sql in [
            "INSERT INTO Users (name, password, latitude, longitude, type) VALUES
                ('alice', 'pw', 10, 10, 'customer'),
                ('mona', 'pw', 50, 50, 'manager'),
                ('root', 'pw', 0, 0, 'admin'),
                ('carl', 'pw', 12, 10, 'customer'),
                ('nina', 'pw', 60, 60, 'manager')",
            "INSERT INTO Store (storeID, name, latitude, longitude, managerID) VALUES
                (1, 'North', 10, 40, 2),
                (2, 'Edge', 10, 40.0001, 2),
                (3, 'West', 40, 10, 5),
                (4, 'East', 90, 90, 2)",
            "INSERT INTO Product (storeID, productName, numberOfUnits, pricePerUnit) VALUES
                (1, 'Bread', 10, 2.5),
                (1, 'Milk', 5, 1.25),
                (2, 'Bread', 7, 3),
                (3, 'Eggs', 12, 4),
                (4, 'Tea', 3, 6)",
            "INSERT INTO Warehouse (WarehouseID, area, latitude, longitude) VALUES
                (1, 500, 30, 30),
                (2, 800, 70, 70)",
        ] {
            db.execute_write(&Statement::new(sql)).await.unwrap();
        }
        db
    }

    /// A context over the fixture store plus its captured streams.
    pub(crate) struct Harness {
        pub(crate) ctx: Context,
        out: Capture,
        err: Capture,
    }

    impl Harness {
        pub(crate) async fn new(input: &str) -> Self {
            Self::with_db(fixture_db().await, input)
        }

        pub(crate) fn with_db(db: Database, input: &str) -> Self {
            let (term, out, err) = scripted(input);
            Harness {
                ctx: Context::new(db, ShoppingSettings::default(), term),
                out,
                err,
            }
        }

        pub(crate) fn signed_in(mut self, user_id: i64, name: &str, role: Role) -> Self {
            self.ctx.session.sign_in(Identity::new(user_id, name, role));
            self
        }

        pub(crate) fn stdout(&self) -> String {
            self.out.contents()
        }

        pub(crate) fn stderr(&self) -> String {
            self.err.contents()
        }

        /// First column of the first row of `sql`.
        pub(crate) async fn scalar(&self, sql: &str) -> String {
            let table = self
                .ctx
                .db
                .execute_query_rows(&Statement::new(sql))
                .await
                .unwrap();
            table.rows()[0].values()[0].clone()
        }
    }
}
