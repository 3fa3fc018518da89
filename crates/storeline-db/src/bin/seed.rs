//! # Seed Data Generator
//!
//! Creates a local SQLite store with deterministic demo data.
//!
//! ## Usage
//! ```bash
//! # ./storeline_dev.db with the default data set
//! cargo run -p storeline-db --bin seed
//!
//! # Custom path, more customers
//! cargo run -p storeline-db --bin seed -- --db ./data/dev.db --customers 50
//! ```
//!
//! Then point the client at it:
//! ```bash
//! storeline dev 0 nobody --database-url "sqlite://./storeline_dev.db"
//! ```
//!
//! ## Generated Data
//! - 1 admin (`admin` / `admin`)
//! - 4 managers (`manager1`..`manager4`, password `pw`), 5 stores each
//! - 20 stores spread over the 0..100 grid
//! - N customers (`customer1`.., password `pw`)
//! - 8 products per store
//! - 5 warehouses

use clap::Parser;
use storeline_db::{create_sqlite_schema, Database, DbConfig, Statement};

/// Products stocked by every store: (name, base price).
const PRODUCTS: &[(&str, f64)] = &[
    ("Bread", 2.49),
    ("Milk", 1.29),
    ("Eggs", 3.10),
    ("Coffee", 7.95),
    ("Rice", 4.25),
    ("Apples", 0.65),
    ("Cheese", 5.40),
    ("Pasta", 1.85),
];

const STORES: i64 = 20;
const MANAGERS: i64 = 4;
const WAREHOUSES: i64 = 5;

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Storeline seed data generator")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./storeline_dev.db")]
    db: String,

    /// Number of customer accounts to create
    #[arg(short, long, default_value_t = 10)]
    customers: i64,
}

/// Deterministic point on the 0..100 grid for index `i`.
fn grid_point(i: i64, salt: i64) -> (f64, f64) {
    let lat = ((i * 37 + salt * 11) % 100) as f64;
    let lon = ((i * 53 + salt * 29) % 100) as f64;
    (lat, lon)
}

async fn insert_user(
    db: &Database,
    name: &str,
    password: &str,
    (lat, lon): (f64, f64),
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    db.execute_write(
        &Statement::new(
            "INSERT INTO Users (name, password, latitude, longitude, type) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(name)
        .bind(password)
        .bind(lat)
        .bind(lon)
        .bind(role),
    )
    .await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Storeline Seed Data Generator");
    println!("================================");
    println!("Database:  {}", args.db);
    println!("Customers: {}", args.customers);
    println!();

    let db = Database::new(DbConfig::sqlite(&args.db)).await?;
    create_sqlite_schema(&db).await?;
    println!("✓ Schema ready");

    let existing = db
        .execute_query_count(&Statement::new("SELECT userID FROM Users"))
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    // userID 1
    insert_user(&db, "admin", "admin", (50.0, 50.0), "admin").await?;

    // userID 2..=MANAGERS+1
    for m in 1..=MANAGERS {
        insert_user(&db, &format!("manager{m}"), "pw", grid_point(m, 3), "manager").await?;
    }

    for c in 1..=args.customers {
        insert_user(&db, &format!("customer{c}"), "pw", grid_point(c, 7), "customer").await?;
    }
    println!("✓ {} users", 1 + MANAGERS + args.customers);

    for store_id in 1..=STORES {
        let (lat, lon) = grid_point(store_id, 1);
        let manager_id = 2 + (store_id - 1) % MANAGERS;
        db.execute_write(
            &Statement::new(
                "INSERT INTO Store (storeID, name, latitude, longitude, managerID) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(store_id)
            .bind(format!("Store {store_id}"))
            .bind(lat)
            .bind(lon)
            .bind(manager_id),
        )
        .await?;

        for (index, (product, base_price)) in PRODUCTS.iter().enumerate() {
            let index = index as i64;
            let units = 20 + (store_id * 7 + index * 13) % 80;
            let price = base_price + ((store_id + index) % 5) as f64 * 0.25;
            db.execute_write(
                &Statement::new(
                    "INSERT INTO Product (storeID, productName, numberOfUnits, pricePerUnit) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(store_id)
                .bind(*product)
                .bind(units)
                .bind(price),
            )
            .await?;
        }
    }
    println!("✓ {} stores, {} products", STORES, STORES * PRODUCTS.len() as i64);

    for warehouse_id in 1..=WAREHOUSES {
        let (lat, lon) = grid_point(warehouse_id, 5);
        db.execute_write(
            &Statement::new(
                "INSERT INTO Warehouse (WarehouseID, area, latitude, longitude) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(warehouse_id)
            .bind(1000.0 + warehouse_id as f64 * 250.0)
            .bind(lat)
            .bind(lon),
        )
        .await?;
    }
    println!("✓ {} warehouses", WAREHOUSES);

    db.close().await;
    println!();
    println!("✓ Seed complete!");
    Ok(())
}
