//! # Customer Operations
//!
//! Shopping entries open to every logged-in user.

use storeline_core::geo::stores_within;
use storeline_core::validation::{validate_product_name, validate_units};
use storeline_core::{CoreError, StoreLocation};
use storeline_db::{DbError, NewOrder, Row, StockGuard, Table};
use tracing::info;

use super::Context;
use crate::error::CliResult;

/// Stores within the configured radius of `user_id`, in storeID order.
pub(crate) async fn nearby_stores(ctx: &Context, user_id: i64) -> CliResult<Vec<StoreLocation>> {
    let origin = ctx
        .db
        .users()
        .coordinates(user_id)
        .await?
        .ok_or_else(|| DbError::not_found("User", user_id.to_string()))?;
    let stores = ctx.db.stores().locations().await?;
    Ok(stores_within(origin, stores, ctx.shopping.nearby_radius))
}

fn store_table(stores: &[StoreLocation]) -> Table {
    Table::new(
        vec!["storeID".into(), "latitude".into(), "longitude".into()],
        stores
            .iter()
            .map(|store| {
                Row::new(vec![
                    store.store_id.to_string(),
                    store.coordinates.latitude.to_string(),
                    store.coordinates.longitude.to_string(),
                ])
            })
            .collect(),
    )
}

/// "View Stores within N miles"
pub async fn list_nearby_stores(ctx: &mut Context) -> CliResult<()> {
    let user_id = ctx.session.require_user()?.user_id;
    let stores = nearby_stores(ctx, user_id).await?;
    ctx.term.print_table(&store_table(&stores))?;
    Ok(())
}

/// "View Product List"
pub async fn list_products(ctx: &mut Context) -> CliResult<()> {
    ctx.session.require_user()?;
    let store_id: i64 = ctx.term.prompt_parse("Enter store ID").await?;
    let table = ctx.db.products().list_for_store(store_id).await?;
    ctx.term.print_table(&table)?;
    Ok(())
}

/// "Place a Order"
///
/// ## Flow
/// 1. Nearby stores listed; none → message, nothing else asked
/// 2. Store id must be one of them
/// 3. Product must exist in that store; units must be positive
/// 4. Stock decrement + Orders insert commit together
pub async fn place_order(ctx: &mut Context) -> CliResult<()> {
    let customer_id = ctx.session.require_user()?.user_id;
    let radius = ctx.shopping.nearby_radius;

    let nearby = nearby_stores(ctx, customer_id).await?;
    if nearby.is_empty() {
        ctx.term
            .say(format!("There are no stores within {radius} miles of you."))?;
        return Ok(());
    }
    ctx.term.print_table(&store_table(&nearby))?;

    let store_id: i64 = ctx.term.prompt_parse("Enter store ID").await?;
    if !nearby.iter().any(|store| store.store_id == store_id) {
        ctx.term
            .say(format!("Store {store_id} is not within {radius} miles of you."))?;
        return Ok(());
    }

    let products = ctx.db.products().list_for_store(store_id).await?;
    ctx.term.print_table(&products)?;

    let product_name = ctx.term.prompt("Enter product name").await?.trim().to_string();
    let units: i64 = ctx.term.prompt_parse("Enter number of units").await?;
    validate_product_name(&product_name)?;
    validate_units(units)?;

    let Some(stock) = ctx.db.products().stock(store_id, &product_name).await? else {
        return Err(DbError::not_found("Product", format!("{store_id}/{product_name}")).into());
    };

    let guard = if ctx.shopping.allow_negative_stock {
        StockGuard::AllowNegative
    } else if stock < units {
        return Err(CoreError::InsufficientStock {
            product: product_name,
            available: stock,
            requested: units,
        }
        .into());
    } else {
        StockGuard::RequireStock
    };

    let order = NewOrder {
        customer_id,
        store_id,
        product_name: &product_name,
        units,
    };
    let number = ctx.db.orders().place(&order, guard).await?;
    info!(customer_id, store_id, units, ?number, "Order placed");

    ctx.term
        .say(format!("\t{units} units of {product_name} have been ordered."))?;
    if let Some(number) = number {
        ctx.term.say(format!("\tOrder number: {number}"))?;
    }
    Ok(())
}

/// "View N recent orders"
pub async fn list_recent_orders(ctx: &mut Context) -> CliResult<()> {
    let customer_id = ctx.session.require_user()?.user_id;
    let table = ctx
        .db
        .orders()
        .recent_for_customer(customer_id, ctx.shopping.recent_limit)
        .await?;
    ctx.term.print_table(&table)?;
    Ok(())
}
