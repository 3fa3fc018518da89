//! # Manager Operations
//!
//! Store upkeep and reporting. Every entry requires the manager role, and
//! every store prompt only accepts stores the session user manages.

use storeline_core::validation::{
    validate_price, validate_product_name, validate_stock_level, validate_units,
};
use storeline_core::{ProductChange, Role};
use storeline_db::statement::NULL_TEXT;
use storeline_db::{DbError, NewSupplyRequest, Row, Table};
use tracing::info;

use super::Context;
use crate::error::CliResult;

/// Lists the manager's stores and reads a choice among them.
///
/// ## Returns
/// * `Ok(None)` - No stores managed, or the id is not one of them
async fn choose_managed_store(ctx: &mut Context, manager_id: i64) -> CliResult<Option<i64>> {
    let stores = ctx.db.stores().managed_by(manager_id).await?;
    if stores.is_empty() {
        ctx.term.say("You do not manage any stores.")?;
        return Ok(None);
    }
    ctx.term.print_table(&stores)?;

    let store_id: i64 = ctx.term.prompt_parse("Enter store ID").await?;
    if !ctx.db.stores().is_managed_by(store_id, manager_id).await? {
        ctx.term.say(format!("Store {store_id} is not managed by you."))?;
        return Ok(None);
    }
    Ok(Some(store_id))
}

/// Lists the store's products and reads the name of an existing one.
async fn choose_product(ctx: &mut Context, store_id: i64) -> CliResult<String> {
    let products = ctx.db.products().list_for_store(store_id).await?;
    ctx.term.print_table(&products)?;

    let product_name = ctx.term.prompt("Enter product name").await?.trim().to_string();
    validate_product_name(&product_name)?;
    if !ctx.db.products().exists(store_id, &product_name).await? {
        return Err(DbError::not_found("Product", format!("{store_id}/{product_name}")).into());
    }
    Ok(product_name)
}

/// "Update Product"
///
/// Units and price are asked about independently. Whatever changed is
/// written together with one ProductUpdates row.
pub async fn update_product(ctx: &mut Context) -> CliResult<()> {
    let manager_id = ctx.session.require_role(Role::Manager)?.user_id;
    let Some(store_id) = choose_managed_store(ctx, manager_id).await? else {
        return Ok(());
    };
    let product_name = choose_product(ctx, store_id).await?;

    let mut change = ProductChange::default();
    if ctx.term.confirm("Update number of units?").await? {
        let units: i64 = ctx.term.prompt_parse("Enter new number of units").await?;
        validate_stock_level(units)?;
        change.units = Some(units);
    }
    if ctx.term.confirm("Update price per unit?").await? {
        let price: f64 = ctx.term.prompt_parse("Enter new price per unit").await?;
        validate_price(price)?;
        change.price = Some(price);
    }

    if change.is_empty() {
        ctx.term.say("No changes made.")?;
        return Ok(());
    }

    let number = ctx
        .db
        .product_updates()
        .apply(manager_id, store_id, &product_name, change)
        .await?;
    info!(manager_id, store_id, ?number, "Product updated");

    if let Some(units) = change.units {
        ctx.term
            .say(format!("Updated {product_name} to {units} number of units."))?;
    }
    if let Some(price) = change.price {
        ctx.term
            .say(format!("Updated {product_name} to ${price} per unit."))?;
    }
    Ok(())
}

/// "View N recent Product Updates"
pub async fn list_recent_updates(ctx: &mut Context) -> CliResult<()> {
    let manager_id = ctx.session.require_role(Role::Manager)?.user_id;
    let table = ctx
        .db
        .product_updates()
        .recent_for_manager(manager_id, ctx.shopping.recent_limit)
        .await?;
    ctx.term.print_table(&table)?;
    Ok(())
}

/// "View N Popular Items"
pub async fn list_popular_products(ctx: &mut Context) -> CliResult<()> {
    let manager_id = ctx.session.require_role(Role::Manager)?.user_id;
    let Some(store_id) = choose_managed_store(ctx, manager_id).await? else {
        return Ok(());
    };
    let table = ctx
        .db
        .products()
        .popular(store_id, ctx.shopping.popular_limit)
        .await?;
    ctx.term.print_table(&table)?;
    Ok(())
}

/// "View N Popular Customers"
///
/// Names are resolved in one query after ranking; the printed order is the
/// ranking order.
pub async fn list_popular_customers(ctx: &mut Context) -> CliResult<()> {
    let manager_id = ctx.session.require_role(Role::Manager)?.user_id;
    let Some(store_id) = choose_managed_store(ctx, manager_id).await? else {
        return Ok(());
    };

    let ranking = ctx
        .db
        .orders()
        .top_customers(store_id, ctx.shopping.popular_limit)
        .await?;
    let ids: Vec<i64> = ranking.iter().map(|entry| entry.customer_id).collect();
    let names = ctx.db.users().names(&ids).await?;

    let rows = ranking
        .iter()
        .map(|entry| {
            let name = names
                .iter()
                .find(|(id, _)| *id == entry.customer_id)
                .map(|(_, name)| name.clone())
                .unwrap_or_else(|| NULL_TEXT.to_string());
            Row::new(vec![
                entry.customer_id.to_string(),
                name,
                entry.orders.to_string(),
            ])
        })
        .collect();

    let table = Table::new(
        vec!["userID".into(), "name".into(), "orderCount".into()],
        rows,
    );
    ctx.term.print_table(&table)?;
    Ok(())
}

/// "Place Product Supply Request"
pub async fn place_supply_request(ctx: &mut Context) -> CliResult<()> {
    let manager_id = ctx.session.require_role(Role::Manager)?.user_id;
    let Some(store_id) = choose_managed_store(ctx, manager_id).await? else {
        return Ok(());
    };
    let product_name = choose_product(ctx, store_id).await?;

    let warehouses = ctx.db.supply_requests().warehouses().await?;
    ctx.term.print_table(&warehouses)?;
    let warehouse_id: i64 = ctx.term.prompt_parse("Enter warehouse ID").await?;
    if !ctx.db.supply_requests().warehouse_exists(warehouse_id).await? {
        return Err(DbError::not_found("Warehouse", warehouse_id.to_string()).into());
    }

    let units: i64 = ctx.term.prompt_parse("Enter number of units").await?;
    validate_units(units)?;

    let number = ctx
        .db
        .supply_requests()
        .place(&NewSupplyRequest {
            manager_id,
            warehouse_id,
            store_id,
            product_name: &product_name,
            units,
        })
        .await?;
    info!(manager_id, warehouse_id, store_id, units, ?number, "Supply requested");

    ctx.term
        .say(format!("\t{units} units of {product_name} have been requested."))?;
    Ok(())
}

/// "View All Orders"
pub async fn list_all_orders(ctx: &mut Context) -> CliResult<()> {
    let manager_id = ctx.session.require_role(Role::Manager)?.user_id;
    let Some(store_id) = choose_managed_store(ctx, manager_id).await? else {
        return Ok(());
    };
    let table = ctx.db.orders().for_store(store_id).await?;
    ctx.term.print_table(&table)?;
    Ok(())
}
