//! # Admin Operations
//!
//! Unfiltered listings and direct edits of users and products, reached
//! through their own submenu.

use storeline_core::validation::{
    validate_coordinate, validate_password, validate_price, validate_product_name,
    validate_stock_level, validate_user_name,
};
use storeline_core::{Coordinates, Role};
use storeline_db::UserRecord;
use tracing::info;

use super::Context;
use crate::error::CliResult;
use crate::menu::report;
use crate::terminal::{INVALID_INPUT, UNRECOGNIZED_CHOICE};

const ADMIN_MENU: &str = "\
ADMIN TOOLS
1. View all Users
2. View all Products
3. Update a User
4. Update a Product
.........................
20. Return to main menu";

/// The admin submenu. Returns on 20.
pub async fn admin_tools(ctx: &mut Context) -> CliResult<()> {
    ctx.session.require_role(Role::Admin)?;

    loop {
        ctx.term.say(ADMIN_MENU)?;
        let result = match ctx.term.read_choice().await? {
            1 => list_all_users(ctx).await,
            2 => list_all_products(ctx).await,
            3 => update_user(ctx).await,
            4 => update_product(ctx).await,
            20 => return Ok(()),
            _ => ctx.term.say(UNRECOGNIZED_CHOICE),
        };
        report(ctx, result)?;
    }
}

pub async fn list_all_users(ctx: &mut Context) -> CliResult<()> {
    ctx.session.require_role(Role::Admin)?;
    let table = ctx.db.users().list_all().await?;
    ctx.term.print_table(&table)?;
    Ok(())
}

pub async fn list_all_products(ctx: &mut Context) -> CliResult<()> {
    ctx.session.require_role(Role::Admin)?;
    let table = ctx.db.products().list_all().await?;
    ctx.term.print_table(&table)?;
    Ok(())
}

/// Overwrites every field of an existing user. The role is reprompted until
/// it names a known role.
pub async fn update_user(ctx: &mut Context) -> CliResult<()> {
    ctx.session.require_role(Role::Admin)?;

    let user_id: i64 = ctx
        .term
        .prompt_parse("Enter User ID of User you would like to update")
        .await?;
    if !ctx.db.users().exists(user_id).await? {
        ctx.term.say("A User with that User ID does not exist")?;
        return Ok(());
    }

    let name = ctx.term.prompt("Enter name").await?;
    let password = ctx.term.prompt("Enter password").await?;
    let latitude: f64 = ctx.term.prompt_parse("Enter latitude").await?;
    let longitude: f64 = ctx.term.prompt_parse("Enter longitude").await?;
    let role = loop {
        let answer = ctx.term.prompt("Enter User type").await?;
        match answer.parse::<Role>() {
            Ok(role) => break role,
            Err(_) => ctx.term.say(INVALID_INPUT)?,
        }
    };

    validate_user_name(&name)?;
    validate_password(&password)?;
    validate_coordinate("latitude", latitude)?;
    validate_coordinate("longitude", longitude)?;

    let stored = ctx.credentials.prepare(&password);
    ctx.db
        .users()
        .overwrite(
            user_id,
            &UserRecord {
                name: &name,
                password: &stored,
                coordinates: Coordinates::new(latitude, longitude),
                role,
            },
        )
        .await?;

    info!(user_id, %role, "User overwritten");
    ctx.term.say(format!("User {user_id} updated."))?;
    Ok(())
}

/// Overwrites stock and price of an existing product. No audit row.
pub async fn update_product(ctx: &mut Context) -> CliResult<()> {
    ctx.session.require_role(Role::Admin)?;

    let store_id: i64 = ctx
        .term
        .prompt_parse("Enter store ID of the product you would like to update")
        .await?;
    let product_name = ctx
        .term
        .prompt("Enter the name of the product you would like to update")
        .await?
        .trim()
        .to_string();
    validate_product_name(&product_name)?;
    if !ctx.db.products().exists(store_id, &product_name).await? {
        ctx.term
            .say("A product with that store ID and product name does not exist")?;
        return Ok(());
    }

    let units: i64 = ctx.term.prompt_parse("Enter number of units").await?;
    let price: f64 = ctx.term.prompt_parse("Enter price per unit").await?;
    validate_stock_level(units)?;
    validate_price(price)?;

    ctx.db
        .products()
        .overwrite(store_id, &product_name, units, price)
        .await?;

    info!(store_id, product = %product_name, units, price, "Product overwritten");
    ctx.term.say(format!("{product_name} updated."))?;
    Ok(())
}
