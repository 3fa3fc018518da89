//! # Menu Driver
//!
//! Reads numeric choices and dispatches to the operations until the user
//! exits or input ends.
//!
//! ## Menu Flow
//! ```text
//! ┌──────────────────┐  2 + valid credentials   ┌──────────────────────┐
//! │  MAIN MENU       │ ───────────────────────► │  user menu (by role) │
//! │  1 Create user   │                          │  1-4   everyone      │
//! │  2 Log in        │ ◄─────────────────────── │  5-10  managers      │
//! │  9 < EXIT        │   20 (session cleared)   │  11    admins        │
//! └──────────────────┘                          └──────────────────────┘
//! ```
//!
//! Every operation result passes through [`report`]: refusals go to the
//! output stream, failures to the error stream, and the menu continues.

use storeline_core::Role;
use tracing::{info, warn};

use crate::commands::{account, admin, customer, manager, Context};
use crate::error::{CliError, CliResult};
use crate::terminal::UNRECOGNIZED_CHOICE;

const TOP_MENU: &str = "\
MAIN MENU
---------
1. Create user
2. Log in
9. < EXIT";

/// Runs the menus. End of input counts as a normal exit.
pub async fn run(ctx: &mut Context) -> CliResult<()> {
    match top_menu(ctx).await {
        Err(CliError::InputClosed) => {
            info!("Input closed, leaving menu");
            Ok(())
        }
        other => other,
    }
}

async fn top_menu(ctx: &mut Context) -> CliResult<()> {
    loop {
        ctx.term.say(TOP_MENU)?;
        match ctx.term.read_choice().await? {
            1 => {
                let result = account::create_account(ctx).await;
                report(ctx, result)?;
            }
            2 => {
                let result = account::log_in(ctx).await;
                report(ctx, result)?;
                if ctx.session.is_authenticated() {
                    user_menu(ctx).await?;
                }
            }
            9 => return Ok(()),
            _ => ctx.term.say(UNRECOGNIZED_CHOICE)?,
        }
    }
}

/// Menu text for `role`. Entries beyond the role's reach are hidden but
/// still dispatch.
fn user_menu_text(ctx: &Context, role: Option<Role>) -> String {
    let shopping = &ctx.shopping;
    let mut lines = vec![
        "MAIN MENU".to_string(),
        "---------".to_string(),
        format!("1. View Stores within {} miles", shopping.nearby_radius),
        "2. View Product List".to_string(),
        "3. Place a Order".to_string(),
        format!("4. View {} recent orders", shopping.recent_limit),
    ];

    if role == Some(Role::Manager) {
        lines.extend([
            "5. Update Product".to_string(),
            format!("6. View {} recent Product Updates Info", shopping.recent_limit),
            format!("7. View {} Popular Items", shopping.popular_limit),
            format!("8. View {} Popular Customers", shopping.popular_limit),
            "9. Place Product Supply Request to Warehouse".to_string(),
            "10. View All Orders for Store".to_string(),
        ]);
    }
    if role == Some(Role::Admin) {
        lines.push("11. View and Edit User and Product Info".to_string());
    }

    lines.push(".........................".to_string());
    lines.push("20. Log out".to_string());
    lines.join("\n")
}

async fn user_menu(ctx: &mut Context) -> CliResult<()> {
    loop {
        let text = user_menu_text(ctx, ctx.session.role());
        ctx.term.say(text)?;

        let result = match ctx.term.read_choice().await? {
            1 => customer::list_nearby_stores(ctx).await,
            2 => customer::list_products(ctx).await,
            3 => customer::place_order(ctx).await,
            4 => customer::list_recent_orders(ctx).await,
            5 => manager::update_product(ctx).await,
            6 => manager::list_recent_updates(ctx).await,
            7 => manager::list_popular_products(ctx).await,
            8 => manager::list_popular_customers(ctx).await,
            9 => manager::place_supply_request(ctx).await,
            10 => manager::list_all_orders(ctx).await,
            11 => admin::admin_tools(ctx).await,
            20 => {
                if let Some(identity) = ctx.session.identity() {
                    info!(user_id = identity.user_id, "Logged out");
                }
                ctx.session.sign_out();
                return Ok(());
            }
            _ => ctx.term.say(UNRECOGNIZED_CHOICE),
        };
        report(ctx, result)?;
    }
}

/// Operation boundary.
///
/// ## Returns
/// * `Ok(())` - The menu continues (including after a reported failure)
/// * `Err(_)` - End of input or a console I/O failure; the run stops
pub(crate) fn report(ctx: &mut Context, result: CliResult<()>) -> CliResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err @ CliError::PermissionDenied { .. }) => ctx.term.say(err.to_string()),
        Err(err @ (CliError::InputClosed | CliError::Io(_))) => Err(err),
        Err(err) => {
            warn!(error = %err, "Operation failed");
            ctx.term.complain(err.to_string())
        }
    }
}
