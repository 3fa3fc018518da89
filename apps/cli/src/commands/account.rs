//! # Account Operations
//!
//! Creating a customer account and logging in. Both run before any session
//! exists.

use storeline_core::validation::{validate_coordinate, validate_password, validate_user_name};
use storeline_core::{Coordinates, Identity, Role};
use storeline_db::UserRecord;
use tracing::info;

use super::Context;
use crate::error::CliResult;

/// Prompts for name, password and location and inserts a customer.
///
/// Names are not unique; a second "alice" is a separate account.
pub async fn create_account(ctx: &mut Context) -> CliResult<()> {
    let name = ctx.term.prompt("Enter name").await?;
    let password = ctx.term.prompt("Enter password").await?;
    let latitude: f64 = ctx.term.prompt_parse("Enter latitude").await?;
    let longitude: f64 = ctx.term.prompt_parse("Enter longitude").await?;

    validate_user_name(&name)?;
    validate_password(&password)?;
    validate_coordinate("latitude", latitude)?;
    validate_coordinate("longitude", longitude)?;

    let stored = ctx.credentials.prepare(&password);
    let user_id = ctx
        .db
        .users()
        .insert(&UserRecord {
            name: &name,
            password: &stored,
            coordinates: Coordinates::new(latitude, longitude),
            role: Role::Customer,
        })
        .await?;

    ctx.term.say("User successfully created!")?;
    if let Some(id) = user_id {
        info!(user_id = id, "Account created");
        ctx.term.say(format!("Your user ID is {id}."))?;
    }
    Ok(())
}

/// Prompts for credentials and, on a match, signs the session in.
///
/// When several accounts share the name and password, the one with the
/// lowest userID wins. A failed attempt leaves the session as it was.
pub async fn log_in(ctx: &mut Context) -> CliResult<()> {
    let name = ctx.term.prompt("Enter name").await?;
    let password = ctx.term.prompt("Enter password").await?;

    let candidates = ctx.db.users().find_by_name(&name).await?;
    let matched = candidates
        .into_iter()
        .find(|user| ctx.credentials.verify(&password, &user.password));

    let Some(user) = matched else {
        ctx.term.say("Invalid name or password.")?;
        return Ok(());
    };

    let role: Role = user.role.parse()?;
    info!(user_id = user.user_id, %role, "Logged in");
    ctx.session.sign_in(Identity::new(user.user_id, user.name, role));
    ctx.term.say(format!("Welcome {name}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::error::CliError;

    #[tokio::test]
    async fn test_create_then_log_in() {
        let mut h = Harness::new("zoe\nsecret\n10\n10\nzoe\nsecret\n").await;

        create_account(&mut h.ctx).await.unwrap();
        assert!(h.stdout().contains("User successfully created!"));
        assert!(h.stdout().contains("Your user ID is 6."));

        log_in(&mut h.ctx).await.unwrap();
        let identity = h.ctx.session.identity().unwrap();
        assert_eq!(identity.user_id, 6);
        assert_eq!(identity.role, Role::Customer);
        assert!(h.stdout().contains("Welcome zoe"));
    }

    #[tokio::test]
    async fn test_password_with_trailing_blank_logs_in() {
        let mut h = Harness::new("bob\npw \n10\n10\nbob\npw \n").await;

        create_account(&mut h.ctx).await.unwrap();
        log_in(&mut h.ctx).await.unwrap();

        assert!(h.stdout().contains("Welcome bob"));
        assert_eq!(h.ctx.session.identity().unwrap().user_id, 6);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_allowed() {
        let mut h = Harness::new("alice\nother\n1\n1\n").await;
        create_account(&mut h.ctx).await.unwrap();
        assert_eq!(
            h.scalar("SELECT COUNT(*) FROM Users WHERE name = 'alice'").await,
            "2"
        );
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_location() {
        let mut h = Harness::new("zoe\nsecret\n101\n10\n").await;
        let err = create_account(&mut h.ctx).await.unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert_eq!(h.scalar("SELECT COUNT(*) FROM Users").await, "5");
    }

    #[tokio::test]
    async fn test_create_reprompts_non_numeric_coordinate() {
        let mut h = Harness::new("zoe\nsecret\nnorth\n10\n20\n").await;
        create_account(&mut h.ctx).await.unwrap();
        assert!(h.stdout().contains("Your input is invalid!"));
        assert_eq!(
            h.scalar("SELECT longitude FROM Users WHERE name = 'zoe'").await,
            "20"
        );
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_untouched() {
        let mut h = Harness::new("alice\nwrong\n").await;
        log_in(&mut h.ctx).await.unwrap();

        assert!(!h.ctx.session.is_authenticated());
        assert!(h.stdout().contains("Invalid name or password."));
    }

    #[tokio::test]
    async fn test_wrong_password_keeps_existing_session() {
        let mut h = Harness::new("alice\nwrong\n")
            .await
            .signed_in(4, "carl", Role::Customer);
        log_in(&mut h.ctx).await.unwrap();
        assert_eq!(h.ctx.session.identity().unwrap().user_id, 4);
    }

    #[tokio::test]
    async fn test_duplicate_credentials_pick_lowest_id() {
        let mut h = Harness::new("mona\npw\n").await;
        h.ctx
            .db
            .execute_write(&storeline_db::Statement::new(
                "INSERT INTO Users (name, password, latitude, longitude, type) \
                 VALUES ('mona', 'pw', 1, 1, 'customer')",
            ))
            .await
            .unwrap();

        log_in(&mut h.ctx).await.unwrap();
        let identity = h.ctx.session.identity().unwrap();
        assert_eq!(identity.user_id, 2);
        assert_eq!(identity.role, Role::Manager);
    }

    #[tokio::test]
    async fn test_unknown_role_fails_log_in() {
        let mut h = Harness::new("ghost\npw\n").await;
        h.ctx
            .db
            .execute_write(&storeline_db::Statement::new(
                "INSERT INTO Users (name, password, latitude, longitude, type) \
                 VALUES ('ghost', 'pw', 1, 1, 'intern')",
            ))
            .await
            .unwrap();

        assert!(matches!(
            log_in(&mut h.ctx).await,
            Err(CliError::Core(_))
        ));
        assert!(!h.ctx.session.is_authenticated());
    }
}
