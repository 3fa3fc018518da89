//! # Storeline Console Client
//!
//! Text-menu client over the Storeline retail schema: account creation and
//! log-in, then customer, manager and admin operations gated by the session
//! role.
//!
//! ## Modules
//! - [`menu`]: choice loop and the operation boundary
//! - [`commands`]: one function per menu entry
//! - [`terminal`]: prompts and the tab-separated table format
//! - [`config`]: TOML + environment settings
//! - [`error`]: [`CliError`](error::CliError) and [`ConfigError`](error::ConfigError)
//!
//! The binary in `main.rs` wires these to stdin/stdout and a live database.

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod terminal;

pub use commands::Context;
pub use config::Settings;
pub use error::{CliError, CliResult, ConfigError};
