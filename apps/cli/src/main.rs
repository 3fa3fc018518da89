//! # storeline
//!
//! ```text
//! storeline <DBNAME> <PORT> <USER> [--config PATH] [--database-url URL]
//! ```
//!
//! Connects once, runs the menus until exit, end of input or Ctrl+C, and
//! always releases the connection before leaving.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use storeline_cli::{menu, terminal::Terminal, Context, Settings};
use storeline_db::{Database, DbConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const GREETING: &str = "\n\n\
*******************************************************\n\
              User Interface\n\
*******************************************************\n";

#[derive(Debug, Parser)]
#[command(name = "storeline", version, about = "Retail ordering console")]
struct Args {
    /// Database name
    dbname: String,

    /// Server port
    port: u16,

    /// Database user
    user: String,

    /// Settings file (default: per-user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Full connection URL; replaces DBNAME/PORT/USER (e.g. sqlite://dev.db)
    #[arg(long)]
    database_url: Option<String>,
}

/// Logs go to stderr so the menu on stdout stays clean.
///
/// ## Log Levels
/// - Default: `error`
/// - `RUST_LOG=info` - Connect / log-in / order trail
/// - `RUST_LOG=storeline_db=debug` - Every statement issued
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error - Unable to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(run(args));
    // A stdin read still parked on the blocking pool must not hold up exit.
    runtime.shutdown_background();
    code
}

async fn run(args: Args) -> ExitCode {
    let settings = match Settings::load(args.config.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error - Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{GREETING}");

    let config = match args.database_url {
        Some(url) => DbConfig::new(url),
        None => match DbConfig::postgres(
            &settings.database.host,
            args.port,
            &args.dbname,
            &args.user,
            &settings.database.password,
        ) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error - Unable to Connect to Database: {e}");
                return ExitCode::FAILURE;
            }
        },
    }
    .connect_timeout(Duration::from_secs(settings.database.connect_timeout_secs));

    info!(url = %config.redacted_url(), "Connecting");
    let db = match Database::new(config).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error - Unable to Connect to Database: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = Context::new(db.clone(), settings.shopping, Terminal::stdio());
    let outcome = tokio::select! {
        result = menu::run(&mut ctx) => result,
        () = shutdown_signal() => Ok(()),
    };

    let code = match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Menu aborted");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    };

    print!("Disconnecting from database...");
    db.close().await;
    println!("Done\n\nBye !");
    code
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed never
/// fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
