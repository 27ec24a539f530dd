//! Apply the embedded SQLite migrations without starting the server.

use std::process::ExitCode;

use clap::Parser;
use todo_backend::outbound::persistence::run_migrations;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Create or upgrade the todo database schema.
#[derive(Debug, Parser)]
#[command(name = "todo-migrate", version)]
struct Cli {
    /// SQLite database file to migrate.
    #[arg(long, env = "TODO_DATABASE_URL", default_value = "todo.db")]
    database_url: String,
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    match run_migrations(&cli.database_url) {
        Ok(applied) => {
            info!(database_url = %cli.database_url, applied, "migrations complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(database_url = %cli.database_url, error = %err, "migrations failed");
            ExitCode::FAILURE
        }
    }
}
