//! `warden` operator commands.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warden_application::bootstrap_permissions;
use warden_core::{AppError, AppResult};
use warden_domain::well_known_permissions;
use warden_infrastructure::PostgresPermissionRepository;

/// Warden administration tool.
#[derive(Parser, Debug)]
#[command(name = "warden", about = "Warden authorization service administration")]
struct Cli {
    /// Postgres connection string.
    #[arg(long = "database-url", env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Seed permissions. Seeds the built-in administrative set when none are given.
    #[command(name = "bootstrap-permissions")]
    BootstrapPermissions {
        /// Permission name to seed. Repeat for several.
        #[arg(long = "permission")]
        permissions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let database_url = cli
        .database_url
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Validation("DATABASE_URL is required".to_owned()))?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    match cli.command {
        Commands::BootstrapPermissions { permissions } => {
            let names = permissions_to_seed(permissions);
            let repository = PostgresPermissionRepository::new(pool);
            let seeded = bootstrap_permissions(&repository, &names).await?;
            info!(count = seeded.len(), "permissions bootstrapped");
            Ok(())
        }
    }
}

fn permissions_to_seed(requested: Vec<String>) -> Vec<String> {
    if requested.is_empty() {
        well_known_permissions()
    } else {
        requested
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
