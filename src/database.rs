//! Database connection and migration management.

use std::path::Path;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;

/// Initializes the database connection.
///
/// For sqlite URLs the database file and its parent directory are
/// created on first run so a fresh checkout boots without manual
/// setup.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database");

    if let Some(db_path) = sqlite_file_path(&config.url) {
        let db_file_path = Path::new(db_path);

        if let Some(parent_dir) = db_file_path.parent() {
            if !parent_dir.exists() {
                debug!("Creating database directory: {}", parent_dir.display());
                std::fs::create_dir_all(parent_dir).map_err(|e| {
                    DbErr::Custom(format!(
                        "Failed to create database directory {}: {e}",
                        parent_dir.display()
                    ))
                })?;
            }
        }

        if !db_file_path.exists() {
            debug!("Creating database file: {}", db_file_path.display());
            std::fs::File::create(db_file_path).map_err(|e| {
                DbErr::Custom(format!(
                    "Failed to create database file {}: {e}",
                    db_file_path.display()
                ))
            })?;
        }
    }

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;

    info!("Database connection established");
    Ok(db)
}

fn sqlite_file_path(url: &str) -> Option<&str> {
    if !url.starts_with("sqlite:") || url.contains(":memory:") {
        return None;
    }
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    // Strip connection query parameters, e.g. `?mode=rwc`.
    Some(path.split('?').next().unwrap_or(path))
}

/// Runs all pending migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Running database migrations");
    ::migration::Migrator::up(db, None).await?;
    info!("Database migrations complete");
    Ok(())
}

/// Logs whether any migrations are still pending.
pub async fn check_database_status(db: &DatabaseConnection) -> Result<(), DbErr> {
    let pending = ::migration::Migrator::get_pending_migrations(db).await?;

    if pending.is_empty() {
        info!("All migrations applied");
    } else {
        warn!("{} pending migrations", pending.len());
    }

    Ok(())
}
