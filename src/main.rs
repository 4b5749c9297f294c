//! Ticketline server entry point.

use std::sync::Arc;

use tracing::info;

use ticketline::api::ApiServer;
use ticketline::config::load_config;
use ticketline::database::{check_database_status, init_database, run_migrations};
use ticketline::error::Result;
use ticketline::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(None);

    let config = Arc::new(load_config()?);
    info!(
        "Configuration loaded, binding {}:{}",
        config.server.bind_address, config.server.port
    );

    let db = Arc::new(init_database(&config.database).await?);
    check_database_status(db.as_ref()).await?;
    run_migrations(db.as_ref()).await?;

    ApiServer::new(config, db).serve().await
}
