//! Populates the database with sample Istanbul warehouses, safe zones,
//! items and stock levels.

use anyhow::Result;
use tracing::info;

use geosafe_api::{config, middleware, seed};
use persistence::db::Database;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;
    middleware::logging::init_logging(&config.logging);

    let db = Database::connect(&config.database).await?;
    info!(spatial = db.spatial().as_str(), "Seeding database");

    let report = seed::run(&db).await;
    db.close().await;
    let report = report?;

    info!(
        warehouses = report.warehouses,
        safe_zones = report.safe_zones,
        items = report.items,
        inventory_links = report.inventory_links,
        "Seeding complete"
    );

    Ok(())
}
