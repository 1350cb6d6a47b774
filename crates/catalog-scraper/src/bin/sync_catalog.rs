use catalog_scraper::{FeedScraper, sync_campus};
use database::{
    DatabaseConfig,
    config::{parse_or, required},
    db::create_connection,
    services::catalog::CatalogService,
};
use log::{error, info};
use std::error::Error;

/// Syncs one campus from the catalog feed named by `CATALOG_FEED`
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        error!("Catalog sync failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let database = DatabaseConfig::from_env()?;
    let campus_code = required("CAMPUS_CODE")?;
    let campus_name = parse_or("CAMPUS_NAME", campus_code.clone())?;
    let feed = required("CATALOG_FEED")?;

    let db = create_connection(&database).await?;
    let campus = CatalogService::find_or_create_campus(&db, &campus_code, &campus_name).await?;

    let report = sync_campus(&db, &campus, &FeedScraper::new(&feed)).await?;
    info!(
        "Synced campus {} from {feed}: {}",
        campus.code,
        serde_json::to_string(&report)?
    );

    Ok(())
}
