//! Scrapers that fill a [`Catalog`] for one campus, and the driver that
//! hands a scraped catalog to the database sync.

pub mod feed;

pub use feed::FeedScraper;

use database::{
    ServiceError,
    entities::campuses,
    services::sync::{CatalogSyncService, SyncReport},
};
use log::{info, warn};
use models::{Catalog, ValidationError};
use sea_orm::DatabaseConnection;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed feed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("course '{course}' references unknown {kind} '{code}'")]
    UnknownReference {
        kind: &'static str,
        code: String,
        course: String,
    },

    #[error("catalog sync failed: {0}")]
    Sync(#[from] ServiceError),
}

/// Source of catalog data for one campus.
///
/// Implementations build detached entities with their relationships wired and
/// hold them in the catalog they are given.
pub trait CampusScraper {
    fn scrape(&self, catalog: &mut Catalog)
    -> impl Future<Output = Result<(), ScrapeError>> + Send;
}

/// Runs `scraper` into a fresh catalog and syncs it for `campus`.
///
/// Nothing is written unless the scraper succeeds.
pub async fn sync_campus<S>(
    db: &DatabaseConnection,
    campus: &campuses::Model,
    scraper: &S,
) -> Result<SyncReport, ScrapeError>
where
    S: CampusScraper + Sync,
{
    let mut catalog = Catalog::new();

    if let Err(e) = scraper.scrape(&mut catalog).await {
        warn!("Scraping campus {} failed, nothing was synced: {e}", campus.code);
        return Err(e);
    }

    info!(
        "Scraped {} courses for campus {}",
        catalog.courses().len(),
        campus.code
    );

    Ok(CatalogSyncService::update_catalog(db, campus, &catalog).await?)
}
