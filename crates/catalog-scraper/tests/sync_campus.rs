use catalog_scraper::{CampusScraper, FeedScraper, ScrapeError, sync_campus};
use database::{
    entities::{campuses, courses, departments, subjects},
    services::catalog::CatalogService,
};
use migration::{Migrator, MigratorTrait};
use models::{Catalog, Department, Subject};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use std::path::PathBuf;

const FEED: &str = r#"{
    "departments": [{"code": "H3HADD", "name": "Computer Science"}],
    "subjects": [{"code": "CSE4006", "name": "Software Engineering"}],
    "gen_edu_categories": [{"code": "SCI", "name": "Science and Technology"}],
    "courses": [
        {"code": "10020", "subject": "CSE4006", "instructor": "Sunny Yoon",
         "credit": 3.0, "departments": ["H3HADD"], "type": "major", "target_grade": 3,
         "classes": [{"day_of_week": 1, "start_period": 2, "end_period": 4}]}
    ]
}"#;

async fn setup() -> (DatabaseConnection, campuses::Model) {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let campus = CatalogService::find_or_create_campus(&db, "SEOUL", "Seoul Campus")
        .await
        .unwrap();
    (db, campus)
}

fn write_feed(name: &str, contents: &str) -> PathBuf {
    let file_name = format!("catalog-scraper-{}-{name}.json", std::process::id());
    let path = std::env::temp_dir().join(file_name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Holds part of a catalog, then fails
struct FailingScraper;

impl CampusScraper for FailingScraper {
    async fn scrape(&self, catalog: &mut Catalog) -> Result<(), ScrapeError> {
        catalog.hold_departments([Department::new("H3HADD", "Computer Science")]);
        catalog.hold_subjects([Subject::new("CSE4006", "Software Engineering")]);
        Err(ScrapeError::Io(std::io::Error::other("connection reset")))
    }
}

#[tokio::test]
async fn test_feed_file_is_synced() {
    let (db, campus) = setup().await;
    let path = write_feed("synced", FEED);

    let scraper = FeedScraper::new(path.to_str().unwrap());
    let report = sync_campus(&db, &campus, &scraper).await.unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(report.departments.created, 1);
    assert_eq!(report.courses.created, 1);
    assert_eq!(courses::Entity::find().count(&db).await.unwrap(), 1);

    // A second run of the same feed only updates
    let path = write_feed("resynced", FEED);
    let report = sync_campus(&db, &campus, &FeedScraper::new(path.to_str().unwrap()))
        .await
        .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(report.courses.created, 0);
    assert_eq!(report.courses.updated, 1);
}

#[tokio::test]
async fn test_failed_scrape_writes_nothing() {
    let (db, campus) = setup().await;

    let err = sync_campus(&db, &campus, &FailingScraper).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Io(_)));

    assert_eq!(departments::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(subjects::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_feed_keeps_previous_catalog() {
    let (db, campus) = setup().await;
    let path = write_feed("previous", FEED);
    sync_campus(&db, &campus, &FeedScraper::new(path.to_str().unwrap()))
        .await
        .unwrap();
    std::fs::remove_file(&path).ok();

    let broken = FEED.replace("\"CSE4006\", \"instructor\"", "\"NOPE\", \"instructor\"");
    let path = write_feed("broken", &broken);
    let err = sync_campus(&db, &campus, &FeedScraper::new(path.to_str().unwrap()))
        .await
        .unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, ScrapeError::UnknownReference { kind: "subject", .. }));
    assert_eq!(courses::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_feed_file() {
    let (db, campus) = setup().await;

    let scraper = FeedScraper::new("/nonexistent/catalog-feed.json");
    let err = sync_campus(&db, &campus, &scraper).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Io(_)));
}
