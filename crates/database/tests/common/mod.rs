#![allow(dead_code)]

use database::{entities::campuses, services::catalog::CatalogService};
use migration::{Migrator, MigratorTrait};
use models::{
    Catalog, ClassPeriod, Course, CourseKind, DayOfWeek, Department, GenEduCategory, Subject,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A migrated in-memory database. One connection keeps every query on the same database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn campus(db: &DatabaseConnection, code: &str) -> campuses::Model {
    CatalogService::find_or_create_campus(db, code, &format!("{code} Campus"))
        .await
        .expect("Failed to create campus")
}

pub fn period(day: DayOfWeek, start: i32, end: i32) -> ClassPeriod {
    ClassPeriod::new(day, start, end).unwrap()
}

/// Two departments, two subjects, two categories and three courses
pub fn sample_catalog() -> Catalog {
    let cs = Department::new("H3HADD", "Computer Science");
    let ee = Department::new("H3HAEE", "Electrical Engineering");
    let software = Subject::new("CSE4006", "Software Engineering");
    let writing = Subject::new("GEN1001", "Academic Writing");
    let science = GenEduCategory::new("SCI", "Science and Technology");
    let humanities = GenEduCategory::new("HUM", "Humanities");

    let mut major = Course::new("10020", &software, 3.0, CourseKind::major(Some(3)).unwrap())
        .unwrap()
        .with_instructor("Sunny Yoon");
    major.add_department(&cs);
    major.add_department(&ee);
    major.add_class(period(DayOfWeek::TUESDAY, 2, 4));
    major.add_class(period(DayOfWeek::THURSDAY, 2, 4));

    let mut general = Course::new("10021", &writing, 2.0, CourseKind::general(&science)).unwrap();
    general.add_department(&cs);
    general.add_class(period(DayOfWeek::MONDAY, 1, 2));

    let humanities_course =
        Course::new("10022", &writing, 1.5, CourseKind::general(&humanities))
            .unwrap()
            .with_instructor("Mina Yoon");

    let mut catalog = Catalog::new();
    catalog.hold_departments([cs, ee]);
    catalog.hold_subjects([software, writing]);
    catalog.hold_gen_edu_categories([science, humanities]);
    catalog.hold_courses([major, general, humanities_course]);
    catalog
}
