mod common;

use common::{campus, sample_catalog, setup_db};
use database::{
    ServiceError,
    entities::{courses, departments, gen_edu_categories, general_courses},
    services::{
        catalog::CatalogService,
        pagination::PageRequest,
        query_course::{CourseDetail, CourseFilter, QueryCourseService},
        sync::CatalogSyncService,
    },
};
use models::{Catalog, CourseType, DayOfWeek, Subject};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

async fn seeded() -> (DatabaseConnection, i32) {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;
    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();
    (db, campus.id)
}

async fn search(db: &DatabaseConnection, filter: CourseFilter) -> Vec<String> {
    QueryCourseService::get_courses_paginated(db, &filter, PageRequest::default())
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|record| record.course.code)
        .collect()
}

async fn id_of<E>(db: &DatabaseConnection, column: E::Column, code: &str) -> i32
where
    E: EntityTrait,
    E::Model: HasId,
{
    E::find()
        .filter(column.eq(code))
        .one(db)
        .await
        .unwrap()
        .map(|model| model.id())
        .unwrap_or_else(|| panic!("{code} is not stored"))
}

trait HasId {
    fn id(&self) -> i32;
}

impl HasId for departments::Model {
    fn id(&self) -> i32 {
        self.id
    }
}

impl HasId for gen_edu_categories::Model {
    fn id(&self) -> i32 {
        self.id
    }
}

impl HasId for courses::Model {
    fn id(&self) -> i32 {
        self.id
    }
}

#[tokio::test]
async fn test_pagination_slices_by_id() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;

    let mut catalog = Catalog::new();
    catalog.hold_subjects(
        (0..45).map(|n| Subject::new(format!("SUB{n:03}"), format!("Subject {n}"))),
    );
    CatalogSyncService::update_catalog(&db, &campus, &catalog)
        .await
        .unwrap();

    let first = CatalogService::list_subjects(&db, PageRequest::new(1, 20).unwrap())
        .await
        .unwrap();
    assert_eq!(first.total, 45);
    assert_eq!(first.num_pages, 3);
    assert_eq!(first.items.len(), 20);
    assert!(first.items.windows(2).all(|w| w[0].id < w[1].id));

    let last = CatalogService::list_subjects(&db, PageRequest::new(3, 20).unwrap())
        .await
        .unwrap();
    assert_eq!(last.page, 3);
    assert_eq!(last.items.len(), 5);
    assert!(last.items[0].id > first.items[19].id);

    let past_end = CatalogService::list_subjects(&db, PageRequest::new(4, 20).unwrap()).await;
    assert!(matches!(past_end, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_huge_page_is_not_found() {
    let (db, _) = seeded().await;

    let request = PageRequest::new(200_000_000_000_000_000, 100).unwrap();
    let subjects = CatalogService::list_subjects(&db, request).await;
    assert!(matches!(subjects, Err(ServiceError::NotFound)));

    let courses =
        QueryCourseService::get_courses_paginated(&db, &CourseFilter::default(), request).await;
    assert!(matches!(courses, Err(ServiceError::NotFound)));

    let empty = CatalogService::list_gen_edu_categories(&setup_db().await, request).await;
    assert!(matches!(empty, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_empty_collection_has_a_first_page() {
    let db = setup_db().await;

    let page = CatalogService::list_gen_edu_categories(&db, PageRequest::default())
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!((page.total, page.page, page.num_pages), (0, 1, 0));
}

#[tokio::test]
async fn test_campus_includes_its_departments() {
    let (db, campus_id) = seeded().await;
    campus(&db, "ERICA").await;

    let (campus, departments) = CatalogService::get_campus(&db, campus_id).await.unwrap();
    assert_eq!(campus.code, "SEOUL");
    let codes: Vec<&str> = departments.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["H3HADD", "H3HAEE"]);

    let campuses = CatalogService::list_campuses(&db, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(campuses.total, 2);
    assert_eq!(campuses.items[1].0.code, "ERICA");
    assert!(campuses.items[1].1.is_empty());
}

#[tokio::test]
async fn test_nested_department_requires_matching_campus() {
    let (db, campus_id) = seeded().await;
    let other = campus(&db, "ERICA").await;
    let cs = id_of::<departments::Entity>(&db, departments::Column::Code, "H3HADD").await;

    let department = CatalogService::get_department(&db, cs, Some(campus_id))
        .await
        .unwrap();
    assert_eq!(department.name, "Computer Science");

    let wrong_campus = CatalogService::get_department(&db, cs, Some(other.id)).await;
    assert!(matches!(wrong_campus, Err(ServiceError::NotFound)));

    let scoped = CatalogService::list_departments(&db, Some(other.id), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(scoped.total, 0);
}

#[tokio::test]
async fn test_course_record_is_fully_loaded() {
    let (db, campus_id) = seeded().await;
    let id = id_of::<courses::Entity>(&db, courses::Column::Code, "10020").await;

    let record = QueryCourseService::get_course(&db, id, Some(campus_id))
        .await
        .unwrap();

    assert_eq!(record.name(), "Software Engineering");
    assert_eq!(record.subject.code, "CSE4006");
    assert_eq!(record.department_ids.len(), 2);
    assert!(matches!(
        record.detail,
        CourseDetail::Major(ref major) if major.target_grade == Some(3)
    ));

    let days: Vec<i32> = record.classes.iter().map(|c| c.day_of_week).collect();
    assert_eq!(
        days,
        vec![
            i32::from(DayOfWeek::TUESDAY),
            i32::from(DayOfWeek::THURSDAY)
        ]
    );
}

#[tokio::test]
async fn test_course_outside_campus_is_not_found() {
    let (db, _) = seeded().await;
    let other = campus(&db, "ERICA").await;
    let id = id_of::<courses::Entity>(&db, courses::Column::Code, "10020").await;

    let result = QueryCourseService::get_course(&db, id, Some(other.id)).await;
    assert!(matches!(result, Err(ServiceError::NotFound)));

    let missing = QueryCourseService::get_course(&db, id + 1000, None).await;
    assert!(matches!(missing, Err(ServiceError::NotFound)));
}

#[tokio::test]
async fn test_search_matches_every_word_case_insensitively() {
    let (db, _) = seeded().await;

    let by_instructor = search(
        &db,
        CourseFilter {
            instructor: Some("YOON sunny".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(by_instructor, vec!["10020"]);

    let any_yoon = search(
        &db,
        CourseFilter {
            instructor: Some("yoon".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(any_yoon, vec!["10020", "10022"]);

    let by_name = search(
        &db,
        CourseFilter {
            name: Some("writing academic".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(by_name, vec!["10021", "10022"]);

    let by_subject_code = search(
        &db,
        CourseFilter {
            subject_code: Some("cse".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(by_subject_code, vec!["10020"]);
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let (db, _) = seeded().await;

    let courses = search(
        &db,
        CourseFilter {
            instructor: Some("%".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(courses.is_empty());
}

#[tokio::test]
async fn test_search_filters_combine() {
    let (db, campus_id) = seeded().await;
    let science = id_of::<gen_edu_categories::Entity>(
        &db,
        gen_edu_categories::Column::Code,
        "SCI",
    )
    .await;
    let ee = id_of::<departments::Entity>(&db, departments::Column::Code, "H3HAEE").await;

    let general_science = search(
        &db,
        CourseFilter {
            course_type: Some(CourseType::General),
            category_id: Some(science),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(general_science, vec!["10021"]);

    let major_science = search(
        &db,
        CourseFilter {
            course_type: Some(CourseType::Major),
            category_id: Some(science),
            ..Default::default()
        },
    )
    .await;
    assert!(major_science.is_empty());

    let third_grade = search(
        &db,
        CourseFilter {
            target_grade: Some(3),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(third_grade, vec!["10020"]);

    let in_ee = search(
        &db,
        CourseFilter {
            department_id: Some(ee),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(in_ee, vec!["10020"]);

    // 10022 is not linked to any department
    let on_campus = search(
        &db,
        CourseFilter {
            campus_id: Some(campus_id),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(on_campus, vec!["10020", "10021"]);
}

#[tokio::test]
async fn test_missing_subtype_row_is_a_type_error() {
    let (db, _) = seeded().await;
    let id = id_of::<courses::Entity>(&db, courses::Column::Code, "10021").await;

    general_courses::Entity::delete_by_id(id)
        .exec(&db)
        .await
        .unwrap();

    let result = QueryCourseService::get_course(&db, id, None).await;
    assert!(
        matches!(result, Err(ServiceError::Database(DbErr::Type(_)))),
        "{result:?}"
    );
}
