mod common;

use common::{campus, period, sample_catalog, setup_db};
use database::{
    ServiceError,
    entities::{
        course_classes, courses, department_courses, departments, gen_edu_categories,
        general_courses, major_courses, subjects,
    },
    services::sync::{CatalogSyncService, SyncCounts},
};
use models::{
    Catalog, Course, CourseKind, CourseType, DayOfWeek, Department, GenEduCategory, Subject,
    ValidationError,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use std::collections::HashMap;

/// Every stored row rendered without surrogate ids, sorted
async fn snapshot(db: &DatabaseConnection) -> Vec<String> {
    let departments = departments::Entity::find().all(db).await.unwrap();
    let subjects = subjects::Entity::find().all(db).await.unwrap();
    let categories = gen_edu_categories::Entity::find().all(db).await.unwrap();
    let courses = courses::Entity::find().all(db).await.unwrap();

    let department_codes: HashMap<i32, String> =
        departments.iter().map(|d| (d.id, d.code.clone())).collect();
    let subject_codes: HashMap<i32, String> =
        subjects.iter().map(|s| (s.id, s.code.clone())).collect();
    let category_codes: HashMap<i32, String> =
        categories.iter().map(|c| (c.id, c.code.clone())).collect();
    let course_codes: HashMap<i32, String> =
        courses.iter().map(|c| (c.id, c.code.clone())).collect();

    let mut rows = Vec::new();
    rows.extend(
        departments
            .iter()
            .map(|d| format!("department {} {} campus={}", d.code, d.name, d.campus_id)),
    );
    rows.extend(subjects.iter().map(|s| format!("subject {} {}", s.code, s.name)));
    rows.extend(categories.iter().map(|c| format!("category {} {}", c.code, c.name)));
    rows.extend(courses.iter().map(|c| {
        format!(
            "course {} {} {:?} {} {}",
            c.code, c.course_type, c.instructor, c.credit, subject_codes[&c.subject_id]
        )
    }));

    for general in general_courses::Entity::find().all(db).await.unwrap() {
        rows.push(format!(
            "general {} {}",
            course_codes[&general.id], category_codes[&general.category_id]
        ));
    }
    for major in major_courses::Entity::find().all(db).await.unwrap() {
        rows.push(format!(
            "major {} {:?}",
            course_codes[&major.id], major.target_grade
        ));
    }
    for class in course_classes::Entity::find().all(db).await.unwrap() {
        rows.push(format!(
            "class {} {} {}-{}",
            course_codes[&class.course_id], class.day_of_week, class.start_period, class.end_period
        ));
    }
    for link in department_courses::Entity::find().all(db).await.unwrap() {
        rows.push(format!(
            "link {} {}",
            department_codes[&link.department_id], course_codes[&link.course_id]
        ));
    }

    rows.sort();
    rows
}

async fn course_by_code(db: &DatabaseConnection, code: &str) -> courses::Model {
    courses::Entity::find()
        .filter(courses::Column::Code.eq(code))
        .one(db)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("course {code} is not stored"))
}

#[tokio::test]
async fn test_sync_creates_new_entities() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;

    let report = CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();

    let created = |created| SyncCounts {
        created,
        ..Default::default()
    };
    assert_eq!(report.departments, created(2));
    assert_eq!(report.subjects, created(2));
    assert_eq!(report.gen_edu_categories, created(2));
    assert_eq!(report.courses, created(3));

    let stored_departments = departments::Entity::find().all(&db).await.unwrap();
    assert!(stored_departments.iter().all(|d| d.campus_id == campus.id));

    let major = course_by_code(&db, "10020").await;
    assert_eq!(major.course_type, CourseType::Major);
    assert_eq!(major.instructor.as_deref(), Some("Sunny Yoon"));
    assert_eq!(major.credit, 3.0);

    let major_row = major_courses::Entity::find_by_id(major.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(major_row.target_grade, Some(3));
    assert!(
        general_courses::Entity::find_by_id(major.id)
            .one(&db)
            .await
            .unwrap()
            .is_none()
    );

    let classes = course_classes::Entity::find()
        .filter(course_classes::Column::CourseId.eq(major.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(classes, 2);
}

#[tokio::test]
async fn test_sync_persists_many_to_many_links() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;
    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();

    let major = course_by_code(&db, "10020").await;
    let mut linked: Vec<String> = department_courses::Entity::find()
        .filter(department_courses::Column::CourseId.eq(major.id))
        .find_also_related(departments::Entity)
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|(_, department)| department.map(|d| d.code))
        .collect();
    linked.sort();
    assert_eq!(linked, vec!["H3HADD", "H3HAEE"]);

    // The computer science department sees both of its courses
    let cs = departments::Entity::find()
        .filter(departments::Column::Code.eq("H3HADD"))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let cs_courses = department_courses::Entity::find()
        .filter(department_courses::Column::DepartmentId.eq(cs.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(cs_courses, 2);
}

#[tokio::test]
async fn test_sync_removes_entities_missing_from_batch() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;
    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();

    let cs = Department::new("H3HADD", "Computer Science");
    let writing = Subject::new("GEN1001", "Academic Writing");
    let science = GenEduCategory::new("SCI", "Science and Technology");
    let mut general = Course::new("10021", &writing, 2.0, CourseKind::general(&science)).unwrap();
    general.add_department(&cs);

    let mut catalog = Catalog::new();
    catalog.hold_departments([cs]);
    catalog.hold_subjects([writing]);
    catalog.hold_gen_edu_categories([science]);
    catalog.hold_courses([general]);

    let report = CatalogSyncService::update_catalog(&db, &campus, &catalog)
        .await
        .unwrap();

    assert_eq!(report.departments.deleted, 1);
    assert_eq!(report.subjects.deleted, 1);
    assert_eq!(report.gen_edu_categories.deleted, 1);
    // 10020 goes with its subject; 10022 lost its category row and is pruned by code
    assert_eq!(report.courses.updated, 1);
    assert_eq!(report.courses.deleted, 1);

    assert_eq!(
        snapshot(&db).await,
        vec![
            "category SCI Science and Technology".to_string(),
            "course 10021 general None 2 GEN1001".to_string(),
            format!("department H3HADD Computer Science campus={}", campus.id),
            "general 10021 SCI".to_string(),
            "link H3HADD 10021".to_string(),
            "subject GEN1001 Academic Writing".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_sync_prunes_courses_by_code() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;
    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();

    let full = sample_catalog();
    let mut catalog = Catalog::new();
    catalog.hold_departments(full.departments().to_vec());
    catalog.hold_subjects(full.subjects().to_vec());
    catalog.hold_gen_edu_categories(full.gen_edu_categories().to_vec());
    catalog.hold_courses(full.courses().iter().filter(|c| c.code != "10022").cloned());

    let report = CatalogSyncService::update_catalog(&db, &campus, &catalog)
        .await
        .unwrap();

    assert_eq!(
        report.courses,
        SyncCounts {
            created: 0,
            updated: 2,
            deleted: 1
        }
    );
    assert_eq!(courses::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(general_courses::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_sync_updates_existing_entities() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;
    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();
    let before = course_by_code(&db, "10020").await;

    let cs = Department::new("H3HADD", "Computer Science and Engineering");
    let software = Subject::new("CSE4006", "Software Engineering Studio");
    let mut major = Course::new("10020", &software, 4.0, CourseKind::major(None).unwrap())
        .unwrap()
        .with_instructor("Jiwon Park");
    major.add_department(&cs);
    major.add_class(period(DayOfWeek::FRIDAY, 5, 7));

    let mut catalog = Catalog::new();
    catalog.hold_departments([cs]);
    catalog.hold_subjects([software]);
    catalog.hold_courses([major]);

    let report = CatalogSyncService::update_catalog(&db, &campus, &catalog)
        .await
        .unwrap();
    assert_eq!(report.departments.updated, 1);
    assert_eq!(report.subjects.updated, 1);
    assert_eq!(report.courses.updated, 1);

    let after = course_by_code(&db, "10020").await;
    assert_eq!(after.id, before.id);
    assert_eq!(after.instructor.as_deref(), Some("Jiwon Park"));
    assert_eq!(after.credit, 4.0);

    assert_eq!(
        snapshot(&db).await,
        vec![
            "class 10020 4 5-7".to_string(),
            "course 10020 major Some(\"Jiwon Park\") 4 CSE4006".to_string(),
            format!(
                "department H3HADD Computer Science and Engineering campus={}",
                campus.id
            ),
            "link H3HADD 10020".to_string(),
            "major 10020 None".to_string(),
            "subject CSE4006 Software Engineering Studio".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_sync_changes_course_type() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;
    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();
    let general = course_by_code(&db, "10021").await;
    assert_eq!(general.course_type, CourseType::General);

    let writing = Subject::new("GEN1001", "Academic Writing");
    let mut catalog = Catalog::new();
    catalog.hold_subjects([writing.clone()]);
    catalog.hold_courses([
        Course::new("10021", &writing, 2.0, CourseKind::major(Some(1)).unwrap()).unwrap(),
    ]);

    CatalogSyncService::update_catalog(&db, &campus, &catalog)
        .await
        .unwrap();

    let major = course_by_code(&db, "10021").await;
    assert_eq!(major.id, general.id);
    assert_eq!(major.course_type, CourseType::Major);
    assert!(
        general_courses::Entity::find_by_id(major.id)
            .one(&db)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(
        major_courses::Entity::find_by_id(major.id)
            .one(&db)
            .await
            .unwrap()
            .and_then(|m| m.target_grade),
        Some(1)
    );
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;

    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();
    let first = snapshot(&db).await;

    let report = CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();
    let second = snapshot(&db).await;

    assert_eq!(first, second);
    assert_eq!(
        report.courses,
        SyncCounts {
            created: 0,
            updated: 3,
            deleted: 0
        }
    );
}

#[tokio::test]
async fn test_failed_sync_rolls_back() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;
    CatalogSyncService::update_catalog(&db, &campus, &sample_catalog())
        .await
        .unwrap();
    let before = snapshot(&db).await;

    // The course points at a department that is not part of the batch
    let software = Subject::new("CSE4006", "Renamed");
    let mut orphan =
        Course::new("99999", &software, 1.0, CourseKind::major(None).unwrap()).unwrap();
    orphan.add_department(&Department::new("NOWHERE", "Nowhere"));

    let mut catalog = Catalog::new();
    catalog.hold_subjects([software]);
    catalog.hold_courses([orphan]);

    let err = CatalogSyncService::update_catalog(&db, &campus, &catalog)
        .await
        .unwrap_err();
    assert!(
        matches!(
            &err,
            ServiceError::UnresolvedReference { kind: "department", code, course }
                if code == "NOWHERE" && course == "99999"
        ),
        "{err:?}"
    );

    // Deletes and renames made before the failure are gone too
    assert_eq!(snapshot(&db).await, before);
}

#[tokio::test]
async fn test_invalid_batch_writes_nothing() {
    let db = setup_db().await;
    let campus = campus(&db, "SEOUL").await;

    let mut catalog = sample_catalog();
    catalog.hold_departments([Department::new("H3HADD", "Duplicate")]);

    let err = CatalogSyncService::update_catalog(&db, &campus, &catalog)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateCode {
            kind: "department",
            ..
        })
    ));
    assert!(snapshot(&db).await.is_empty());
}

#[tokio::test]
async fn test_departments_are_scoped_to_campus() {
    let db = setup_db().await;
    let seoul = campus(&db, "SEOUL").await;
    let erica = campus(&db, "ERICA").await;

    CatalogSyncService::update_catalog(&db, &seoul, &sample_catalog())
        .await
        .unwrap();

    let full = sample_catalog();
    let mut catalog = Catalog::new();
    catalog.hold_departments([Department::new("H3HADD", "Computer Science")]);
    catalog.hold_subjects(full.subjects().to_vec());
    catalog.hold_gen_edu_categories(full.gen_edu_categories().to_vec());

    let report = CatalogSyncService::update_catalog(&db, &erica, &catalog)
        .await
        .unwrap();

    // The same code on another campus is a different department
    assert_eq!(report.departments.created, 1);
    assert_eq!(report.departments.deleted, 0);

    let count_for = |campus_id: i32| {
        departments::Entity::find()
            .filter(departments::Column::CampusId.eq(campus_id))
            .count(&db)
    };
    assert_eq!(count_for(seoul.id).await.unwrap(), 2);
    assert_eq!(count_for(erica.id).await.unwrap(), 1);
}
