//! One-way reconciliation of a scraped [`Catalog`] into storage.
//!
//! Every entity type is keyed by its natural `code`: stored rows missing from
//! the batch are deleted, rows present in both are overwritten from the batch,
//! and the rest of the batch is inserted. Departments are scoped to one campus,
//! every other type is global. The whole sync runs in a single transaction.

use crate::{
    entities::{
        campuses, course_classes, courses, department_courses, departments, gen_edu_categories,
        general_courses, major_courses, subjects,
    },
    error::ServiceError,
};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use models::{Catalog, Course, CourseKind, Department, GenEduCategory, Subject};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet, hash_map::Entry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncCounts {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// What a catalog sync changed, per entity type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub departments: SyncCounts,
    pub subjects: SyncCounts,
    pub gen_edu_categories: SyncCounts,
    pub courses: SyncCounts,
}

/// Natural key to surrogate id of the rows stored after a step
type CodeMap = HashMap<String, i32>;

struct References {
    departments: CodeMap,
    subjects: CodeMap,
    gen_edu_categories: CodeMap,
}

pub struct CatalogSyncService;

impl CatalogSyncService {
    /// The number of rows bound in a single statement
    const BATCH_SIZE: usize = 200;

    /// Reconciles storage with `catalog` for `campus`.
    ///
    /// Commits only if every step succeeds; any error rolls the whole sync back.
    pub async fn update_catalog(
        db: &DatabaseConnection,
        campus: &campuses::Model,
        catalog: &Catalog,
    ) -> Result<SyncReport, ServiceError> {
        catalog.validate()?;

        info!(
            "Syncing catalog for campus {}: {} departments, {} subjects, {} categories, {} courses",
            campus.code,
            catalog.departments().len(),
            catalog.subjects().len(),
            catalog.gen_edu_categories().len(),
            catalog.courses().len()
        );

        let txn = db.begin().await?;
        match Self::sync(&txn, campus, catalog).await {
            Ok(report) => {
                txn.commit().await?;
                info!("Catalog sync for campus {} committed: {report:?}", campus.code);
                Ok(report)
            }
            Err(e) => {
                warn!(
                    "Catalog sync for campus {} failed, rolling back: {e}",
                    campus.code
                );
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn sync(
        txn: &DatabaseTransaction,
        campus: &campuses::Model,
        catalog: &Catalog,
    ) -> Result<SyncReport, ServiceError> {
        let now = Utc::now();

        let (departments, department_counts) =
            Self::sync_departments(txn, campus.id, catalog.departments(), now).await?;
        let (subjects, subject_counts) = Self::sync_subjects(txn, catalog.subjects(), now).await?;
        let (gen_edu_categories, category_counts) =
            Self::sync_gen_edu_categories(txn, catalog.gen_edu_categories(), now).await?;

        let references = References {
            departments,
            subjects,
            gen_edu_categories,
        };
        let course_counts = Self::sync_courses(txn, catalog.courses(), &references, now).await?;

        Ok(SyncReport {
            departments: department_counts,
            subjects: subject_counts,
            gen_edu_categories: category_counts,
            courses: course_counts,
        })
    }

    async fn sync_departments(
        txn: &DatabaseTransaction,
        campus_id: i32,
        held: &[Department],
        now: DateTime<Utc>,
    ) -> Result<(CodeMap, SyncCounts), ServiceError> {
        let stored = departments::Entity::find()
            .filter(departments::Column::CampusId.eq(campus_id))
            .all(txn)
            .await?;

        let codes: HashSet<&str> = held.iter().map(|d| d.code.as_str()).collect();
        let (mut existing, stale) = partition_stored(stored, &codes, |d| &d.code, |d| d.id);

        let mut counts = SyncCounts {
            deleted: stale.len(),
            ..Default::default()
        };
        for ids in stale.chunks(Self::BATCH_SIZE) {
            departments::Entity::delete_many()
                .filter(departments::Column::Id.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
        }

        let mut stored_ids = CodeMap::with_capacity(held.len());
        for department in held {
            let model = match existing.remove(&department.code) {
                Some(stored) => {
                    counts.updated += 1;
                    let mut active = stored.into_active_model();
                    active.name = Set(department.name.clone());
                    active.campus_id = Set(campus_id);
                    active.update(txn).await?
                }
                None => {
                    counts.created += 1;
                    departments::ActiveModel {
                        code: Set(department.code.clone()),
                        name: Set(department.name.clone()),
                        campus_id: Set(campus_id),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?
                }
            };
            stored_ids.insert(model.code, model.id);
        }

        debug!("Departments synced: {counts:?}");
        Ok((stored_ids, counts))
    }

    async fn sync_subjects(
        txn: &DatabaseTransaction,
        held: &[Subject],
        now: DateTime<Utc>,
    ) -> Result<(CodeMap, SyncCounts), ServiceError> {
        let stored = subjects::Entity::find().all(txn).await?;

        let codes: HashSet<&str> = held.iter().map(|s| s.code.as_str()).collect();
        let (mut existing, stale) = partition_stored(stored, &codes, |s| &s.code, |s| s.id);

        let mut counts = SyncCounts {
            deleted: stale.len(),
            ..Default::default()
        };
        for ids in stale.chunks(Self::BATCH_SIZE) {
            subjects::Entity::delete_many()
                .filter(subjects::Column::Id.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
        }

        let mut stored_ids = CodeMap::with_capacity(held.len());
        for subject in held {
            let model = match existing.remove(&subject.code) {
                Some(stored) => {
                    counts.updated += 1;
                    let mut active = stored.into_active_model();
                    active.name = Set(subject.name.clone());
                    active.update(txn).await?
                }
                None => {
                    counts.created += 1;
                    subjects::ActiveModel {
                        code: Set(subject.code.clone()),
                        name: Set(subject.name.clone()),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?
                }
            };
            stored_ids.insert(model.code, model.id);
        }

        debug!("Subjects synced: {counts:?}");
        Ok((stored_ids, counts))
    }

    async fn sync_gen_edu_categories(
        txn: &DatabaseTransaction,
        held: &[GenEduCategory],
        now: DateTime<Utc>,
    ) -> Result<(CodeMap, SyncCounts), ServiceError> {
        let stored = gen_edu_categories::Entity::find().all(txn).await?;

        let codes: HashSet<&str> = held.iter().map(|c| c.code.as_str()).collect();
        let (mut existing, stale) = partition_stored(stored, &codes, |c| &c.code, |c| c.id);

        let mut counts = SyncCounts {
            deleted: stale.len(),
            ..Default::default()
        };
        for ids in stale.chunks(Self::BATCH_SIZE) {
            gen_edu_categories::Entity::delete_many()
                .filter(gen_edu_categories::Column::Id.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
        }

        let mut stored_ids = CodeMap::with_capacity(held.len());
        for category in held {
            let model = match existing.remove(&category.code) {
                Some(stored) => {
                    counts.updated += 1;
                    let mut active = stored.into_active_model();
                    active.name = Set(category.name.clone());
                    active.update(txn).await?
                }
                None => {
                    counts.created += 1;
                    gen_edu_categories::ActiveModel {
                        code: Set(category.code.clone()),
                        name: Set(category.name.clone()),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?
                }
            };
            stored_ids.insert(model.code, model.id);
        }

        debug!("General education categories synced: {counts:?}");
        Ok((stored_ids, counts))
    }

    async fn sync_courses(
        txn: &DatabaseTransaction,
        held: &[Course],
        references: &References,
        now: DateTime<Utc>,
    ) -> Result<SyncCounts, ServiceError> {
        // Read after the other types so cascaded deletes are already applied
        let stored = courses::Entity::find().all(txn).await?;

        let codes: HashSet<&str> = held.iter().map(|c| c.code.as_str()).collect();
        let (mut existing, stale) = partition_stored(stored, &codes, |c| &c.code, |c| c.id);

        let mut counts = SyncCounts {
            deleted: stale.len(),
            ..Default::default()
        };
        for ids in stale.chunks(Self::BATCH_SIZE) {
            courses::Entity::delete_many()
                .filter(courses::Column::Id.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
        }

        // Collect dependent rows for bulk insertion
        let mut replaced_ids = Vec::new();
        let mut all_general = Vec::new();
        let mut all_major = Vec::new();
        let mut all_classes = Vec::new();
        let mut all_links = Vec::new();

        for course in held {
            let subject_id = resolve(
                &references.subjects,
                "subject",
                course.subject_code(),
                course,
            )?;
            let department_ids = course
                .department_codes()
                .iter()
                .map(|code| resolve(&references.departments, "department", code, course))
                .collect::<Result<Vec<_>, _>>()?;

            let model = match existing.remove(&course.code) {
                Some(stored) => {
                    counts.updated += 1;
                    replaced_ids.push(stored.id);

                    let mut active = stored.into_active_model();
                    active.course_type = Set(course.course_type());
                    active.instructor = Set(course.instructor.clone());
                    active.credit = Set(course.credit());
                    active.subject_id = Set(subject_id);
                    active.update(txn).await?
                }
                None => {
                    counts.created += 1;
                    courses::ActiveModel {
                        code: Set(course.code.clone()),
                        course_type: Set(course.course_type()),
                        instructor: Set(course.instructor.clone()),
                        credit: Set(course.credit()),
                        subject_id: Set(subject_id),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?
                }
            };

            match &course.kind {
                CourseKind::General { category } => {
                    let category_id = resolve(
                        &references.gen_edu_categories,
                        "gen_edu_category",
                        category,
                        course,
                    )?;
                    all_general.push(general_courses::ActiveModel {
                        id: Set(model.id),
                        category_id: Set(category_id),
                    });
                }
                CourseKind::Major { target_grade } => {
                    all_major.push(major_courses::ActiveModel {
                        id: Set(model.id),
                        target_grade: Set(*target_grade),
                    });
                }
            }

            all_classes.extend(course.classes().iter().map(|class| {
                course_classes::ActiveModel {
                    course_id: Set(model.id),
                    day_of_week: Set(i32::from(class.day_of_week())),
                    start_period: Set(class.start_period()),
                    end_period: Set(class.end_period()),
                    created_at: Set(now),
                    ..Default::default()
                }
            }));

            all_links.extend(department_ids.into_iter().map(|department_id| {
                department_courses::ActiveModel {
                    department_id: Set(department_id),
                    course_id: Set(model.id),
                }
            }));
        }

        // Updated courses get their subtype row, classes and links replaced
        for ids in replaced_ids.chunks(Self::BATCH_SIZE) {
            general_courses::Entity::delete_many()
                .filter(general_courses::Column::Id.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
            major_courses::Entity::delete_many()
                .filter(major_courses::Column::Id.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
            course_classes::Entity::delete_many()
                .filter(course_classes::Column::CourseId.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
            department_courses::Entity::delete_many()
                .filter(department_courses::Column::CourseId.is_in(ids.to_vec()))
                .exec(txn)
                .await?;
        }

        // Bulk insert everything at once
        for batch in all_general.chunks(Self::BATCH_SIZE) {
            general_courses::Entity::insert_many(batch.to_vec())
                .exec_without_returning(txn)
                .await?;
        }
        for batch in all_major.chunks(Self::BATCH_SIZE) {
            major_courses::Entity::insert_many(batch.to_vec())
                .exec_without_returning(txn)
                .await?;
        }
        for batch in all_classes.chunks(Self::BATCH_SIZE) {
            course_classes::Entity::insert_many(batch.to_vec())
                .exec_without_returning(txn)
                .await?;
        }
        for batch in all_links.chunks(Self::BATCH_SIZE) {
            department_courses::Entity::insert_many(batch.to_vec())
                .exec_without_returning(txn)
                .await?;
        }

        debug!(
            "Courses synced: {counts:?}, {} classes, {} department links",
            all_classes.len(),
            all_links.len()
        );
        Ok(counts)
    }
}

/// Splits stored rows into those whose code is held, keyed by code, and the
/// ids of the rest. Stored rows repeating a held code are treated as stale.
fn partition_stored<M>(
    stored: Vec<M>,
    held: &HashSet<&str>,
    code: fn(&M) -> &String,
    id: fn(&M) -> i32,
) -> (HashMap<String, M>, Vec<i32>) {
    let mut kept = HashMap::with_capacity(held.len());
    let mut stale = Vec::new();

    for model in stored {
        if !held.contains(code(&model).as_str()) {
            stale.push(id(&model));
            continue;
        }

        match kept.entry(code(&model).clone()) {
            Entry::Occupied(_) => stale.push(id(&model)),
            Entry::Vacant(slot) => {
                slot.insert(model);
            }
        }
    }

    (kept, stale)
}

fn resolve(
    stored_ids: &CodeMap,
    kind: &'static str,
    code: &str,
    course: &Course,
) -> Result<i32, ServiceError> {
    stored_ids
        .get(code)
        .copied()
        .ok_or_else(|| ServiceError::UnresolvedReference {
            kind,
            code: code.to_string(),
            course: course.code.clone(),
        })
}
