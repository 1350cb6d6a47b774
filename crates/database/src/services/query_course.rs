use crate::{
    entities::{
        course_classes, courses, department_courses, departments, general_courses, major_courses,
        subjects,
    },
    error::ServiceError,
    services::pagination::{PageRequest, Paginated, fetch_page},
};
use models::CourseType;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait,
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr},
};
use std::collections::{HashMap, HashSet};

/// Filters for course search. Every present field must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    /// Words matched against the subject name
    pub name: Option<String>,
    /// Words matched against the subject code
    pub subject_code: Option<String>,
    /// Words matched against the instructor
    pub instructor: Option<String>,
    pub course_type: Option<CourseType>,
    pub category_id: Option<i32>,
    pub target_grade: Option<i32>,
    pub department_id: Option<i32>,
    /// Keeps courses linked to at least one department of the campus
    pub campus_id: Option<i32>,
}

impl CourseFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(words) = self.name.as_deref().and_then(|name| {
            words_condition((subjects::Entity, subjects::Column::Name), name)
        }) {
            condition = condition.add(
                courses::Column::SubjectId.in_subquery(
                    subjects::Entity::find()
                        .select_only()
                        .column(subjects::Column::Id)
                        .filter(words)
                        .into_query(),
                ),
            );
        }

        if let Some(words) = self.subject_code.as_deref().and_then(|code| {
            words_condition((subjects::Entity, subjects::Column::Code), code)
        }) {
            condition = condition.add(
                courses::Column::SubjectId.in_subquery(
                    subjects::Entity::find()
                        .select_only()
                        .column(subjects::Column::Id)
                        .filter(words)
                        .into_query(),
                ),
            );
        }

        if let Some(words) = self.instructor.as_deref().and_then(|instructor| {
            words_condition((courses::Entity, courses::Column::Instructor), instructor)
        }) {
            condition = condition.add(words);
        }

        if let Some(course_type) = self.course_type {
            condition = condition.add(courses::Column::CourseType.eq(course_type));
        }

        if let Some(category_id) = self.category_id {
            condition = condition.add(
                courses::Column::Id.in_subquery(
                    general_courses::Entity::find()
                        .select_only()
                        .column(general_courses::Column::Id)
                        .filter(general_courses::Column::CategoryId.eq(category_id))
                        .into_query(),
                ),
            );
        }

        if let Some(target_grade) = self.target_grade {
            condition = condition.add(
                courses::Column::Id.in_subquery(
                    major_courses::Entity::find()
                        .select_only()
                        .column(major_courses::Column::Id)
                        .filter(major_courses::Column::TargetGrade.eq(target_grade))
                        .into_query(),
                ),
            );
        }

        if let Some(department_id) = self.department_id {
            condition = condition.add(
                courses::Column::Id.in_subquery(
                    department_courses::Entity::find()
                        .select_only()
                        .column(department_courses::Column::CourseId)
                        .filter(department_courses::Column::DepartmentId.eq(department_id))
                        .into_query(),
                ),
            );
        }

        if let Some(campus_id) = self.campus_id {
            condition = condition.add(
                courses::Column::Id.in_subquery(
                    department_courses::Entity::find()
                        .select_only()
                        .column(department_courses::Column::CourseId)
                        .filter(
                            department_courses::Column::DepartmentId.in_subquery(
                                departments::Entity::find()
                                    .select_only()
                                    .column(departments::Column::Id)
                                    .filter(departments::Column::CampusId.eq(campus_id))
                                    .into_query(),
                            ),
                        )
                        .into_query(),
                ),
            );
        }

        condition
    }
}

/// Case-insensitive containment of every whitespace separated word of `text`.
/// Returns `None` when `text` has no words.
fn words_condition<C>(column: C, text: &str) -> Option<Condition>
where
    C: IntoColumnRef + Copy,
{
    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if words.is_empty() {
        return None;
    }

    let condition = words.iter().fold(Condition::all(), |condition, word| {
        condition.add(
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(format!("%{}%", escape_like(word))).escape('\\')),
        )
    });

    Some(condition)
}

/// Escapes LIKE wildcards so user input only matches literally
fn escape_like(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len());
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Subtype row of a course, matching its `course_type`
#[derive(Debug, Clone, PartialEq)]
pub enum CourseDetail {
    General(general_courses::Model),
    Major(major_courses::Model),
}

/// A course with everything needed to render it
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub course: courses::Model,
    pub subject: subjects::Model,
    pub detail: CourseDetail,
    /// Ordered by day, then start period
    pub classes: Vec<course_classes::Model>,
    pub department_ids: Vec<i32>,
}

impl CourseRecord {
    /// Courses are named after their subject
    pub fn name(&self) -> &str {
        &self.subject.name
    }
}

pub struct QueryCourseService;

impl QueryCourseService {
    /// Query courses with pagination and filtering, ordered by id
    pub async fn get_courses_paginated(
        db: &DatabaseConnection,
        filter: &CourseFilter,
        request: PageRequest,
    ) -> Result<Paginated<CourseRecord>, ServiceError> {
        let query = courses::Entity::find()
            .filter(filter.condition())
            .order_by_asc(courses::Column::Id);

        let mut page = fetch_page(db, query, request).await?;
        let courses = std::mem::take(&mut page.items);
        let records = Self::load_records(db, courses).await?;

        Ok(page.with_items(records))
    }

    /// Get a single course, optionally scoped to a campus
    pub async fn get_course(
        db: &DatabaseConnection,
        course_id: i32,
        campus_id: Option<i32>,
    ) -> Result<CourseRecord, ServiceError> {
        let filter = CourseFilter {
            campus_id,
            ..Default::default()
        };

        let course = courses::Entity::find_by_id(course_id)
            .filter(filter.condition())
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound)?;

        Self::load_records(db, vec![course])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound)
    }

    /// Batch loads subjects, subtype rows, classes and department links for `courses`,
    /// keeping their order
    async fn load_records(
        db: &DatabaseConnection,
        courses: Vec<courses::Model>,
    ) -> Result<Vec<CourseRecord>, ServiceError> {
        if courses.is_empty() {
            return Ok(vec![]);
        }

        let course_ids: Vec<i32> = courses.iter().map(|c| c.id).collect();
        let subject_ids: Vec<i32> = courses
            .iter()
            .map(|c| c.subject_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let (subjects, generals, majors, classes, links) = futures::try_join!(
            subjects::Entity::find()
                .filter(subjects::Column::Id.is_in(subject_ids))
                .all(db),
            general_courses::Entity::find()
                .filter(general_courses::Column::Id.is_in(course_ids.clone()))
                .all(db),
            major_courses::Entity::find()
                .filter(major_courses::Column::Id.is_in(course_ids.clone()))
                .all(db),
            course_classes::Entity::find()
                .filter(course_classes::Column::CourseId.is_in(course_ids.clone()))
                .order_by_asc(course_classes::Column::DayOfWeek)
                .order_by_asc(course_classes::Column::StartPeriod)
                .order_by_asc(course_classes::Column::Id)
                .all(db),
            department_courses::Entity::find()
                .filter(department_courses::Column::CourseId.is_in(course_ids))
                .order_by_asc(department_courses::Column::DepartmentId)
                .all(db),
        )?;

        // Build lookup maps
        let subjects_by_id: HashMap<i32, subjects::Model> =
            subjects.into_iter().map(|s| (s.id, s)).collect();
        let mut generals_by_id: HashMap<i32, general_courses::Model> =
            generals.into_iter().map(|g| (g.id, g)).collect();
        let mut majors_by_id: HashMap<i32, major_courses::Model> =
            majors.into_iter().map(|m| (m.id, m)).collect();

        let mut classes_by_course: HashMap<i32, Vec<course_classes::Model>> = HashMap::new();
        for class in classes {
            classes_by_course
                .entry(class.course_id)
                .or_default()
                .push(class);
        }

        let mut departments_by_course: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in links {
            departments_by_course
                .entry(link.course_id)
                .or_default()
                .push(link.department_id);
        }

        let mut records = Vec::with_capacity(courses.len());
        for course in courses {
            let subject = subjects_by_id
                .get(&course.subject_id)
                .cloned()
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!(
                        "subject {} of course {}",
                        course.subject_id, course.code
                    ))
                })?;

            let detail = match course.course_type {
                CourseType::General => generals_by_id
                    .remove(&course.id)
                    .map(CourseDetail::General),
                CourseType::Major => majors_by_id.remove(&course.id).map(CourseDetail::Major),
            }
            .ok_or_else(|| {
                DbErr::Type(format!(
                    "course {} is typed '{}' but has no matching subtype row",
                    course.code, course.course_type
                ))
            })?;

            records.push(CourseRecord {
                classes: classes_by_course.remove(&course.id).unwrap_or_default(),
                department_ids: departments_by_course
                    .remove(&course.id)
                    .unwrap_or_default(),
                course,
                subject,
                detail,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, QueryTrait};

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_sure\\"), "100\\%\\_sure\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_blank_words_add_no_condition() {
        assert!(words_condition((courses::Entity, courses::Column::Instructor), "  ").is_none());
    }

    #[test]
    fn test_filter_builds_subqueries() {
        let filter = CourseFilter {
            name: Some("Software Engineering".to_string()),
            course_type: Some(CourseType::General),
            campus_id: Some(1),
            ..Default::default()
        };

        let sql = courses::Entity::find()
            .filter(filter.condition())
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""courses"."subject_id" IN (SELECT"#), "{sql}");
        assert!(sql.contains(r#"LOWER("subjects"."name") LIKE '%software%'"#), "{sql}");
        assert!(sql.contains(r#"LOWER("subjects"."name") LIKE '%engineering%'"#), "{sql}");
        assert!(sql.contains(r#""courses"."type" = 'general'"#), "{sql}");
        assert!(sql.contains(r#""departments"."campus_id" = 1"#), "{sql}");
    }
}
