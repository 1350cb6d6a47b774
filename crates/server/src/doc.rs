use crate::routes::{campus, course, department, gen_edu_category, health, root, subject};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        campus::get_campuses,
        campus::get_campus_by_id,
        department::get_departments,
        department::get_department_by_id,
        department::get_campus_departments,
        department::get_campus_department_by_id,
        subject::get_subjects,
        subject::get_subject_by_id,
        gen_edu_category::get_gen_edu_categories,
        gen_edu_category::get_gen_edu_category_by_id,
        course::get_courses,
        course::get_course_by_id,
        course::get_campus_courses,
        course::get_campus_course_by_id
    ),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Campuses", description = "Campus related endpoints"),
        (name = "Departments", description = "Department related endpoints"),
        (name = "Subjects", description = "Subject related endpoints"),
        (name = "General Education Categories", description = "General education category endpoints"),
        (name = "Courses", description = "Course related endpoints"),
    ),
    info(
        title = "Course Catalog API",
        version = "1.0.0",
        description = "University course catalog API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
