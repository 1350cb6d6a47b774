//! Read-only REST API over the course catalog.

pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use crate::{
    doc::ApiDoc,
    routes::{campus, course, department, gen_edu_category, health, root, subject},
    state::AppState,
};
use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router with every route, the docs and compression
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/campuses", get(campus::get_campuses))
        .route("/campuses/{campus_id}", get(campus::get_campus_by_id))
        .route(
            "/campuses/{campus_id}/departments",
            get(department::get_campus_departments),
        )
        .route(
            "/campuses/{campus_id}/departments/{id}",
            get(department::get_campus_department_by_id),
        )
        .route(
            "/campuses/{campus_id}/courses",
            get(course::get_campus_courses),
        )
        .route(
            "/campuses/{campus_id}/courses/{id}",
            get(course::get_campus_course_by_id),
        )
        .route("/departments", get(department::get_departments))
        .route("/departments/{id}", get(department::get_department_by_id))
        .route("/subjects", get(subject::get_subjects))
        .route("/subjects/{id}", get(subject::get_subject_by_id))
        .route(
            "/gen_edu_categories",
            get(gen_edu_category::get_gen_edu_categories),
        )
        .route(
            "/gen_edu_categories/{id}",
            get(gen_edu_category::get_gen_edu_category_by_id),
        )
        .route("/courses", get(course::get_courses))
        .route("/courses/{id}", get(course::get_course_by_id))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
