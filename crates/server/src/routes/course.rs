use crate::{
    dtos::{
        course::{CourseQueryParams, CourseResponse},
        page::Page,
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use database::services::query_course::QueryCourseService;

/// Search courses with pagination and filtering
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = Page<CourseResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    query: Result<Query<CourseQueryParams>, QueryRejection>,
) -> Result<Json<Page<CourseResponse>>, ApiError> {
    let Query(params) = query?;
    search(&state, None, &params).await
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<CourseResponse>, ApiError> {
    let Path(id) = path?;

    let course = QueryCourseService::get_course(&state.db, id, None).await?;
    Ok(Json(course.into()))
}

/// Search the courses offered by departments of a campus
#[utoipa::path(
    get,
    path = "/campuses/{campus_id}/courses",
    params(
        ("campus_id" = i32, Path, description = "Campus ID"),
        CourseQueryParams
    ),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = Page<CourseResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_campus_courses(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<CourseQueryParams>, QueryRejection>,
) -> Result<Json<Page<CourseResponse>>, ApiError> {
    let Path(campus_id) = path?;
    let Query(params) = query?;
    search(&state, Some(campus_id), &params).await
}

/// Get a course offered on a campus
#[utoipa::path(
    get,
    path = "/campuses/{campus_id}/courses/{id}",
    params(
        ("campus_id" = i32, Path, description = "Campus ID"),
        ("id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not offered on this campus", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_campus_course_by_id(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<CourseResponse>, ApiError> {
    let Path((campus_id, id)) = path?;

    let course = QueryCourseService::get_course(&state.db, id, Some(campus_id)).await?;
    Ok(Json(course.into()))
}

async fn search(
    state: &AppState,
    campus_id: Option<i32>,
    params: &CourseQueryParams,
) -> Result<Json<Page<CourseResponse>>, ApiError> {
    let filter = params.to_filter(campus_id)?;
    let request = params.page_params().to_request(state.max_results_per_page)?;

    let courses = QueryCourseService::get_courses_paginated(&state.db, &filter, request).await?;
    Ok(Json(courses.into()))
}
