use crate::{
    dtos::{
        catalog::SubjectResponse,
        page::{Page, PageParams},
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
use database::services::catalog::CatalogService;

/// Get paginated list of subjects
#[utoipa::path(
    get,
    path = "/subjects",
    params(PageParams),
    responses(
        (status = 200, description = "List of subjects retrieved successfully", body = Page<SubjectResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    tag = "Subjects"
)]
pub async fn get_subjects(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<SubjectResponse>>, ApiError> {
    let Query(params) = query?;
    let request = params.to_request(state.max_results_per_page)?;

    let subjects = CatalogService::list_subjects(&state.db, request).await?;
    Ok(Json(subjects.into()))
}

/// Get a specific subject by ID
#[utoipa::path(
    get,
    path = "/subjects/{id}",
    params(
        ("id" = i32, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject found", body = SubjectResponse),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    tag = "Subjects"
)]
pub async fn get_subject_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<SubjectResponse>, ApiError> {
    let Path(id) = path?;

    let subject = CatalogService::get_subject(&state.db, id).await?;
    Ok(Json(subject.into()))
}
