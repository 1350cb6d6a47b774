use crate::{
    dtos::{
        catalog::CampusResponse,
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

/// Get paginated list of campuses with their departments
#[utoipa::path(
    get,
    path = "/campuses",
    params(PageParams),
    responses(
        (status = 200, description = "List of campuses retrieved successfully", body = Page<CampusResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Campuses"
)]
pub async fn get_campuses(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<CampusResponse>>, ApiError> {
    let Query(params) = query?;
    let request = params.to_request(state.max_results_per_page)?;

    let campuses = CatalogService::list_campuses(&state.db, request).await?;
    Ok(Json(campuses.into()))
}

/// Get a specific campus by ID
#[utoipa::path(
    get,
    path = "/campuses/{campus_id}",
    params(
        ("campus_id" = i32, Path, description = "Campus ID")
    ),
    responses(
        (status = 200, description = "Campus found", body = CampusResponse),
        (status = 404, description = "Campus not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Campuses"
)]
pub async fn get_campus_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<CampusResponse>, ApiError> {
    let Path(campus_id) = path?;

    let campus = CatalogService::get_campus(&state.db, campus_id).await?;
    Ok(Json(campus.into()))
}
