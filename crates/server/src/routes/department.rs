use crate::{
    dtos::{
        catalog::DepartmentResponse,
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

/// Get paginated list of departments
#[utoipa::path(
    get,
    path = "/departments",
    params(PageParams),
    responses(
        (status = 200, description = "List of departments retrieved successfully", body = Page<DepartmentResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    tag = "Departments"
)]
pub async fn get_departments(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<DepartmentResponse>>, ApiError> {
    let Query(params) = query?;
    list(&state, None, &params).await
}

/// Get a specific department by ID
#[utoipa::path(
    get,
    path = "/departments/{id}",
    params(
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = DepartmentResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    tag = "Departments"
)]
pub async fn get_department_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let Path(id) = path?;

    let department = CatalogService::get_department(&state.db, id, None).await?;
    Ok(Json(department.into()))
}

/// Get paginated list of the departments of a campus
#[utoipa::path(
    get,
    path = "/campuses/{campus_id}/departments",
    params(
        ("campus_id" = i32, Path, description = "Campus ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "List of departments retrieved successfully", body = Page<DepartmentResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    tag = "Departments"
)]
pub async fn get_campus_departments(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<DepartmentResponse>>, ApiError> {
    let Path(campus_id) = path?;
    let Query(params) = query?;
    list(&state, Some(campus_id), &params).await
}

/// Get a department of a campus
#[utoipa::path(
    get,
    path = "/campuses/{campus_id}/departments/{id}",
    params(
        ("campus_id" = i32, Path, description = "Campus ID"),
        ("id" = i32, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = DepartmentResponse),
        (status = 404, description = "Department not found on this campus", body = ErrorResponse)
    ),
    tag = "Departments"
)]
pub async fn get_campus_department_by_id(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let Path((campus_id, id)) = path?;

    let department = CatalogService::get_department(&state.db, id, Some(campus_id)).await?;
    Ok(Json(department.into()))
}

async fn list(
    state: &AppState,
    campus_id: Option<i32>,
    params: &PageParams,
) -> Result<Json<Page<DepartmentResponse>>, ApiError> {
    let request = params.to_request(state.max_results_per_page)?;

    let departments = CatalogService::list_departments(&state.db, campus_id, request).await?;
    Ok(Json(departments.into()))
}
