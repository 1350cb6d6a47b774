use crate::{
    dtos::{
        catalog::GenEduCategoryResponse,
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

/// Get paginated list of general education categories
#[utoipa::path(
    get,
    path = "/gen_edu_categories",
    params(PageParams),
    responses(
        (status = 200, description = "List of categories retrieved successfully", body = Page<GenEduCategoryResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Page out of range", body = ErrorResponse)
    ),
    tag = "General Education Categories"
)]
pub async fn get_gen_edu_categories(
    State(state): State<AppState>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<GenEduCategoryResponse>>, ApiError> {
    let Query(params) = query?;
    let request = params.to_request(state.max_results_per_page)?;

    let categories = CatalogService::list_gen_edu_categories(&state.db, request).await?;
    Ok(Json(categories.into()))
}

/// Get a specific general education category by ID
#[utoipa::path(
    get,
    path = "/gen_edu_categories/{id}",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = GenEduCategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    ),
    tag = "General Education Categories"
)]
pub async fn get_gen_edu_category_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<GenEduCategoryResponse>, ApiError> {
    let Path(id) = path?;

    let category = CatalogService::get_gen_edu_category(&state.db, id).await?;
    Ok(Json(category.into()))
}
