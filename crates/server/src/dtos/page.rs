use crate::error::ApiError;
use database::services::pagination::{DEFAULT_PAGE, DEFAULT_PER_PAGE, PageRequest, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One page of a collection, sorted by id
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub num_results: u64,
    pub page: u64,
    pub num_pages: u64,
    pub objects: Vec<T>,
}

impl<T, U: Into<T>> From<Paginated<U>> for Page<T> {
    fn from(paginated: Paginated<U>) -> Self {
        Page {
            num_results: paginated.total,
            page: paginated.page,
            num_pages: paginated.num_pages,
            objects: paginated.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Page size, defaults to 20 and is capped by the server
    pub results_per_page: Option<u64>,
}

impl PageParams {
    pub fn to_request(&self, max_results_per_page: u64) -> Result<PageRequest, ApiError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let per_page = self
            .results_per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(max_results_per_page);

        PageRequest::new(page, per_page).ok_or_else(|| {
            ApiError::BadRequest("page and results_per_page must be positive".to_string())
        })
    }
}
