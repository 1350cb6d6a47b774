use crate::error::ServiceError;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, ItemsAndPagesNumber, PaginatorTrait, Select,
};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 20;

/// A 1-based page of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    /// Returns `None` when either value is zero
    pub fn new(page: u64, per_page: u64) -> Option<Self> {
        (page > 0 && per_page > 0).then_some(Self { page, per_page })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub num_pages: u64,
}

impl<T> Paginated<T> {
    /// Swaps the items of the page, keeping its counters
    pub fn with_items<U>(self, items: Vec<U>) -> Paginated<U> {
        Paginated {
            items,
            total: self.total,
            page: self.page,
            num_pages: self.num_pages,
        }
    }
}

/// Fetches one page of `select`, which should already be ordered.
///
/// A page past the end of a non-empty collection is reported as
/// [`ServiceError::NotFound`]; the first page of an empty collection is not.
pub async fn fetch_page<E, M>(
    db: &DatabaseConnection,
    select: Select<E>,
    request: PageRequest,
) -> Result<Paginated<M>, ServiceError>
where
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'static,
{
    let paginator = select.paginate(db, request.per_page);
    let ItemsAndPagesNumber {
        number_of_items,
        number_of_pages,
    } = paginator.num_items_and_pages().await?;

    if request.page > number_of_pages.max(DEFAULT_PAGE) {
        return Err(ServiceError::NotFound);
    }

    // SeaORM uses 0-based pages
    let items = paginator.fetch_page(request.page - 1).await?;

    Ok(Paginated {
        items,
        total: number_of_items,
        page: request.page,
        num_pages: number_of_pages,
    })
}
