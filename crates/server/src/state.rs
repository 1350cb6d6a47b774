use sea_orm::DatabaseConnection;

/// Shared by every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Upper bound applied to `results_per_page`
    pub max_results_per_page: u64,
}

impl AppState {
    pub fn new(db: DatabaseConnection, max_results_per_page: u64) -> Self {
        Self {
            db,
            max_results_per_page: max_results_per_page.max(1),
        }
    }
}
