use models::ValidationError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("course '{course}' references {kind} '{code}' which is not held in the catalog")]
    UnresolvedReference {
        kind: &'static str,
        code: String,
        course: String,
    },
}
