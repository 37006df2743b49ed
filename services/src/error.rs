use thiserror::Error;

/// Failure of an administrative service operation.
///
/// The public check-in path never produces these for business outcomes; it
/// reports them as `CheckinResult { ok: false, .. }` instead. Admin operations
/// surface them to the caller, which maps them onto HTTP statuses.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}
