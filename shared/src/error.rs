use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("failed to run migrations")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ValidationError(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            AppError::EntityNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            e @ (AppError::SpecificOperationError(_)
            | AppError::MigrationError(_)
            | AppError::NoRowsAffectedError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_its_message() {
        let res = AppError::EntityNotFound("record not found".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            res.headers()[axum::http::header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn database_failures_are_internal_errors() {
        let res = AppError::SpecificOperationError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn no_rows_affected_is_internal_error() {
        let res = AppError::NoRowsAffectedError("books".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
