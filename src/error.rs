//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("the referenced {kind} does not exist: id {id}")]
    MissingReference { kind: &'static str, id: i64 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
}

/// Classify driver errors: RowNotFound is a 404, foreign-key (23503) and
/// unique (23505) violations are conflicts, everything else is a storage fault.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(e, sqlx::Error::RowNotFound) {
            return AppError::NotFound("row not found".into());
        }
        let code = e
            .as_database_error()
            .and_then(|db| db.code().map(|c| c.into_owned()));
        match code.as_deref() {
            Some("23503") => AppError::Conflict("still referenced by existing pens".into()),
            Some("23505") => AppError::Conflict("duplicate value".into()),
            _ => AppError::Db(e),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MissingReference { .. } => (StatusCode::BAD_REQUEST, "missing_reference"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            code: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_differ_by_kind() {
        let cases = [
            (
                AppError::MissingReference { kind: "type", id: 9 },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::NotFound("pen 1".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("bad id".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("in use".into()), StatusCode::CONFLICT),
            (
                AppError::Db(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_and_code().0, status);
        }
    }

    #[test]
    fn missing_reference_names_the_kind() {
        let err = AppError::MissingReference { kind: "material", id: 42 };
        let msg = err.to_string();
        assert!(msg.contains("material"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
