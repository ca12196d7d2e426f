use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use kasfolio_core::errors::{DatabaseError, Error, ValidationError};

pub type ApiResult<T> = Result<T, ApiError>;

/// Error leaving the HTTP boundary.
///
/// Handlers bubble `kasfolio_core::Error` up with `?`; the conversion below
/// decides the status code and a stable machine-readable `code` so clients
/// do not have to parse messages.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self.message);
        }
        let body = ErrorBody {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::Database(DatabaseError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            Error::Database(DatabaseError::UniqueViolation(_)) => {
                (StatusCode::CONFLICT, "conflict")
            }
            Error::Database(DatabaseError::ForeignKeyViolation(_)) => {
                (StatusCode::CONFLICT, "foreign_key_violation")
            }
            Error::ConstraintViolation(_) => (StatusCode::CONFLICT, "conflict"),
            Error::Validation(ValidationError::MissingField(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "missing_field")
            }
            Error::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_input"),
            Error::Currency(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_amount"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };
        Self {
            status,
            code,
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found: ApiError =
            Error::Database(DatabaseError::NotFound("budget missing".into())).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let invalid: ApiError =
            Error::Validation(ValidationError::InvalidInput("bad".into())).into();
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.code, "invalid_input");

        let fk: ApiError =
            Error::Database(DatabaseError::ForeignKeyViolation("no budget".into())).into();
        assert_eq!(fk.status, StatusCode::CONFLICT);

        let other: ApiError = Error::Unexpected("boom".into()).into();
        assert_eq!(other.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
