use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Backend constraint violations, classified structurally from the driver
/// rather than by matching on error message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    ForeignKey,
    NotNull,
    Check,
    Unique,
}

impl ConstraintKind {
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintKind::ForeignKey => "foreign_key",
            ConstraintKind::NotNull => "not_null",
            ConstraintKind::Check => "check",
            ConstraintKind::Unique => "unique",
        }
    }

    // Operator-facing text, looked up from the classified kind.
    pub fn message(&self) -> &'static str {
        match self {
            ConstraintKind::ForeignKey => "a referenced record does not exist",
            ConstraintKind::NotNull => "a required field was left empty",
            ConstraintKind::Check => "a value was outside the allowed range",
            ConstraintKind::Unique => "an identical record already exists",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("insufficient stock of {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: i32,
        available: i32,
    },

    #[error("{}", .0.message())]
    Constraint(ConstraintKind),

    #[error("{service} request failed")]
    Upstream { service: &'static str },

    #[error("database error")]
    Database(sqlx::Error),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::InsufficientStock { .. } => "insufficient_stock",
            ServiceError::Constraint(kind) => kind.code(),
            ServiceError::Upstream { .. } => "upstream",
            ServiceError::Database(_) => "database",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InsufficientStock { .. } => StatusCode::CONFLICT,
            ServiceError::Constraint(_) => StatusCode::CONFLICT,
            ServiceError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return ServiceError::NotFound("record");
        }
        if let sqlx::Error::Database(ref db_err) = err {
            let kind = match db_err.kind() {
                sqlx::error::ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                sqlx::error::ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                sqlx::error::ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                sqlx::error::ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                _ => None,
            };
            if let Some(kind) = kind {
                return ServiceError::Constraint(kind);
            }
        }
        ServiceError::Database(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    error: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Driver details stay in the log, not in the response.
            ServiceError::Database(err) => {
                log::error!("database error: {err}");
                "internal database error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            code: self.code(),
            error: message,
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_stable_codes_and_statuses() {
        let cases: Vec<(ServiceError, StatusCode, &str)> = vec![
            (
                ServiceError::Validation("address is required".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
            ),
            (
                ServiceError::NotFound("booking"),
                StatusCode::NOT_FOUND,
                "not_found",
            ),
            (
                ServiceError::InsufficientStock {
                    product: "Double duvet cover".into(),
                    requested: 6,
                    available: 5,
                },
                StatusCode::CONFLICT,
                "insufficient_stock",
            ),
            (
                ServiceError::Constraint(ConstraintKind::ForeignKey),
                StatusCode::CONFLICT,
                "foreign_key",
            ),
            (
                ServiceError::Upstream { service: "invoicing" },
                StatusCode::BAD_GATEWAY,
                "upstream",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn constraint_kinds_have_operator_messages() {
        for kind in [
            ConstraintKind::ForeignKey,
            ConstraintKind::NotNull,
            ConstraintKind::Check,
            ConstraintKind::Unique,
        ] {
            assert!(!kind.message().is_empty());
            assert!(!kind.code().is_empty());
        }
    }

    #[test]
    fn row_not_found_classifies_as_not_found() {
        let err = ServiceError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
