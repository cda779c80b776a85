//! Application error type and its HTTP representation.
//!
//! Every fallible service, repository and handler returns [`AppError`]. The
//! [`IntoResponse`] impl turns it into a JSON body of the form:
//!
//! ```json
//! {
//!   "code": "business_rule",
//!   "errors": ["Registration already created"],
//!   "details": {}
//! }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub errors: Vec<String>,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or incomplete request data (400).
    #[error("{}", .errors.join("; "))]
    Validation { errors: Vec<String>, details: Value },
    /// Mutation attempted on an entity without an id (400).
    #[error("{message}")]
    InvalidArgument { message: String },
    /// Application-level invariant failure, e.g. a duplicate registration (400).
    #[error("{message}")]
    BusinessRule { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            errors: vec![message.into()],
            details,
        }
    }
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
    pub fn business_rule(message: impl Into<String>, details: Value) -> Self {
        Self::BusinessRule {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::InvalidArgument { .. }
            | AppError::BusinessRule { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_body(&self) -> ErrorBody {
        let (code, errors, details) = match self {
            AppError::Validation { errors, details } => {
                ("validation_error", errors.clone(), details.clone())
            }
            AppError::InvalidArgument { message } => {
                ("invalid_argument", vec![message.clone()], json!({}))
            }
            AppError::BusinessRule { message, details } => {
                ("business_rule", vec![message.clone()], details.clone())
            }
            AppError::NotFound { message, details } => {
                ("not_found", vec![message.clone()], details.clone())
            }
            AppError::Internal { message, details } => {
                ("internal_error", vec![message.clone()], details.clone())
            }
        };

        ErrorBody {
            code,
            errors,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text(), json!({"source": "body"}))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text(), json!({"source": "query"}))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text(), json!({"source": "path"}))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        let mut fields: Vec<_> = e.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let errors = fields
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field}: {}", err.code),
                })
            })
            .collect();

        let details = fields
            .iter()
            .map(|(field, _)| field.to_string())
            .collect::<Vec<_>>();

        AppError::Validation {
            errors,
            details: json!({ "fields": details }),
        }
    }
}
