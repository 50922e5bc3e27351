/// Error types for planning operations
///
/// One error enum flows from validation and storage up through the HTTP layer,
/// where it is rendered as a JSON body with a matching status code.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors produced by validation, storage and API handlers
#[derive(Debug, Error)]
pub enum PlanningError {
    /// Input failed a domain rule; the message is shown to the user as-is
    #[error("{0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Operation conflicts with existing data (record in use, duplicate name)
    #[error("{0}")]
    Conflict(String),

    /// Underlying SQLite failure
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

/// Result alias used by the store and API layers
pub type Result<T> = std::result::Result<T, PlanningError>;

impl PlanningError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for PlanningError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for PlanningError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<sqlx::Error> for PlanningError {
    /// Constraint violations are reported by the database, so translate them into
    /// the same variants the pre-write checks produce.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return Self::Validation("Referenced record does not exist".to_string());
            }
            if db_err.is_unique_violation() {
                return Self::Conflict("A record with the same name already exists".to_string());
            }
            if db_err.is_check_violation() {
                return Self::Validation(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}

impl IntoResponse for PlanningError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                "Internal database error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
