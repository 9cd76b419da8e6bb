use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::career::TransitionError;
use domain::services::{FieldErrors, SubmitError};
use persistence::store::StoreError;
use serde::Serialize;
use shared::pagination::PaginationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<ValidationDetail>,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// A validation failure that is not tied to individual fields.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                (!details.is_empty()).then_some(details),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                    None,
                )
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    "The record store is unavailable".into(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            ref e if e.is_unavailable() => ApiError::ServiceUnavailable(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        let details: Vec<ValidationDetail> = errors
            .pairs()
            .map(|(field, message)| ValidationDetail {
                field: field.to_string(),
                message: message.to_string(),
            })
            .collect();

        let message = if details.len() == 1 {
            details[0].message.clone()
        } else {
            format!("{} validation errors", details.len())
        };

        ApiError::Validation { message, details }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        FieldErrors::from(errors).into()
    }
}

impl From<SubmitError<StoreError>> for ApiError {
    fn from(err: SubmitError<StoreError>) -> Self {
        match err {
            SubmitError::Invalid(errors) => errors.into(),
            SubmitError::NotOpen => ApiError::Internal("No form is open".to_string()),
            SubmitError::Rejected(store) => store.into(),
        }
    }
}

impl From<TransitionError> for ApiError {
    fn from(err: TransitionError) -> Self {
        ApiError::Conflict(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::career::ApplicationStatus;
    use domain::models::EntityKind;
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_api_error_forbidden() {
        let error = ApiError::Forbidden("access denied".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_api_error_not_found() {
        let error = ApiError::NotFound("resource not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_conflict() {
        let error = ApiError::Conflict("already exists".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("database connection failed".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_service_unavailable() {
        let error = ApiError::ServiceUnavailable("pool timed out".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::Forbidden("test".to_string())),
            "Forbidden: test"
        );
        assert_eq!(
            format!("{}", ApiError::NotFound("test".to_string())),
            "Not found: test"
        );
        assert_eq!(
            format!("{}", ApiError::validation("test")),
            "Validation error: test"
        );
        assert_eq!(
            format!("{}", ApiError::Internal("test".to_string())),
            "Internal error: test"
        );
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Email address is not valid");
        errors.add("name", "Name must be 3-100 characters");

        let response = ApiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "2 validation errors");
        assert_eq!(body["details"][0]["field"], "email");
        assert_eq!(body["details"][1]["field"], "name");
    }

    #[tokio::test]
    async fn test_single_field_error_uses_its_message() {
        let mut errors = FieldErrors::new();
        errors.add("price", "Price cannot be negative");

        let body = body_json(ApiError::from(errors).into_response()).await;
        assert_eq!(body["message"], "Price cannot be negative");
    }

    #[tokio::test]
    async fn test_internal_message_not_leaked() {
        let body = body_json(ApiError::Internal("secret dsn".to_string()).into_response()).await;
        assert_eq!(body["message"], "An internal error occurred");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_from_store_not_found() {
        let id = Uuid::nil();
        let error: ApiError = StoreError::not_found(EntityKind::Courses, id).into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, format!("Course {} not found", id)),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_store_conflict_and_unavailable() {
        let conflict: ApiError = StoreError::Conflict {
            kind: EntityKind::Users,
            id: Uuid::nil(),
        }
        .into();
        assert!(matches!(conflict, ApiError::Conflict(_)));

        let unavailable: ApiError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(unavailable, ApiError::ServiceUnavailable(_)));

        let timed_out: ApiError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(timed_out, ApiError::ServiceUnavailable(_)));

        let other: ApiError = StoreError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(other, ApiError::Internal(_)));
    }

    #[test]
    fn test_from_transition_error_is_conflict() {
        let err = ApplicationStatus::Hired
            .transition(ApplicationStatus::Pending)
            .unwrap_err();
        let error: ApiError = err.into();
        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[test]
    fn test_from_submit_error() {
        let mut errors = FieldErrors::new();
        errors.add("form", "End date must not be before start date");
        let error: ApiError = SubmitError::<StoreError>::Invalid(errors).into();
        match error {
            ApiError::Validation { details, .. } => assert_eq!(details[0].field, "form"),
            other => panic!("Expected Validation, got {:?}", other),
        }

        let rejected: ApiError =
            SubmitError::Rejected(StoreError::not_found(EntityKind::Grades, Uuid::nil())).into();
        assert!(matches!(rejected, ApiError::NotFound(_)));
    }
}
