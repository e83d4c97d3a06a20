/*
 * Responsibility
 * - Failure taxonomy shared by every pipeline step (AppError)
 * - Each kind knows its HTTP status, user-facing message and details
 * - IntoResponse (JSON `{ message, details }`) for rejections raised outside the pipeline
 * - StoreError → AppError conversion
 */
use std::error::Error as StdError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::StoreError;

/// Where 500-class responses send the caller.
pub const SUPPORT_CONTACT: &str = "support@upstand.fm";

/// `details` is either a single sentence or an ordered list of violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    Text(String),
    List(Vec<String>),
}

/// JSON body of every error response.
///
/// `details` is omitted (not `null`) when a kind carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Error)]
pub enum AppError {
    // Authorizer context problems are upstream integration bugs, hence 500.
    #[error("Missing Authorizer Data")]
    MissingAuthorizerData,
    #[error("Missing User ID")]
    MissingUserId,
    #[error("Missing Workspace ID")]
    MissingWorkspaceId,

    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden { required_scope: String },
    #[error("Not Found")]
    NotFound,
    #[error("Not Found")]
    RouteNotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Bad Request")]
    MalformedBody,
    #[error("Payload Too Large")]
    PayloadTooLarge,
    #[error("Invalid request data")]
    InvalidRequestData { violations: Vec<String> },
    #[error("Workspace member already exists")]
    MemberAlreadyExists { user_id: String },

    #[error("Internal Server Error")]
    Internal(#[source] Box<dyn StdError + Send + Sync>),
}

impl AppError {
    pub fn forbidden(required_scope: impl Into<String>) -> Self {
        Self::Forbidden {
            required_scope: required_scope.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingAuthorizerData
            | AppError::MissingUserId
            | AppError::MissingWorkspaceId
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            // Duplicate members are reported as a client error, not 409.
            AppError::MalformedBody
            | AppError::InvalidRequestData { .. }
            | AppError::MemberAlreadyExists { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn details(&self) -> Option<ErrorDetails> {
        let text = match self {
            AppError::MissingAuthorizerData
            | AppError::MissingUserId
            | AppError::MissingWorkspaceId => {
                format!("Corrupt authorizer data. Contact \"{SUPPORT_CONTACT}\"")
            }
            AppError::Unauthorized => "Invalid access token".to_string(),
            AppError::Forbidden { required_scope } => {
                format!("You need scope \"{required_scope}\"")
            }
            // Same wording whether the workspace is foreign or missing.
            AppError::NotFound => {
                "You might not have access to this workspace, or it doesn't exist.".to_string()
            }
            AppError::RouteNotFound => "No resource matches this path".to_string(),
            AppError::MethodNotAllowed => "This method is not supported on this path".to_string(),
            AppError::MalformedBody => "Invalid JSON".to_string(),
            AppError::PayloadTooLarge => "Request body is too large".to_string(),
            AppError::InvalidRequestData { violations } => {
                return Some(ErrorDetails::List(violations.clone()));
            }
            AppError::MemberAlreadyExists { user_id } => {
                format!("A member with user ID \"{user_id}\" already exists in this workspace")
            }
            AppError::Internal(_) => {
                format!("Something went wrong. Contact \"{SUPPORT_CONTACT}\"")
            }
        };

        Some(ErrorDetails::Text(text))
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.to_string(),
            details: self.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { user_id } => AppError::MemberAlreadyExists { user_id },
            other => AppError::internal(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn authorizer_failures_share_support_details() {
        for err in [
            AppError::MissingAuthorizerData,
            AppError::MissingUserId,
            AppError::MissingWorkspaceId,
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                err.details(),
                Some(ErrorDetails::Text(
                    "Corrupt authorizer data. Contact \"support@upstand.fm\"".into()
                ))
            );
        }
    }

    #[test]
    fn forbidden_names_required_scope() {
        let body = serde_json::to_value(AppError::forbidden("delete:standup").body()).unwrap();
        assert_eq!(
            body,
            json!({ "message": "Forbidden", "details": "You need scope \"delete:standup\"" })
        );
    }

    #[test]
    fn invalid_request_data_serializes_list() {
        let err = AppError::InvalidRequestData {
            violations: vec!["\"email\" is required".into()],
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(err.body()).unwrap(),
            json!({ "message": "Invalid request data", "details": ["\"email\" is required"] })
        );
    }

    #[test]
    fn transport_failures_keep_error_shape() {
        assert_eq!(
            serde_json::to_value(AppError::PayloadTooLarge.body()).unwrap(),
            json!({ "message": "Payload Too Large", "details": "Request body is too large" })
        );
        assert_eq!(AppError::PayloadTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(AppError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn store_conflict_becomes_member_already_exists() {
        let err = AppError::from(StoreError::Conflict {
            user_id: "u1".into(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Workspace member already exists");
    }

    #[test]
    fn internal_body_hides_source() {
        let err = AppError::internal("connection reset by peer");
        let body = serde_json::to_string(&err.body()).unwrap();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("connection reset"));
        assert!(body.contains("support@upstand.fm"));
    }
}
