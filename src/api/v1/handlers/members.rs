/*
 * Responsibility
 * - /workspaces/{workspace_id}/members 系 handler
 * - POST の body は生の文字列のまま pipeline に渡す (schema 検証は pipeline 側)
 * - body の読み取り失敗も reject せず pipeline に渡す (scope チェックが先)
 */
use axum::extract::{Path, State, rejection::StringRejection};
use axum::http::StatusCode;

use crate::{
    api::v1::extractors::Authorizer,
    pipeline::{ApiResponse, MemberCreate, WorkspaceRead, schema::BodyError},
    state::AppState,
};

pub async fn list_members(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    Authorizer(authorizer): Authorizer,
) -> ApiResponse {
    let req = WorkspaceRead {
        workspace_id,
        authorizer,
    };

    state
        .pipeline
        .get_workspace_members(&req, &state.scopes.read_workspace_members)
        .await
}

pub async fn create_member(
    State(state): State<AppState>,
    Path(workspace_id): Path<String>,
    Authorizer(authorizer): Authorizer,
    body: Result<String, StringRejection>,
) -> ApiResponse {
    let req = MemberCreate {
        workspace_id,
        authorizer,
        body: body.map_err(body_error),
    };

    state
        .pipeline
        .create_workspace_member(&req, &state.scopes.create_workspace_member)
        .await
}

fn body_error(rejection: StringRejection) -> BodyError {
    match rejection {
        StringRejection::InvalidUtf8(_) => BodyError::NotUtf8,
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => BodyError::TooLarge,
        other => {
            tracing::debug!(error = %other, "failed to read request body");
            BodyError::Unreadable
        }
    }
}
