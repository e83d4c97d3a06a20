/*
 * Responsibility
 * - GET /workspaces/{workspace_id} handler
 * - Path と AuthorizerContext を集めて pipeline に渡すだけ (判定は pipeline 側)
 */
use axum::extract::{Path, State};

use crate::{
    api::v1::extractors::Authorizer,
    pipeline::{ApiResponse, WorkspaceRead},
    state::AppState,
};

pub async fn get_workspace(
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
        .get_workspace(&req, &state.scopes.read_workspace)
        .await
}
