/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は認可なし、/workspaces 配下に authorizer middleware を route_layer で適用
 * - 未対応メソッド (405) も `{ message, details }` で返す
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    fallback::method_not_allowed,
    health::health,
    members::{create_member, list_members},
    workspaces::get_workspace,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let workspaces = Router::new()
        .route("/workspaces/{workspace_id}", get(get_workspace))
        .route(
            "/workspaces/{workspace_id}/members",
            get(list_members).post(create_member),
        );
    let workspaces = middleware::auth::authorizer::apply(workspaces, state);

    Router::new()
        .route("/health", get(health))
        .merge(workspaces)
        .method_not_allowed_fallback(method_not_allowed)
}
