/*
 * Responsibility
 * - Handler / pipeline から見える「呼び出し元コンテキスト」の型
 * - middleware がトークンから組み立てて request extensions に格納する
 *
 * Notes
 * - 各フィールドは欠けていてもここでは拒否しない（判断は pipeline 側）
 * - machine client の場合 `user_id` は client id であり、エンドユーザーではない
 */
use serde::{Deserialize, Serialize};

/// Identity and authorization data attached to a request by the authorizer.
///
/// - `user_id`: end-user id (or client id for machine clients)
/// - `workspace_id`: the single workspace the caller belongs to
/// - `scope`: space-delimited permission tokens, e.g. `"read:workspace read:workspace-members"`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerContext {
    pub user_id: Option<String>,
    pub workspace_id: Option<String>,
    pub scope: Option<String>,
}
