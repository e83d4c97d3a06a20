/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - pipeline: RequestPipeline, auth: AuthService, scopes: RequiredScopes
 * - プロセス起動時に一度だけ組み立て、全リクエストで再利用する
 * - Clone 前提で持つ (内部は Arc で Clone cheap)
 */
use std::sync::Arc;

use crate::config::RequiredScopes;
use crate::pipeline::RequestPipeline;
use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub pipeline: Arc<RequestPipeline>,
    pub auth: Arc<AuthService>,
    pub scopes: Arc<RequiredScopes>,
}

impl AppState {
    pub fn new(pipeline: RequestPipeline, auth: Arc<AuthService>, scopes: RequiredScopes) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            auth,
            scopes: Arc::new(scopes),
        }
    }
}
