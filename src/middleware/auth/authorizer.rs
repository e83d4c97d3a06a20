//! access token（JWT）検証 → AuthorizerContext を extensions に入れる
//!
//! - `Authorization` ヘッダが無い場合は何もせずに通す（コンテキスト無し）。
//!   user-scoped な読み取りでは pipeline が 500 として扱い、
//!   machine-scoped な作成では scope 不足 (403) になる。
//! - ヘッダがあるのに検証できない場合だけ、ここで 401 を返す。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// `/workspaces/*` に authorizer を掛ける。
///
/// 例：
/// ```ignore
/// let workspaces = middleware::auth::authorizer::apply(workspaces, state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, authorizer_middleware))
}

fn bearer_token(value: &HeaderValue) -> Option<&str> {
    value.to_str().ok()?.strip_prefix("Bearer ")
}

async fn authorizer_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = match req.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            bearer_token(value)
                .ok_or(AppError::Unauthorized)?
                .to_owned(),
        ),
    };

    if let Some(token) = token {
        let context = match state.auth.authorizer_context(&token) {
            Ok(context) => context,
            Err(err) => {
                tracing::warn!(error = ?err, "access token verification failed");
                return Err(AppError::Unauthorized);
            }
        };

        // middleware → extractor への受け渡し
        req.extensions_mut().insert(context);
    }

    Ok(next.run(req).await)
}
