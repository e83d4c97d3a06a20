/*
 * Responsibility
 * - Per-operation orchestration: authorizer context → scope → ownership → store → response
 * - Every failure is caught once, at the operation boundary, and handed to ErrorResponder
 * - Required scopes come from the caller (deployment config), never from the client
 */
use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::api::v1::extractors::AuthorizerContext;
use crate::error::AppError;
use crate::pipeline::authorizer::{self, Caller};
use crate::pipeline::responder::ErrorResponder;
use crate::pipeline::response::{ApiResponse, Items};
use crate::pipeline::schema::{self, BodyError};
use crate::pipeline::scope;
use crate::repos::WorkspaceStore;

/// Input of a user-scoped read.
#[derive(Debug, Clone)]
pub struct WorkspaceRead {
    /// Workspace id named in the request path.
    pub workspace_id: String,
    pub authorizer: Option<AuthorizerContext>,
}

/// Input of the machine-scoped member create.
#[derive(Debug, Clone)]
pub struct MemberCreate {
    pub workspace_id: String,
    pub authorizer: Option<AuthorizerContext>,
    /// Raw (untrusted) JSON body, or why it could not be read.
    pub body: Result<String, BodyError>,
}

/// Built once per process and shared; holds no per-request state.
#[derive(Clone)]
pub struct RequestPipeline {
    store: Arc<dyn WorkspaceStore>,
    responder: ErrorResponder,
}

impl fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("store", &self.store.backend_name())
            .field("responder", &self.responder)
            .finish()
    }
}

impl RequestPipeline {
    pub fn new(store: Arc<dyn WorkspaceStore>, responder: ErrorResponder) -> Self {
        Self { store, responder }
    }

    pub async fn get_workspace(&self, req: &WorkspaceRead, required_scope: &str) -> ApiResponse {
        self.run("getWorkspace", self.try_get_workspace(req, required_scope))
            .await
    }

    pub async fn get_workspace_members(
        &self,
        req: &WorkspaceRead,
        required_scope: &str,
    ) -> ApiResponse {
        self.run(
            "getWorkspaceMembers",
            self.try_get_workspace_members(req, required_scope),
        )
        .await
    }

    pub async fn create_workspace_member(
        &self,
        req: &MemberCreate,
        required_scope: &str,
    ) -> ApiResponse {
        self.run(
            "createWorkspaceMember",
            self.try_create_workspace_member(req, required_scope),
        )
        .await
    }

    // The single catch point for an operation.
    async fn run<F>(&self, operation: &'static str, fut: F) -> ApiResponse
    where
        F: Future<Output = Result<ApiResponse, AppError>>,
    {
        match fut.await {
            Ok(res) => res,
            Err(err) => {
                tracing::debug!(operation, error = %err, "operation failed");
                self.responder.respond(err)
            }
        }
    }

    async fn try_get_workspace(
        &self,
        req: &WorkspaceRead,
        required_scope: &str,
    ) -> Result<ApiResponse, AppError> {
        let caller = authorize_read(req, required_scope)?;

        let workspace = self
            .store
            .get(caller.workspace_id)
            .await?
            .ok_or(AppError::NotFound)?;

        ApiResponse::json(StatusCode::OK, &workspace)
    }

    async fn try_get_workspace_members(
        &self,
        req: &WorkspaceRead,
        required_scope: &str,
    ) -> Result<ApiResponse, AppError> {
        let caller = authorize_read(req, required_scope)?;

        let items = self.store.get_members(caller.workspace_id).await?;

        ApiResponse::json(StatusCode::OK, &Items { items })
    }

    async fn try_create_workspace_member(
        &self,
        req: &MemberCreate,
        required_scope: &str,
    ) -> Result<ApiResponse, AppError> {
        // Machine clients: scope only, the identity fields are not checked.
        let held = req.authorizer.as_ref().and_then(|a| a.scope.as_deref());
        if !scope::has_scope(held, required_scope) {
            return Err(AppError::forbidden(required_scope));
        }

        let body = req.body.as_deref().map_err(|e| AppError::from(*e))?;
        let raw = schema::parse_body(body)?;
        let data = schema::validate_member(&raw)?;

        let member = self.store.create_member(&req.workspace_id, &data).await?;
        tracing::info!(
            workspace_id = %req.workspace_id,
            member_id = %member.id,
            "workspace member created"
        );

        ApiResponse::json(StatusCode::CREATED, &member)
    }
}

/// Identity, scope and ownership checks shared by the user-scoped reads.
///
/// A path workspace id other than the caller's is reported as `NotFound`, the
/// same as a workspace that does not exist.
fn authorize_read<'a>(
    req: &'a WorkspaceRead,
    required_scope: &str,
) -> Result<Caller<'a>, AppError> {
    let caller = authorizer::validate(req.authorizer.as_ref())?;

    if !scope::has_scope(caller.scope, required_scope) {
        return Err(AppError::forbidden(required_scope));
    }

    if req.workspace_id != caller.workspace_id {
        tracing::debug!(
            user_id = caller.user_id,
            workspace_id = %req.workspace_id,
            "workspace is not the caller's"
        );
        return Err(AppError::NotFound);
    }

    Ok(caller)
}
