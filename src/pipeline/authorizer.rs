//! Authorizer context validation for user-scoped operations.
use crate::api::v1::extractors::AuthorizerContext;
use crate::error::AppError;

/// A caller whose identity fields are known to be present and non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    pub user_id: &'a str,
    pub workspace_id: &'a str,
    pub scope: Option<&'a str>,
}

/// Checks, in order: context present, `userId` present, `workspaceId` present.
/// Stops at the first failure.
pub fn validate(context: Option<&AuthorizerContext>) -> Result<Caller<'_>, AppError> {
    let context = context.ok_or(AppError::MissingAuthorizerData)?;
    let user_id = non_empty(context.user_id.as_deref()).ok_or(AppError::MissingUserId)?;
    let workspace_id =
        non_empty(context.workspace_id.as_deref()).ok_or(AppError::MissingWorkspaceId)?;

    Ok(Caller {
        user_id,
        workspace_id,
        scope: context.scope.as_deref(),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
