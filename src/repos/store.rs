//! Storage interface the request pipeline reads and writes through.
use async_trait::async_trait;

use crate::models::{MemberCreateRequest, Workspace, WorkspaceMember};
use crate::repos::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Members created by the service itself (not by an end user).
pub const SYSTEM_CREATOR: &str = "system";

/// Workspace/member persistence.
///
/// `create_member` must enforce "member does not already exist" atomically and
/// report a violation as `StoreError::Conflict`; callers never retry.
#[async_trait]
pub trait WorkspaceStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn get(&self, workspace_id: &str) -> StoreResult<Option<Workspace>>;

    async fn get_members(&self, workspace_id: &str) -> StoreResult<Vec<WorkspaceMember>>;

    async fn create_member(
        &self,
        workspace_id: &str,
        data: &MemberCreateRequest,
    ) -> StoreResult<WorkspaceMember>;
}

/// Id for a newly created member.
pub fn new_member_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
