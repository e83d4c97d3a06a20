//! In-process `WorkspaceStore`.
//!
//! Used by tests and by local runs with `STORE_BACKEND=memory`.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{MemberCreateRequest, Workspace, WorkspaceMember};
use crate::repos::error::StoreError;
use crate::repos::store::{SYSTEM_CREATOR, StoreResult, WorkspaceStore, new_member_id};

#[derive(Debug, Default)]
struct Tables {
    workspaces: HashMap<String, Workspace>,
    // workspace id -> members in insertion order
    members: HashMap<String, Vec<WorkspaceMember>>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryWorkspaceStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_workspace(&self, workspace: Workspace) {
        let mut tables = self.tables.write().await;
        tables.workspaces.insert(workspace.id.clone(), workspace);
    }

    pub async fn insert_member(&self, member: WorkspaceMember) {
        let mut tables = self.tables.write().await;
        tables
            .members
            .entry(member.workspace_id.clone())
            .or_default()
            .push(member);
    }
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, workspace_id: &str) -> StoreResult<Option<Workspace>> {
        let tables = self.tables.read().await;
        Ok(tables.workspaces.get(workspace_id).cloned())
    }

    async fn get_members(&self, workspace_id: &str) -> StoreResult<Vec<WorkspaceMember>> {
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .get(workspace_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_member(
        &self,
        workspace_id: &str,
        data: &MemberCreateRequest,
    ) -> StoreResult<WorkspaceMember> {
        // Check and insert under one write guard.
        let mut tables = self.tables.write().await;
        let members = tables.members.entry(workspace_id.to_string()).or_default();

        if members.iter().any(|m| m.user_id == data.user_id) {
            return Err(StoreError::Conflict {
                user_id: data.user_id.clone(),
            });
        }

        let now = Utc::now();
        let member = WorkspaceMember {
            id: new_member_id(),
            workspace_id: workspace_id.to_string(),
            user_id: data.user_id.clone(),
            email: data.email.clone(),
            full_name: data.full_name.clone(),
            created_by: SYSTEM_CREATOR.to_string(),
            created_at: now,
            updated_at: now,
        };
        members.push(member.clone());

        Ok(member)
    }
}
