/*
 * Responsibility
 * - workspaces / workspace_members テーブル向け SQLx 操作
 * - PgPool を受け取り WorkspaceStore を提供
 * - unique violation は StoreError::Conflict に変換して返す
 *
 * Tables
 * - workspaces ("workspaceId" PK, "name", "slug", "createdBy", "createdAt", "updatedAt")
 * - workspace_members ("memberId" PK, "workspaceId", "userId", "email", "fullName",
 *   "createdBy", "createdAt", "updatedAt"), UNIQUE ("workspaceId", "userId")
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{MemberCreateRequest, Workspace, WorkspaceMember};
use crate::repos::error::StoreError;
use crate::repos::store::{SYSTEM_CREATOR, StoreResult, WorkspaceStore, new_member_id};

#[derive(Debug, FromRow)]
pub struct WorkspaceRow {
    #[sqlx(rename = "workspaceId")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[sqlx(rename = "createdBy")]
    pub created_by: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<WorkspaceRow> for Workspace {
    fn from(row: WorkspaceRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct MemberRow {
    #[sqlx(rename = "memberId")]
    pub id: String,
    #[sqlx(rename = "workspaceId")]
    pub workspace_id: String,
    #[sqlx(rename = "userId")]
    pub user_id: String,
    pub email: String,
    #[sqlx(rename = "fullName")]
    pub full_name: Option<String>,
    #[sqlx(rename = "createdBy")]
    pub created_by: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<MemberRow> for WorkspaceMember {
    fn from(row: MemberRow) -> Self {
        Self {
            id: row.id,
            workspace_id: row.workspace_id,
            user_id: row.user_id,
            email: row.email,
            full_name: row.full_name,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgWorkspaceStore {
    db: PgPool,
}

impl PgWorkspaceStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkspaceStore for PgWorkspaceStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn get(&self, workspace_id: &str) -> StoreResult<Option<Workspace>> {
        let row = sqlx::query_as::<_, WorkspaceRow>(
            r#"
            SELECT "workspaceId", "name", "slug", "createdBy", "createdAt", "updatedAt"
            FROM workspaces
            WHERE "workspaceId" = $1
            "#,
        )
        .bind(workspace_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Workspace::from))
    }

    async fn get_members(&self, workspace_id: &str) -> StoreResult<Vec<WorkspaceMember>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT "memberId", "workspaceId", "userId", "email", "fullName",
                   "createdBy", "createdAt", "updatedAt"
            FROM workspace_members
            WHERE "workspaceId" = $1
            ORDER BY "createdAt" ASC
            "#,
        )
        .bind(workspace_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(WorkspaceMember::from).collect())
    }

    async fn create_member(
        &self,
        workspace_id: &str,
        data: &MemberCreateRequest,
    ) -> StoreResult<WorkspaceMember> {
        // The unique index is the only write guard; no read-before-write.
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO workspace_members
                ("memberId", "workspaceId", "userId", "email", "fullName", "createdBy")
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING "memberId", "workspaceId", "userId", "email", "fullName",
                      "createdBy", "createdAt", "updatedAt"
            "#,
        )
        .bind(new_member_id())
        .bind(workspace_id)
        .bind(&data.user_id)
        .bind(&data.email)
        .bind(data.full_name.as_deref())
        .bind(SYSTEM_CREATOR)
        .fetch_one(&self.db)
        .await
        .map_err(|e| StoreError::from_sqlx(e, &data.user_id))?;

        Ok(row.into())
    }
}
