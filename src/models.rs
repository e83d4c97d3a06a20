/*
 * Responsibility
 * - Workspace / WorkspaceMember entities as returned to clients (camelCase JSON)
 * - MemberCreateRequest: the normalized, validated body of a member-create call
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMember {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Only ever built by the schema validator; unknown input fields never reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCreateRequest {
    pub user_id: String,
    pub email: String,
    /// `None` when the client sent nothing or an empty string.
    pub full_name: Option<String>,
}
