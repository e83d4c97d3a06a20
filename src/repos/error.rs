/**
 * Responsibility
 * - store が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("member {user_id} already exists")]
    Conflict { user_id: String },
}

impl StoreError {
    /// Maps a unique-violation (SQLSTATE 23505) on member insert to `Conflict`.
    pub fn from_sqlx(e: sqlx::Error, user_id: &str) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return StoreError::Conflict {
                user_id: user_id.to_string(),
            };
        }
        StoreError::Db(e)
    }
}
