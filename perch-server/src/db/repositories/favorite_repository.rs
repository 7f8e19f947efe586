use chrono::Utc;
use perch_types::timestamp;

use super::like_repository::resolve_content;
use crate::db::error::{Result, StoreError};
use crate::db::{with_write_retry, DbPool};

/// Favorites are private bookmarks. Content-addressed like likes, so
/// favoriting a repost bookmarks the shared content.
pub struct FavoriteRepository {
    pool: DbPool,
}

impl FavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn favorite(&self, user_id: i64, post_id: i64) -> Result<()> {
        with_write_retry(|| {
            let conn = self.pool.get()?;
            let content_id = resolve_content(&conn, post_id)?;
            conn.execute(
                "INSERT INTO favorites (content_id, user_id, created_at) VALUES (?, ?, ?)",
                (content_id, user_id, timestamp::to_store(&Utc::now())),
            )?;
            Ok(())
        })
    }

    pub fn unfavorite(&self, user_id: i64, post_id: i64) -> Result<()> {
        with_write_retry(|| {
            let conn = self.pool.get()?;
            let content_id = resolve_content(&conn, post_id)?;
            let removed = conn.execute(
                "DELETE FROM favorites WHERE content_id = ? AND user_id = ?",
                (content_id, user_id),
            )?;
            if removed == 0 {
                return Err(StoreError::FavoriteNotFound);
            }
            Ok(())
        })
    }

    pub fn has_favorited(&self, user_id: i64, post_id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        let content_id = resolve_content(&conn, post_id)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM favorites WHERE content_id = ? AND user_id = ?",
            (content_id, user_id),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
