use chrono::Utc;
use perch_types::timestamp;

use crate::db::error::{Result, StoreError};
use crate::db::DbPool;

pub struct FollowRepository {
    pool: DbPool,
}

impl FollowRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Check if user A is following user B.
    pub fn is_following(&self, follower_id: i64, following_id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ? AND following_id = ?",
            (follower_id, following_id),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Follow a user. Idempotent; self-loops are rejected here rather than
    /// by the schema.
    pub fn follow(&self, follower_id: i64, following_id: i64) -> Result<()> {
        if follower_id == following_id {
            return Err(StoreError::SelfFollow);
        }
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR IGNORE INTO follows (follower_id, following_id, created_at) VALUES (?, ?, ?)",
            (
                follower_id,
                following_id,
                timestamp::to_store(&Utc::now()),
            ),
        )?;
        Ok(())
    }

    /// Unfollow a user. Returns the number of edges removed (0 or 1).
    pub fn unfollow(&self, follower_id: i64, following_id: i64) -> Result<usize> {
        let conn = self.pool.get()?;
        let removed = conn.execute(
            "DELETE FROM follows WHERE follower_id = ? AND following_id = ?",
            (follower_id, following_id),
        )?;
        Ok(removed)
    }

    /// Ids of the users this user follows.
    pub fn get_following(&self, user_id: i64) -> Result<Vec<i64>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT following_id FROM follows WHERE follower_id = ? ORDER BY created_at DESC",
        )?;
        let following = stmt
            .query_map([user_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(following)
    }

    /// Ids of the users that follow this user.
    pub fn get_followers(&self, user_id: i64) -> Result<Vec<i64>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT follower_id FROM follows WHERE following_id = ? ORDER BY created_at DESC",
        )?;
        let followers = stmt
            .query_map([user_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(followers)
    }
}
