use chrono::Utc;
use perch_types::timestamp;
use rusqlite::OptionalExtension;

use crate::db::error::{Result, StoreError};
use crate::db::{with_write_retry, DbPool};

/// Likes attach to content, not to individual post rows, so every repost of
/// a piece of content shares one like count. Liking through a repost row
/// resolves to the same content as liking the original.
pub struct LikeRepository {
    pool: DbPool,
}

impl LikeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn like(&self, user_id: i64, post_id: i64) -> Result<()> {
        with_write_retry(|| {
            let conn = self.pool.get()?;
            let content_id = resolve_content(&conn, post_id)?;
            conn.execute(
                "INSERT INTO likes (content_id, user_id, created_at) VALUES (?, ?, ?)",
                (content_id, user_id, timestamp::to_store(&Utc::now())),
            )?;
            Ok(())
        })
    }

    pub fn unlike(&self, user_id: i64, post_id: i64) -> Result<()> {
        with_write_retry(|| {
            let conn = self.pool.get()?;
            let content_id = resolve_content(&conn, post_id)?;
            let removed = conn.execute(
                "DELETE FROM likes WHERE content_id = ? AND user_id = ?",
                (content_id, user_id),
            )?;
            if removed == 0 {
                return Err(StoreError::LikeNotFound);
            }
            Ok(())
        })
    }

    pub fn count(&self, post_id: i64) -> Result<i64> {
        let conn = self.pool.get()?;
        let content_id = resolve_content(&conn, post_id)?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE content_id = ?",
            [content_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn has_liked(&self, user_id: i64, post_id: i64) -> Result<bool> {
        let conn = self.pool.get()?;
        let content_id = resolve_content(&conn, post_id)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE content_id = ? AND user_id = ?",
            (content_id, user_id),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

pub(crate) fn resolve_content(conn: &rusqlite::Connection, post_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT content_id FROM posts WHERE post_id = ?",
        [post_id],
        |row| row.get(0),
    )
    .optional()?
    .ok_or(StoreError::PostNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::PostRepository;
    use crate::db::testing::{add_user, mem_db};

    #[test]
    fn like_through_repost_counts_once() {
        let db = mem_db();
        let posts = PostRepository::new(db.pool.clone());
        let likes = LikeRepository::new(db.pool.clone());

        let wren = add_user(&db, "wren", true);
        let robin = add_user(&db, "robin", true);
        let heron = add_user(&db, "heron", true);

        let original = posts.create_post(wren, Some("hello"), None).unwrap();
        let repost = posts.create_repost(robin, original.post_id).unwrap();

        // heron likes via the repost row; the count shows on both rows
        likes.like(heron, repost.post_id).unwrap();
        assert_eq!(likes.count(original.post_id).unwrap(), 1);
        assert_eq!(likes.count(repost.post_id).unwrap(), 1);
        assert!(likes.has_liked(heron, original.post_id).unwrap());
    }

    #[test]
    fn double_like_violates_constraint() {
        let db = mem_db();
        let posts = PostRepository::new(db.pool.clone());
        let likes = LikeRepository::new(db.pool.clone());

        let wren = add_user(&db, "wren", true);
        let robin = add_user(&db, "robin", true);
        let post = posts.create_post(wren, Some("hello"), None).unwrap();

        likes.like(robin, post.post_id).unwrap();
        let err = likes.like(robin, post.post_id).unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn count_reflects_distinct_users() {
        let db = mem_db();
        let posts = PostRepository::new(db.pool.clone());
        let likes = LikeRepository::new(db.pool.clone());

        let wren = add_user(&db, "wren", true);
        let post = posts.create_post(wren, Some("hello"), None).unwrap();

        for name in ["a", "b", "c"] {
            let user = add_user(&db, name, true);
            likes.like(user, post.post_id).unwrap();
        }
        assert_eq!(likes.count(post.post_id).unwrap(), 3);
    }

    #[test]
    fn unlike_missing_like_errors() {
        let db = mem_db();
        let posts = PostRepository::new(db.pool.clone());
        let likes = LikeRepository::new(db.pool.clone());

        let wren = add_user(&db, "wren", true);
        let robin = add_user(&db, "robin", true);
        let post = posts.create_post(wren, Some("hello"), None).unwrap();

        assert!(matches!(
            likes.unlike(robin, post.post_id),
            Err(StoreError::LikeNotFound)
        ));
    }

    #[test]
    fn like_on_missing_post_errors() {
        let db = mem_db();
        let likes = LikeRepository::new(db.pool.clone());
        let wren = add_user(&db, "wren", true);

        assert!(matches!(
            likes.like(wren, 404),
            Err(StoreError::PostNotFound)
        ));
    }
}
