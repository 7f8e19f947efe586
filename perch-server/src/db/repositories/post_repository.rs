use chrono::{DateTime, Utc};
use perch_types::{timestamp, Post, UserStatistics};
use rusqlite::{OptionalExtension, Row, Transaction};

use crate::db::error::{Result, StoreError};
use crate::db::{parse_ts, with_write_retry, DbPool};
use crate::hashtag::extract_hashtags;
use crate::mention::extract_mentions;

pub const MAX_TEXT_LENGTH: usize = 1000;

pub struct PostRepository {
    pool: DbPool,
}

fn post_from_row(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        post_id: row.get(0)?,
        user_poster_id: row.get(1)?,
        user_creator_id: row.get(2)?,
        content_id: row.get(3)?,
        created_at: parse_ts(4, row.get(4)?)?,
    })
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create an original post: content + post row + extracted hashtags and
    /// mentions, all in one transaction.
    pub fn create_post(
        &self,
        user_id: i64,
        text: Option<&str>,
        image: Option<&str>,
    ) -> Result<Post> {
        let text = text.filter(|t| !t.is_empty());
        let image = image.filter(|i| !i.is_empty());
        if text.is_none() && image.is_none() {
            return Err(StoreError::EmptyPost);
        }
        if let Some(t) = text {
            if t.chars().count() > MAX_TEXT_LENGTH {
                return Err(StoreError::TextTooLong);
            }
        }

        with_write_retry(|| {
            let mut conn = self.pool.get()?;
            let tx = conn.transaction()?;
            let created_at = Utc::now();

            tx.execute("INSERT INTO contents (text, image) VALUES (?, ?)", (text, image))?;
            let content_id = tx.last_insert_rowid();

            tx.execute(
                "INSERT INTO posts (user_poster_id, user_creator_id, content_id, created_at)
                 VALUES (?, ?, ?, ?)",
                (user_id, user_id, content_id, timestamp::to_store(&created_at)),
            )?;
            let post_id = tx.last_insert_rowid();

            if let Some(t) = text {
                store_tags(&tx, content_id, t)?;
            }

            tx.commit()?;
            Ok(Post {
                post_id,
                user_poster_id: user_id,
                user_creator_id: user_id,
                content_id,
                created_at,
            })
        })
    }

    /// Rewrite a post's text/image and re-extract its tags. Owner-only, and
    /// only originals can be edited.
    pub fn update_post(
        &self,
        post_id: i64,
        user_id: i64,
        text: Option<&str>,
        image: Option<&str>,
    ) -> Result<()> {
        let text = text.filter(|t| !t.is_empty());
        let image = image.filter(|i| !i.is_empty());
        if text.is_none() && image.is_none() {
            return Err(StoreError::EmptyPost);
        }
        if let Some(t) = text {
            if t.chars().count() > MAX_TEXT_LENGTH {
                return Err(StoreError::TextTooLong);
            }
        }

        with_write_retry(|| {
            let mut conn = self.pool.get()?;
            let tx = conn.transaction()?;

            let post = fetch_post(&tx, post_id)?.ok_or(StoreError::PostNotFound)?;
            if post.user_creator_id != user_id || post.is_repost() {
                return Err(StoreError::PermissionDenied);
            }

            tx.execute(
                "UPDATE contents SET text = ?, image = ? WHERE content_id = ?",
                (text, image, post.content_id),
            )?;
            tx.execute("DELETE FROM hashtags WHERE content_id = ?", [post.content_id])?;
            tx.execute("DELETE FROM mentions WHERE content_id = ?", [post.content_id])?;
            if let Some(t) = text {
                store_tags(&tx, post.content_id, t)?;
            }

            tx.commit()?;
            Ok(())
        })
    }

    /// Create a repost: a second post row sharing the original's content.
    ///
    /// Only originals can be reposted, a user cannot repost their own
    /// content, and a duplicate repost of the same content fails with
    /// [`StoreError::RepostAlreadyMade`] (checked here, not by the schema).
    pub fn create_repost(&self, user_id: i64, post_id: i64) -> Result<Post> {
        with_write_retry(|| {
            let mut conn = self.pool.get()?;
            let tx = conn.transaction()?;

            let original = fetch_post(&tx, post_id)?.ok_or(StoreError::PostNotFound)?;
            if original.is_repost() || original.user_creator_id == user_id {
                return Err(StoreError::PermissionDenied);
            }

            let already: i64 = tx.query_row(
                "SELECT COUNT(*) FROM posts
                 WHERE content_id = ? AND user_poster_id = ? AND user_poster_id != user_creator_id",
                (original.content_id, user_id),
                |row| row.get(0),
            )?;
            if already > 0 {
                return Err(StoreError::RepostAlreadyMade);
            }

            let created_at = Utc::now();
            tx.execute(
                "INSERT INTO posts (user_poster_id, user_creator_id, content_id, created_at)
                 VALUES (?, ?, ?, ?)",
                (
                    user_id,
                    original.user_creator_id,
                    original.content_id,
                    timestamp::to_store(&created_at),
                ),
            )?;
            let repost_id = tx.last_insert_rowid();

            tx.commit()?;
            Ok(Post {
                post_id: repost_id,
                user_poster_id: user_id,
                user_creator_id: original.user_creator_id,
                content_id: original.content_id,
                created_at,
            })
        })
    }

    /// Delete an original post and everything hanging off its content:
    /// hashtags, mentions, likes, favorites, every repost row, the post row
    /// itself, and finally the content. Children before parents, one
    /// transaction.
    pub fn delete_post(&self, post_id: i64, user_id: i64) -> Result<()> {
        with_write_retry(|| {
            let mut conn = self.pool.get()?;
            let tx = conn.transaction()?;

            let post = fetch_post(&tx, post_id)?.ok_or(StoreError::PostNotFound)?;
            if post.user_poster_id != user_id || post.is_repost() {
                return Err(StoreError::PermissionDenied);
            }

            let content_id = post.content_id;
            tx.execute("DELETE FROM hashtags WHERE content_id = ?", [content_id])?;
            tx.execute("DELETE FROM mentions WHERE content_id = ?", [content_id])?;
            tx.execute("DELETE FROM likes WHERE content_id = ?", [content_id])?;
            tx.execute("DELETE FROM favorites WHERE content_id = ?", [content_id])?;
            tx.execute("DELETE FROM posts WHERE content_id = ?", [content_id])?;
            tx.execute("DELETE FROM contents WHERE content_id = ?", [content_id])?;

            tx.commit()?;
            Ok(())
        })
    }

    /// Remove the viewer's repost of the given post's content. The content
    /// and the original post survive. `post_id` may name the original or
    /// the repost row itself.
    pub fn delete_repost(&self, user_id: i64, post_id: i64) -> Result<()> {
        with_write_retry(|| {
            let conn = self.pool.get()?;
            let post = fetch_post(&conn, post_id)?.ok_or(StoreError::PostNotFound)?;

            let removed = conn.execute(
                "DELETE FROM posts
                 WHERE content_id = ? AND user_poster_id = ? AND user_poster_id != user_creator_id",
                (post.content_id, user_id),
            )?;
            if removed == 0 {
                return Err(StoreError::RepostNotFound);
            }
            Ok(())
        })
    }

    pub fn get_post_row(&self, post_id: i64) -> Result<Option<Post>> {
        let conn = self.pool.get()?;
        fetch_post(&conn, post_id)
    }

    /// Activity counters for a user over [from, to]: originals posted,
    /// reposts made, reposts others made of the user's content, and likes
    /// received on the user's content.
    pub fn statistics(
        &self,
        user_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<UserStatistics> {
        let conn = self.pool.get()?;
        let from = timestamp::to_store(&from);
        let to = timestamp::to_store(&to);

        let my_posts_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts
             WHERE user_poster_id = ?1 AND user_creator_id = ?1
               AND created_at >= ?2 AND created_at <= ?3",
            (user_id, &from, &to),
            |row| row.get(0),
        )?;

        let my_reposts_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts
             WHERE user_poster_id = ?1 AND user_creator_id != ?1
               AND created_at >= ?2 AND created_at <= ?3",
            (user_id, &from, &to),
            |row| row.get(0),
        )?;

        let others_reposts_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM posts
             WHERE user_creator_id = ?1 AND user_poster_id != ?1
               AND created_at >= ?2 AND created_at <= ?3",
            (user_id, &from, &to),
            |row| row.get(0),
        )?;

        let likes_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM likes l
             JOIN posts p ON p.content_id = l.content_id
              AND p.user_creator_id = ?1 AND p.user_poster_id = ?1
             WHERE l.created_at >= ?2 AND l.created_at <= ?3",
            (user_id, &from, &to),
            |row| row.get(0),
        )?;

        Ok(UserStatistics {
            my_posts_count,
            my_reposts_count,
            others_reposts_count,
            likes_count,
        })
    }
}

fn fetch_post(conn: &rusqlite::Connection, post_id: i64) -> Result<Option<Post>> {
    let post = conn
        .query_row(
            "SELECT post_id, user_poster_id, user_creator_id, content_id, created_at
             FROM posts WHERE post_id = ?",
            [post_id],
            post_from_row,
        )
        .optional()?;
    Ok(post)
}

/// Insert the hashtags and resolvable mentions extracted from `text`.
/// Runs inside the caller's transaction so a constraint failure rolls the
/// whole post back.
fn store_tags(tx: &Transaction, content_id: i64, text: &str) -> Result<()> {
    let now = timestamp::to_store(&Utc::now());

    for tag in extract_hashtags(text) {
        tx.execute(
            "INSERT OR IGNORE INTO hashtags (content_id, hashtag, created_at) VALUES (?, ?, ?)",
            (content_id, tag, &now),
        )?;
    }

    for username in extract_mentions(text) {
        let mentioned: Option<i64> = tx
            .query_row("SELECT id FROM users WHERE username = ?", [&username], |row| {
                row.get(0)
            })
            .optional()?;
        // Mentions of unknown usernames are dropped silently.
        if let Some(mentioned_id) = mentioned {
            tx.execute(
                "INSERT OR IGNORE INTO mentions (content_id, user_mention_id, created_at)
                 VALUES (?, ?, ?)",
                (content_id, mentioned_id, &now),
            )?;
        }
    }

    Ok(())
}
