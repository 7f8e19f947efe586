use chrono::{DateTime, Utc};
use perch_types::{timestamp, TrendingHashtag};

use crate::db::error::Result;
use crate::db::DbPool;

/// Read side of the hashtag and mention tables. Writes happen inside the
/// post transactions (see `post_repository`), so a failed post never leaves
/// stray tags behind.
pub struct HashtagRepository {
    pool: DbPool,
}

impl HashtagRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn get_for_content(&self, content_id: i64) -> Result<Vec<String>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT hashtag FROM hashtags WHERE content_id = ? ORDER BY hashtag")?;
        let hashtags = stmt
            .query_map([content_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hashtags)
    }

    pub fn get_mentions_for_content(&self, content_id: i64) -> Result<Vec<i64>> {
        let conn = self.pool.get()?;
        let mut stmt = conn
            .prepare("SELECT user_mention_id FROM mentions WHERE content_id = ? ORDER BY user_mention_id")?;
        let mentions = stmt
            .query_map([content_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(mentions)
    }

    /// Most-used hashtags since `since`, ordered by usage count descending.
    pub fn trending(
        &self,
        since: DateTime<Utc>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TrendingHashtag>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT hashtag, COUNT(*) AS uses
             FROM hashtags
             WHERE created_at >= ?
             GROUP BY hashtag
             ORDER BY uses DESC, hashtag ASC
             LIMIT ? OFFSET ?",
        )?;
        let trending = stmt
            .query_map(
                (timestamp::to_store(&since), limit, offset),
                |row| {
                    Ok(TrendingHashtag {
                        hashtag: row.get(0)?,
                        uses: row.get(1)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(trending)
    }
}
