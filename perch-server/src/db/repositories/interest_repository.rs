use chrono::Utc;
use perch_types::timestamp;

use crate::db::error::Result;
use crate::db::DbPool;

/// Declared interest keywords per user. Stored lowercase so they match
/// hashtags, which are normalized the same way at extraction time.
pub struct InterestRepository {
    pool: DbPool,
}

impl InterestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Replace the user's declared interests with the given set.
    pub fn set_interests(&self, user_id: i64, interests: &[String]) -> Result<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let now = timestamp::to_store(&Utc::now());

        tx.execute("DELETE FROM interests WHERE user_id = ?", [user_id])?;
        for interest in interests {
            let interest = interest.trim().to_lowercase();
            if interest.is_empty() {
                continue;
            }
            tx.execute(
                "INSERT OR IGNORE INTO interests (user_id, interest, created_at) VALUES (?, ?, ?)",
                (user_id, interest, &now),
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub fn get_interests(&self, user_id: i64) -> Result<Vec<String>> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare("SELECT interest FROM interests WHERE user_id = ? ORDER BY interest")?;
        let interests = stmt
            .query_map([user_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(interests)
    }
}
