use chrono::Utc;
use perch_types::{timestamp, User};
use rusqlite::{OptionalExtension, Row};

use crate::db::error::{Result, StoreError};
use crate::db::{parse_ts, DbPool};

pub struct UserRepository {
    pool: DbPool,
}

const USER_COLUMNS: &str = "id, email, username, is_public, blocked, location, created_at";

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        is_public: row.get::<_, i64>(3)? != 0,
        blocked: row.get::<_, i64>(4)? != 0,
        location: row.get(5)?,
        created_at: parse_ts(6, row.get(6)?)?,
    })
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Mirror a user row from the identity service.
    pub fn create(&self, email: &str, username: &str, is_public: bool, location: &str) -> Result<User> {
        let conn = self.pool.get()?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO users (email, username, is_public, blocked, location, created_at)
             VALUES (?, ?, ?, 0, ?, ?)",
            (
                email,
                username,
                is_public as i64,
                location,
                timestamp::to_store(&created_at),
            ),
        )?;

        Ok(User {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            username: username.to_string(),
            is_public,
            blocked: false,
            location: location.to_string(),
            created_at,
        })
    }

    pub fn get_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
                [user_id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.pool.get()?;
        let user = conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"),
                [username],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Flip a user's public/private flag.
    pub fn set_public(&self, user_id: i64, is_public: bool) -> Result<()> {
        self.update_flag(user_id, "is_public", is_public)
    }

    /// Mark an account blocked (or unblocked). Mirrors a moderation
    /// decision made in the identity service.
    pub fn set_blocked(&self, user_id: i64, blocked: bool) -> Result<()> {
        self.update_flag(user_id, "blocked", blocked)
    }

    fn update_flag(&self, user_id: i64, column: &str, value: bool) -> Result<()> {
        let conn = self.pool.get()?;
        let changed = conn.execute(
            &format!("UPDATE users SET {column} = ? WHERE id = ?"),
            (value as i64, user_id),
        )?;
        if changed == 0 {
            return Err(StoreError::UserNotFound);
        }
        Ok(())
    }
}
