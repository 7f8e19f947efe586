use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::error::Result;
use super::schema::{DEMO_DATA, SCHEMA};

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

// Distinguishes shared-cache in-memory databases, so every pool gets its
// own database while connections within a pool share one.
static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Create a new database connection pool.
    ///
    /// `path` is a database file path, or ":memory:" for an in-memory
    /// database.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy();
        if path_str.trim().eq_ignore_ascii_case(MEMORY_DB_PATH) {
            return Self::in_memory();
        }

        let manager = SqliteConnectionManager::file(path).with_init(configure_connection);
        let pool = Pool::new(manager)?;
        Ok(Self { pool })
    }

    /// Create an in-memory database pool (useful for testing).
    ///
    /// Pooled connections open the same shared-cache database; a plain
    /// `:memory:` open would give every pooled connection its own empty
    /// database.
    pub fn in_memory() -> Result<Self> {
        let serial = MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed);
        let uri = format!("file:perch-mem-{serial}?mode=memory&cache=shared");
        let manager = SqliteConnectionManager::file(uri)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI,
            )
            .with_init(configure_connection);
        let pool = Pool::new(manager)?;
        Ok(Self { pool })
    }

    /// Initialize the database schema.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Seed the database with demo data for local development.
    pub fn seed_demo_data(&self) -> Result<()> {
        let conn = self.connection()?;
        conn.execute_batch(DEMO_DATA)?;
        Ok(())
    }

    /// Get a connection from the pool.
    pub fn connection(&self) -> Result<DbConnection> {
        Ok(self.pool.get()?)
    }
}

fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(())
}

/// Run a write closure, retrying a bounded number of times with backoff
/// when the database reports busy/locked. Read paths never retry; their
/// errors reflect data and authorization state, not transient failure.
pub fn with_write_retry<T>(mut op: impl FnMut() -> Result<T>) -> Result<T> {
    let mut delay = Duration::from_millis(25);
    for _ in 0..2 {
        match op() {
            Err(err) if err.is_busy() => {
                tracing::debug!("write transaction busy, retrying in {:?}", delay);
                std::thread::sleep(delay);
                delay *= 2;
            }
            other => return other,
        }
    }
    op()
}
