//! SQLite-backed response cache
//!
//! Responses are keyed by the SHA-256 of their URL. Only successful
//! responses are stored; entries older than the configured expiry are
//! treated as absent and overwritten on the next fetch.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS responses (
    key TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    status INTEGER NOT NULL,
    body BLOB NOT NULL,
    fetched_at TEXT NOT NULL
);
"#;

/// A response loaded from the cache
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    /// Checks whether this entry is older than `expire_after`
    pub fn is_stale(&self, expire_after: Option<Duration>) -> bool {
        match expire_after {
            Some(max_age) => Utc::now() - self.fetched_at > max_age,
            None => false,
        }
    }
}

/// Persistent URL -> response cache
pub struct ResponseCache {
    conn: Connection,
    expire_after: Option<Duration>,
}

impl ResponseCache {
    /// Opens (or creates) the cache database at `path`
    ///
    /// The parent directory is created if it does not exist.
    pub fn open(path: &Path, expire_after: Option<Duration>) -> Result<Self, crate::ScoutError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;

        Ok(Self { conn, expire_after })
    }

    /// Creates an in-memory cache
    pub fn in_memory(expire_after: Option<Duration>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn, expire_after })
    }

    /// Cache key for a URL
    pub fn key_for(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Looks up a fresh entry for `url`
    pub fn get(&self, url: &str) -> Result<Option<CachedResponse>, rusqlite::Error> {
        let entry = self
            .conn
            .query_row(
                "SELECT url, status, body, fetched_at FROM responses WHERE key = ?1",
                params![Self::key_for(url)],
                |row| {
                    let fetched_at: String = row.get(3)?;
                    Ok(CachedResponse {
                        url: row.get(0)?,
                        status: row.get(1)?,
                        body: row.get(2)?,
                        fetched_at: DateTime::parse_from_rfc3339(&fetched_at)
                            .map(|dt| dt.with_timezone(&Utc))
                            .unwrap_or(DateTime::<Utc>::MIN_UTC),
                    })
                },
            )
            .optional()?;

        Ok(entry.filter(|e| !e.is_stale(self.expire_after)))
    }

    /// Stores (or replaces) the response for `url`
    pub fn put(&self, url: &str, status: u16, body: &[u8]) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (key, url, status, body, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                Self::key_for(url),
                url,
                status,
                body,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(())
    }

    /// Removes every cached response, returning how many were dropped
    pub fn clear(&self) -> Result<usize, rusqlite::Error> {
        self.conn.execute("DELETE FROM responses", [])
    }

    /// Number of cached responses (fresh or not)
    pub fn len(&self) -> Result<u64, rusqlite::Error> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    pub fn is_empty(&self) -> Result<bool, rusqlite::Error> {
        Ok(self.len()? == 0)
    }
}
