use chrono::Utc;
use rusqlite::{Connection, Result as SqlResult};
use std::path::PathBuf;

/// How many filter changes it takes before we ask for a review, matching
/// the original app.
pub const REVIEW_THRESHOLD: i64 = 20;

/// Whether the review prompt should fire for this filter-change count.
///
/// The prompt fires exactly when the counter reaches the threshold, not
/// before it, and not again on later changes or later sessions.
pub fn review_due(count: i64) -> bool {
    count == REVIEW_THRESHOLD
}

/// The Library manages the SQLite usage database.
/// It stores the filter-change counter, per-filter tallies and the export
/// history.
pub struct Library {
    conn: Connection,
    db_path: PathBuf,
}

impl Library {
    /// Create a new Library instance and initialize the database.
    ///
    /// The database file is created in the user's data directory:
    /// - Linux: ~/.local/share/insta-filter/insta_filter.db
    /// - macOS: ~/Library/Application Support/insta-filter/insta_filter.db
    /// - Windows: %APPDATA%\insta-filter\insta_filter.db
    pub fn new() -> SqlResult<Self> {
        let db_path = Self::get_db_path();

        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .expect("Failed to create application data directory");
        }

        let conn = Connection::open(&db_path)?;

        println!("📁 Database initialized at: {}", db_path.display());

        let mut library = Library { conn, db_path };
        library.init_schema()?;

        Ok(library)
    }

    /// In-memory database for tests: same schema, no disk state.
    #[cfg(test)]
    pub fn open_in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        let mut library = Library {
            conn,
            db_path: PathBuf::new(),
        };
        library.init_schema()?;
        Ok(library)
    }

    /// Get the path where the database should be stored
    fn get_db_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user data directory");

        path.push("insta-filter");
        path.push("insta_filter.db");
        path
    }

    /// Initialize the database schema.
    /// Creates all necessary tables and indexes if they don't exist.
    fn init_schema(&mut self) -> SqlResult<()> {
        // Single-row-per-key counters; filter_count lives here
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS usage_stats (
                key             TEXT PRIMARY KEY,
                value           INTEGER NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;

        // Per-filter change tallies, for the startup status line
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS filter_usage (
                filter          TEXT PRIMARY KEY,
                uses            INTEGER NOT NULL,
                last_used_at    INTEGER NOT NULL
            )",
            [],
        )?;

        // Export history; settings are stored as JSON
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS shares (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                path            TEXT NOT NULL,
                filter          TEXT NOT NULL,
                settings_json   TEXT NOT NULL,
                shared_at       INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_shares_shared_at
             ON shares(shared_at DESC)",
            [],
        )?;

        println!("✅ Database schema initialized");

        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// The persisted number of filter changes across all sessions.
    pub fn filter_count(&self) -> SqlResult<i64> {
        let count = self
            .conn
            .query_row(
                "SELECT value FROM usage_stats WHERE key = 'filter_count'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);
        Ok(count)
    }

    /// Record one filter change and return the new global count.
    ///
    /// Both the global counter and the per-filter tally move in a single
    /// transaction, so the two can never drift apart.
    pub fn record_filter_change(&mut self, filter_slug: &str) -> SqlResult<i64> {
        let now = Utc::now().timestamp();
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO usage_stats (key, value, updated_at) VALUES ('filter_count', 1, ?1)
             ON CONFLICT(key) DO UPDATE SET value = value + 1, updated_at = ?1",
            [now],
        )?;

        tx.execute(
            "INSERT INTO filter_usage (filter, uses, last_used_at) VALUES (?1, 1, ?2)
             ON CONFLICT(filter) DO UPDATE SET uses = uses + 1, last_used_at = ?2",
            rusqlite::params![filter_slug, now],
        )?;

        let count: i64 = tx.query_row(
            "SELECT value FROM usage_stats WHERE key = 'filter_count'",
            [],
            |row| row.get(0),
        )?;

        tx.commit()?;
        Ok(count)
    }

    /// The filter the user reaches for most, if any changes were recorded.
    pub fn most_used_filter(&self) -> SqlResult<Option<(String, i64)>> {
        let result = self.conn.query_row(
            "SELECT filter, uses FROM filter_usage ORDER BY uses DESC, filter ASC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        );

        match result {
            Ok(row) => Ok(Some(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// How many exports have been recorded.
    pub fn share_count(&self) -> SqlResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM shares", [], |row| row.get(0))
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_database_counts_zero() {
        let library = Library::open_in_memory().unwrap();
        assert_eq!(library.filter_count().unwrap(), 0);
        assert_eq!(library.share_count().unwrap(), 0);
        assert_eq!(library.most_used_filter().unwrap(), None);
    }

    #[test]
    fn test_record_filter_change_increments() {
        let mut library = Library::open_in_memory().unwrap();
        assert_eq!(library.record_filter_change("sepia_tone").unwrap(), 1);
        assert_eq!(library.record_filter_change("edges").unwrap(), 2);
        assert_eq!(library.record_filter_change("sepia_tone").unwrap(), 3);
        assert_eq!(library.filter_count().unwrap(), 3);

        let (favourite, uses) = library.most_used_filter().unwrap().unwrap();
        assert_eq!(favourite, "sepia_tone");
        assert_eq!(uses, 2);
    }

    #[test]
    fn test_review_fires_exactly_once_at_threshold() {
        let mut library = Library::open_in_memory().unwrap();
        let mut fired = Vec::new();

        for _ in 0..25 {
            let count = library.record_filter_change("vignette").unwrap();
            if review_due(count) {
                fired.push(count);
            }
        }

        // Not on the 19th, not on the 21st, only the 20th.
        assert_eq!(fired, vec![REVIEW_THRESHOLD]);
    }

    #[test]
    fn test_share_history_is_queryable() {
        let library = Library::open_in_memory().unwrap();
        library
            .conn
            .execute(
                "INSERT INTO shares (path, filter, settings_json, shared_at)
                 VALUES ('/tmp/InstaPreview.png', 'bloom', '{}', 0)",
                [],
            )
            .unwrap();
        assert_eq!(library.share_count().unwrap(), 1);
    }
}
