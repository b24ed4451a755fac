//! SQLite-backed link database: connection, migrations, timestamp helper.
//!
//! Profile, import, and URL operations live in their own files.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, Transaction};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS imports (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        alias TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS urls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        profile_id INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
        import_id INTEGER NOT NULL REFERENCES imports(id) ON DELETE CASCADE,
        original_url TEXT NOT NULL,
        cleaned_url TEXT NOT NULL,
        domain TEXT NOT NULL,
        original_url_lc TEXT NOT NULL,
        cleaned_url_lc TEXT NOT NULL,
        domain_lc TEXT NOT NULL,
        is_duplicate INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_imports_profile ON imports(profile_id)",
    "CREATE INDEX IF NOT EXISTS idx_urls_import ON urls(import_id)",
    "CREATE INDEX IF NOT EXISTS idx_urls_lineage ON urls(profile_id, cleaned_url, created_at, id)",
];

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the SQLite-backed link database.
///
/// The database file defaults to the XDG state directory:
/// `~/.local/state/urlsift/links.db`.
#[derive(Clone)]
pub struct LinkDb {
    pub(crate) pool: Pool<Sqlite>,
}

impl LinkDb {
    /// Open (or create) the default link database and run migrations.
    pub async fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsift")?;
        let state_dir = xdg_dirs.get_state_home();
        Self::open_at(state_dir.join("links.db")).await
    }

    /// Open (or create) the database at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&uri)
            .await?;
        let db = LinkDb { pool };
        db.migrate().await?;
        tracing::debug!(path = %path.display(), "link database ready");
        Ok(db)
    }

    pub(crate) async fn migrate(&self) -> crate::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Start a write transaction. Multi-step operations (batch processing,
    /// import deletion) run inside one so they commit all-or-nothing.
    pub(crate) async fn begin(&self) -> crate::Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }
}

/// Current time as Unix milliseconds (for DB timestamps).
pub(crate) fn unix_timestamp_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Open an in-memory database for tests (no disk I/O).
#[cfg(test)]
pub(crate) async fn open_memory() -> crate::Result<LinkDb> {
    // Single connection so the pool never hands back a different empty DB.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = LinkDb { pool };
    db.migrate().await?;
    Ok(db)
}
