//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: interaction log + FAQ dataset
    r#"
    -- Append-only interaction log. One row per successful chatbot
    -- exchange; rows are never updated or deleted.
    CREATE TABLE IF NOT EXISTS interactions (
        id          TEXT PRIMARY KEY,
        session_id  TEXT NOT NULL,
        user_type   TEXT NOT NULL,      -- 'user', 'alumni'
        question    TEXT NOT NULL,
        answer      TEXT NOT NULL,
        category    TEXT NOT NULL,      -- snapshot label from the closed set
        created_at  DATETIME NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_interactions_created ON interactions(created_at DESC);
    CREATE INDEX IF NOT EXISTS idx_interactions_session ON interactions(session_id);

    -- FAQ dataset for the dashboard and quick suggestions
    CREATE TABLE IF NOT EXISTS faq_entries (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        questions   JSON NOT NULL,      -- array of phrasings
        answer      TEXT NOT NULL,
        category    TEXT NOT NULL,
        common      INTEGER NOT NULL DEFAULT 0
    );

    CREATE INDEX IF NOT EXISTS idx_faq_common ON faq_entries(common);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
