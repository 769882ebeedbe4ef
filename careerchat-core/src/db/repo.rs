//! Database repository layer
//!
//! Query and insert operations for interactions and FAQ entries. The
//! higher-level contracts (validation, period arithmetic, partitioning)
//! live in the service modules; this layer speaks rows.

use crate::error::{Error, Result};
use crate::types::{Category, FaqEntry, Interaction};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::Mutex;

/// Database handle (single pooled connection behind a mutex)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL mode for better read concurrency under the single writer
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    // ============================================
    // Interaction operations
    // ============================================

    /// Insert one interaction record. Append-only: no update path exists.
    pub fn insert_interaction(&self, interaction: &Interaction) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO interactions (id, session_id, user_type, question, answer, category, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                interaction.id,
                interaction.session_id,
                interaction.user_type.as_str(),
                interaction.question,
                interaction.answer,
                interaction.category.as_str(),
                interaction.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All interactions with `start <= created_at < end`, oldest first
    pub fn interactions_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Interaction>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT * FROM interactions WHERE created_at >= ?1 AND created_at < ?2 \
             ORDER BY created_at ASC",
        )?;
        let rows = stmt.query_map(
            params![start.to_rfc3339(), end.to_rfc3339()],
            Self::row_to_interaction,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// The `limit` most recent interactions, newest first
    pub fn recent_interactions(&self, limit: usize) -> Result<Vec<Interaction>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT * FROM interactions ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit as i64], Self::row_to_interaction)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Total interaction count (for health/ops views)
    pub fn interaction_count(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM interactions", [], |r| r.get(0))?;
        Ok(count)
    }

    fn row_to_interaction(row: &Row) -> rusqlite::Result<Interaction> {
        let user_type_str: String = row.get("user_type")?;
        let category_str: String = row.get("category")?;
        let created_at_str: String = row.get("created_at")?;

        Ok(Interaction {
            id: row.get("id")?,
            session_id: row.get("session_id")?,
            user_type: user_type_str.parse().unwrap_or_default(),
            question: row.get("question")?,
            answer: row.get("answer")?,
            category: Category::from_label_lossy(Some(&category_str)),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    // ============================================
    // FAQ operations
    // ============================================

    /// All FAQ entries, id order
    pub fn list_faq(&self) -> Result<Vec<FaqEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT * FROM faq_entries ORDER BY id ASC")?;
        let rows = stmt.query_map([], Self::row_to_faq)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// One FAQ entry by id
    pub fn get_faq(&self, id: i64) -> Result<Option<FaqEntry>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT * FROM faq_entries WHERE id = ?", [id], |row| {
            Self::row_to_faq(row)
        })
        .optional()
        .map_err(Error::from)
    }

    /// Insert a new FAQ entry, returning it with the assigned id
    pub fn insert_faq(
        &self,
        questions: &[String],
        answer: &str,
        category: Category,
    ) -> Result<FaqEntry> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO faq_entries (questions, answer, category, common) VALUES (?1, ?2, ?3, 0)",
            params![
                serde_json::to_string(questions)?,
                answer,
                category.as_str(),
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(FaqEntry {
            id,
            questions: questions.to_vec(),
            answer: answer.to_string(),
            category,
            common: false,
        })
    }

    /// Full replace of an entry's mutable fields. Returns false if `id` is unknown.
    pub fn update_faq(&self, entry: &FaqEntry) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE faq_entries SET questions = ?1, answer = ?2, category = ?3, common = ?4 \
             WHERE id = ?5",
            params![
                serde_json::to_string(&entry.questions)?,
                entry.answer,
                entry.category.as_str(),
                entry.common as i64,
                entry.id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Atomically flip `common` on one row. Returns false if `id` is unknown.
    pub fn toggle_faq_common(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE faq_entries SET common = NOT common WHERE id = ?",
            [id],
        )?;
        Ok(changed > 0)
    }

    /// Delete one entry. Returns false if `id` is unknown.
    pub fn delete_faq(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute("DELETE FROM faq_entries WHERE id = ?", [id])?;
        Ok(changed > 0)
    }

    fn row_to_faq(row: &Row) -> rusqlite::Result<FaqEntry> {
        let questions_str: String = row.get("questions")?;
        let category_str: String = row.get("category")?;
        let common: i64 = row.get("common")?;

        Ok(FaqEntry {
            id: row.get("id")?,
            questions: serde_json::from_str(&questions_str).unwrap_or_default(),
            answer: row.get("answer")?,
            category: Category::from_label_lossy(Some(&category_str)),
            common: common != 0,
        })
    }
}
