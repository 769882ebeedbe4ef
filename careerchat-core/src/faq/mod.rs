//! FAQ dataset
//!
//! Curated question/answer entries maintained from the dashboard. Two
//! backends exist behind the [`FaqStore`] trait: a flat JSON file (the
//! format the dashboard originally shipped with) and a SQLite table
//! sharing the main database. Both enforce the same write contract.

pub mod file;
pub mod sqlite;

pub use file::FileFaqStore;
pub use sqlite::SqliteFaqStore;

use crate::error::{Error, Result};
use crate::types::{Category, FaqEntry, ToggledFaq};

/// What a caller supplies to create or replace an FAQ entry
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewFaq {
    /// Phrasings that map to the same answer
    pub questions: Vec<String>,
    pub answer: String,
    /// Strict label from the closed category set
    pub category: Category,
    /// Quick-suggestion flag. Ignored on add (new entries always start
    /// false); on edit the entry is replaced wholesale, this included.
    #[serde(default)]
    pub common: bool,
}

impl NewFaq {
    /// Trim phrasings, drop empty ones, and require at least one phrasing
    /// and a non-empty answer.
    pub fn validate(self) -> Result<Self> {
        let questions: Vec<String> = self
            .questions
            .iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if questions.is_empty() {
            return Err(Error::Validation(
                "at least one question phrasing is required".to_string(),
            ));
        }

        let answer = self.answer.trim().to_string();
        if answer.is_empty() {
            return Err(Error::Validation("answer must not be empty".to_string()));
        }

        Ok(Self {
            questions,
            answer,
            category: self.category,
            common: self.common,
        })
    }
}

/// Storage backend for the FAQ dataset
pub trait FaqStore: Send + Sync {
    /// All entries, id order
    fn list(&self) -> Result<Vec<FaqEntry>>;

    /// One entry by id
    fn get(&self, id: i64) -> Result<FaqEntry>;

    /// Create an entry; `common` starts false
    fn add(&self, new: NewFaq) -> Result<FaqEntry>;

    /// Full replace of an entry, `common` included
    fn update(&self, id: i64, new: NewFaq) -> Result<FaqEntry>;

    /// Flip the `common` flag on one entry, returning both partitions
    fn toggle_common(&self, id: i64) -> Result<ToggledFaq>;

    /// Remove an entry
    fn delete(&self, id: i64) -> Result<()>;

    /// The `common = true` subset, for quick suggestions
    fn common(&self) -> Result<Vec<FaqEntry>> {
        Ok(self.list()?.into_iter().filter(|e| e.common).collect())
    }
}

/// Both partitions after a mutation, for the dashboard to swap in wholesale
pub(crate) fn partition(entries: Vec<FaqEntry>) -> ToggledFaq {
    let common_questions = entries.iter().filter(|e| e.common).cloned().collect();
    ToggledFaq {
        questions: entries,
        common_questions,
    }
}
