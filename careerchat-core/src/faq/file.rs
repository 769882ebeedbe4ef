//! Flat-file FAQ backend
//!
//! The dataset lives in a single JSON array. Older files carry a
//! singular `question` string per entry and may omit `category`; those
//! are normalized at read time, and every write persists the current
//! shape (a `questions` array with a category label). Writes rewrite
//! the whole file under a lock, which is fine at FAQ scale.

use super::{partition, FaqStore, NewFaq};
use crate::error::{Error, Result};
use crate::types::{Category, FaqEntry, ToggledFaq};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Mutex;

/// One entry as found on disk. The phrasing field accepts both the
/// current `questions` array and the legacy singular `question`.
#[derive(Debug, Deserialize)]
struct RawFaqEntry {
    id: i64,
    #[serde(flatten)]
    phrasing: RawPhrasing,
    answer: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    common: bool,
}

#[derive(Debug, Deserialize)]
enum RawPhrasing {
    #[serde(rename = "questions")]
    Many(Vec<String>),
    #[serde(rename = "question")]
    One(String),
}

impl From<RawFaqEntry> for FaqEntry {
    fn from(raw: RawFaqEntry) -> Self {
        let questions = match raw.phrasing {
            RawPhrasing::Many(qs) => qs,
            RawPhrasing::One(q) => vec![q],
        };
        FaqEntry {
            id: raw.id,
            questions,
            answer: raw.answer,
            category: Category::from_label_lossy(raw.category.as_deref()),
            common: raw.common,
        }
    }
}

/// JSON-file-backed FAQ store
pub struct FileFaqStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileFaqStore {
    /// Open a store over the given file. A missing file reads as an
    /// empty dataset and is created on first write.
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = Self {
            path,
            lock: Mutex::new(()),
        };
        // Validate eagerly so a corrupt file fails at startup, not first use
        store.load()?;
        Ok(store)
    }

    fn load(&self) -> Result<Vec<FaqEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<RawFaqEntry> = serde_json::from_str(&content)?;
        Ok(raw.into_iter().map(FaqEntry::from).collect())
    }

    fn save(&self, entries: &[FaqEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn next_id(entries: &[FaqEntry]) -> i64 {
        entries.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }
}

impl FaqStore for FileFaqStore {
    fn list(&self) -> Result<Vec<FaqEntry>> {
        let _guard = self.lock.lock().unwrap();
        self.load()
    }

    fn get(&self, id: i64) -> Result<FaqEntry> {
        let _guard = self.lock.lock().unwrap();
        self.load()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(Error::NotFound(id))
    }

    fn add(&self, new: NewFaq) -> Result<FaqEntry> {
        let new = new.validate()?;
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        let entry = FaqEntry {
            id: Self::next_id(&entries),
            questions: new.questions,
            answer: new.answer,
            category: new.category,
            common: false,
        };
        entries.push(entry.clone());
        self.save(&entries)?;
        tracing::info!(id = entry.id, "Added FAQ entry");
        Ok(entry)
    }

    fn update(&self, id: i64, new: NewFaq) -> Result<FaqEntry> {
        let new = new.validate()?;
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::NotFound(id))?;
        entry.questions = new.questions;
        entry.answer = new.answer;
        entry.category = new.category;
        entry.common = new.common;
        let updated = entry.clone();
        self.save(&entries)?;
        Ok(updated)
    }

    fn toggle_common(&self, id: i64) -> Result<ToggledFaq> {
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::NotFound(id))?;
        entry.common = !entry.common;
        self.save(&entries)?;
        Ok(partition(entries))
    }

    fn delete(&self, id: i64) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(Error::NotFound(id));
        }
        self.save(&entries)?;
        Ok(())
    }
}
