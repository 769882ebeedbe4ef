//! SQLite FAQ backend
//!
//! Stores entries in the `faq_entries` table of the main database, so a
//! deployment without a flat file needs nothing beyond the one SQLite
//! database it already has.

use super::{partition, FaqStore, NewFaq};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::{FaqEntry, ToggledFaq};
use std::sync::Arc;

/// FAQ store backed by the shared database handle
pub struct SqliteFaqStore {
    db: Arc<Database>,
}

impl SqliteFaqStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl FaqStore for SqliteFaqStore {
    fn list(&self) -> Result<Vec<FaqEntry>> {
        self.db.list_faq()
    }

    fn get(&self, id: i64) -> Result<FaqEntry> {
        self.db.get_faq(id)?.ok_or(Error::NotFound(id))
    }

    fn add(&self, new: NewFaq) -> Result<FaqEntry> {
        let new = new.validate()?;
        let entry = self.db.insert_faq(&new.questions, &new.answer, new.category)?;
        tracing::info!(id = entry.id, "Added FAQ entry");
        Ok(entry)
    }

    fn update(&self, id: i64, new: NewFaq) -> Result<FaqEntry> {
        let new = new.validate()?;
        let mut entry = self.get(id)?;
        entry.questions = new.questions;
        entry.answer = new.answer;
        entry.category = new.category;
        entry.common = new.common;
        if !self.db.update_faq(&entry)? {
            return Err(Error::NotFound(id));
        }
        Ok(entry)
    }

    fn toggle_common(&self, id: i64) -> Result<ToggledFaq> {
        if !self.db.toggle_faq_common(id)? {
            return Err(Error::NotFound(id));
        }
        Ok(partition(self.db.list_faq()?))
    }

    fn delete(&self, id: i64) -> Result<()> {
        if !self.db.delete_faq(id)? {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }
}
