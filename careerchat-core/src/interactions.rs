//! Interaction log service
//!
//! Append-only record of chatbot exchanges. Writes validate and
//! timestamp; reads come back either by period window or as a bounded
//! recent feed. Records are never updated or deleted.

use crate::config::AnalyticsConfig;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::{Interaction, Period, UserType};
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use uuid::Uuid;

/// What a caller supplies to record an interaction; id, timestamp and
/// trimming are the log's responsibility.
#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub session_id: String,
    pub user_type: UserType,
    pub question: String,
    pub answer: String,
    pub category: crate::types::Category,
}

/// Append-only interaction log over the shared database handle
pub struct InteractionLog {
    db: Arc<Database>,
    tz: Tz,
    recent_limit: usize,
}

impl InteractionLog {
    pub fn new(db: Arc<Database>, analytics: &AnalyticsConfig) -> Result<Self> {
        Ok(Self {
            db,
            tz: analytics.tz()?,
            recent_limit: analytics.recent_limit,
        })
    }

    /// The timezone period windows are computed in
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Record one exchange. Session id, question and answer must be
    /// non-empty after trimming; the stored question and answer are the
    /// trimmed forms.
    pub fn record(&self, new: NewInteraction) -> Result<Interaction> {
        let session_id = new.session_id.trim();
        let question = new.question.trim();
        let answer = new.answer.trim();

        if session_id.is_empty() {
            return Err(Error::Validation("session_id must not be empty".into()));
        }
        if question.is_empty() {
            return Err(Error::Validation("question must not be empty".into()));
        }
        if answer.is_empty() {
            return Err(Error::Validation("answer must not be empty".into()));
        }

        let interaction = Interaction {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            user_type: new.user_type,
            question: question.to_string(),
            answer: answer.to_string(),
            category: new.category,
            created_at: Utc::now(),
        };

        self.db.insert_interaction(&interaction)?;

        tracing::debug!(
            id = %interaction.id,
            user_type = %interaction.user_type,
            category = %interaction.category,
            "Recorded interaction"
        );

        Ok(interaction)
    }

    /// All interactions inside the period window, oldest first
    pub fn query_by_period(&self, period: Period) -> Result<Vec<Interaction>> {
        let (start, end) = period.bounds(self.tz)?;
        self.db.interactions_between(start, end)
    }

    /// The most recent interactions, newest first. `limit` falls back to
    /// the configured default (100).
    pub fn recent(&self, limit: Option<usize>) -> Result<Vec<Interaction>> {
        self.db.recent_interactions(limit.unwrap_or(self.recent_limit))
    }
}
