//! Chat session facade
//!
//! Single entry point for answering a question: validate, try the
//! smalltalk shortcuts, otherwise call the answer service, and log the
//! exchange on success. A failed model call logs nothing, so the
//! interaction log only ever contains completed exchanges.

pub mod client;
pub mod smalltalk;

pub use client::{ModelAnswer, ModelClient};

use crate::error::{Error, Result};
use crate::faq::FaqStore;
use crate::interactions::{InteractionLog, NewInteraction};
use crate::types::{Category, UserType};
use std::sync::Arc;

/// Chat service wiring the answer pipeline together
pub struct ChatService {
    log: Arc<InteractionLog>,
    faq: Arc<dyn FaqStore>,
    client: Option<ModelClient>,
}

impl ChatService {
    pub fn new(
        log: Arc<InteractionLog>,
        faq: Arc<dyn FaqStore>,
        client: Option<ModelClient>,
    ) -> Self {
        Self { log, faq, client }
    }

    /// Answer a free-text question from a session.
    ///
    /// Greetings and farewells get a canned reply without touching the
    /// model. Everything else goes to the answer service; its category
    /// label is folded into the closed set and the exchange is recorded.
    pub async fn ask(
        &self,
        session_id: &str,
        user_type: UserType,
        question: &str,
    ) -> Result<String> {
        let question = question.trim();
        if session_id.trim().is_empty() {
            return Err(Error::Validation("session_id must not be empty".into()));
        }
        if question.is_empty() {
            return Err(Error::Validation("question must not be empty".into()));
        }

        if let Some(reply) = smalltalk::reply_to(question) {
            self.log.record(NewInteraction {
                session_id: session_id.to_string(),
                user_type,
                question: question.to_string(),
                answer: reply.to_string(),
                category: Category::General,
            })?;
            return Ok(reply.to_string());
        }

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::Upstream("answer service is not configured".to_string()))?;

        let model_answer = client.ask(session_id, question).await?;
        let category = Category::from_label_lossy(model_answer.category.as_deref());

        self.log.record(NewInteraction {
            session_id: session_id.to_string(),
            user_type,
            question: question.to_string(),
            answer: model_answer.answer.clone(),
            category,
        })?;

        Ok(model_answer.answer)
    }

    /// Answer one of the curated common questions by id.
    ///
    /// Replies straight from the FAQ dataset (no model call) and records
    /// the exchange under the entry's first phrasing.
    pub fn answer_common(
        &self,
        session_id: &str,
        user_type: UserType,
        question_id: i64,
    ) -> Result<String> {
        if session_id.trim().is_empty() {
            return Err(Error::Validation("session_id must not be empty".into()));
        }

        let entry = self.faq.get(question_id)?;
        let question = entry
            .questions
            .first()
            .cloned()
            .unwrap_or_else(|| format!("faq #{}", entry.id));

        self.log.record(NewInteraction {
            session_id: session_id.to_string(),
            user_type,
            question,
            answer: entry.answer.clone(),
            category: entry.category,
        })?;

        Ok(entry.answer)
    }

    /// The curated quick-suggestion entries for the chat home screen
    pub fn common_questions(&self) -> Result<Vec<crate::types::FaqEntry>> {
        self.faq.common()
    }

    /// Whether the answer service is configured and reachable
    pub async fn model_healthy(&self) -> bool {
        match &self.client {
            Some(client) => client.health_check().await,
            None => false,
        }
    }
}
