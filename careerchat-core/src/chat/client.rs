//! HTTP client for the external answer service
//!
//! The answer service hosts the language model. It exposes a single
//! `POST /chat/` endpoint taking the anonymous user id and the question
//! and returning the generated answer with a category label.

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    user_id: &'a str,
    question: &'a str,
}

/// Answer returned by the model service
#[derive(Debug, Clone, Deserialize)]
pub struct ModelAnswer {
    pub answer: String,
    /// Category label chosen by the model; folded into the closed set
    /// by the caller
    #[serde(default)]
    pub category: Option<String>,
}

/// Client for the answer service
pub struct ModelClient {
    client: reqwest::Client,
    base_url: String,
}

impl ModelClient {
    /// Build a client from config. Returns `None` when no base URL is
    /// configured (the service then runs FAQ-only).
    pub fn from_config(config: &ModelConfig) -> Result<Option<Self>> {
        let Some(base_url) = &config.base_url else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Upstream(format!("failed to build HTTP client: {}", e)))?;

        Ok(Some(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }))
    }

    /// Ask the model a question
    pub async fn ask(&self, user_id: &str, question: &str) -> Result<ModelAnswer> {
        let url = format!("{}/chat/", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { user_id, question })
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("answer service unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "answer service returned {}",
                response.status()
            )));
        }

        response
            .json::<ModelAnswer>()
            .await
            .map_err(|e| Error::Upstream(format!("invalid answer service response: {}", e)))
    }

    /// Check whether the answer service responds at all
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Answer service health check failed");
                false
            }
        }
    }
}
