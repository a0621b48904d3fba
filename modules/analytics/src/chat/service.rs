use billsight_common::config;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

use crate::chat::model::ChatAnswer;
use crate::Error;

/// What the collaborator answers on success. Unknown fields are ignored.
#[derive(Debug, Default, serde::Deserialize)]
struct CollaboratorAnswer {
    sql: Option<String>,
    results: Option<Value>,
    message: Option<String>,
}

/// What the collaborator answers on failure, either shape.
#[derive(Debug, Default, serde::Deserialize)]
struct CollaboratorFailure {
    detail: Option<String>,
    error: Option<String>,
}

/// Proxy to the natural-language-to-SQL collaborator. The collaborator holds
/// its own read-only view of the data; this service only relays.
#[derive(Clone, Debug)]
pub struct ChatService {
    client: reqwest::Client,
    url: String,
}

impl ChatService {
    pub fn new(config: &config::Chat) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Relay one question. An empty question is rejected before any network
    /// round-trip.
    #[instrument(skip(self), err)]
    pub async fn ask(&self, query: &str) -> Result<ChatAnswer, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::BadRequest("Query is required".to_string()));
        }

        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<CollaboratorFailure>()
                .await
                .ok()
                .and_then(|failure| failure.detail.or(failure.error))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            log::warn!("collaborator answered {status}: {message}");
            return Err(Error::Collaborator(message));
        }

        let answer: CollaboratorAnswer = response.json().await?;

        Ok(ChatAnswer {
            sql: answer.sql,
            results: answer.results,
            message: answer
                .message
                .unwrap_or_else(|| "Query successful".to_string()),
        })
    }
}
