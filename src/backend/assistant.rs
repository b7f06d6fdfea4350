//! Client for the study assistant answer service.
use std::time::Duration;

use anyhow::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::QueryBackend;
use crate::session::models::{Prompt, Reply, Subject};

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<Subject>,
    // Serialized even when null: the service treats a null session_id
    // as the start of a new conversation.
    session_id: Option<&'a str>,
}

#[derive(Deserialize)]
struct QueryResponse {
    answer: String,
    session_id: String,
}

/// Posts questions to `POST {base}/query` and threads the opaque
/// `session_id` the service hands back. The client keeps a cookie
/// store because the service also pins conversational state to a
/// session cookie.
pub struct AssistantClient {
    base_url: String,
    client: reqwest::Client,
}

impl AssistantClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl QueryBackend for AssistantClient {
    async fn send(&self, prompt: &Prompt) -> Result<Reply, Error> {
        let payload = QueryRequest {
            query: &prompt.text,
            subject: prompt.subject,
            session_id: prompt.session_id.as_deref(),
        };
        let url = format!("{}/query", self.base_url);

        tracing::debug!(url = %url, subject = ?prompt.subject, "sending query");

        let response: QueryResponse = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Reply::answer(&response.answer, &response.session_id))
    }
}
