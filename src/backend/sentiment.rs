//! Client for the sentiment classification service.
use std::time::Duration;

use anyhow::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::QueryBackend;
use crate::session::models::{Prompt, Reply, Sentiment};

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct AnalyzeBatchRequest<'a> {
    texts: &'a [String],
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    text: String,
    prediction: String,
    confidence: f32,
}

#[derive(Deserialize)]
struct AnalyzeBatchResponse {
    results: Vec<AnalyzeResponse>,
}

impl From<AnalyzeResponse> for Reply {
    fn from(response: AnalyzeResponse) -> Self {
        Reply::classification(
            &response.text,
            Sentiment::from_label(&response.prediction),
            response.confidence,
        )
    }
}

/// Posts feedback text to `POST {base}/analyze`. Stateless: the
/// classifier has no notion of a conversation, so prompts sent through
/// it never carry a subject or session id.
pub struct SentimentClient {
    base_url: String,
    client: reqwest::Client,
}

impl SentimentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// Classify several texts in one request. The service accepts a
    /// `texts` array next to the single-`text` shape and answers with
    /// a `results` array in the same order.
    pub async fn analyze_batch(&self, texts: &[String]) -> Result<Vec<Reply>, Error> {
        let payload = AnalyzeBatchRequest { texts };

        tracing::debug!(count = texts.len(), "sending batch analyze request");

        let response: AnalyzeBatchResponse = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.results.into_iter().map(Reply::from).collect())
    }
}

#[async_trait]
impl QueryBackend for SentimentClient {
    async fn send(&self, prompt: &Prompt) -> Result<Reply, Error> {
        let payload = AnalyzeRequest { text: &prompt.text };

        tracing::debug!(url = %self.endpoint(), "sending analyze request");

        let response: AnalyzeResponse = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.into())
    }
}
