use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

use crate::backend::{QueryBackend, SentimentClient};
use crate::core::config::AppConfig;
use crate::render::{ConsoleRender, RenderSink};
use crate::session::Session;
use crate::session::core::SENTIMENT_FAILURE_NOTICE;
use crate::session::models::{MAX_INPUT_CHARS, Prompt, Reply};

const EMPTY_FEEDBACK_NOTICE: &str = "Please enter some feedback text to analyze.";

fn invalid_input(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text.chars().count() > MAX_INPUT_CHARS
}

pub async fn run(texts: Vec<String>, json: bool) -> Result<()> {
    // Validation happens before any branch so the direct-client batch
    // and JSON paths reject bad input without a network call, exactly
    // like the session path does.
    if texts.iter().any(|text| invalid_input(text)) {
        ConsoleRender::quiet().render_error(EMPTY_FEEDBACK_NOTICE);
        return Ok(());
    }

    let config = AppConfig::default();
    let client = SentimentClient::new(&config.sentiment_api_url, config.http_timeout)?;

    // Batch and JSON runs talk to the client directly; the interactive
    // single-text path goes through the session lifecycle so failures
    // come out as the fixed user-facing notice.
    if json || texts.len() > 1 {
        let replies = if texts.len() > 1 {
            client.analyze_batch(&texts).await?
        } else {
            vec![client.send(&Prompt::new(&texts[0], None, None)).await?]
        };
        if json {
            print_json(&replies)?;
        } else {
            let render = ConsoleRender::quiet();
            for reply in &replies {
                render.render_success(reply);
            }
        }
        return Ok(());
    }

    let session = Session::builder(Box::new(client), Arc::new(ConsoleRender::quiet()))
        .failure_notice(SENTIMENT_FAILURE_NOTICE)
        .validation_notice(EMPTY_FEEDBACK_NOTICE)
        .greeting(EMPTY_FEEDBACK_NOTICE)
        .build();
    session.submit(&texts[0]).await;

    Ok(())
}

fn print_json(replies: &[Reply]) -> Result<()> {
    let results: Vec<_> = replies
        .iter()
        .map(|reply| {
            json!({
                "text": reply.text,
                "prediction": reply.sentiment.map(|score| score.label),
                "confidence": reply.sentiment.map(|score| score.confidence),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&json!({ "results": results }))?);
    Ok(())
}
