use std::env;
use std::time::Duration;

use crate::session::models::Subject;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub assistant_api_url: String,
    pub sentiment_api_url: String,
    pub http_timeout: Duration,
    pub subject: Subject,
}

impl Default for AppConfig {
    fn default() -> Self {
        let assistant_api_url = env::var("STUDYMATE_ASSISTANT_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let sentiment_api_url = env::var("STUDYMATE_SENTIMENT_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        let http_timeout_secs = env::var("STUDYMATE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(120);
        let subject = env::var("STUDYMATE_SUBJECT")
            .ok()
            .and_then(|s| s.parse::<Subject>().ok())
            .unwrap_or(Subject::Math);

        Self {
            assistant_api_url,
            sentiment_api_url,
            http_timeout: Duration::from_secs(http_timeout_secs),
            subject,
        }
    }
}
