//! HTTP backends the session controller sends accepted submissions to.
//! The services themselves are opaque; everything here is wire shape.
use anyhow::{Error, Result};
use async_trait::async_trait;

use crate::session::models::{Prompt, Reply};

pub mod assistant;
pub mod sentiment;

pub use assistant::AssistantClient;
pub use sentiment::SentimentClient;

/// A remote service that can resolve one prompt into one reply. The
/// controller only depends on this trait so the request lifecycle can
/// run against a scripted backend in tests.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn send(&self, prompt: &Prompt) -> Result<Reply, Error>;
}

pub type BoxedBackend = Box<dyn QueryBackend + Send + Sync + 'static>;

// Lets callers keep a handle to a backend they also hand to a session.
#[async_trait]
impl<T: QueryBackend + ?Sized> QueryBackend for std::sync::Arc<T> {
    async fn send(&self, prompt: &Prompt) -> Result<Reply, Error> {
        (**self).send(prompt).await
    }
}
