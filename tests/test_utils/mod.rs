#![allow(dead_code)]
//! Shared fakes for exercising the session lifecycle without a network.
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use tokio::sync::Semaphore;

use studymate::backend::QueryBackend;
use studymate::render::RenderSink;
use studymate::session::models::{Prompt, Reply};

/// Backend that answers from a fixed script, recording every outbound
/// prompt and counting calls.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Reply, Error>>>,
    prompts: Mutex<Vec<Prompt>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<Reply, Error>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryBackend for ScriptedBackend {
    async fn send(&self, prompt: &Prompt) -> Result<Reply, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("scripted backend ran out of replies")))
    }
}

/// Backend that blocks until the test releases its gate, simulating a
/// request that stays in flight.
pub struct GatedBackend {
    pub gate: Arc<Semaphore>,
    reply: Mutex<Option<Result<Reply, Error>>>,
    calls: AtomicUsize,
}

impl GatedBackend {
    pub fn new(reply: Result<Reply, Error>) -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            reply: Mutex::new(Some(reply)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl QueryBackend for GatedBackend {
    async fn send(&self, _prompt: &Prompt) -> Result<Reply, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self.gate.acquire().await.unwrap();
        permit.forget();
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(anyhow!("gated backend already resolved")))
    }
}

/// The render signal stream as the controller emitted it.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent {
    Pending,
    Success(String),
    Error(String),
    Reset(String),
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<RenderEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl RenderSink for RecordingSink {
    fn render_pending(&self) {
        self.events.lock().unwrap().push(RenderEvent::Pending);
    }

    fn render_success(&self, reply: &Reply) {
        self.events
            .lock()
            .unwrap()
            .push(RenderEvent::Success(reply.text.clone()));
    }

    fn render_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(RenderEvent::Error(message.to_string()));
    }

    fn render_reset(&self, notice: &str) {
        self.events
            .lock()
            .unwrap()
            .push(RenderEvent::Reset(notice.to_string()));
    }
}
