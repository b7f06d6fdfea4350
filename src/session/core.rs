//! The interaction lifecycle controller.
//!
//! Owns everything mutable about one conversation: the single-flight
//! guard, the opaque session id handed back by the service, and the
//! append-only history. One submission moves through
//! `Idle -> Sending -> {Rendered | Failed}` and back to `Idle`; there
//! are no retry states and at most one request in flight.
//!
//! Use `Session::builder()` to construct a valid `Session`.
use std::sync::{Arc, Mutex};

use crate::backend::BoxedBackend;
use crate::render::RenderSink;
use crate::session::models::{HistoryEntry, MAX_INPUT_CHARS, Prompt, Subject};

/// Fixed user-facing notice for a failed chat submission. The raw
/// cause is only ever logged.
pub const ASSISTANT_FAILURE_NOTICE: &str =
    "Sorry, I encountered an error while processing your request. Please try again.";

/// Fixed user-facing notice for a failed classification request.
pub const SENTIMENT_FAILURE_NOTICE: &str =
    "Failed to analyze sentiment. Please check your connection and try again.";

/// Shown when input is empty, whitespace-only, or over the length cap.
pub const INVALID_INPUT_NOTICE: &str = "Please enter some text first.";

/// How a call to [`Session::submit`] resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend answered and the reply was recorded.
    Answered,
    /// The request failed; a fixed error notice was recorded.
    Failed,
    /// Input validation failed before any request was made.
    Rejected,
    /// Another request was already in flight; nothing happened.
    Ignored,
    /// The session was reset while the request was in flight, so its
    /// outcome was discarded.
    Superseded,
}

struct SessionState {
    /// Single-flight guard: true between dispatch and resolution.
    busy: bool,
    session_id: Option<String>,
    /// Bumped by reset/subject-change so a late-arriving outcome from
    /// before the reset can be recognized and dropped.
    generation: u64,
    subject: Option<Subject>,
    history: Vec<HistoryEntry>,
}

/// One conversation against one backend. All state lives behind a
/// mutex that is only held for state transitions, never across the
/// transport await, so the controller can be shared across tasks.
pub struct Session {
    backend: BoxedBackend,
    render: Arc<dyn RenderSink>,
    failure_notice: String,
    validation_notice: String,
    greeting: Option<String>,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn builder(backend: BoxedBackend, render: Arc<dyn RenderSink>) -> SessionBuilder {
        SessionBuilder::new(backend, render)
    }

    fn greeting_for(&self, subject: Option<Subject>) -> String {
        self.greeting.clone().unwrap_or_else(|| {
            subject
                .unwrap_or(Subject::General)
                .welcome_message()
                .to_string()
        })
    }

    /// Submit one piece of user input. Issues exactly one outbound
    /// request when accepted and exactly one render signal when that
    /// request resolves; rejected and ignored submissions never reach
    /// the network.
    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let text = raw_input.trim();
        if text.is_empty() || text.chars().count() > MAX_INPUT_CHARS {
            self.render.render_error(&self.validation_notice);
            return SubmitOutcome::Rejected;
        }

        let (prompt, generation) = {
            let mut state = self.state.lock().expect("session state lock poisoned");
            if state.busy {
                // Double-send from the same user (double click, Enter
                // repeat). Silently dropping it is the contract.
                tracing::debug!("submission ignored, a request is already in flight");
                return SubmitOutcome::Ignored;
            }
            state.busy = true;
            state.history.push(HistoryEntry::prompt(text));
            (
                Prompt::new(text, state.subject, state.session_id.clone()),
                state.generation,
            )
        };

        self.render.render_pending();
        let result = self.backend.send(&prompt).await;

        let mut state = self.state.lock().expect("session state lock poisoned");
        state.busy = false;
        if state.generation != generation {
            tracing::debug!("dropping the outcome of a superseded submission");
            return SubmitOutcome::Superseded;
        }

        match result {
            Ok(reply) => {
                if let Some(id) = &reply.session_id {
                    state.session_id = Some(id.clone());
                }
                state.history.push(HistoryEntry::reply(reply.clone()));
                drop(state);
                self.render.render_success(&reply);
                SubmitOutcome::Answered
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission failed");
                state.history.push(HistoryEntry::error(&self.failure_notice));
                drop(state);
                self.render.render_error(&self.failure_notice);
                SubmitOutcome::Failed
            }
        }
    }

    /// Clear the conversation back to a single welcome notice and
    /// forget the session id. Allowed while a request is in flight:
    /// the request is not cancelled, but the generation bump makes its
    /// eventual outcome inert.
    pub fn reset(&self) {
        let notice = {
            let mut state = self.state.lock().expect("session state lock poisoned");
            self.clear(&mut state)
        };
        self.render.render_reset(&notice);
    }

    /// Switch topic mode. Switching domains invalidates the prior
    /// context, so this clears history and the session id exactly like
    /// [`Session::reset`].
    pub fn change_subject(&self, new_subject: Subject) {
        let notice = {
            let mut state = self.state.lock().expect("session state lock poisoned");
            state.subject = Some(new_subject);
            self.clear(&mut state)
        };
        self.render.render_reset(&notice);
    }

    fn clear(&self, state: &mut SessionState) -> String {
        state.generation += 1;
        state.session_id = None;
        let notice = self.greeting_for(state.subject);
        state.history.clear();
        state.history.push(HistoryEntry::notice(&notice));
        notice
    }

    pub fn is_busy(&self) -> bool {
        self.state
            .lock()
            .expect("session state lock poisoned")
            .busy
    }

    pub fn session_id(&self) -> Option<String> {
        self.state
            .lock()
            .expect("session state lock poisoned")
            .session_id
            .clone()
    }

    pub fn subject(&self) -> Option<Subject> {
        self.state
            .lock()
            .expect("session state lock poisoned")
            .subject
    }

    /// Snapshot of the append-only history.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state
            .lock()
            .expect("session state lock poisoned")
            .history
            .clone()
    }
}

pub struct SessionBuilder {
    backend: BoxedBackend,
    render: Arc<dyn RenderSink>,
    subject: Option<Subject>,
    failure_notice: String,
    validation_notice: String,
    greeting: Option<String>,
}

impl SessionBuilder {
    pub fn new(backend: BoxedBackend, render: Arc<dyn RenderSink>) -> Self {
        Self {
            backend,
            render,
            subject: None,
            failure_notice: ASSISTANT_FAILURE_NOTICE.to_string(),
            validation_notice: INVALID_INPUT_NOTICE.to_string(),
            greeting: None,
        }
    }

    pub fn subject(mut self, subject: Subject) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Override the fixed notice recorded and rendered on failure.
    pub fn failure_notice(mut self, notice: &str) -> Self {
        self.failure_notice = notice.to_string();
        self
    }

    /// Override the notice rendered when input validation fails.
    pub fn validation_notice(mut self, notice: &str) -> Self {
        self.validation_notice = notice.to_string();
        self
    }

    /// Override the welcome notice; defaults to the subject's welcome
    /// message.
    pub fn greeting(mut self, greeting: &str) -> Self {
        self.greeting = Some(greeting.to_string());
        self
    }

    pub fn build(self) -> Session {
        let greeting_text = self.greeting.clone().unwrap_or_else(|| {
            self.subject
                .unwrap_or(Subject::General)
                .welcome_message()
                .to_string()
        });
        Session {
            backend: self.backend,
            render: self.render,
            failure_notice: self.failure_notice,
            validation_notice: self.validation_notice,
            greeting: self.greeting,
            state: Mutex::new(SessionState {
                busy: false,
                session_id: None,
                generation: 0,
                subject: self.subject,
                history: vec![HistoryEntry::notice(&greeting_text)],
            }),
        }
    }
}
