//! The core models for a stateful exchange with a remote answer service.
use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum accepted input length in characters. Anything longer is
/// rejected before a request is made.
pub const MAX_INPUT_CHARS: usize = 2000;

/// Topic mode for the study assistant. The backend uses this to pick
/// which knowledge base the question runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Sql,
    Astro,
    General,
}

impl Subject {
    /// The tag sent over the wire in the `subject` field.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Sql => "sql",
            Subject::Astro => "astro",
            Subject::General => "general",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Subject::Math => "Math Assistant",
            Subject::Sql => "SQL Assistant",
            Subject::Astro => "Astronomy Assistant",
            Subject::General => "AI Assistant",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Subject::Math => "Ask me a math question...",
            Subject::Sql => "Ask me a SQL question...",
            Subject::Astro => "Ask me an astronomy question...",
            Subject::General => "Ask me anything...",
        }
    }

    /// Greeting shown when a session starts or is cleared.
    pub fn welcome_message(&self) -> &'static str {
        match self {
            Subject::Math => {
                "Hello! I'm your AI Math Assistant. I can help you with:\n\
                 - Solving mathematical problems\n\
                 - Explaining concepts\n\
                 - Step-by-step solutions"
            }
            Subject::Sql => {
                "Hello! I'm your AI SQL Assistant. I can help you with:\n\
                 - Writing and optimizing SQL queries\n\
                 - Explaining database concepts\n\
                 - Providing step-by-step query breakdowns"
            }
            Subject::Astro => {
                "Hello! I'm your AI Astronomy Assistant. I can help you with:\n\
                 - Understanding celestial objects and phenomena\n\
                 - Explaining space concepts and terminology\n\
                 - Guiding you through stargazing and astronomy basics"
            }
            Subject::General => "Hello! I'm your AI Assistant.",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_tag())
    }
}

impl FromStr for Subject {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "math" => Ok(Subject::Math),
            "sql" => Ok(Subject::Sql),
            "astro" | "astronomy" => Ok(Subject::Astro),
            "general" => Ok(Subject::General),
            other => Err(anyhow!(
                "Unknown subject '{}'. Expected one of: math, sql, astro, general",
                other
            )),
        }
    }
}

/// An accepted submission, immutable once built. The `session_id` is
/// whatever the previous reply handed back, or `None` for the first
/// request of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub subject: Option<Subject>,
    pub session_id: Option<String>,
}

impl Prompt {
    pub fn new(text: &str, subject: Option<Subject>, session_id: Option<String>) -> Self {
        Self {
            text: text.to_string(),
            subject,
            session_id,
        }
    }
}

/// Classifier output label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Match the model's label loosely. Classifiers ship labels like
    /// "POSITIVE", "pos" or "LABEL_2 (positive)" depending on how they
    /// were exported, so anything containing "pos"/"neg" counts.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("pos") {
            Sentiment::Positive
        } else if label.contains("neg") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Sentiment::Positive => "The feedback expresses positive sentiment",
            Sentiment::Negative => "The feedback expresses negative sentiment",
            Sentiment::Neutral => "The feedback expresses neutral sentiment",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        write!(f, "{}", label)
    }
}

/// Label plus model confidence in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentimentScore {
    pub label: Sentiment,
    pub confidence: f32,
}

/// A successful response from a backend. The chat service fills in
/// `session_id`; the classifier fills in `sentiment`.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub text: String,
    pub session_id: Option<String>,
    pub sentiment: Option<SentimentScore>,
}

impl Reply {
    pub fn answer(text: &str, session_id: &str) -> Self {
        Self {
            text: text.to_string(),
            session_id: Some(session_id.to_string()),
            sentiment: None,
        }
    }

    pub fn classification(text: &str, label: Sentiment, confidence: f32) -> Self {
        Self {
            text: text.to_string(),
            session_id: None,
            sentiment: Some(SentimentScore { label, confidence }),
        }
    }
}

/// One record in the append-only session history.
#[derive(Clone, Debug)]
pub enum HistoryEntry {
    /// A system notice, e.g. the welcome message.
    Notice { text: String, at: DateTime<Local> },
    /// Something the user submitted.
    Prompt { text: String, at: DateTime<Local> },
    /// A successful backend reply.
    Reply { reply: Reply, at: DateTime<Local> },
    /// The fixed user-facing failure notice for a submission that
    /// could not be completed.
    Error { message: String, at: DateTime<Local> },
}

impl HistoryEntry {
    pub fn notice(text: &str) -> Self {
        HistoryEntry::Notice {
            text: text.to_string(),
            at: Local::now(),
        }
    }

    pub fn prompt(text: &str) -> Self {
        HistoryEntry::Prompt {
            text: text.to_string(),
            at: Local::now(),
        }
    }

    pub fn reply(reply: Reply) -> Self {
        HistoryEntry::Reply {
            reply,
            at: Local::now(),
        }
    }

    pub fn error(message: &str) -> Self {
        HistoryEntry::Error {
            message: message.to_string(),
            at: Local::now(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        match self {
            HistoryEntry::Notice { at, .. }
            | HistoryEntry::Prompt { at, .. }
            | HistoryEntry::Reply { at, .. }
            | HistoryEntry::Error { at, .. } => *at,
        }
    }

    /// The displayable text of the entry.
    pub fn text(&self) -> &str {
        match self {
            HistoryEntry::Notice { text, .. } | HistoryEntry::Prompt { text, .. } => text,
            HistoryEntry::Reply { reply, .. } => &reply.text,
            HistoryEntry::Error { message, .. } => message,
        }
    }
}
