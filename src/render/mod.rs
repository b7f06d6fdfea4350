//! Presentation seam between the session controller and whatever is
//! showing the conversation. The controller only ever talks to a
//! `RenderSink`, so the lifecycle can be exercised in tests without a
//! terminal attached.
use crate::session::models::Reply;

/// Render instructions emitted by the session controller. Exactly one
/// of `render_success`/`render_error` fires per resolved submission.
pub trait RenderSink: Send + Sync {
    /// A request was accepted and is now in flight.
    fn render_pending(&self);

    /// The backend answered.
    fn render_success(&self, reply: &Reply);

    /// The submission failed, or the input was rejected before
    /// dispatch. `message` is already user-facing.
    fn render_error(&self, message: &str);

    /// The session was cleared back to `notice`.
    fn render_reset(&self, notice: &str);
}

/// Terminal renderer used by the CLI front-ends.
pub struct ConsoleRender {
    /// Suppress the pending indicator, for non-interactive runs.
    quiet: bool,
}

impl ConsoleRender {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Default for ConsoleRender {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for ConsoleRender {
    fn render_pending(&self) {
        if !self.quiet {
            println!("...");
        }
    }

    fn render_success(&self, reply: &Reply) {
        if let Some(score) = reply.sentiment {
            let percent = (score.confidence * 100.0).round() as u32;
            let filled = ((percent / 10) as usize).min(10);
            println!("{}: {}", score.label, score.label.description());
            println!(
                "Confidence: {}% [{}{}]",
                percent,
                "#".repeat(filled),
                "-".repeat(10 - filled)
            );
            println!("Text: {}", reply.text);
        } else {
            println!("{}", reply.text);
        }
    }

    fn render_error(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn render_reset(&self, notice: &str) {
        println!("{}", notice);
    }
}
