use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;

use crate::backend::AssistantClient;
use crate::core::config::AppConfig;
use crate::render::ConsoleRender;
use crate::session::Session;
use crate::session::models::{HistoryEntry, Subject};

pub async fn run(subject: Option<String>) -> Result<()> {
    let config = AppConfig::default();
    let subject = match subject {
        Some(s) => s.parse::<Subject>()?,
        None => config.subject,
    };

    let backend = AssistantClient::new(&config.assistant_api_url, config.http_timeout)?;
    let session = Session::builder(Box::new(backend), Arc::new(ConsoleRender::new()))
        .subject(subject)
        .build();

    let mut rl = DefaultEditor::new()?;

    println!("{}", subject.title());
    println!("{}", subject.welcome_message());
    println!("Commands: /subject <math|sql|astro|general>, /clear, /history, /quit");
    println!("{}", subject.placeholder());

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line == "/quit" {
                    break;
                }
                if line == "/clear" {
                    session.reset();
                    continue;
                }
                if line == "/history" {
                    print_history(&session);
                    continue;
                }
                if let Some(rest) = line.strip_prefix("/subject") {
                    match rest.trim().parse::<Subject>() {
                        Ok(new_subject) => {
                            println!("{}", new_subject.title());
                            session.change_subject(new_subject);
                        }
                        Err(err) => println!("{}", err),
                    }
                    continue;
                }
                session.submit(&line).await;
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

fn print_history(session: &Session) {
    for entry in session.history() {
        let who = match entry {
            HistoryEntry::Notice { .. } => "notice",
            HistoryEntry::Prompt { .. } => "you",
            HistoryEntry::Reply { .. } => "assistant",
            HistoryEntry::Error { .. } => "error",
        };
        println!(
            "[{}] {}: {}",
            entry.timestamp().format("%H:%M"),
            who,
            entry.text()
        );
    }
}
