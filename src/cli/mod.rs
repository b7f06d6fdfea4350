use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub mod analyze;
pub mod chat;

#[derive(Subcommand)]
enum Command {
    /// Start an interactive study assistant session
    Chat {
        /// Topic mode: math, sql, astro or general
        #[arg(long)]
        subject: Option<String>,
    },
    /// Classify the sentiment of one or more pieces of feedback text
    Analyze {
        /// The feedback text; pass several to use the batch endpoint
        #[arg(required = true)]
        text: Vec<String>,
        /// Print raw JSON instead of the formatted result
        #[arg(long, action, default_value = "false")]
        json: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Chat { subject }) => {
            chat::run(subject).await?;
        }
        Some(Command::Analyze { text, json }) => {
            analyze::run(text, json).await?;
        }
        None => {}
    }

    Ok(())
}
