use anyhow::Result;
use studymate::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
