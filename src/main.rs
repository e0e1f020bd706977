use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    hangman::cli::run_cli().await
}
