use clap::Parser;
use model_share::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::share::run(cli).await
}
