use std::process::ExitCode;

use clap::Parser;
use guardrail_keys::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    cli::commands::run(cli).await
}
