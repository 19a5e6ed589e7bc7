use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use wizard::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    wizard::run(args).await
}
