use std::process::ExitCode;

use anyhow::Result;
use search_schema::cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    cli::run().await
}
