#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_unwrap::ResultExt;

use wordle_web::{cli::Cli, logging, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    logging::init_tracing();

    if let Err(err) = dotenv {
        debug!(error = %err, "no .env file loaded");
    }

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).expect_or_log("config should be valid");

    info!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command(), "starting");

    wordle_web::cli::run(cli.command(), config)
        .await
        .context("wordle-web stopped")
}
