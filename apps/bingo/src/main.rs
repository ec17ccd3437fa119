mod cli;
mod commands;
mod config;
mod errors;
mod generation;
mod models;
mod render;
mod session;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::commands::RunContext;
use crate::config::Config;

// Single-threaded: every action runs to completion before the next begins.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("bingo={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = RunContext::new(&cli, &config);
    info!(
        "bingo v{} using session {}",
        env!("CARGO_PKG_VERSION"),
        ctx.session_path.display()
    );

    match commands::run(cli, &ctx).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error [{}]: {}", e.code(), e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
