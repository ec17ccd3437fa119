use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::session::persistence::SAVE_KEY;

/// Application configuration loaded from environment variables.
/// Every value has a default; CLI flags override what is read here.
#[derive(Debug, Clone)]
pub struct Config {
    pub save_path: PathBuf,
    pub archive_prefix: String,
    pub seed: Option<u64>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            save_path: std::env::var("BINGO_SAVE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(format!("{SAVE_KEY}.json"))),
            archive_prefix: std::env::var("BINGO_ARCHIVE_PREFIX")
                .unwrap_or_else(|_| "bingo_card_".to_string()),
            seed: optional_env("BINGO_SEED")
                .map(|raw| {
                    raw.parse::<u64>()
                        .context("BINGO_SEED must be an unsigned 64-bit integer")
                })
                .transpose()?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
