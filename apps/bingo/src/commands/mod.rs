// Command handlers for the CLI. Each handler works on a loaded SessionStore;
// `run` owns loading and writing back the session slot.

pub mod edit;
pub mod generate;
pub mod slot;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::errors::AppError;
use crate::session::{load_session, save_session, SessionStore};

/// Resolved runtime options: CLI flags layered over config.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub session_path: PathBuf,
    pub seed: Option<u64>,
    pub archive_prefix: String,
}

impl RunContext {
    pub fn new(cli: &Cli, config: &Config) -> Self {
        Self {
            session_path: cli
                .session
                .clone()
                .unwrap_or_else(|| config.save_path.clone()),
            seed: cli.seed.or(config.seed),
            archive_prefix: config.archive_prefix.clone(),
        }
    }
}

/// Loads the slot, or starts from defaults when there is none yet.
/// A corrupt slot is an error so it is never silently overwritten.
pub fn open_store(path: &Path) -> Result<SessionStore, AppError> {
    match load_session(path) {
        Ok(snapshot) => {
            let mut store = SessionStore::default();
            store.restore(snapshot)?;
            Ok(store)
        }
        Err(AppError::NotFound(_)) => {
            info!("No session at {}, starting from defaults", path.display());
            Ok(SessionStore::default())
        }
        Err(e) => Err(e),
    }
}

/// Runs one command, returning the text printed to stdout.
pub async fn run(cli: Cli, ctx: &RunContext) -> Result<String, AppError> {
    match cli.command {
        Command::Init { force } => slot::init(&ctx.session_path, force),
        Command::Show => {
            let store = open_store(&ctx.session_path)?;
            Ok(slot::describe(&store))
        }
        Command::SaveAs { path } => {
            let store = open_store(&ctx.session_path)?;
            save_session(&path, &store.snapshot())?;
            Ok(format!("Session saved to {}", path.display()))
        }
        Command::Load { path } => slot::load_into(&ctx.session_path, &path),
        Command::Generate(args) => {
            let store = open_store(&ctx.session_path)?;
            generate::generate(&store, &args, ctx).await
        }
        edit_command => {
            let mut store = open_store(&ctx.session_path)?;
            let message = edit::apply(&mut store, edit_command)?;
            save_session(&ctx.session_path, &store.snapshot())?;
            Ok(message)
        }
    }
}
