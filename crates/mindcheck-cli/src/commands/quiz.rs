//! The interactive quiz session (default command).

use std::path::PathBuf;

use anyhow::Result;

use mindcheck_core::config::load_config_from;
use mindcheck_core::engine::QuizEngine;
use mindcheck_core::session::{run_session, Session};
use mindcheck_store::SqliteStore;

use crate::console::StdConsole;

pub fn execute(
    db: Option<PathBuf>,
    config_path: Option<PathBuf>,
    questions: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(db) = db {
        config.database_path = db;
    }
    if questions.is_some() {
        config.questions_path = questions;
    }
    anyhow::ensure!(config.threshold >= 1, "threshold must be at least 1");

    let bank = config.question_bank()?;
    let engine = QuizEngine::new(bank, config.engine_config());
    let mut store = SqliteStore::open(&config.database_path)?;
    let mut console = StdConsole::new();
    let mut session = Session::new();

    tracing::info!(
        db = %config.database_path.display(),
        threshold = config.threshold,
        "starting session"
    );
    run_session(&mut session, &engine, &mut store, &mut console)
}
