//! mindcheck CLI — interactive mental-health screening quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

#[derive(Parser)]
#[command(
    name = "mindcheck",
    version,
    about = "Console mental-health screening quiz"
)]
struct Cli {
    /// SQLite database file (overrides config and MINDCHECK_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// TOML question bank replacing the built-in questions
    #[arg(long, global = true)]
    questions: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a question bank file for problems
    ValidateQuestions {
        /// Path to the question bank TOML file
        path: PathBuf,

        /// Threshold to validate against (default: from config)
        #[arg(long)]
        threshold: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mindcheck=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => commands::quiz::execute(cli.db, cli.config, cli.questions),
        Some(Commands::ValidateQuestions { path, threshold }) => {
            commands::validate::execute(path, threshold, cli.config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
