//! The `mindcheck validate-questions` command.

use std::path::PathBuf;

use anyhow::Result;

use mindcheck_core::config::load_config_from;
use mindcheck_core::model::Category;
use mindcheck_core::questions::{parse_bank, validate_bank};

pub fn execute(
    path: PathBuf,
    threshold: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let threshold = match threshold {
        Some(t) => t,
        None => load_config_from(config_path.as_deref())?.threshold,
    };
    let bank = parse_bank(&path)?;

    println!("Question bank: {} ({} questions)", path.display(), bank.len());
    for category in Category::ALL {
        println!(
            "  {}: {} questions",
            category.label(),
            bank.questions(category).len()
        );
    }

    let warnings = validate_bank(&bank, threshold);
    for w in &warnings {
        println!("  [{}] WARNING: {}", w.category, w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
