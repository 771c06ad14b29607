//! Quiz configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::QuizEngineConfig;
use crate::messages::DEFAULT_HOTLINE;
use crate::questions::{parse_bank, QuestionBank, DEFAULT_THRESHOLD};

/// Top-level mindcheck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Number of "no" answers a stage needs to pass.
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Optional TOML question bank replacing the built-in questions.
    #[serde(default)]
    pub questions_path: Option<PathBuf>,
    /// Hotline line printed with every recommendation.
    #[serde(default = "default_hotline")]
    pub hotline: String,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("quiz.db")
}
fn default_threshold() -> usize {
    DEFAULT_THRESHOLD
}
fn default_hotline() -> String {
    DEFAULT_HOTLINE.to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            threshold: default_threshold(),
            questions_path: None,
            hotline: default_hotline(),
        }
    }
}

impl QuizConfig {
    /// Engine settings derived from this config.
    pub fn engine_config(&self) -> QuizEngineConfig {
        QuizEngineConfig {
            threshold: self.threshold,
            hotline: self.hotline.clone(),
        }
    }

    /// The configured question bank, or the built-in one.
    pub fn question_bank(&self) -> Result<QuestionBank> {
        match &self.questions_path {
            Some(path) => parse_bank(path),
            None => Ok(QuestionBank::builtin()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when `path` is `None`:
/// 1. `mindcheck.toml` in the current directory
/// 2. `~/.config/mindcheck/config.toml`
///
/// Environment variable overrides: `MINDCHECK_DB`, `MINDCHECK_THRESHOLD`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mindcheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(db) = std::env::var("MINDCHECK_DB") {
        config.database_path = PathBuf::from(db);
    }
    if let Ok(threshold) = std::env::var("MINDCHECK_THRESHOLD") {
        config.threshold = threshold
            .trim()
            .parse()
            .with_context(|| format!("invalid MINDCHECK_THRESHOLD: {threshold}"))?;
    }

    config.database_path = resolve_path(&config.database_path);
    config.questions_path = config.questions_path.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mindcheck"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MINDCHECK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_MINDCHECK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_MINDCHECK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars here"), "no vars here");
        std::env::remove_var("_MINDCHECK_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.database_path, PathBuf::from("quiz.db"));
        assert_eq!(config.threshold, 3);
        assert!(config.questions_path.is_none());
        assert!(config.hotline.contains("Mental Health Hotline"));
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
database_path = "/tmp/screening.db"
threshold = 4
"#;
        let config: QuizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/screening.db"));
        assert_eq!(config.threshold, 4);
        assert_eq!(config.hotline, DEFAULT_HOTLINE);
        assert_eq!(config.engine_config().threshold, 4);
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/mindcheck.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file_with_question_bank() {
        let dir = tempfile::tempdir().unwrap();
        let bank_path = dir.path().join("bank.toml");
        std::fs::write(
            &bank_path,
            "[[stages]]\ncategory = \"bipolar\"\nquestions = [\"Only one?\"]\n",
        )
        .unwrap();
        let config_path = dir.path().join("mindcheck.toml");
        std::fs::write(
            &config_path,
            format!(
                "hotline = \"Call 555-0100.\"\nquestions_path = \"{}\"\n",
                bank_path.display()
            ),
        )
        .unwrap();

        let config = load_config_from(Some(&config_path)).unwrap();
        assert_eq!(config.hotline, "Call 555-0100.");
        let bank = config.question_bank().unwrap();
        assert_eq!(bank.questions(crate::model::Category::Bipolar).len(), 1);
    }
}
