//! Question banks: the built-in screening questions and TOML-defined replacements.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::Category;

/// Default number of "no" answers a stage needs to pass.
pub const DEFAULT_THRESHOLD: usize = 3;

const DEPRESSIVE: [&str; 5] = [
    "Have you experienced a persistent feeling of sadness or emptiness for most of the day, nearly every day?",
    "Have you lost interest or pleasure in activities that you once enjoyed?",
    "Do you have significant changes in appetite or weight (significant weight loss or gain)?",
    "Have you noticed changes in your sleep patterns, such as difficulty falling asleep, staying asleep, or sleeping too much?",
    "Do you feel fatigued or have a lack of energy, even after getting enough rest",
];

const BIPOLAR: [&str; 5] = [
    "Have you experienced periods where your mood was extremely elevated, characterized by heightened energy levels, increased self-esteem, and a decreased need for sleep?",
    "Have you gone through extended periods of deep sadness or hopelessness, where even routine tasks feel overwhelming?",
    "Have you noticed sudden and unexplained shifts in your mood from extreme highs to extreme lows?",
    "Do you often find yourself with a surplus of energy and an increased drive to accomplish goals during certain periods?",
    "Have you noticed changes in your sleep patterns, such as a decreased need for sleep during manic episodes or difficulty sleeping during depressive episodes?",
];

const ANXIETY: [&str; 5] = [
    "Do you frequently experience excessive worry or fear about various aspects of your life, such as work, relationships, or health?",
    "Do you often experience physical symptoms of anxiety, such as muscle tension, trembling, sweating, or a racing heart?",
    "Do you find it challenging to engage in social situations due to fear of judgment, embarrassment, or criticism?",
    "Have you ever experienced sudden and intense episodes of fear or discomfort, accompanied by physical symptoms like chest pain, dizziness, or a sense of impending doom?",
    "Has anxiety significantly interfered with your ability to perform everyday tasks, meet responsibilities, or maintain relationships?",
];

/// Ordered questions for each stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    stages: HashMap<Category, Vec<String>>,
}

impl QuestionBank {
    /// The built-in screening questions, five per stage.
    pub fn builtin() -> Self {
        let mut stages = HashMap::new();
        stages.insert(Category::Depressive, owned(&DEPRESSIVE));
        stages.insert(Category::Bipolar, owned(&BIPOLAR));
        stages.insert(Category::Anxiety, owned(&ANXIETY));
        Self { stages }
    }

    /// Replace one stage's questions.
    pub fn with_stage(mut self, category: Category, questions: Vec<String>) -> Self {
        self.stages.insert(category, questions);
        self
    }

    /// The questions of one stage, in presentation order.
    pub fn questions(&self, category: Category) -> &[String] {
        self.stages
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of questions across all stages.
    pub fn len(&self) -> usize {
        self.stages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn owned(questions: &[&str]) -> Vec<String> {
    questions.iter().map(|q| q.to_string()).collect()
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// TOML loading
// ---------------------------------------------------------------------------

/// Intermediate TOML structure for question bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    #[serde(default)]
    stages: Vec<TomlStage>,
}

#[derive(Debug, Deserialize)]
struct TomlStage {
    category: String,
    #[serde(default)]
    questions: Vec<String>,
}

/// Parse a question bank file.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a question bank from TOML text.
///
/// Stages absent from the file keep the built-in questions. A category listed
/// twice is an error.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut seen = HashSet::new();
    let mut bank = QuestionBank::builtin();
    for stage in parsed.stages {
        let category: Category = stage
            .category
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{}: {e}", source_path.display()))?;
        if !seen.insert(category) {
            anyhow::bail!(
                "{}: stage '{category}' is defined more than once",
                source_path.display()
            );
        }
        bank = bank.with_stage(category, stage.questions);
    }

    Ok(bank)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The stage the warning applies to.
    pub category: Category,
    /// Warning message.
    pub message: String,
}

/// Check a bank for stages that cannot behave sensibly under `threshold`.
pub fn validate_bank(bank: &QuestionBank, threshold: usize) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for category in Category::ALL {
        let questions = bank.questions(category);
        let mut warn = |message: String| warnings.push(ValidationWarning { category, message });

        if questions.is_empty() {
            warn("stage has no questions".into());
            continue;
        }

        let mut seen = HashSet::new();
        for question in questions {
            if question.trim().is_empty() {
                warn("question text is empty".into());
            } else if !seen.insert(question.trim()) {
                warn(format!("duplicate question: {}", question.trim()));
            }
        }

        if threshold > questions.len() {
            warn(format!(
                "threshold {threshold} exceeds the {} questions in this stage; it can never pass",
                questions.len()
            ));
        }
    }

    warnings
}
