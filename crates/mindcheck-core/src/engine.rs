//! Quiz flow engine.
//!
//! Walks the stages `Depressive → Bipolar → Anxiety → Done`. After each stage
//! the answers are committed, the "no" answers are counted, and the flow either
//! stops with a recommendation or moves to the next stage. Reaching `Done`
//! prints a summary.

use crate::error::QuizError;
use crate::messages::{self, COMPLETED};
use crate::model::{Category, StageAnswer, User};
use crate::questions::{QuestionBank, DEFAULT_THRESHOLD};
use crate::scoring::{score, NO};
use crate::traits::{read_line, Console, QuizStore};

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// A stage with fewer "no" answers than this stops the quiz.
    pub threshold: usize,
    /// Hotline line printed with recommendations.
    pub hotline: String,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            hotline: messages::DEFAULT_HOTLINE.to_string(),
        }
    }
}

/// Position in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Asking(Category),
    Done,
}

impl Stage {
    pub fn first() -> Self {
        Stage::Asking(Category::Depressive)
    }

    pub fn next(self) -> Self {
        match self {
            Stage::Asking(category) => category.next().map_or(Stage::Done, Stage::Asking),
            Stage::Done => Stage::Done,
        }
    }
}

/// Closing message printed after the last stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    /// Every stage scored above the threshold.
    WellnessReminder,
    /// The quiz finished without all stages scoring above the threshold.
    Completed,
}

/// Result of one answered stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    pub category: Category,
    pub answered: usize,
    pub no_count: usize,
}

/// What happened during one run of the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizOutcome {
    /// Stages answered, in order.
    pub stages: Vec<StageResult>,
    /// The category the user was advised to seek help for, if any.
    pub recommendation: Option<Category>,
    /// Set only when the last stage was reached.
    pub summary: Option<Summary>,
}

impl QuizOutcome {
    /// The "no" count of a stage, if it was answered.
    pub fn no_count(&self, category: Category) -> Option<usize> {
        self.stages
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.no_count)
    }

    /// Whether the quiz stopped before the last stage.
    pub fn stopped_early(&self) -> bool {
        self.summary.is_none()
    }
}

/// Runs the staged quiz against a store and a console.
pub struct QuizEngine {
    bank: QuestionBank,
    config: QuizEngineConfig,
}

impl QuizEngine {
    pub fn new(bank: QuestionBank, config: QuizEngineConfig) -> Self {
        Self { bank, config }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Run the quiz for `user`.
    ///
    /// Fails with [`QuizError::NotRegistered`] without touching the store when
    /// there is no user. Each stage is committed before its outcome is printed.
    pub fn run(
        &self,
        user: Option<&User>,
        store: &mut dyn QuizStore,
        console: &mut dyn Console,
    ) -> Result<QuizOutcome, QuizError> {
        let Some(user) = user else {
            return Err(QuizError::NotRegistered);
        };
        let threshold = self.config.threshold;
        let mut outcome = QuizOutcome::default();
        let mut stage = Stage::first();

        while let Stage::Asking(category) = stage {
            let answers = self.ask_stage(category, console)?;
            store.record_stage(user, category, &answers)?;

            let no_count = score(answers.iter().map(|a| a.answer.as_str()), NO);
            tracing::info!(
                user_id = user.id,
                %category,
                answered = answers.len(),
                no_count,
                "stage committed"
            );
            outcome.stages.push(StageResult {
                category,
                answered: answers.len(),
                no_count,
            });

            if no_count < threshold {
                console.print_line(&messages::recommendation(category, &self.config.hotline))?;
                outcome.recommendation = Some(category);
                if category != Category::Anxiety {
                    return Ok(outcome);
                }
            } else if category.next().is_some() {
                console.print_line(&messages::next_stage(category, threshold))?;
            }

            stage = stage.next();
        }

        let all_above = Category::ALL
            .iter()
            .all(|c| outcome.no_count(*c).is_some_and(|n| n > threshold));
        let summary = if all_above {
            console.print_line(&messages::wellness_reminder(&self.config.hotline))?;
            Summary::WellnessReminder
        } else {
            console.print_line(COMPLETED)?;
            Summary::Completed
        };
        outcome.summary = Some(summary);

        Ok(outcome)
    }

    fn ask_stage(
        &self,
        category: Category,
        console: &mut dyn Console,
    ) -> Result<Vec<StageAnswer>, QuizError> {
        let questions = self.bank.questions(category);
        let mut answers = Vec::with_capacity(questions.len());
        for question in questions {
            let raw = read_line(console, &messages::question_prompt(question))?;
            let answer = StageAnswer::new(question.as_str(), &raw);
            tracing::debug!(%category, answer = %answer.answer, "answered");
            answers.push(answer);
        }
        Ok(answers)
    }
}
