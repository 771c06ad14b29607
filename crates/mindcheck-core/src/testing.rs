//! In-memory store and scripted console for exercising the quiz without
//! SQLite or a terminal.

use std::collections::VecDeque;

use anyhow::Result;
use chrono::Utc;

use crate::error::StoreError;
use crate::model::{AnswerRecord, Category, Email, StageAnswer, User};
use crate::traits::{Console, QuizStore};

/// A [`QuizStore`] backed by vectors.
///
/// Writes are all-or-nothing like the SQLite store. `fail_on` makes every
/// commit of one category fail before anything is stored.
#[derive(Debug, Default)]
pub struct MemoryStore {
    emails: Vec<Email>,
    users: Vec<User>,
    answers: Vec<AnswerRecord>,
    fail_on: Option<Category>,
    hide_emails: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `record_stage` call for `category`.
    pub fn fail_on(mut self, category: Category) -> Self {
        self.fail_on = Some(category);
        self
    }

    /// Make `find_email` always miss so uniqueness is only caught on insert.
    pub fn hide_emails_from_lookup(mut self) -> Self {
        self.hide_emails = true;
        self
    }

    /// Total answers stored across all categories.
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

impl QuizStore for MemoryStore {
    fn find_email(&self, address: &str) -> Result<Option<Email>> {
        if self.hide_emails {
            return Ok(None);
        }
        Ok(self.emails.iter().find(|e| e.address == address).cloned())
    }

    fn create_user(&mut self, email: &str, name: &str) -> Result<User> {
        if self.emails.iter().any(|e| e.address == email) {
            return Err(StoreError::DuplicateEmail(email.to_string()).into());
        }
        let now = Utc::now();
        let email = Email {
            id: self.emails.len() as i64 + 1,
            address: email.to_string(),
            created_at: now,
        };
        let user = User {
            id: self.users.len() as i64 + 1,
            name: name.to_string(),
            email: email.clone(),
            created_at: now,
        };
        self.emails.push(email);
        self.users.push(user.clone());
        Ok(user)
    }

    fn record_stage(
        &mut self,
        user: &User,
        category: Category,
        answers: &[StageAnswer],
    ) -> Result<Vec<AnswerRecord>> {
        if self.fail_on == Some(category) {
            anyhow::bail!("injected failure committing {category} answers");
        }
        if !self.users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::UnknownUser(user.id).into());
        }
        let now = Utc::now();
        let first_id = self.answers.len() as i64 + 1;
        let records: Vec<AnswerRecord> = answers
            .iter()
            .zip(first_id..)
            .map(|(a, id)| AnswerRecord {
                id,
                user_id: user.id,
                category,
                question: a.question.clone(),
                answer: a.answer.clone(),
                created_at: now,
            })
            .collect();
        self.answers.extend(records.iter().cloned());
        Ok(records)
    }

    fn answers(&self, user_id: i64, category: Category) -> Result<Vec<AnswerRecord>> {
        Ok(self
            .answers
            .iter()
            .filter(|a| a.user_id == user_id && a.category == category)
            .cloned()
            .collect())
    }

    fn count_users(&self) -> Result<usize> {
        Ok(self.users.len())
    }
}

/// A [`Console`] fed from a fixed list of input lines that records everything
/// it is asked to show.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I>(inputs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Every prompt shown, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every printed line, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Number of prompts equal to `prompt`.
    pub fn prompts_matching(&self, prompt: &str) -> usize {
        self.prompts.iter().filter(|p| *p == prompt).count()
    }

    /// Number of printed lines containing `needle`.
    pub fn output_matching(&self, needle: &str) -> usize {
        self.output.iter().filter(|l| l.contains(needle)).count()
    }

    /// Whether any printed line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.output_matching(needle) > 0
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        self.prompts.push(message.to_string());
        Ok(self.inputs.pop_front())
    }

    fn print_line(&mut self, line: &str) -> Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_console_replays_inputs() {
        let mut console = ScriptedConsole::new(["a", "b"]);
        assert_eq!(console.prompt("first").unwrap().as_deref(), Some("a"));
        assert_eq!(console.prompt("second").unwrap().as_deref(), Some("b"));
        assert_eq!(console.prompt("third").unwrap(), None);
        console.print_line("hello world").unwrap();
        assert_eq!(console.prompts().len(), 3);
        assert!(console.printed("world"));
    }

    #[test]
    fn memory_store_rejects_unknown_user() {
        let mut store = MemoryStore::new();
        let ghost = {
            let mut other = MemoryStore::new();
            other.create_user("ghost@example.com", "Ghost").unwrap()
        };
        let ghost = User { id: 99, ..ghost };
        let err = store
            .record_stage(&ghost, Category::Anxiety, &[StageAnswer::new("q", "no")])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::UnknownUser(99))
        ));
    }
}
