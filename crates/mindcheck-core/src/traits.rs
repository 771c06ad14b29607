//! Trait definitions for the storage gateway and the text console.
//!
//! The SQLite gateway lives in `mindcheck-store`; the stdin/stdout console
//! lives in `mindcheck-cli`. In-memory versions of both are in
//! [`testing`](crate::testing).

use anyhow::Result;

use crate::error::QuizError;
use crate::model::{AnswerRecord, Category, Email, StageAnswer, User};

// ---------------------------------------------------------------------------
// Storage gateway
// ---------------------------------------------------------------------------

/// Persistence for users, emails and per-category answers.
///
/// Write methods are atomic: either every row is stored or none is.
pub trait QuizStore {
    /// Look up an email by its address.
    fn find_email(&self, address: &str) -> Result<Option<Email>>;

    /// Insert an email and the user owning it in one transaction.
    ///
    /// Fails with [`StoreError::DuplicateEmail`](crate::error::StoreError)
    /// if the address already exists.
    fn create_user(&mut self, email: &str, name: &str) -> Result<User>;

    /// Append one stage's answers for `user` in one transaction, preserving order.
    fn record_stage(
        &mut self,
        user: &User,
        category: Category,
        answers: &[StageAnswer],
    ) -> Result<Vec<AnswerRecord>>;

    /// All answers of one category for a user, in insertion order.
    fn answers(&self, user_id: i64, category: Category) -> Result<Vec<AnswerRecord>>;

    /// Number of registered users.
    fn count_users(&self) -> Result<usize>;
}

// ---------------------------------------------------------------------------
// Text console
// ---------------------------------------------------------------------------

/// Synchronous line-oriented input and output.
pub trait Console {
    /// Show `message` and block until a line is entered.
    ///
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>>;

    /// Print one line (which may itself contain newlines).
    fn print_line(&mut self, line: &str) -> Result<()>;
}

/// Prompt for a line, treating end of input as [`QuizError::InputClosed`].
pub fn read_line(console: &mut dyn Console, message: &str) -> Result<String, QuizError> {
    console.prompt(message)?.ok_or(QuizError::InputClosed)
}
