//! Quiz and store error types.
//!
//! `StoreError` is defined here rather than in `mindcheck-store` so the
//! registration flow can downcast store failures and classify a unique-email
//! violation without string matching.

use thiserror::Error;

/// Errors surfaced by the registration flow, the quiz engine and the session loop.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The email is already registered.
    #[error("Email already registered. Please enter a different email.")]
    DuplicateEmail(String),

    /// The email was blank.
    #[error("Email cannot be empty. Please enter an email.")]
    EmptyEmail,

    /// The name was blank.
    #[error("Name cannot be empty. Please enter your name.")]
    EmptyName,

    /// A quiz was requested without a current user.
    #[error("User not found. Please register before taking the quiz.")]
    NotRegistered,

    /// The menu input was not one of the known options.
    #[error("Invalid choice. Please try again.")]
    InvalidMenuChoice(String),

    /// Input ended while a prompt was waiting for a line.
    #[error("input closed")]
    InputClosed,

    /// A store or console failure with no local recovery.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuizError {
    /// Returns `true` if the session loop can recover by re-prompting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuizError::DuplicateEmail(_)
                | QuizError::EmptyEmail
                | QuizError::EmptyName
                | QuizError::NotRegistered
                | QuizError::InvalidMenuChoice(_)
        )
    }
}

/// Failures a [`QuizStore`](crate::traits::QuizStore) reports in a form the
/// core can classify.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An email row with this address already exists.
    #[error("email already exists: {0}")]
    DuplicateEmail(String),

    /// An answer referenced a user id the store does not know.
    #[error("unknown user id: {0}")]
    UnknownUser(i64),
}
