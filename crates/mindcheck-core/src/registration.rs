//! User registration.

use crate::error::{QuizError, StoreError};
use crate::messages::{EMAIL_PROMPT, NAME_PROMPT, REGISTERED};
use crate::model::User;
use crate::traits::{read_line, Console, QuizStore};

/// Check that `email` is non-empty and not yet registered. Returns it trimmed.
pub fn check_email(store: &dyn QuizStore, email: &str) -> Result<String, QuizError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(QuizError::EmptyEmail);
    }
    if store.find_email(email)?.is_some() {
        return Err(QuizError::DuplicateEmail(email.to_string()));
    }
    Ok(email.to_string())
}

/// Register a new user, storing the email and user rows together.
pub fn register(store: &mut dyn QuizStore, email: &str, name: &str) -> Result<User, QuizError> {
    let email = check_email(store, email)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(QuizError::EmptyName);
    }

    match store.create_user(&email, name) {
        Ok(user) => {
            tracing::info!(user_id = user.id, email = %user.email.address, "registered user");
            Ok(user)
        }
        Err(e) => match e.downcast_ref::<StoreError>() {
            Some(StoreError::DuplicateEmail(address)) => {
                Err(QuizError::DuplicateEmail(address.clone()))
            }
            _ => Err(e.into()),
        },
    }
}

/// Prompt for an email until a usable one is given, then for a name, and register.
pub fn register_interactive(
    store: &mut dyn QuizStore,
    console: &mut dyn Console,
) -> Result<User, QuizError> {
    loop {
        let email = loop {
            let raw = read_line(console, EMAIL_PROMPT)?;
            match check_email(store, &raw) {
                Ok(email) => break email,
                Err(e) if e.is_recoverable() => {
                    tracing::debug!(error = %e, "rejected email");
                    console.print_line(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }
        };

        let name = loop {
            let raw = read_line(console, NAME_PROMPT)?;
            if raw.trim().is_empty() {
                console.print_line(&QuizError::EmptyName.to_string())?;
            } else {
                break raw;
            }
        };

        match register(store, &email, &name) {
            Ok(user) => {
                console.print_line(REGISTERED)?;
                return Ok(user);
            }
            Err(e @ QuizError::DuplicateEmail(_)) => {
                console.print_line(&e.to_string())?;
            }
            Err(e) => return Err(e),
        }
    }
}
