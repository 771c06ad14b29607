//! The interactive menu loop and the per-process session context.

use std::str::FromStr;

use anyhow::Result;

use crate::engine::QuizEngine;
use crate::error::QuizError;
use crate::messages::{MENU, MENU_PROMPT};
use crate::model::User;
use crate::registration::register_interactive;
use crate::traits::{read_line, Console, QuizStore};

/// State held for the lifetime of one interactive run.
#[derive(Debug, Default)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently registered user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }
}

/// A top-level menu option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    TakeQuiz,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Register),
            "2" => Ok(MenuChoice::TakeQuiz),
            "3" => Ok(MenuChoice::Exit),
            other => Err(QuizError::InvalidMenuChoice(other.to_string())),
        }
    }
}

/// Run the menu until the user exits or input ends.
///
/// Recoverable errors are printed and the menu is shown again; anything else
/// (typically an unavailable store) is returned.
pub fn run_session(
    session: &mut Session,
    engine: &QuizEngine,
    store: &mut dyn QuizStore,
    console: &mut dyn Console,
) -> Result<()> {
    loop {
        match step(session, engine, store, console) {
            Ok(MenuChoice::Exit) | Err(QuizError::InputClosed) => return Ok(()),
            Ok(_) => {}
            Err(e) if e.is_recoverable() => {
                tracing::debug!(error = %e, "recoverable session error");
                console.print_line(&e.to_string())?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn step(
    session: &mut Session,
    engine: &QuizEngine,
    store: &mut dyn QuizStore,
    console: &mut dyn Console,
) -> Result<MenuChoice, QuizError> {
    console.print_line(MENU)?;
    let choice: MenuChoice = read_line(console, MENU_PROMPT)?.parse()?;

    match choice {
        MenuChoice::Register => {
            let user = register_interactive(store, console)?;
            session.set_current_user(user);
        }
        MenuChoice::TakeQuiz => {
            engine.run(session.current_user(), store, console)?;
        }
        MenuChoice::Exit => {}
    }

    Ok(choice)
}
