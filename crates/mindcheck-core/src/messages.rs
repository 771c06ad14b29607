//! User-facing text.

use crate::model::Category;

pub const MENU: &str = "\n1. Register\n2. Take Quiz\n3. Exit";
pub const MENU_PROMPT: &str = "Choose an option (1/2/3): ";
pub const EMAIL_PROMPT: &str = "Enter your email: ";
pub const NAME_PROMPT: &str = "Enter your name: ";
pub const REGISTERED: &str = "User registered successfully!";
pub const COMPLETED: &str = "Quiz completed successfully!";

/// The hotline line printed when no other is configured.
pub const DEFAULT_HOTLINE: &str =
    "In Kenya, the Mental Health Hotline is available at [+254 739 935 333 or +254 756 454 585].";

const CLOSING: &str = "Remember, seeking help is a sign of strength.\nTake care.";

/// Prompt text for a single question.
pub fn question_prompt(question: &str) -> String {
    format!("{question} (yes/no): ")
}

/// Recommendation printed when a stage scores below the threshold.
pub fn recommendation(category: Category, hotline: &str) -> String {
    format!(
        "\nThank you for completing our mental health quiz.\n\
         Based on your answers, it's recommended to seek help for {} symptoms.\n\
         Consider reaching out to a mental health expert near you.\n\
         {hotline}\n{CLOSING}",
        category.label()
    )
}

/// Printed between stages when the finished stage passed.
pub fn next_stage(finished: Category, threshold: usize) -> String {
    format!(
        "\nYou answered at least {threshold} {} questions with 'no'. \n\
         Please answer the next set of questions.",
        finished.label().to_lowercase()
    )
}

/// Printed when every stage scored above the threshold.
pub fn wellness_reminder(hotline: &str) -> String {
    format!(
        "\nThank you for completing our mental health quiz.\n\
         Even if the questions you answered don't indicate signs of depression, anxiety, or bipolar disorder,\n\
         it's essential to prioritize your mental health.\n\
         If you ever feel the need to talk to a professional, consider reaching out to a mental health expert near you.\n\
         {hotline}\n{CLOSING}"
    )
}
