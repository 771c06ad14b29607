//! Core data model types for mindcheck.
//!
//! Users own one email and three ordered answer collections, one per
//! [`Category`]. Answers share a single record type tagged by category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A disorder category, one per quiz stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Depressive,
    Bipolar,
    Anxiety,
}

impl Category {
    /// All categories in presentation order.
    pub const ALL: [Category; 3] = [Category::Depressive, Category::Bipolar, Category::Anxiety];

    /// Human-readable name used in recommendation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Depressive => "Depressive Disorder",
            Category::Bipolar => "Bipolar disorder",
            Category::Anxiety => "Anxiety disorder",
        }
    }

    /// Name of the table holding this category's answers.
    pub fn table_name(&self) -> &'static str {
        match self {
            Category::Depressive => "depressive_disorder_answers",
            Category::Bipolar => "bipolar_disorder_answers",
            Category::Anxiety => "anxiety_disorder_answers",
        }
    }

    /// The category asked after this one, if any.
    pub fn next(&self) -> Option<Category> {
        match self {
            Category::Depressive => Some(Category::Bipolar),
            Category::Bipolar => Some(Category::Anxiety),
            Category::Anxiety => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Depressive => write!(f, "depressive"),
            Category::Bipolar => write!(f, "bipolar"),
            Category::Anxiety => write!(f, "anxiety"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "depressive" | "depression" => Ok(Category::Depressive),
            "bipolar" => Ok(Category::Bipolar),
            "anxiety" => Ok(Category::Anxiety),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A registered email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: i64,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// One answered question that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAnswer {
    /// The literal question text as presented.
    pub question: String,
    /// The normalized answer text.
    pub answer: String,
}

impl StageAnswer {
    /// Build an answer, normalizing the raw input.
    pub fn new(question: impl Into<String>, raw_answer: &str) -> Self {
        Self {
            question: question.into(),
            answer: normalize_answer(raw_answer),
        }
    }
}

/// A persisted answer to one question of one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub id: i64,
    pub user_id: i64,
    pub category: Category,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

/// Trim surrounding whitespace and lower-case an answer.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}
