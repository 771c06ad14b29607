//! SQL DDL for the quiz database.

/// Creates every table if missing. Safe to run on each open.
pub const SQLITE_INIT: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS emails (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    email      TEXT    NOT NULL UNIQUE,
    created_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT    NOT NULL,
    email_id   INTEGER NOT NULL UNIQUE REFERENCES emails(id),
    created_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS depressive_disorder_answers (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    question   TEXT    NOT NULL,
    answer     TEXT    NOT NULL,
    created_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS bipolar_disorder_answers (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    question   TEXT    NOT NULL,
    answer     TEXT    NOT NULL,
    created_at TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS anxiety_disorder_answers (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    question   TEXT    NOT NULL,
    answer     TEXT    NOT NULL,
    created_at TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_depressive_answers_user ON depressive_disorder_answers(user_id);
CREATE INDEX IF NOT EXISTS idx_bipolar_answers_user ON bipolar_disorder_answers(user_id);
CREATE INDEX IF NOT EXISTS idx_anxiety_answers_user ON anxiety_disorder_answers(user_id);
"#;
