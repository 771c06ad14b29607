//! SQLite implementation of [`QuizStore`].

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::instrument;

use mindcheck_core::error::StoreError;
use mindcheck_core::model::{AnswerRecord, Category, Email, StageAnswer, User};
use mindcheck_core::traits::QuizStore;

use crate::error::SqliteStoreError;
use crate::schema::SQLITE_INIT;

/// A quiz store over a single SQLite connection held for the process lifetime.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| SqliteStoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::init(conn)?;
        tracing::info!(path = %path.display(), "opened quiz database");
        Ok(store)
    }

    /// A private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(SqliteStoreError::Sqlite)?;
        Ok(Self::init(conn)?)
    }

    fn init(conn: Connection) -> Result<Self, SqliteStoreError> {
        conn.execute_batch(SQLITE_INIT)
            .map_err(SqliteStoreError::Schema)?;
        Ok(Self { conn })
    }
}

fn insert_user(conn: &mut Connection, email: &str, name: &str) -> Result<User, SqliteStoreError> {
    let tx = conn.transaction()?;
    let now = Utc::now();

    tx.execute(
        "INSERT INTO emails (email, created_at) VALUES (?1, ?2)",
        params![email, now],
    )?;
    let email_id = tx.last_insert_rowid();

    tx.execute(
        "INSERT INTO users (name, email_id, created_at) VALUES (?1, ?2, ?3)",
        params![name, email_id, now],
    )?;
    let user_id = tx.last_insert_rowid();

    tx.commit()?;

    Ok(User {
        id: user_id,
        name: name.to_string(),
        email: Email {
            id: email_id,
            address: email.to_string(),
            created_at: now,
        },
        created_at: now,
    })
}

fn insert_stage(
    conn: &mut Connection,
    user_id: i64,
    category: Category,
    answers: &[StageAnswer],
) -> Result<Vec<AnswerRecord>, SqliteStoreError> {
    let tx = conn.transaction()?;
    let now = Utc::now();
    let mut records = Vec::with_capacity(answers.len());

    {
        let sql = format!(
            "INSERT INTO {} (user_id, question, answer, created_at) VALUES (?1, ?2, ?3, ?4)",
            category.table_name()
        );
        let mut stmt = tx.prepare(&sql)?;
        for answer in answers {
            let id = stmt.insert(params![user_id, answer.question, answer.answer, now])?;
            records.push(AnswerRecord {
                id,
                user_id,
                category,
                question: answer.question.clone(),
                answer: answer.answer.clone(),
                created_at: now,
            });
        }
    }

    tx.commit()?;
    Ok(records)
}

impl QuizStore for SqliteStore {
    #[instrument(skip(self))]
    fn find_email(&self, address: &str) -> Result<Option<Email>> {
        self.conn
            .query_row(
                "SELECT id, email, created_at FROM emails WHERE email = ?1",
                params![address],
                |row| {
                    Ok(Email {
                        id: row.get(0)?,
                        address: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()
            .with_context(|| format!("failed to look up email {address}"))
    }

    #[instrument(skip(self, name))]
    fn create_user(&mut self, email: &str, name: &str) -> Result<User> {
        match insert_user(&mut self.conn, email, name) {
            Ok(user) => Ok(user),
            Err(e) if e.is_unique_violation() => {
                Err(StoreError::DuplicateEmail(email.to_string()).into())
            }
            Err(e) => Err(e).context("failed to register user"),
        }
    }

    #[instrument(skip(self, user, answers), fields(user_id = user.id, count = answers.len()))]
    fn record_stage(
        &mut self,
        user: &User,
        category: Category,
        answers: &[StageAnswer],
    ) -> Result<Vec<AnswerRecord>> {
        match insert_stage(&mut self.conn, user.id, category, answers) {
            Ok(records) => Ok(records),
            Err(e) if e.is_foreign_key_violation() => Err(StoreError::UnknownUser(user.id).into()),
            Err(e) => Err(e).with_context(|| format!("failed to store {category} answers")),
        }
    }

    fn answers(&self, user_id: i64, category: Category) -> Result<Vec<AnswerRecord>> {
        let sql = format!(
            "SELECT id, user_id, question, answer, created_at FROM {} \
             WHERE user_id = ?1 ORDER BY id",
            category.table_name()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(AnswerRecord {
                id: row.get(0)?,
                user_id: row.get(1)?,
                category,
                question: row.get(2)?,
                answer: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("failed to read {category} answers"))
    }

    fn count_users(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .context("failed to count users")?;
        Ok(usize::try_from(count)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_user() -> (SqliteStore, User) {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let user = store.create_user("ada@example.com", "Ada").unwrap();
        (store, user)
    }

    fn answers(pairs: &[(&str, &str)]) -> Vec<StageAnswer> {
        pairs.iter().map(|(q, a)| StageAnswer::new(*q, a)).collect()
    }

    #[test]
    fn create_and_find_user() {
        let (store, user) = store_with_user();
        let email = store.find_email("ada@example.com").unwrap().unwrap();
        assert_eq!(email.id, user.email.id);
        assert_eq!(email.address, "ada@example.com");
        assert!(store.find_email("nobody@example.com").unwrap().is_none());
        assert_eq!(store.count_users().unwrap(), 1);
    }

    #[test]
    fn duplicate_email_is_classified() {
        let (mut store, _) = store_with_user();
        let err = store.create_user("ada@example.com", "Again").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::DuplicateEmail(addr)) if addr == "ada@example.com"
        ));
        assert_eq!(store.count_users().unwrap(), 1);
    }

    #[test]
    fn stage_answers_keep_order_and_category() {
        let (mut store, user) = store_with_user();
        let stage = answers(&[("q1", "no"), ("q2", "yes"), ("q3", "no")]);

        let stored = store
            .record_stage(&user, Category::Bipolar, &stage)
            .unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.windows(2).all(|w| w[0].id < w[1].id));

        let read = store.answers(user.id, Category::Bipolar).unwrap();
        let ids = |records: &[AnswerRecord]| records.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(&read), ids(&stored));
        assert!(read.iter().all(|r| r.category == Category::Bipolar));
        let questions: Vec<_> = read.iter().map(|r| r.question.as_str()).collect();
        assert_eq!(questions, vec!["q1", "q2", "q3"]);
        assert!(store.answers(user.id, Category::Anxiety).unwrap().is_empty());
        assert!(store
            .answers(user.id, Category::Depressive)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn answers_for_unknown_user_are_rejected() {
        let (mut store, user) = store_with_user();
        let ghost = User { id: 42, ..user };
        let err = store
            .record_stage(&ghost, Category::Anxiety, &answers(&[("q", "no")]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::UnknownUser(42))
        ));
    }

    #[test]
    fn failed_user_insert_rolls_back_email() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_users BEFORE INSERT ON users \
                 BEGIN SELECT RAISE(ABORT, 'no users'); END;",
            )
            .unwrap();

        assert!(store.create_user("a@b.c", "A").is_err());
        assert!(store.find_email("a@b.c").unwrap().is_none());
        assert_eq!(store.count_users().unwrap(), 0);
    }

    #[test]
    fn failed_stage_commit_rolls_back() {
        let (mut store, user) = store_with_user();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_boom BEFORE INSERT ON depressive_disorder_answers \
                 WHEN NEW.question = 'boom' BEGIN SELECT RAISE(ABORT, 'boom'); END;",
            )
            .unwrap();

        let stage = answers(&[("q1", "no"), ("q2", "no"), ("boom", "no")]);
        assert!(store
            .record_stage(&user, Category::Depressive, &stage)
            .is_err());
        assert!(store
            .answers(user.id, Category::Depressive)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.db");

        let user = {
            let mut store = SqliteStore::open(&path).unwrap();
            let user = store.create_user("grace@example.com", "Grace").unwrap();
            store
                .record_stage(&user, Category::Anxiety, &answers(&[("q", "yes")]))
                .unwrap();
            user
        };

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count_users().unwrap(), 1);
        assert!(store.find_email("grace@example.com").unwrap().is_some());
        let read = store.answers(user.id, Category::Anxiety).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].answer, "yes");
    }

    #[test]
    fn open_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quiz.db");
        let err = SqliteStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("failed to open database"));
    }

    #[test]
    fn every_category_has_a_table() {
        let store = SqliteStore::open_in_memory().unwrap();
        for category in Category::ALL {
            let exists: i64 = store
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    params![category.table_name()],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(exists, 1, "missing table for {category}");
        }
    }
}
