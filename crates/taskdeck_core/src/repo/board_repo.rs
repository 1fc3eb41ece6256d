//! Board repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the two board collections (tasks, rules) as keyed flat lists.
//! - Keep SQL and JSON payload details inside the persistence boundary.
//!
//! # Invariants
//! - A save replaces the whole collection, mirroring the shell's
//!   replace-the-collection mutation model.
//! - Ids must be unique within a collection on both read and write paths.

use crate::db::DbError;
use crate::model::rule::{Rule, RuleValidationError};
use crate::model::task::{Task, TaskValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASKS_KEY: &str = "tasks";
const RULES_KEY: &str = "rules";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for board persistence operations.
#[derive(Debug)]
pub enum RepoError {
    TaskValidation(TaskValidationError),
    RuleValidation(RuleValidationError),
    DuplicateId(Uuid),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskValidation(err) => write!(f, "{err}"),
            Self::RuleValidation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate id in collection: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted board data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TaskValidation(err) => Some(err),
            Self::RuleValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::TaskValidation(value)
    }
}

impl From<RuleValidationError> for RepoError {
    fn from(value: RuleValidationError) -> Self {
        Self::RuleValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for whole-collection board persistence.
pub trait BoardRepository {
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
    fn load_rules(&self) -> RepoResult<Vec<Rule>>;
    fn save_rules(&self, rules: &[Rule]) -> RepoResult<()>;
}

/// SQLite-backed board repository storing each collection as one JSON row.
pub struct SqliteBoardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBoardRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Vec<T>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM collections WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => serde_json::from_str(&payload).map_err(|err| {
                RepoError::InvalidData(format!("collection `{key}` failed to decode: {err}"))
            }),
            // A key that was never written reads as the empty collection.
            None => Ok(Vec::new()),
        }
    }

    fn save_collection<T: Serialize>(&self, key: &str, items: &[T]) -> RepoResult<()> {
        let payload = serde_json::to_string(items).map_err(|err| {
            RepoError::InvalidData(format!("collection `{key}` failed to encode: {err}"))
        })?;

        self.conn.execute(
            "INSERT INTO collections (key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;

        Ok(())
    }
}

impl BoardRepository for SqliteBoardRepository<'_> {
    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let tasks: Vec<Task> = self.load_collection(TASKS_KEY)?;
        for task in &tasks {
            task.validate()?;
        }
        ensure_unique_ids(tasks.iter().map(|task| task.id))?;
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        for task in tasks {
            task.validate()?;
        }
        ensure_unique_ids(tasks.iter().map(|task| task.id))?;
        self.save_collection(TASKS_KEY, tasks)
    }

    fn load_rules(&self) -> RepoResult<Vec<Rule>> {
        let rules: Vec<Rule> = self.load_collection(RULES_KEY)?;
        for rule in &rules {
            rule.validate()?;
        }
        ensure_unique_ids(rules.iter().map(|rule| rule.id))?;
        Ok(rules)
    }

    fn save_rules(&self, rules: &[Rule]) -> RepoResult<()> {
        for rule in rules {
            rule.validate()?;
        }
        ensure_unique_ids(rules.iter().map(|rule| rule.id))?;
        self.save_collection(RULES_KEY, rules)
    }
}

fn ensure_unique_ids(ids: impl Iterator<Item = Uuid>) -> RepoResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RepoError::DuplicateId(id));
        }
    }
    Ok(())
}
