//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record rendered by the board UI.
//! - Assign identity and creation timestamp exactly once, at creation.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is an ISO-8601 timestamp assigned at creation and never
//!   mutated afterwards.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Task urgency level.
///
/// Rank order is part of the display-sorting contract: `High` sorts before
/// `Medium`, which sorts before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank used by the display ordering (`high = 0, medium = 1, low = 2`).
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Lowercase wire token for this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses a lowercase wire token back into a priority.
    ///
    /// Returns `None` for unknown tokens; callers decide whether that is an
    /// input error (FFI boundary) or a silent no-match (condition matching).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Validation error for task write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task name is empty after trimming.
    EmptyName,
    /// Task ID is the nil UUID.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
            Self::NilId => write!(f, "task id must not be the nil uuid"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// `created_at` is stored as the ISO-8601 string the shell persisted; the
/// engine parses it lazily when evaluating date conditions so malformed
/// values degrade to no-match instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID used for collection replacement and auditing.
    pub id: TaskId,
    /// Free-form display name.
    pub name: String,
    /// Urgency level.
    pub priority: Priority,
    /// ISO-8601 creation timestamp. Immutable after creation.
    pub created_at: String,
}

impl Task {
    /// Creates a new task with a generated stable ID and the current UTC
    /// time as its creation timestamp (millisecond precision).
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        Self::with_parts(
            Uuid::new_v4(),
            name,
            priority,
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }

    /// Creates a task with caller-provided identity and timestamp.
    ///
    /// Used by import/test paths where identity already exists externally.
    /// Does not validate; see [`Task::validate`].
    pub fn with_parts(
        id: TaskId,
        name: impl Into<String>,
        priority: Priority,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            priority,
            created_at: created_at.into(),
        }
    }

    /// Checks the minimal structural shape enforced before persistence.
    ///
    /// # Errors
    /// - [`TaskValidationError::EmptyName`] when the name is blank.
    /// - [`TaskValidationError::NilId`] when the ID is the nil UUID.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        Ok(())
    }

    /// Parses `created_at` as a UTC timestamp.
    ///
    /// Returns `None` for malformed values; condition matching treats that
    /// as no-match rather than an error.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        crate::engine::parse_timestamp(&self.created_at)
    }
}
