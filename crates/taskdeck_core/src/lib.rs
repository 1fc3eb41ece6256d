//! Core domain logic for TaskDeck.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use engine::{apply_rules, condition_matches, has_conflicts, sort_by_rules};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::rule::{
    Action, ActionKind, Condition, ConditionField, ConditionOperator, Rule, RuleId,
    RuleValidationError,
};
pub use model::task::{Priority, Task, TaskId, TaskValidationError};
pub use repo::board_repo::{BoardRepository, RepoError, RepoResult, SqliteBoardRepository};
pub use service::board_service::{
    decorate_task, filter_tasks_by_name, BoardService, BoardServiceError, BoardStats, BoardView,
    RuleDraft, TaskDecorations, TaskDraft, TaskView, HIGH_PRIORITY_WARNING_THRESHOLD,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
