//! FFI use-case API for the task board UI shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI via FRB.
//! - Keep error semantics simple for UI integration: response envelopes,
//!   never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are plain-data records with stable meaning.

use taskdeck_core::db::open_db;
use taskdeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Action, ActionKind, BoardService, Condition, ConditionField, ConditionOperator, Priority,
    RuleDraft, SqliteBoardRepository, TaskDraft,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const BOARD_DB_FILE_NAME: &str = "taskdeck_board.sqlite3";
static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One display-ordered task with its rule-driven decorations flattened to
/// plain fields for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTaskItem {
    /// Stable task ID in string form.
    pub id: String,
    pub name: String,
    /// Priority wire token (`high|medium|low`).
    pub priority: String,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
    /// Color token of the first matching highlight rule, if any.
    pub highlight_color: Option<String>,
    /// Whether a move-to-top rule matched.
    pub moved_to_top: bool,
    /// Warn-rule messages in rule order.
    pub warnings: Vec<String>,
}

/// Render-ready board snapshot for the tasks tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardViewResponse {
    /// Whether the view was assembled successfully.
    pub ok: bool,
    /// Search-filtered tasks in display order (empty on failure).
    pub items: Vec<BoardTaskItem>,
    /// Unfiltered task count.
    pub total_tasks: u32,
    /// Unfiltered high-priority task count.
    pub high_priority_count: u32,
    /// Whether the high-priority attention banner should show.
    pub high_priority_warning: bool,
    /// Active rule count.
    pub active_rules: u32,
    /// Whether the rule-conflict banner should show.
    pub rule_conflicts: bool,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for board mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Optional created/affected record ID.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Assembles the board view for the tasks tab.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - An empty or absent `search` selects every task.
#[flutter_rust_bridge::frb(sync)]
pub fn board_view(search: Option<String>) -> BoardViewResponse {
    let query = search.unwrap_or_default();
    let view = with_board_service(|service| {
        service
            .board_view(query.trim())
            .map_err(|err| err.to_string())
    });

    match view {
        Ok(view) => BoardViewResponse {
            ok: true,
            items: view
                .tasks
                .into_iter()
                .map(|entry| BoardTaskItem {
                    id: entry.task.id.to_string(),
                    name: entry.task.name,
                    priority: entry.task.priority.as_str().to_owned(),
                    created_at: entry.task.created_at,
                    highlight_color: entry.decorations.highlight_color,
                    moved_to_top: entry.decorations.moved_to_top,
                    warnings: entry.decorations.warnings,
                })
                .collect(),
            total_tasks: view.stats.total_tasks as u32,
            high_priority_count: view.stats.high_priority_count as u32,
            high_priority_warning: view.high_priority_warning,
            active_rules: view.stats.active_rules as u32,
            rule_conflicts: view.rule_conflicts,
            message: "Board view assembled.".to_string(),
        },
        Err(err) => BoardViewResponse {
            ok: false,
            items: Vec::new(),
            total_tasks: 0,
            high_priority_count: 0,
            high_priority_warning: false,
            active_rules: 0,
            rule_conflicts: false,
            message: format!("board_view failed: {err}"),
        },
    }
}

/// Creates a task from form input.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `priority` must be one of `high|medium|low`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_task(name: String, priority: String) -> BoardActionResponse {
    let Some(priority) = Priority::parse(priority.trim()) else {
        return BoardActionResponse::failure(format!("unknown priority token `{priority}`"));
    };

    let draft = TaskDraft {
        name: name.trim().to_string(),
        priority,
    };
    match with_board_service(|service| {
        service.add_task(&draft).map_err(|err| err.to_string())
    }) {
        Ok(task) => BoardActionResponse::success("Task created.", task.id.to_string()),
        Err(err) => BoardActionResponse::failure(format!("board_add_task failed: {err}")),
    }
}

/// Updates an existing task's name and priority.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - `id` and the creation timestamp are immutable.
#[flutter_rust_bridge::frb(sync)]
pub fn board_update_task(id: String, name: String, priority: String) -> BoardActionResponse {
    let Ok(task_id) = Uuid::parse_str(id.trim()) else {
        return BoardActionResponse::failure(format!("invalid task id `{id}`"));
    };
    let Some(priority) = Priority::parse(priority.trim()) else {
        return BoardActionResponse::failure(format!("unknown priority token `{priority}`"));
    };

    let draft = TaskDraft {
        name: name.trim().to_string(),
        priority,
    };
    match with_board_service(|service| {
        service
            .update_task(task_id, &draft)
            .map_err(|err| err.to_string())
    }) {
        Ok(task) => BoardActionResponse::success("Task updated.", task.id.to_string()),
        Err(err) => BoardActionResponse::failure(format!("board_update_task failed: {err}")),
    }
}

/// Deletes a task by ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_task(id: String) -> BoardActionResponse {
    let Ok(task_id) = Uuid::parse_str(id.trim()) else {
        return BoardActionResponse::failure(format!("invalid task id `{id}`"));
    };

    match with_board_service(|service| {
        service.delete_task(task_id).map_err(|err| err.to_string())
    }) {
        Ok(()) => BoardActionResponse::success("Task deleted.", task_id.to_string()),
        Err(err) => BoardActionResponse::failure(format!("board_delete_task failed: {err}")),
    }
}

/// Creates an automation rule from form input.
///
/// Token semantics mirror the persisted wire format:
/// - `field`: `name|priority|createdAt`
/// - `operator`: `contains|equals|greaterThan|lessThan`
/// - `action_kind`: `highlight|move|warn`
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_rule(
    field: String,
    operator: String,
    value: String,
    action_kind: String,
    action_value: String,
) -> BoardActionResponse {
    let Some(field) = ConditionField::parse(field.trim()) else {
        return BoardActionResponse::failure(format!("unknown condition field `{field}`"));
    };
    let Some(operator) = ConditionOperator::parse(operator.trim()) else {
        return BoardActionResponse::failure(format!("unknown condition operator `{operator}`"));
    };
    let Some(kind) = ActionKind::parse(action_kind.trim()) else {
        return BoardActionResponse::failure(format!("unknown action kind `{action_kind}`"));
    };

    let draft = RuleDraft {
        condition: Condition {
            field,
            operator,
            value: value.trim().to_string(),
        },
        action: Action {
            kind,
            value: action_value.trim().to_string(),
        },
    };
    match with_board_service(|service| {
        service.add_rule(&draft).map_err(|err| err.to_string())
    }) {
        Ok(rule) => BoardActionResponse::success("Rule created.", rule.id.to_string()),
        Err(err) => BoardActionResponse::failure(format!("board_add_rule failed: {err}")),
    }
}

/// Deletes a rule by ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_rule(id: String) -> BoardActionResponse {
    let Ok(rule_id) = Uuid::parse_str(id.trim()) else {
        return BoardActionResponse::failure(format!("invalid rule id `{id}`"));
    };

    match with_board_service(|service| {
        service.delete_rule(rule_id).map_err(|err| err.to_string())
    }) {
        Ok(()) => BoardActionResponse::success("Rule deleted.", rule_id.to_string()),
        Err(err) => BoardActionResponse::failure(format!("board_delete_rule failed: {err}")),
    }
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TASKDECK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(BOARD_DB_FILE_NAME)
        })
        .clone()
}

fn with_board_service<T>(
    f: impl FnOnce(&BoardService<SqliteBoardRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_board_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("board DB open failed: {err}"))?;
    let repo = SqliteBoardRepository::new(&conn);
    let service = BoardService::new(repo);
    f(&service)
}
