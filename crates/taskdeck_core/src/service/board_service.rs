//! Board use-case service.
//!
//! # Responsibility
//! - Provide task/rule create, update and delete entry points.
//! - Assemble the render-ready board view: search filter, rule-driven
//!   ordering, per-task decorations, stats and warning banners.
//!
//! # Invariants
//! - `id` and `created_at` are never changed by updates.
//! - Rules have no update path; they are created and deleted only.
//! - Every mutation replaces the whole persisted collection.
//! - Highlight reconciliation (first wins) is rendering policy and lives
//!   here, not in the engine.

use crate::engine::{apply_rules, has_conflicts, sort_by_rules};
use crate::model::rule::{Action, ActionKind, Condition, Rule, RuleId, RuleValidationError};
use crate::model::task::{Priority, Task, TaskId, TaskValidationError};
use crate::repo::board_repo::{BoardRepository, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// High-priority task count above which the attention banner shows.
pub const HIGH_PRIORITY_WARNING_THRESHOLD: usize = 3;

/// Service error for board use-cases.
#[derive(Debug)]
pub enum BoardServiceError {
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Target rule does not exist.
    RuleNotFound(RuleId),
    /// Task input rejected before persistence.
    InvalidTask(TaskValidationError),
    /// Rule input rejected before persistence.
    InvalidRule(RuleValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::RuleNotFound(id) => write!(f, "rule not found: {id}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
            Self::InvalidRule(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTask(err) => Some(err),
            Self::InvalidRule(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::TaskNotFound(_) | Self::RuleNotFound(_) => None,
        }
    }
}

impl From<RepoError> for BoardServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TaskValidation(err) => Self::InvalidTask(err),
            RepoError::RuleValidation(err) => Self::InvalidRule(err),
            other => Self::Repo(other),
        }
    }
}

/// Input shape for task create/update; identity fields are service-owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub priority: Priority,
}

/// Input shape for rule creation; the id is service-owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub condition: Condition,
    pub action: Action,
}

/// Presentation effects the rules produce for one task card.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDecorations {
    /// Color token of the first matching highlight action, if any.
    pub highlight_color: Option<String>,
    /// Whether any move-to-top action matched.
    pub moved_to_top: bool,
    /// Messages of every matching warn action, in rule order.
    pub warnings: Vec<String>,
}

/// One display-ordered task with its decorations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub task: Task,
    pub decorations: TaskDecorations,
}

/// Collection counters shown in the board header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub total_tasks: usize,
    pub high_priority_count: usize,
    pub active_rules: usize,
}

/// Render-ready board projection.
///
/// `tasks` reflects the search filter and rule-driven order; stats and the
/// warning flags are always computed over the unfiltered collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub tasks: Vec<TaskView>,
    pub stats: BoardStats,
    pub high_priority_warning: bool,
    pub rule_conflicts: bool,
}

/// Computes the presentation effects of `rules` for one task.
///
/// Multiple highlights reconcile to the first match; warn messages are
/// kept in full, in rule order.
pub fn decorate_task(task: &Task, rules: &[Rule]) -> TaskDecorations {
    let actions = apply_rules(task, rules);

    TaskDecorations {
        highlight_color: actions
            .iter()
            .find(|action| action.kind == ActionKind::Highlight)
            .map(|action| action.value.clone()),
        moved_to_top: actions.iter().any(|action| action.kind == ActionKind::Move),
        warnings: actions
            .iter()
            .filter(|action| action.kind == ActionKind::Warn)
            .map(|action| action.value.clone())
            .collect(),
    }
}

/// Filters tasks by case-insensitive name substring.
///
/// An empty query selects every task.
pub fn filter_tasks_by_name(tasks: &[Task], query: &str) -> Vec<Task> {
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|task| task.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Board service facade over repository implementations.
pub struct BoardService<R: BoardRepository> {
    repo: R,
}

impl<R: BoardRepository> BoardService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a task, assigning its id and creation timestamp.
    pub fn add_task(&self, draft: &TaskDraft) -> Result<Task, BoardServiceError> {
        let task = Task::new(draft.name.clone(), draft.priority);
        task.validate().map_err(BoardServiceError::InvalidTask)?;

        let mut tasks = self.repo.load_tasks()?;
        tasks.push(task.clone());
        self.repo.save_tasks(&tasks)?;
        Ok(task)
    }

    /// Replaces the name and priority of an existing task.
    ///
    /// `id` and `created_at` are immutable and carried over unchanged.
    pub fn update_task(&self, id: TaskId, draft: &TaskDraft) -> Result<Task, BoardServiceError> {
        let mut tasks = self.repo.load_tasks()?;
        let Some(existing) = tasks.iter_mut().find(|task| task.id == id) else {
            return Err(BoardServiceError::TaskNotFound(id));
        };

        existing.name = draft.name.clone();
        existing.priority = draft.priority;
        existing
            .validate()
            .map_err(BoardServiceError::InvalidTask)?;
        let updated = existing.clone();

        self.repo.save_tasks(&tasks)?;
        Ok(updated)
    }

    /// Deletes a task by id.
    pub fn delete_task(&self, id: TaskId) -> Result<(), BoardServiceError> {
        let tasks = self.repo.load_tasks()?;
        let before = tasks.len();
        let remaining: Vec<Task> = tasks.into_iter().filter(|task| task.id != id).collect();
        if remaining.len() == before {
            return Err(BoardServiceError::TaskNotFound(id));
        }
        self.repo.save_tasks(&remaining)?;
        Ok(())
    }

    /// Creates a rule, assigning its id.
    pub fn add_rule(&self, draft: &RuleDraft) -> Result<Rule, BoardServiceError> {
        let rule = Rule::new(draft.condition.clone(), draft.action.clone());
        rule.validate().map_err(BoardServiceError::InvalidRule)?;

        let mut rules = self.repo.load_rules()?;
        rules.push(rule.clone());
        self.repo.save_rules(&rules)?;
        Ok(rule)
    }

    /// Deletes a rule by id.
    pub fn delete_rule(&self, id: RuleId) -> Result<(), BoardServiceError> {
        let rules = self.repo.load_rules()?;
        let before = rules.len();
        let remaining: Vec<Rule> = rules.into_iter().filter(|rule| rule.id != id).collect();
        if remaining.len() == before {
            return Err(BoardServiceError::RuleNotFound(id));
        }
        self.repo.save_rules(&remaining)?;
        Ok(())
    }

    /// Lists tasks in insertion order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, BoardServiceError> {
        Ok(self.repo.load_tasks()?)
    }

    /// Lists rules in insertion order.
    pub fn list_rules(&self) -> Result<Vec<Rule>, BoardServiceError> {
        Ok(self.repo.load_rules()?)
    }

    /// Assembles the render-ready board view.
    ///
    /// The search filter applies before sorting; stats and warning flags
    /// are computed over the unfiltered collections so banners do not
    /// disappear while searching.
    pub fn board_view(&self, search: &str) -> Result<BoardView, BoardServiceError> {
        let tasks = self.repo.load_tasks()?;
        let rules = self.repo.load_rules()?;

        let filtered = filter_tasks_by_name(&tasks, search);
        let ordered = sort_by_rules(&filtered, &rules);
        let views = ordered
            .into_iter()
            .map(|task| {
                let decorations = decorate_task(&task, &rules);
                TaskView { task, decorations }
            })
            .collect();

        let high_priority_count = tasks
            .iter()
            .filter(|task| task.priority == Priority::High)
            .count();

        Ok(BoardView {
            tasks: views,
            stats: BoardStats {
                total_tasks: tasks.len(),
                high_priority_count,
                active_rules: rules.len(),
            },
            high_priority_warning: high_priority_count > HIGH_PRIORITY_WARNING_THRESHOLD,
            rule_conflicts: has_conflicts(&tasks, &rules),
        })
    }
}
