//! Condition matching, rule application, conflict detection and sorting.
//!
//! # Responsibility
//! - Provide the four engine operations consumed by the board service and
//!   the UI shell.
//!
//! # Invariants
//! - `apply_rules` preserves rule-collection order and never deduplicates.
//! - `sort_by_rules` is a stable permutation of its input.
//! - Only highlight multiplicity counts as a conflict.

use crate::model::rule::{Action, ActionKind, Condition, ConditionField, ConditionOperator, Rule};
use crate::model::task::Task;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses a timestamp string with the leniency the condition language needs.
///
/// Accepted shapes, tried in order:
/// - RFC 3339 with offset (`2024-06-01T00:00:00.000Z`),
/// - naive datetime without offset (`2024-06-01T09:30:00`), read as UTC,
/// - bare date (`2024-01-01`), read as UTC midnight.
///
/// Returns `None` for anything else; matching treats that as no-match.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Evaluates one condition against one task.
///
/// The supported field/operator pairs:
///
/// | field       | operator      | semantics                                  |
/// |-------------|---------------|--------------------------------------------|
/// | `name`      | `contains`    | case-sensitive substring                   |
/// | `name`      | `equals`      | exact string equality                      |
/// | `priority`  | `equals`      | string equality against the lowercase token|
/// | `createdAt` | `greaterThan` | task timestamp strictly later              |
/// | `createdAt` | `lessThan`    | task timestamp strictly earlier            |
///
/// Every other pairing is legal input that evaluates to `false`, and a
/// timestamp that fails to parse on either side also evaluates to `false`.
pub fn condition_matches(task: &Task, condition: &Condition) -> bool {
    match (condition.field, condition.operator) {
        (ConditionField::Name, ConditionOperator::Contains) => {
            task.name.contains(condition.value.as_str())
        }
        (ConditionField::Name, ConditionOperator::Equals) => task.name == condition.value,
        (ConditionField::Priority, ConditionOperator::Equals) => {
            task.priority.as_str() == condition.value
        }
        (ConditionField::CreatedAt, ConditionOperator::GreaterThan) => {
            match (task.created_at_utc(), parse_timestamp(&condition.value)) {
                (Some(created), Some(bound)) => created > bound,
                _ => false,
            }
        }
        (ConditionField::CreatedAt, ConditionOperator::LessThan) => {
            match (task.created_at_utc(), parse_timestamp(&condition.value)) {
                (Some(created), Some(bound)) => created < bound,
                _ => false,
            }
        }
        // Remaining pairings (e.g. greaterThan on name) are defined to
        // evaluate to no-match, not to be errors.
        _ => false,
    }
}

/// Collects the actions of every rule whose condition matches `task`.
///
/// Actions come back in rule-collection order and are never deduplicated:
/// a task matching three highlight rules yields three highlight actions.
/// Downstream consumers decide how to reconcile multiplicity.
pub fn apply_rules<'a>(task: &Task, rules: &'a [Rule]) -> Vec<&'a Action> {
    rules
        .iter()
        .filter(|rule| condition_matches(task, &rule.condition))
        .map(|rule| &rule.action)
        .collect()
}

/// Reports whether any task receives more than one highlight action.
///
/// Existential check only: the caller gets a banner flag, not a diagnosis
/// of which tasks or rules collide. Move and warn multiplicity never count
/// as conflicts.
pub fn has_conflicts(tasks: &[Task], rules: &[Rule]) -> bool {
    tasks.iter().any(|task| {
        apply_rules(task, rules)
            .iter()
            .filter(|action| action.kind == ActionKind::Highlight)
            .count()
            > 1
    })
}

/// Computes the display order for `tasks` under `rules`.
///
/// Primary key: tasks with at least one move-to-top action sort first.
/// Secondary key: priority rank ascending (`high = 0, medium = 1, low = 2`).
/// The sort is stable, so equal-key tasks keep their input order.
///
/// Returns a new ordered collection; the input and every task field are
/// left untouched. "Move to top" is a display effect only.
pub fn sort_by_rules(tasks: &[Task], rules: &[Rule]) -> Vec<Task> {
    let mut keyed: Vec<((bool, u8), &Task)> = tasks
        .iter()
        .map(|task| {
            let moved = apply_rules(task, rules)
                .iter()
                .any(|action| action.kind == ActionKind::Move);
            // `false < true`, so negate to sort move-flagged tasks first.
            ((!moved, task.priority.rank()), task)
        })
        .collect();

    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, task)| task.clone()).collect()
}
