use rusqlite::Connection;
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    Action, ActionKind, BoardService, BoardServiceError, Condition, ConditionField,
    ConditionOperator, Priority, RuleDraft, SqliteBoardRepository, TaskDraft,
};
use uuid::Uuid;

fn service(conn: &Connection) -> BoardService<SqliteBoardRepository<'_>> {
    BoardService::new(SqliteBoardRepository::new(conn))
}

fn draft(name: &str, priority: Priority) -> TaskDraft {
    TaskDraft {
        name: name.to_string(),
        priority,
    }
}

fn rule_draft(
    field: ConditionField,
    operator: ConditionOperator,
    value: &str,
    kind: ActionKind,
    action_value: &str,
) -> RuleDraft {
    RuleDraft {
        condition: Condition {
            field,
            operator,
            value: value.to_string(),
        },
        action: Action {
            kind,
            value: action_value.to_string(),
        },
    }
}

#[test]
fn add_task_assigns_identity_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.add_task(&draft("write docs", Priority::Medium)).unwrap();

    assert!(!created.id.is_nil());
    assert!(created.created_at_utc().is_some());

    let listed = service.list_tasks().unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn add_task_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.add_task(&draft("   ", Priority::Low)).unwrap_err();
    assert!(matches!(err, BoardServiceError::InvalidTask(_)));
    assert!(service.list_tasks().unwrap().is_empty());
}

#[test]
fn update_task_preserves_id_and_created_at() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.add_task(&draft("rough draft", Priority::Low)).unwrap();
    let updated = service
        .update_task(created.id, &draft("final draft", Priority::High))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "final draft");
    assert_eq!(updated.priority, Priority::High);

    assert_eq!(service.list_tasks().unwrap(), vec![updated]);
}

#[test]
fn update_unknown_task_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let missing = Uuid::new_v4();
    let err = service
        .update_task(missing, &draft("anything", Priority::Low))
        .unwrap_err();
    match err {
        BoardServiceError::TaskNotFound(id) => assert_eq!(id, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn delete_task_removes_only_the_target() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let keep = service.add_task(&draft("keep", Priority::Low)).unwrap();
    let remove = service.add_task(&draft("remove", Priority::Low)).unwrap();

    service.delete_task(remove.id).unwrap();

    let remaining = service.list_tasks().unwrap();
    assert_eq!(remaining, vec![keep]);

    let err = service.delete_task(remove.id).unwrap_err();
    assert!(matches!(err, BoardServiceError::TaskNotFound(_)));
}

#[test]
fn add_rule_rejects_blank_condition_value() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service
        .add_rule(&rule_draft(
            ConditionField::Name,
            ConditionOperator::Contains,
            " ",
            ActionKind::Highlight,
            "#FF0000",
        ))
        .unwrap_err();
    assert!(matches!(err, BoardServiceError::InvalidRule(_)));
}

#[test]
fn delete_rule_removes_only_the_target() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let keep = service
        .add_rule(&rule_draft(
            ConditionField::Priority,
            ConditionOperator::Equals,
            "high",
            ActionKind::Highlight,
            "#FF0000",
        ))
        .unwrap();
    let remove = service
        .add_rule(&rule_draft(
            ConditionField::Name,
            ConditionOperator::Contains,
            "old",
            ActionKind::Warn,
            "stale",
        ))
        .unwrap();

    service.delete_rule(remove.id).unwrap();
    assert_eq!(service.list_rules().unwrap(), vec![keep]);

    let err = service.delete_rule(remove.id).unwrap_err();
    assert!(matches!(err, BoardServiceError::RuleNotFound(_)));
}

#[test]
fn board_view_filters_by_name_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_task(&draft("Urgent deploy", Priority::High)).unwrap();
    service.add_task(&draft("water plants", Priority::Low)).unwrap();

    let view = service.board_view("URGENT").unwrap();
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].task.name, "Urgent deploy");

    // Stats stay unfiltered so banners do not flicker while searching.
    assert_eq!(view.stats.total_tasks, 2);
    assert_eq!(view.stats.high_priority_count, 1);

    let everything = service.board_view("").unwrap();
    assert_eq!(everything.tasks.len(), 2);
}

#[test]
fn board_view_orders_tasks_by_rules() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_task(&draft("low chore", Priority::Low)).unwrap();
    service.add_task(&draft("high ticket", Priority::High)).unwrap();
    service.add_task(&draft("pinned note", Priority::Medium)).unwrap();

    service
        .add_rule(&rule_draft(
            ConditionField::Name,
            ConditionOperator::Contains,
            "pinned",
            ActionKind::Move,
            "",
        ))
        .unwrap();

    let view = service.board_view("").unwrap();
    let names: Vec<&str> = view.tasks.iter().map(|entry| entry.task.name.as_str()).collect();
    assert_eq!(names, vec!["pinned note", "high ticket", "low chore"]);
    assert!(view.tasks[0].decorations.moved_to_top);
}

#[test]
fn board_view_decorations_use_first_highlight_and_all_warnings() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    service.add_task(&draft("audit logs", Priority::High)).unwrap();

    service
        .add_rule(&rule_draft(
            ConditionField::Priority,
            ConditionOperator::Equals,
            "high",
            ActionKind::Highlight,
            "#FF0000",
        ))
        .unwrap();
    service
        .add_rule(&rule_draft(
            ConditionField::Name,
            ConditionOperator::Contains,
            "audit",
            ActionKind::Highlight,
            "#00FF00",
        ))
        .unwrap();
    service
        .add_rule(&rule_draft(
            ConditionField::Name,
            ConditionOperator::Contains,
            "logs",
            ActionKind::Warn,
            "check retention",
        ))
        .unwrap();
    service
        .add_rule(&rule_draft(
            ConditionField::Priority,
            ConditionOperator::Equals,
            "high",
            ActionKind::Warn,
            "needs an owner",
        ))
        .unwrap();

    let view = service.board_view("").unwrap();
    let decorations = &view.tasks[0].decorations;

    assert_eq!(decorations.highlight_color.as_deref(), Some("#FF0000"));
    assert_eq!(
        decorations.warnings,
        vec!["check retention".to_string(), "needs an owner".to_string()]
    );

    // Two highlights on one task is exactly the conflict the banner reports.
    assert!(view.rule_conflicts);
}

#[test]
fn high_priority_warning_uses_strict_threshold() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for index in 0..3 {
        service
            .add_task(&draft(&format!("high {index}"), Priority::High))
            .unwrap();
    }
    let at_threshold = service.board_view("").unwrap();
    assert_eq!(at_threshold.stats.high_priority_count, 3);
    assert!(!at_threshold.high_priority_warning);

    service.add_task(&draft("high 3", Priority::High)).unwrap();
    let above_threshold = service.board_view("").unwrap();
    assert_eq!(above_threshold.stats.high_priority_count, 4);
    assert!(above_threshold.high_priority_warning);
}

#[test]
fn board_view_of_empty_board_is_quiet() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let view = service.board_view("anything").unwrap();
    assert!(view.tasks.is_empty());
    assert_eq!(view.stats.total_tasks, 0);
    assert_eq!(view.stats.active_rules, 0);
    assert!(!view.high_priority_warning);
    assert!(!view.rule_conflicts);
}
