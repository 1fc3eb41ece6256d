use taskdeck_core::{
    Action, ActionKind, Condition, ConditionField, ConditionOperator, Rule, RuleValidationError,
};
use uuid::Uuid;

fn sample_rule(id: Uuid) -> Rule {
    Rule::with_id(
        id,
        Condition {
            field: ConditionField::CreatedAt,
            operator: ConditionOperator::GreaterThan,
            value: "2024-01-01".to_string(),
        },
        Action {
            kind: ActionKind::Warn,
            value: "getting old".to_string(),
        },
    )
}

#[test]
fn rule_new_assigns_identity() {
    let rule = Rule::new(
        Condition {
            field: ConditionField::Name,
            operator: ConditionOperator::Contains,
            value: "urgent".to_string(),
        },
        Action {
            kind: ActionKind::Highlight,
            value: "#FF0000".to_string(),
        },
    );
    assert!(!rule.id.is_nil());
}

#[test]
fn rule_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();
    let rule = sample_rule(id);

    let json = serde_json::to_value(&rule).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["condition"]["field"], "createdAt");
    assert_eq!(json["condition"]["operator"], "greaterThan");
    assert_eq!(json["condition"]["value"], "2024-01-01");
    assert_eq!(json["action"]["type"], "warn");
    assert_eq!(json["action"]["value"], "getting old");

    let decoded: Rule = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, rule);
}

#[test]
fn wire_tokens_parse_back_to_variants() {
    assert_eq!(ConditionField::parse("name"), Some(ConditionField::Name));
    assert_eq!(
        ConditionField::parse("priority"),
        Some(ConditionField::Priority)
    );
    assert_eq!(
        ConditionField::parse("createdAt"),
        Some(ConditionField::CreatedAt)
    );
    assert_eq!(ConditionField::parse("createdat"), None);

    assert_eq!(
        ConditionOperator::parse("contains"),
        Some(ConditionOperator::Contains)
    );
    assert_eq!(
        ConditionOperator::parse("equals"),
        Some(ConditionOperator::Equals)
    );
    assert_eq!(
        ConditionOperator::parse("greaterThan"),
        Some(ConditionOperator::GreaterThan)
    );
    assert_eq!(
        ConditionOperator::parse("lessThan"),
        Some(ConditionOperator::LessThan)
    );
    assert_eq!(ConditionOperator::parse("greaterthan"), None);

    assert_eq!(ActionKind::parse("highlight"), Some(ActionKind::Highlight));
    assert_eq!(ActionKind::parse("move"), Some(ActionKind::Move));
    assert_eq!(ActionKind::parse("warn"), Some(ActionKind::Warn));
    assert_eq!(ActionKind::parse("delete"), None);
}

#[test]
fn validate_rejects_blank_condition_value() {
    let mut rule = sample_rule(Uuid::new_v4());
    rule.condition.value = "  ".to_string();
    assert_eq!(
        rule.validate().unwrap_err(),
        RuleValidationError::EmptyConditionValue
    );
}

#[test]
fn validate_rejects_nil_id() {
    let rule = sample_rule(Uuid::nil());
    assert_eq!(rule.validate().unwrap_err(), RuleValidationError::NilId);
}

#[test]
fn meaningless_field_operator_pairs_are_representable() {
    // greaterThan on name is legal data; it just never matches.
    let rule = Rule::new(
        Condition {
            field: ConditionField::Name,
            operator: ConditionOperator::GreaterThan,
            value: "alpha".to_string(),
        },
        Action {
            kind: ActionKind::Move,
            value: String::new(),
        },
    );
    assert!(rule.validate().is_ok());
}
