//! Automation rule domain model.
//!
//! # Responsibility
//! - Define the condition/action pair evaluated by the rule engine.
//! - Keep wire tokens aligned with the persisted flat-list format.
//!
//! # Invariants
//! - `id` is stable and never reused for another rule.
//! - Rules are immutable once created; the only mutations are collection
//!   append and delete.
//! - Any field/operator combination is representable; semantically
//!   meaningless pairs are legal data that simply never match.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a rule record.
pub type RuleId = Uuid;

/// Task field a condition inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionField {
    Name,
    Priority,
    CreatedAt,
}

impl ConditionField {
    /// Parses a camelCase wire token back into a field selector.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "priority" => Some(Self::Priority),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Comparison applied between a task field and the condition value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOperator {
    Contains,
    Equals,
    GreaterThan,
    LessThan,
}

impl ConditionOperator {
    /// Parses a camelCase wire token back into an operator.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contains" => Some(Self::Contains),
            "equals" => Some(Self::Equals),
            "greaterThan" => Some(Self::GreaterThan),
            "lessThan" => Some(Self::LessThan),
            _ => None,
        }
    }
}

/// Condition triple evaluated against one task.
///
/// `value` is interpreted contextually by `field`: plain text for `name`,
/// a lowercase priority token for `priority`, a timestamp string for
/// `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: ConditionField,
    pub operator: ConditionOperator,
    pub value: String,
}

/// What a matching rule does to a task's presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Decorate the task card with a color token.
    Highlight,
    /// Move the task to the top of the display order.
    Move,
    /// Attach a warning message to the task card.
    Warn,
}

impl ActionKind {
    /// Parses a lowercase wire token back into an action kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "highlight" => Some(Self::Highlight),
            "move" => Some(Self::Move),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Action pair produced by a matching rule.
///
/// `value` is interpreted contextually by `kind`: a color token for
/// highlight, unused/empty for move, a message string for warn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Serialized as `type` to match the persisted wire schema.
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub value: String,
}

/// Validation error for rule write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValidationError {
    /// Condition value is empty after trimming.
    EmptyConditionValue,
    /// Rule ID is the nil UUID.
    NilId,
}

impl Display for RuleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyConditionValue => write!(f, "rule condition value must not be empty"),
            Self::NilId => write!(f, "rule id must not be the nil uuid"),
        }
    }
}

impl Error for RuleValidationError {}

/// Canonical automation rule record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable global ID used for collection replacement and deletion.
    pub id: RuleId,
    pub condition: Condition,
    pub action: Action,
}

impl Rule {
    /// Creates a new rule with a generated stable ID.
    pub fn new(condition: Condition, action: Action) -> Self {
        Self::with_id(Uuid::new_v4(), condition, action)
    }

    /// Creates a rule with a caller-provided stable ID.
    ///
    /// Used by import/test paths. Does not validate; see [`Rule::validate`].
    pub fn with_id(id: RuleId, condition: Condition, action: Action) -> Self {
        Self {
            id,
            condition,
            action,
        }
    }

    /// Checks the minimal structural shape enforced before persistence.
    ///
    /// This mirrors what the rule form rejects upstream; deeper semantic
    /// checks are deliberately absent because meaningless field/operator
    /// pairs are defined to evaluate to no-match, not to be errors.
    ///
    /// # Errors
    /// - [`RuleValidationError::EmptyConditionValue`] when the condition
    ///   value is blank.
    /// - [`RuleValidationError::NilId`] when the ID is the nil UUID.
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        if self.id.is_nil() {
            return Err(RuleValidationError::NilId);
        }
        if self.condition.value.trim().is_empty() {
            return Err(RuleValidationError::EmptyConditionValue);
        }
        Ok(())
    }
}
