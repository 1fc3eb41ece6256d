//! Pure rule-evaluation and task-ordering engine.
//!
//! # Responsibility
//! - Match rule conditions against task fields.
//! - Collect the actions of matching rules per task.
//! - Detect conflicting highlight rules and compute the display order.
//!
//! # Invariants
//! - Every operation is a pure function: no mutation of inputs, no
//!   side effects, no error channel.
//! - Inputs that do not fit an expected case (unknown field/operator
//!   pairing, malformed timestamp) resolve to no-match, never a fault.

mod rules;

pub use rules::{
    apply_rules, condition_matches, has_conflicts, parse_timestamp, sort_by_rules,
};
