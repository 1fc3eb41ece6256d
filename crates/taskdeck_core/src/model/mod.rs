//! Domain model for tasks and automation rules.
//!
//! # Responsibility
//! - Define canonical data structures used by the rule engine and services.
//! - Keep wire-format naming compatible with the persisted flat lists.
//!
//! # Invariants
//! - Every domain object is identified by a stable UUID.
//! - Tasks and rules are value records; collections are replaced whole,
//!   never edited in place.

pub mod rule;
pub mod task;
