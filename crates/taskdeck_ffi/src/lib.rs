//! UI-facing FFI crate for TaskDeck.
//!
//! # Responsibility
//! - Re-export the use-case API surface consumed by the UI shell.

pub mod api;
