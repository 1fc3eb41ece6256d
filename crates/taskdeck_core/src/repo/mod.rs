//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define whole-collection load/save contracts for board state.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Write paths validate every record before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod board_repo;
