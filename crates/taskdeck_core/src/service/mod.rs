//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and engine evaluation into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod board_service;
