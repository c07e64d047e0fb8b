//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository loads, engine passes and report rendering.
//! - Keep the CLI decoupled from storage and engine details.

pub mod library_service;
